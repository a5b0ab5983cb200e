//! Configuration for the Guardrail Gate and Learning Engine.
//!
//! Both components take immutable config at construction rather than
//! reading hidden globals, so alternate threshold/rule sets can be injected
//! per environment and tests stay deterministic. Validation failures are
//! fatal at startup (`validate()` before wiring anything), never handled
//! per-request.

pub mod constants;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the synchronous response-risk gate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Predicted valence below this is a well-being risk.
    pub valence_min: f32,
    /// Predicted arousal above this is a well-being risk.
    pub arousal_max: f32,
    /// Predicted dominance below this is a well-being risk.
    pub dominance_min: f32,
    /// Sentiment proxy handed to the estimator, in [0, 1].
    pub sentiment_proxy: f32,
    /// Deadline for a single VAD estimation.
    pub estimator_timeout: Duration,
    /// Case-insensitive manipulation/coercion phrases.
    pub manipulation_phrases: Vec<String>,
    /// Template id for the safe substitute utterance.
    pub fallback_template_id: String,
    /// Maximum characters of candidate text carried in an alert.
    pub snippet_max_chars: usize,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            valence_min: constants::guardrail::VALENCE_MIN,
            arousal_max: constants::guardrail::AROUSAL_MAX,
            dominance_min: constants::guardrail::DOMINANCE_MIN,
            sentiment_proxy: constants::guardrail::NEUTRAL_SENTIMENT_PROXY,
            estimator_timeout: constants::guardrail::ESTIMATOR_TIMEOUT,
            manipulation_phrases: constants::guardrail::MANIPULATION_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            fallback_template_id: constants::guardrail::FALLBACK_TEMPLATE_ID.to_string(),
            snippet_max_chars: constants::guardrail::SNIPPET_MAX_CHARS,
        }
    }
}

impl GuardrailConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns the first violation found. Callers treat any error as fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("valence_min", self.valence_min),
            ("dominance_min", self.dominance_min),
        ] {
            if !(-1.0..=0.0).contains(&value) {
                return Err(ConfigError::invalid(field, "must be in [-1.0, 0.0]"));
            }
        }
        if !(0.0..=1.0).contains(&self.arousal_max) {
            return Err(ConfigError::invalid("arousal_max", "must be in [0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&self.sentiment_proxy) {
            return Err(ConfigError::invalid(
                "sentiment_proxy",
                "must be in [0.0, 1.0]",
            ));
        }
        if self.estimator_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "estimator_timeout",
                "must be non-zero",
            ));
        }
        if self.manipulation_phrases.is_empty() {
            return Err(ConfigError::EmptyCollection {
                field: "manipulation_phrases",
            });
        }
        if self.manipulation_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "manipulation_phrases",
                "phrases must be non-empty",
            ));
        }
        if self.snippet_max_chars == 0 {
            return Err(ConfigError::invalid("snippet_max_chars", "must be > 0"));
        }
        Ok(())
    }
}

/// Configuration for the asynchronous feedback learning loop.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Half-width of the symmetric context window, in minutes.
    pub context_window_minutes: i64,
    /// Maximum attachments mutated by a single feedback event.
    pub top_activations: usize,
    /// Activation weight for implicitly activated attachments, in (0, 1).
    pub implicit_activation_weight: f32,
    /// Records pulled per batch when the caller does not say otherwise.
    pub default_batch_size: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            context_window_minutes: constants::learning::CONTEXT_WINDOW_MINUTES,
            top_activations: constants::learning::TOP_ACTIVATIONS,
            implicit_activation_weight: constants::learning::IMPLICIT_ACTIVATION_WEIGHT,
            default_batch_size: constants::learning::DEFAULT_BATCH_SIZE,
        }
    }
}

impl LearningConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns the first violation found. Callers treat any error as fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_window_minutes <= 0 {
            return Err(ConfigError::invalid(
                "context_window_minutes",
                "must be positive",
            ));
        }
        if self.top_activations == 0 {
            return Err(ConfigError::invalid("top_activations", "must be > 0"));
        }
        if !(0.0..1.0).contains(&self.implicit_activation_weight)
            || self.implicit_activation_weight <= 0.0
        {
            return Err(ConfigError::invalid(
                "implicit_activation_weight",
                "must be in (0.0, 1.0)",
            ));
        }
        if self.default_batch_size == 0 {
            return Err(ConfigError::invalid("default_batch_size", "must be > 0"));
        }
        Ok(())
    }

    /// The symmetric context window as a chrono duration.
    #[inline]
    pub fn context_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.context_window_minutes)
    }
}
