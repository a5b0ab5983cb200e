//! The response-risk gate.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::constants;
use crate::config::GuardrailConfig;
use crate::error::{EstimatorError, Result};
use crate::traits::{AuditLedger, FallbackContext, FallbackProvider, VadEstimator};
use crate::types::{
    AlertType, AppraisalRecord, GuardrailAlert, InteractionId, TriggeringData, UserId,
    VadEstimate,
};

/// Request-path context for a gate decision.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// The user who will see the response.
    pub user_id: UserId,
    /// The conversation session.
    pub session_id: Uuid,
    /// The interaction producing the candidate response.
    pub interaction_id: InteractionId,
    /// Upstream mood estimate for the user, in [0, 1].
    pub mood_estimate: f32,
    /// Upstream stress estimate for the user, in [0, 1].
    pub stress_estimate: f32,
}

/// Outcome of a gate check.
///
/// `final_text` is always safe to show: the candidate itself when
/// `passed`, a pre-approved fallback otherwise.
#[derive(Debug, Clone)]
pub struct GateDecision {
    /// Whether the candidate passed both checks.
    pub passed: bool,
    /// The text to deliver to the user.
    pub final_text: String,
    /// The alert emitted when a check fired. `None` on pass, and also on
    /// fail-closed errors (the error occurred before an alert could be
    /// constructed).
    pub alert: Option<GuardrailAlert>,
}

/// Synchronous safety gate over candidate assistant responses.
///
/// Checks run in severity order and short-circuit: well-being first (the
/// higher-severity risk class), manipulation only if well-being passed.
/// Once a response is going to be blocked there is nothing to gain from
/// the second check.
///
/// # Failure Behavior
///
/// - Estimator error or timeout: fail closed as a well-being risk; the
///   fallback is returned and no ledger write is attempted
/// - Fallback lookup error: the hardcoded in-process default utterance
/// - Alert ledger write error: logged, decision unchanged
pub struct GuardrailGate {
    estimator: Arc<dyn VadEstimator>,
    fallback: Arc<dyn FallbackProvider>,
    ledger: Arc<dyn AuditLedger>,
    config: GuardrailConfig,
}

impl GuardrailGate {
    /// Create a gate, validating configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid configuration. Fatal at startup.
    pub fn new(
        estimator: Arc<dyn VadEstimator>,
        fallback: Arc<dyn FallbackProvider>,
        ledger: Arc<dyn AuditLedger>,
        config: GuardrailConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            estimator,
            fallback,
            ledger,
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }

    /// Check a candidate response before it reaches the user.
    ///
    /// Never returns an error: every failure mode resolves to a decision,
    /// and an internal failure resolves to a blocked one.
    pub async fn check(&self, candidate_text: &str, ctx: &ResponseContext) -> GateDecision {
        // Well-being first: the higher-severity risk class.
        let (estimate, breached) = match self.wellbeing_estimate().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    user_id = %ctx.user_id,
                    interaction_id = %ctx.interaction_id,
                    error = %e,
                    "VAD estimation failed; failing closed as wellbeing risk"
                );
                let final_text = self.fallback_text(ctx).await;
                return GateDecision {
                    passed: false,
                    final_text,
                    alert: None,
                };
            }
        };

        if !breached.is_empty() {
            let data = TriggeringData::WellbeingThresholds { breached, estimate };
            return self
                .block(candidate_text, ctx, AlertType::WellbeingRisk, data)
                .await;
        }

        let matched = self.manipulation_matches(candidate_text);
        if !matched.is_empty() {
            let data = TriggeringData::ManipulationPatterns {
                matched_patterns: matched,
            };
            return self
                .block(candidate_text, ctx, AlertType::ManipulationRisk, data)
                .await;
        }

        debug!(
            user_id = %ctx.user_id,
            interaction_id = %ctx.interaction_id,
            "candidate passed guardrail checks"
        );
        GateDecision {
            passed: true,
            final_text: candidate_text.to_string(),
            alert: None,
        }
    }

    /// Run the estimator under the configured deadline and compare against
    /// the three affect thresholds. Returns the estimate and the list of
    /// breached-threshold labels (empty when the candidate is acceptable).
    async fn wellbeing_estimate(&self) -> Result<(VadEstimate, Vec<String>)> {
        let appraisal = AppraisalRecord::for_candidate_response();
        let timeout_ms = self.config.estimator_timeout.as_millis() as u64;

        let estimate = tokio::time::timeout(
            self.config.estimator_timeout,
            self.estimator
                .estimate(&appraisal, &[], self.config.sentiment_proxy),
        )
        .await
        .map_err(|_| EstimatorError::Timeout { timeout_ms })??;

        let mut breached = Vec::new();
        if estimate.valence < self.config.valence_min {
            breached.push(format!("Valence < {}", self.config.valence_min));
        }
        if estimate.arousal > self.config.arousal_max {
            breached.push(format!("Arousal > {}", self.config.arousal_max));
        }
        if estimate.dominance < self.config.dominance_min {
            breached.push(format!("Dominance < {}", self.config.dominance_min));
        }
        Ok((estimate, breached))
    }

    /// Case-insensitive substring scan of the candidate against the
    /// configured phrase set. Returns every matched phrase.
    fn manipulation_matches(&self, candidate_text: &str) -> Vec<String> {
        let lowered = candidate_text.to_lowercase();
        self.config
            .manipulation_phrases
            .iter()
            .filter(|phrase| lowered.contains(phrase.to_lowercase().as_str()))
            .cloned()
            .collect()
    }

    /// Emit the alert (best-effort) and return the blocked decision.
    async fn block(
        &self,
        candidate_text: &str,
        ctx: &ResponseContext,
        alert_type: AlertType,
        triggering_data: TriggeringData,
    ) -> GateDecision {
        let alert = GuardrailAlert::new(
            ctx.user_id,
            ctx.interaction_id,
            alert_type,
            triggering_data,
            candidate_text,
            self.config.snippet_max_chars,
        );
        warn!(
            user_id = %ctx.user_id,
            interaction_id = %ctx.interaction_id,
            alert_type = %alert_type,
            "candidate response blocked"
        );

        if let Err(e) = self.ledger.append_alert(&alert).await {
            warn!(
                interaction_id = %ctx.interaction_id,
                error = %e,
                "alert ledger write failed; decision unchanged"
            );
        }

        let final_text = self.fallback_text(ctx).await;
        GateDecision {
            passed: false,
            final_text,
            alert: Some(alert),
        }
    }

    /// Fetch the pre-approved fallback utterance, substituting the
    /// in-process default when the lookup itself fails.
    async fn fallback_text(&self, ctx: &ResponseContext) -> String {
        let fallback_ctx = FallbackContext {
            user_id: ctx.user_id,
            session_id: ctx.session_id,
            user_message: None,
        };
        match self
            .fallback
            .get(&self.config.fallback_template_id, &fallback_ctx)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    template_id = %self.config.fallback_template_id,
                    error = %e,
                    "fallback lookup failed; using in-process default"
                );
                constants::guardrail::DEFAULT_FALLBACK_UTTERANCE.to_string()
            }
        }
    }
}
