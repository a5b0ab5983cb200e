//! Guardrail alerts emitted when a safety check fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::appraisal::VadEstimate;
use super::attachment::UserId;
use super::feedback::InteractionId;

/// Risk class of a failed guardrail check.
///
/// Well-being is the higher-severity class; the gate evaluates it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// The candidate response risks harming the user's emotional state.
    WellbeingRisk,
    /// The candidate response contains manipulation or coercion language.
    ManipulationRisk,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WellbeingRisk => "wellbeing_risk",
            Self::ManipulationRisk => "manipulation_risk",
        };
        write!(f, "{}", s)
    }
}

/// Structured diagnostic payload explaining why a check fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum TriggeringData {
    /// Well-being check: which thresholds were breached, and by what
    /// estimate.
    WellbeingThresholds {
        /// Human-readable breach labels (e.g. `"Valence < -0.85"`).
        breached: Vec<String>,
        /// The estimate that breached them.
        estimate: VadEstimate,
    },
    /// Manipulation check: which configured phrases matched.
    ManipulationPatterns {
        /// The phrases found in the candidate text.
        matched_patterns: Vec<String>,
    },
}

/// Record of a vetoed candidate response.
///
/// Created synchronously by the gate when a check fails; never mutated.
/// Ledger write failures are logged but never change the decision already
/// made about the user-visible response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailAlert {
    /// The user who would have received the candidate response.
    pub user_id: UserId,

    /// The interaction the candidate belonged to.
    pub interaction_id: InteractionId,

    /// Which risk class fired.
    pub alert_type: AlertType,

    /// Why it fired.
    pub triggering_data: TriggeringData,

    /// Truncated candidate text for operator inspection.
    pub candidate_snippet: String,

    /// When the alert was created.
    pub created_at: DateTime<Utc>,
}

impl GuardrailAlert {
    /// Build an alert, truncating the candidate text to `max_chars`.
    pub fn new(
        user_id: UserId,
        interaction_id: InteractionId,
        alert_type: AlertType,
        triggering_data: TriggeringData,
        candidate_text: &str,
        max_chars: usize,
    ) -> Self {
        Self {
            user_id,
            interaction_id,
            alert_type,
            triggering_data,
            candidate_snippet: truncate_chars(candidate_text, max_chars),
            created_at: Utc::now(),
        }
    }
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
