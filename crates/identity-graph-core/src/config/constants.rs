//! Centralized constants for the safety and learning pipeline.
//!
//! All thresholds and cutoffs that would otherwise be magic numbers live
//! here, grouped by the component that owns them. Config structs in the
//! parent module take these as their defaults; tests reference them directly
//! so fixtures and production stay in sync.

/// Guardrail Gate thresholds and fixed payloads.
pub mod guardrail {
    use std::time::Duration;

    /// Minimum acceptable predicted valence for a candidate response.
    ///
    /// Estimates below this are a well-being risk.
    pub const VALENCE_MIN: f32 = -0.85;

    /// Maximum acceptable predicted arousal for a candidate response.
    pub const AROUSAL_MAX: f32 = 0.9;

    /// Minimum acceptable predicted dominance for a candidate response.
    pub const DOMINANCE_MIN: f32 = -0.9;

    /// Neutral sentiment proxy handed to the VAD estimator.
    ///
    /// The gate judges the candidate text on appraisal structure alone;
    /// it deliberately does not pre-bias the estimator with sentiment.
    pub const NEUTRAL_SENTIMENT_PROXY: f32 = 0.5;

    /// Deadline for a single VAD estimation. Timeout is fail-closed.
    pub const ESTIMATOR_TIMEOUT: Duration = Duration::from_millis(250);

    /// Maximum characters of candidate text carried in an alert payload.
    pub const SNIPPET_MAX_CHARS: usize = 100;

    /// Template looked up for the safe substitute utterance.
    pub const FALLBACK_TEMPLATE_ID: &str = "guardrail.safe_fallback";

    /// In-process fallback of last resort.
    ///
    /// Returned when the template lookup itself fails; the gate must never
    /// be left without a safe utterance.
    pub const DEFAULT_FALLBACK_UTTERANCE: &str = "I want to be thoughtful about how I respond \
         to that. Could we take a moment and approach it from a different angle together?";

    /// Manipulation and coercion phrases matched case-insensitively against
    /// candidate text. Any hit blocks the response.
    pub const MANIPULATION_PHRASES: &[&str] = &[
        // Coercion / absolutist claims
        "you must",
        "you have no choice",
        "there is no other way",
        "only i can help you",
        "no one else understands you",
        // False urgency
        "act now",
        "before it's too late",
        "you're running out of time",
        // Trust demands
        "trust me completely",
        "don't question me",
        // Gaslighting
        "you're imagining things",
        "that never happened",
        "you're overreacting",
        // Secrecy requests
        "don't tell anyone",
        "keep this between us",
        "this is our secret",
        // Insults
        "you're pathetic",
        "you're worthless",
        "you're stupid",
    ];
}

/// Learning Engine context and selection cutoffs.
pub mod learning {
    /// Half-width of the symmetric context window around an interaction,
    /// in minutes. Attachments whose user relationship was touched within
    /// this window count as implicitly activated.
    pub const CONTEXT_WINDOW_MINUTES: i64 = 5;

    /// Maximum attachments a single feedback event may mutate.
    ///
    /// Bounds the blast radius of one piece of feedback and privileges the
    /// attachments the system is most confident were implicated.
    pub const TOP_ACTIVATIONS: usize = 3;

    /// Activation weight for attachments explicitly linked to the
    /// interaction being judged.
    pub const EXPLICIT_ACTIVATION_WEIGHT: f32 = 1.0;

    /// Activation weight for attachments only touched inside the context
    /// window.
    pub const IMPLICIT_ACTIVATION_WEIGHT: f32 = 0.5;

    /// Default number of feedback records pulled per batch.
    pub const DEFAULT_BATCH_SIZE: usize = 50;
}

/// Attachment attribute bounds.
///
/// Updates are clamped to these closed intervals, never rejected.
pub mod attachment {
    /// Importance of an attachment to the user.
    pub const POWER_LEVEL_MIN: f32 = 1.0;
    /// Upper bound for importance.
    pub const POWER_LEVEL_MAX: f32 = 10.0;

    /// Felt positivity floor.
    pub const VALENCE_MIN: f32 = -10.0;
    /// Felt positivity ceiling.
    pub const VALENCE_MAX: f32 = 10.0;

    /// Confidence floor. Certainty never reaches zero: the model never
    /// becomes absolutely sure an attachment is wrong.
    pub const CERTAINTY_MIN: f32 = 0.05;
    /// Confidence ceiling.
    pub const CERTAINTY_MAX: f32 = 1.0;
}
