//! Anonymized, time-bucketed feedback distributions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use identity_graph_core::error::ConfigError;
use identity_graph_core::types::{FeedbackRecord, FeedbackValue, UserId};

use crate::consent::{ConsentScope, ConsentVerifier};

/// Aggregation parameters.
#[derive(Clone, Debug)]
pub struct AnalyticsConfig {
    /// Salt mixed into every user-id hash. Deployment-secret, never logged.
    pub salt: String,
    /// Bucket width in minutes.
    pub bucket_minutes: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            salt: String::new(),
            bucket_minutes: 60,
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns the first violation found. Fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salt.is_empty() {
            return Err(ConfigError::invalid("salt", "must be non-empty"));
        }
        if self.bucket_minutes <= 0 {
            return Err(ConfigError::invalid("bucket_minutes", "must be positive"));
        }
        Ok(())
    }
}

/// Distribution of feedback within one time bucket.
///
/// Holds only counts and salted hashes; no raw user id or free text other
/// than the resonance tag vocabulary ever enters a bucket.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BucketStats {
    /// Count per resonance reason tag.
    pub resonance_tags: BTreeMap<String, u64>,
    /// Count per coherence rating; index 0 is rating 1.
    pub coherence_histogram: [u64; 5],
    /// Salted hashes of contributing users.
    contributors: BTreeSet<String>,
}

impl BucketStats {
    /// Distinct anonymized contributors in this bucket.
    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }
}

/// Outcome of one ingest call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records folded into a bucket.
    pub ingested: usize,
    /// Records skipped because the user has not opted in (or consent could
    /// not be verified).
    pub skipped_no_consent: usize,
}

/// Consent-gated aggregator over the feedback stream.
///
/// Read-only with respect to the stream: it never marks records processed
/// and shares nothing with the Learning Engine beyond the
/// [`FeedbackRecord`] contract. Consent is verified per user before any of
/// that user's feedback content is examined.
pub struct AnalyticsAggregator {
    consent: Arc<dyn ConsentVerifier>,
    config: AnalyticsConfig,
    buckets: BTreeMap<DateTime<Utc>, BucketStats>,
}

impl AnalyticsAggregator {
    /// Create an aggregator, validating configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid configuration. Fatal at startup.
    pub fn new(
        consent: Arc<dyn ConsentVerifier>,
        config: AnalyticsConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            consent,
            config,
            buckets: BTreeMap::new(),
        })
    }

    /// Fold a slice of feedback records into the bucketed distributions.
    pub async fn ingest(&mut self, records: &[FeedbackRecord]) -> IngestSummary {
        let mut summary = IngestSummary::default();
        for record in records {
            let consented = match self
                .consent
                .has_consented(record.user_id, ConsentScope::Aggregation)
                .await
            {
                Ok(consented) => consented,
                Err(e) => {
                    warn!(error = %e, "consent check failed; skipping user");
                    false
                }
            };
            if !consented {
                summary.skipped_no_consent += 1;
                continue;
            }

            let bucket_start = self.bucket_start(record.submitted_at);
            let contributor = self.anonymize(record.user_id);
            let bucket = self.buckets.entry(bucket_start).or_default();
            bucket.contributors.insert(contributor);

            match &record.value {
                FeedbackValue::Resonance { tags } => {
                    for tag in tags {
                        *bucket.resonance_tags.entry(tag.clone()).or_insert(0) += 1;
                    }
                }
                FeedbackValue::Coherence { rating } => {
                    let idx = usize::from((*rating).clamp(1, 5) - 1);
                    bucket.coherence_histogram[idx] += 1;
                }
            }
            summary.ingested += 1;
        }

        debug!(
            ingested = summary.ingested,
            skipped = summary.skipped_no_consent,
            "ingest complete"
        );
        summary
    }

    /// Snapshot of the bucketed distributions.
    pub fn buckets(&self) -> &BTreeMap<DateTime<Utc>, BucketStats> {
        &self.buckets
    }

    /// Floor a timestamp to its bucket boundary.
    fn bucket_start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let width = self.config.bucket_minutes * 60;
        let secs = at.timestamp();
        let floored = secs - secs.rem_euclid(width);
        Utc.timestamp_opt(floored, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Salted SHA-256 of a user id; raw ids never leave the ingest call.
    fn anonymize(&self, user_id: UserId) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.config.salt.as_bytes());
        hasher.update(user_id.as_bytes());
        hex::encode(hasher.finalize())
    }
}
