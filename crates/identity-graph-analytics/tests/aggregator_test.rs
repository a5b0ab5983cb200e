//! Integration tests for the analytics aggregator.

use std::sync::Arc;

use identity_graph_analytics::{
    AnalyticsAggregator, AnalyticsConfig, StaticConsentVerifier,
};
use identity_graph_core::types::FeedbackRecord;
use uuid::Uuid;

fn config() -> AnalyticsConfig {
    AnalyticsConfig {
        salt: "test-salt".to_string(),
        bucket_minutes: 60,
    }
}

#[tokio::test]
async fn non_consented_users_are_skipped_entirely() {
    let consented_user = Uuid::new_v4();
    let other_user = Uuid::new_v4();
    let consent = Arc::new(StaticConsentVerifier::allowing([consented_user]));
    let mut aggregator = AnalyticsAggregator::new(consent, config()).unwrap();

    let records = vec![
        FeedbackRecord::coherence(consented_user, Uuid::new_v4(), 4),
        FeedbackRecord::coherence(other_user, Uuid::new_v4(), 1),
        FeedbackRecord::resonance(other_user, Uuid::new_v4(), vec!["too_negative".to_string()]),
    ];

    let summary = aggregator.ingest(&records).await;
    assert_eq!(summary.ingested, 1);
    assert_eq!(summary.skipped_no_consent, 2);

    // Only the consented rating landed anywhere.
    let total_ratings: u64 = aggregator
        .buckets()
        .values()
        .map(|b| b.coherence_histogram.iter().sum::<u64>())
        .sum();
    assert_eq!(total_ratings, 1);
    let total_tags: u64 = aggregator
        .buckets()
        .values()
        .map(|b| b.resonance_tags.values().sum::<u64>())
        .sum();
    assert_eq!(total_tags, 0);
}

#[tokio::test]
async fn distributions_accumulate_per_bucket() {
    let user = Uuid::new_v4();
    let consent = Arc::new(StaticConsentVerifier::allowing([user]));
    let mut aggregator = AnalyticsAggregator::new(consent, config()).unwrap();

    let records = vec![
        FeedbackRecord::coherence(user, Uuid::new_v4(), 5),
        FeedbackRecord::coherence(user, Uuid::new_v4(), 5),
        FeedbackRecord::coherence(user, Uuid::new_v4(), 2),
        FeedbackRecord::resonance(user, Uuid::new_v4(), vec!["values_mismatch".to_string()]),
        FeedbackRecord::resonance(
            user,
            Uuid::new_v4(),
            vec!["values_mismatch".to_string(), "too_positive".to_string()],
        ),
    ];

    let summary = aggregator.ingest(&records).await;
    assert_eq!(summary.ingested, 5);

    // All submitted now, so everything shares one bucket.
    assert_eq!(aggregator.buckets().len(), 1);
    let bucket = aggregator.buckets().values().next().unwrap();
    assert_eq!(bucket.coherence_histogram[4], 2); // rating 5
    assert_eq!(bucket.coherence_histogram[1], 1); // rating 2
    assert_eq!(bucket.resonance_tags["values_mismatch"], 2);
    assert_eq!(bucket.resonance_tags["too_positive"], 1);
    assert_eq!(bucket.contributor_count(), 1);
}

#[tokio::test]
async fn raw_user_ids_never_appear_in_buckets() {
    let user = Uuid::new_v4();
    let consent = Arc::new(StaticConsentVerifier::allowing([user]));
    let mut aggregator = AnalyticsAggregator::new(consent, config()).unwrap();

    aggregator
        .ingest(&[FeedbackRecord::coherence(user, Uuid::new_v4(), 3)])
        .await;

    let serialized = serde_json::to_string(aggregator.buckets()).unwrap();
    assert!(!serialized.contains(&user.to_string()));
}

#[tokio::test]
async fn empty_salt_is_rejected_at_startup() {
    let consent = Arc::new(StaticConsentVerifier::deny_all());
    let result = AnalyticsAggregator::new(
        consent,
        AnalyticsConfig {
            salt: String::new(),
            bucket_minutes: 60,
        },
    );
    assert!(result.is_err());
}
