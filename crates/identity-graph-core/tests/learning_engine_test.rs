//! Integration tests for the Learning Engine.
//!
//! Exercises the full batch path against the in-memory stubs: rule
//! application, clamping, no-op suppression, idempotency, partial-failure
//! isolation, context-window semantics, and cooperative cancellation.

use std::sync::Arc;

use chrono::Utc;
use identity_graph_core::learning::LearningEngine;
use identity_graph_core::stubs::{
    InMemoryAttachmentStore, InMemoryAuditLedger, InMemoryFeedbackQueue,
};
use identity_graph_core::types::{
    Attachment, AttachmentKind, AttachmentProperty, FeedbackRecord, UserId,
};
use identity_graph_core::LearningConfig;
use uuid::Uuid;

struct Fixture {
    queue: Arc<InMemoryFeedbackQueue>,
    store: Arc<InMemoryAttachmentStore>,
    ledger: Arc<InMemoryAuditLedger>,
    engine: LearningEngine,
    user_id: UserId,
}

impl Fixture {
    fn new() -> Self {
        let queue = Arc::new(InMemoryFeedbackQueue::new());
        let store = Arc::new(InMemoryAttachmentStore::new());
        let ledger = Arc::new(InMemoryAuditLedger::new());
        let engine = LearningEngine::new(
            Arc::clone(&queue) as Arc<dyn identity_graph_core::traits::FeedbackSource>,
            Arc::clone(&store) as Arc<dyn identity_graph_core::traits::AttachmentStore>,
            Arc::clone(&ledger) as Arc<dyn identity_graph_core::traits::AuditLedger>,
            LearningConfig::default(),
        )
        .expect("default config is valid");
        Self {
            queue,
            store,
            ledger,
            engine,
            user_id: Uuid::new_v4(),
        }
    }

    /// Seed an attachment explicitly activated by a fresh interaction, and
    /// return (attachment, interaction_id).
    fn seed_activated(&self, kind: AttachmentKind, power: f32, valence: f32, certainty: f32) -> (Attachment, Uuid) {
        let attachment = Attachment::new(self.user_id, kind, "fixture", power, valence, certainty);
        self.store.insert_attachment(attachment.clone());
        let interaction_id = Uuid::new_v4();
        self.store
            .record_interaction(interaction_id, self.user_id, Utc::now(), vec![attachment.id]);
        (attachment, interaction_id)
    }
}

#[tokio::test]
async fn values_mismatch_lowers_power_of_value_attachment() {
    let fx = Fixture::new();
    let (value, interaction_id) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);

    let record = FeedbackRecord::resonance(
        fx.user_id,
        interaction_id,
        vec!["values_mismatch".to_string()],
    );
    let feedback_id = record.id;
    fx.queue.push(record);

    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);

    // Graph mutated.
    let stored = fx.store.attachment(&value.id).unwrap();
    assert!((stored.power_level - 4.5).abs() < 1e-6);

    // Exactly one audited update.
    let updates = fx.ledger.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, feedback_id);
    assert_eq!(updates[0].1.property, AttachmentProperty::PowerLevel);
    assert!((updates[0].1.old_value - 5.0).abs() < 1e-6);
    assert!((updates[0].1.new_value - 4.5).abs() < 1e-6);

    // Record marked processed.
    assert!(fx.queue.record(&feedback_id).unwrap().is_processed());
}

#[tokio::test]
async fn repeated_too_negative_stabilizes_at_valence_ceiling() {
    let fx = Fixture::new();
    let (attachment, _) = fx.seed_activated(AttachmentKind::Value, 5.0, 9.6, 0.5);

    // Three rounds of the same feedback; each gets its own interaction so
    // the context is rebuilt fresh.
    for round in 0..3 {
        let interaction_id = Uuid::new_v4();
        fx.store
            .record_interaction(interaction_id, fx.user_id, Utc::now(), vec![attachment.id]);
        fx.queue.push(FeedbackRecord::resonance(
            fx.user_id,
            interaction_id,
            vec!["too_negative".to_string()],
        ));
        let report = fx.engine.process_batch(10).await.unwrap();
        assert_eq!(report.processed, 1, "round {round}");
    }

    // 9.6 -> 10.0 on the first round, then pinned at the ceiling.
    let stored = fx.store.attachment(&attachment.id).unwrap();
    assert_eq!(stored.valence, 10.0);

    // Only the first round produced an audited update; the bound rounds
    // were no-ops and recorded nothing.
    assert_eq!(fx.ledger.update_count(), 1);
}

#[tokio::test]
async fn batch_rerun_is_idempotent() {
    let fx = Fixture::new();
    let (_, interaction_id) = fx.seed_activated(AttachmentKind::Goal, 6.0, 0.0, 0.5);
    fx.queue
        .push(FeedbackRecord::coherence(fx.user_id, interaction_id, 5));

    let first = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(first.processed, 1);

    let second = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(second.processed, 0);
    assert_eq!(second.failed, 0);
    assert_eq!(second.skipped, 0);
    assert_eq!(fx.queue.unprocessed_count(), 0);
}

#[tokio::test]
async fn failing_record_is_isolated_from_the_rest_of_the_batch() {
    let fx = Fixture::new();
    let (failing, interaction_a) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);
    let (healthy, interaction_b) = fx.seed_activated(AttachmentKind::Value, 7.0, 2.0, 0.5);
    fx.store.fail_attachment(failing.id);

    let record_a = FeedbackRecord::resonance(
        fx.user_id,
        interaction_a,
        vec!["values_mismatch".to_string()],
    );
    let record_b = FeedbackRecord::resonance(
        fx.user_id,
        interaction_b,
        vec!["values_mismatch".to_string()],
    );
    let (id_a, id_b) = (record_a.id, record_b.id);
    fx.queue.push(record_a);
    fx.queue.push(record_b);

    let report = fx.engine.process_batch(10).await.unwrap();
    assert!(report.processed >= 1);
    assert!(report.failed >= 1);

    // A stays eligible for the next batch; B is done.
    assert!(!fx.queue.record(&id_a).unwrap().is_processed());
    assert!(fx.queue.record(&id_b).unwrap().is_processed());

    // Only B's mutation landed.
    let stored = fx.store.attachment(&healthy.id).unwrap();
    assert!((stored.power_level - 6.5).abs() < 1e-6);
    let stored = fx.store.attachment(&failing.id).unwrap();
    assert!((stored.power_level - 5.0).abs() < 1e-6);
}

#[tokio::test]
async fn high_coherence_applies_two_rules_to_each_goal() {
    let fx = Fixture::new();
    let goal_a = Attachment::new(fx.user_id, AttachmentKind::Goal, "goal a", 6.0, 0.0, 0.5);
    let goal_b = Attachment::new(fx.user_id, AttachmentKind::Goal, "goal b", 6.0, 0.0, 0.5);
    fx.store.insert_attachment(goal_a.clone());
    fx.store.insert_attachment(goal_b.clone());
    let interaction_id = Uuid::new_v4();
    fx.store.record_interaction(
        interaction_id,
        fx.user_id,
        Utc::now(),
        vec![goal_a.id, goal_b.id],
    );

    fx.queue
        .push(FeedbackRecord::coherence(fx.user_id, interaction_id, 5));
    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.processed, 1);

    // Four independent updates: certainty +0.05 and power +0.2 for each.
    assert_eq!(fx.ledger.update_count(), 4);
    for id in [goal_a.id, goal_b.id] {
        let stored = fx.store.attachment(&id).unwrap();
        assert!((stored.certainty - 0.55).abs() < 1e-6);
        assert!((stored.power_level - 6.2).abs() < 1e-6);
    }
}

#[tokio::test]
async fn feedback_without_relevant_attachments_is_skipped_and_drained() {
    let fx = Fixture::new();
    // Interaction exists but activated nothing and nothing was touched.
    let interaction_id = Uuid::new_v4();
    fx.store
        .record_interaction(interaction_id, fx.user_id, Utc::now(), Vec::new());

    let record = FeedbackRecord::coherence(fx.user_id, interaction_id, 1);
    let feedback_id = record.id;
    fx.queue.push(record);

    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.processed, 0);

    // Skipped is terminal: the record does not haunt future batches.
    assert!(fx.queue.record(&feedback_id).unwrap().is_processed());
    assert_eq!(fx.ledger.update_count(), 0);
}

#[tokio::test]
async fn unknown_interaction_is_skipped() {
    let fx = Fixture::new();
    fx.queue
        .push(FeedbackRecord::coherence(fx.user_id, Uuid::new_v4(), 5));

    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn context_window_includes_recent_touches_only() {
    let fx = Fixture::new();
    let now = Utc::now();

    let recent = Attachment::new(fx.user_id, AttachmentKind::Value, "recent", 5.0, 0.0, 0.5);
    let stale = Attachment::new(fx.user_id, AttachmentKind::Value, "stale", 5.0, 0.0, 0.5);
    fx.store.insert_attachment(recent.clone());
    fx.store.insert_attachment(stale.clone());
    fx.store
        .touch_relationship(recent.id, now + chrono::Duration::minutes(2));
    fx.store
        .touch_relationship(stale.id, now + chrono::Duration::minutes(20));

    let interaction_id = Uuid::new_v4();
    fx.store
        .record_interaction(interaction_id, fx.user_id, now, Vec::new());
    fx.queue.push(FeedbackRecord::resonance(
        fx.user_id,
        interaction_id,
        vec!["too_negative".to_string()],
    ));

    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.processed, 1);

    // Only the in-window attachment learned from the feedback.
    assert!((fx.store.attachment(&recent.id).unwrap().valence - 1.0).abs() < 1e-6);
    assert!((fx.store.attachment(&stale.id).unwrap().valence - 0.0).abs() < 1e-6);
}

#[tokio::test]
async fn blast_radius_is_bounded_by_top_selection() {
    let fx = Fixture::new();
    let ids: Vec<_> = (0..5)
        .map(|i| {
            let a = Attachment::new(
                fx.user_id,
                AttachmentKind::Goal,
                format!("goal {i}"),
                6.0,
                0.0,
                0.5,
            );
            let id = a.id;
            fx.store.insert_attachment(a);
            id
        })
        .collect();
    let interaction_id = Uuid::new_v4();
    fx.store
        .record_interaction(interaction_id, fx.user_id, Utc::now(), ids);

    fx.queue
        .push(FeedbackRecord::coherence(fx.user_id, interaction_id, 5));
    fx.engine.process_batch(10).await.unwrap();

    // Five candidates, top 3 selected, two rules each: six updates across
    // exactly three distinct attachments.
    let updates = fx.ledger.updates();
    assert_eq!(updates.len(), 6);
    let mut touched: Vec<_> = updates.iter().map(|(_, u)| u.attachment_id).collect();
    touched.sort();
    touched.dedup();
    assert_eq!(touched.len(), 3);
}

#[tokio::test]
async fn ledger_append_failure_leaves_record_for_retry() {
    let fx = Fixture::new();
    let (_, interaction_id) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);
    fx.ledger.set_fail_updates(true);

    let record = FeedbackRecord::resonance(
        fx.user_id,
        interaction_id,
        vec!["values_mismatch".to_string()],
    );
    let feedback_id = record.id;
    fx.queue.push(record);

    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.failed, 1);
    assert!(!fx.queue.record(&feedback_id).unwrap().is_processed());

    // Backend recovers; the next batch drains the record.
    fx.ledger.set_fail_updates(false);
    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.processed, 1);
    assert!(fx.queue.record(&feedback_id).unwrap().is_processed());
}

#[tokio::test]
async fn cancellation_stops_between_records() {
    let fx = Fixture::new();
    let (_, interaction_id) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);
    fx.queue.push(FeedbackRecord::resonance(
        fx.user_id,
        interaction_id,
        vec!["values_mismatch".to_string()],
    ));

    fx.engine.cancel_flag().cancel();
    let report = fx.engine.process_batch(10).await.unwrap();
    assert_eq!(report.total(), 0);
    assert_eq!(fx.queue.unprocessed_count(), 1);
}

#[tokio::test]
async fn resonance_is_drained_before_coherence() {
    let fx = Fixture::new();
    let (_, interaction_a) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);
    let (_, interaction_b) = fx.seed_activated(AttachmentKind::Value, 5.0, 2.0, 0.5);

    // Pushed coherence first, but resonance should be fetched first.
    let coherence = FeedbackRecord::coherence(fx.user_id, interaction_a, 5);
    let resonance = FeedbackRecord::resonance(
        fx.user_id,
        interaction_b,
        vec!["too_positive".to_string()],
    );
    let resonance_id = resonance.id;
    fx.queue.push(coherence);
    fx.queue.push(resonance);

    // A batch of one takes the resonance record.
    let report = fx.engine.process_batch(1).await.unwrap();
    assert_eq!(report.processed, 1);
    assert!(fx.queue.record(&resonance_id).unwrap().is_processed());
}
