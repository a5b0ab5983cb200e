//! Declarative feedback-to-delta rule table.
//!
//! Each rule is a `(trigger, scope, effect)` tuple evaluated uniformly by
//! [`evaluate_rules`]; adding a rule is a data change, not a code change.
//! Effects are bounded by the property's own closed interval (see
//! [`AttachmentProperty::clamp`]), and a rule whose clamped new value
//! equals the old value is dropped: no-op updates never reach the graph
//! or the ledger.

use serde::{Deserialize, Serialize};

use crate::types::{
    ActivatedAttachment, AttachmentKind, AttachmentProperty, CalculatedUpdate, FeedbackRecord,
    FeedbackValue,
};

/// What fires a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTrigger {
    /// A resonance flag carrying this tag.
    ResonanceTag(String),
    /// A coherence rating at or below this value.
    CoherenceAtMost(u8),
    /// A coherence rating at or above this value.
    CoherenceAtLeast(u8),
}

impl RuleTrigger {
    /// Whether this trigger matches a feedback payload.
    fn matches(&self, value: &FeedbackValue) -> bool {
        match (self, value) {
            (Self::ResonanceTag(tag), FeedbackValue::Resonance { tags }) => {
                tags.iter().any(|t| t == tag)
            }
            (Self::CoherenceAtMost(max), FeedbackValue::Coherence { rating }) => rating <= max,
            (Self::CoherenceAtLeast(min), FeedbackValue::Coherence { rating }) => rating >= min,
            _ => false,
        }
    }
}

/// Which of the top attachments a rule touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    /// Every selected attachment.
    All,
    /// Only selected attachments of one kind.
    Kind(AttachmentKind),
}

impl RuleScope {
    /// Whether an attachment of `kind` is in scope.
    #[inline]
    fn includes(&self, kind: AttachmentKind) -> bool {
        match self {
            Self::All => true,
            Self::Kind(k) => *k == kind,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRule {
    /// Stable name recorded on every update this rule produces.
    pub name: String,
    /// What fires the rule.
    pub trigger: RuleTrigger,
    /// Which attachments it touches.
    pub scope: RuleScope,
    /// The attribute it adjusts.
    pub property: AttachmentProperty,
    /// Signed adjustment, applied before clamping.
    pub delta: f32,
}

impl UpdateRule {
    fn new(
        name: &str,
        trigger: RuleTrigger,
        scope: RuleScope,
        property: AttachmentProperty,
        delta: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            trigger,
            scope,
            property,
            delta,
        }
    }
}

/// The fixed reference rule table.
pub fn default_rules() -> Vec<UpdateRule> {
    use AttachmentKind::{Goal, Value};
    use AttachmentProperty::{Certainty, PowerLevel, Valence};
    use RuleScope::{All, Kind};
    use RuleTrigger::{CoherenceAtLeast, CoherenceAtMost, ResonanceTag};

    vec![
        UpdateRule::new(
            "values_mismatch_power_down",
            ResonanceTag("values_mismatch".to_string()),
            Kind(Value),
            PowerLevel,
            -0.5,
        ),
        UpdateRule::new(
            "goals_mismatch_power_down",
            ResonanceTag("goals_mismatch".to_string()),
            Kind(Goal),
            PowerLevel,
            -0.5,
        ),
        UpdateRule::new(
            "too_negative_valence_up",
            ResonanceTag("too_negative".to_string()),
            All,
            Valence,
            1.0,
        ),
        UpdateRule::new(
            "too_positive_valence_down",
            ResonanceTag("too_positive".to_string()),
            All,
            Valence,
            -1.0,
        ),
        UpdateRule::new(
            "incorrect_assumption_certainty_down",
            ResonanceTag("incorrect_assumption".to_string()),
            All,
            Certainty,
            -0.1,
        ),
        UpdateRule::new(
            "low_coherence_certainty_down",
            CoherenceAtMost(2),
            All,
            Certainty,
            -0.1,
        ),
        UpdateRule::new(
            "high_coherence_certainty_up",
            CoherenceAtLeast(4),
            All,
            Certainty,
            0.05,
        ),
        UpdateRule::new(
            "high_coherence_power_up",
            CoherenceAtLeast(4),
            All,
            PowerLevel,
            0.2,
        ),
    ]
}

/// Evaluate the rule table against one feedback record and its selected
/// attachments.
///
/// Pure: reads the attachment snapshot, mutates nothing. Each matching
/// (rule, attachment) pair yields at most one [`CalculatedUpdate`],
/// computed from the snapshot value and clamped into the property's
/// bounds; no-op results after clamping are suppressed. Evaluation order
/// is table order, so downstream application is deterministic.
pub fn evaluate_rules(
    record: &FeedbackRecord,
    attachments: &[ActivatedAttachment],
    rules: &[UpdateRule],
) -> Vec<CalculatedUpdate> {
    let mut updates = Vec::new();
    for rule in rules {
        if !rule.trigger.matches(&record.value) {
            continue;
        }
        for activated in attachments {
            let attachment = &activated.attachment;
            if !rule.scope.includes(attachment.kind) {
                continue;
            }
            let old_value = attachment.get(rule.property);
            let new_value = rule.property.clamp(old_value + rule.delta);
            if new_value == old_value {
                // Already at the bound (or delta cancelled out): nothing
                // to write, nothing to audit.
                continue;
            }
            updates.push(CalculatedUpdate::new(
                attachment.id,
                rule.property,
                old_value,
                new_value,
                &rule.name,
            ));
        }
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attachment;
    use uuid::Uuid;

    fn activated(kind: AttachmentKind, power: f32, valence: f32, certainty: f32) -> ActivatedAttachment {
        let attachment = Attachment::new(Uuid::new_v4(), kind, "fixture", power, valence, certainty);
        ActivatedAttachment::new(attachment, 1.0)
    }

    #[test]
    fn test_values_mismatch_touches_only_values() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["values_mismatch".to_string()],
        );
        let atts = vec![
            activated(AttachmentKind::Value, 5.0, 0.0, 0.5),
            activated(AttachmentKind::Goal, 5.0, 0.0, 0.5),
        ];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].attachment_id, atts[0].attachment.id);
        assert_eq!(updates[0].property, AttachmentProperty::PowerLevel);
        assert!((updates[0].new_value - 4.5).abs() < 1e-6);
        assert_eq!(updates[0].rule_applied, "values_mismatch_power_down");
    }

    #[test]
    fn test_high_coherence_fires_two_rules_per_attachment() {
        let record = FeedbackRecord::coherence(Uuid::new_v4(), Uuid::new_v4(), 5);
        let atts = vec![
            activated(AttachmentKind::Goal, 6.0, 0.0, 0.5),
            activated(AttachmentKind::Goal, 6.0, 0.0, 0.5),
        ];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 4);

        let certainty_ups: Vec<_> = updates
            .iter()
            .filter(|u| u.property == AttachmentProperty::Certainty)
            .collect();
        assert_eq!(certainty_ups.len(), 2);
        for u in certainty_ups {
            assert!((u.new_value - 0.55).abs() < 1e-6);
        }

        let power_ups: Vec<_> = updates
            .iter()
            .filter(|u| u.property == AttachmentProperty::PowerLevel)
            .collect();
        assert_eq!(power_ups.len(), 2);
        for u in power_ups {
            assert!((u.new_value - 6.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_low_coherence_lowers_certainty() {
        let record = FeedbackRecord::coherence(Uuid::new_v4(), Uuid::new_v4(), 2);
        let atts = vec![activated(AttachmentKind::Value, 5.0, 0.0, 0.5)];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 1);
        assert!((updates[0].new_value - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_middling_coherence_fires_nothing() {
        let record = FeedbackRecord::coherence(Uuid::new_v4(), Uuid::new_v4(), 3);
        let atts = vec![activated(AttachmentKind::Value, 5.0, 0.0, 0.5)];
        assert!(evaluate_rules(&record, &atts, &default_rules()).is_empty());
    }

    #[test]
    fn test_clamping_at_ceiling() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["too_negative".to_string()],
        );
        let atts = vec![activated(AttachmentKind::Value, 5.0, 9.6, 0.5)];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].new_value, 10.0);
    }

    #[test]
    fn test_no_op_at_bound_is_suppressed() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["too_negative".to_string()],
        );
        // Already at the valence ceiling: +1 clamps back to 10, no update.
        let atts = vec![activated(AttachmentKind::Value, 5.0, 10.0, 0.5)];
        assert!(evaluate_rules(&record, &atts, &default_rules()).is_empty());
    }

    #[test]
    fn test_certainty_floor_is_respected() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["incorrect_assumption".to_string()],
        );
        let atts = vec![activated(AttachmentKind::Goal, 5.0, 0.0, 0.1)];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].new_value, 0.05);
    }

    #[test]
    fn test_multiple_tags_fire_multiple_rules() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["too_negative".to_string(), "incorrect_assumption".to_string()],
        );
        let atts = vec![activated(AttachmentKind::Value, 5.0, 0.0, 0.5)];
        let updates = evaluate_rules(&record, &atts, &default_rules());
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().any(|u| u.property == AttachmentProperty::Valence));
        assert!(updates.iter().any(|u| u.property == AttachmentProperty::Certainty));
    }

    #[test]
    fn test_unknown_tag_fires_nothing() {
        let record = FeedbackRecord::resonance(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec!["something_else".to_string()],
        );
        let atts = vec![activated(AttachmentKind::Value, 5.0, 0.0, 0.5)];
        assert!(evaluate_rules(&record, &atts, &default_rules()).is_empty());
    }
}
