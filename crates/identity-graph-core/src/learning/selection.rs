//! Activation-based attachment selection.

use crate::types::ActivatedAttachment;

/// Keep the `n` attachments with the highest activation weight.
///
/// This is the blast-radius policy: a single feedback event may mutate at
/// most `n` attachments, and the ones the system is most confident were
/// actually implicated go first. Ties break on attachment id so repeated
/// runs over the same context select the same set.
pub fn select_top_by_activation(
    mut attachments: Vec<ActivatedAttachment>,
    n: usize,
) -> Vec<ActivatedAttachment> {
    attachments.sort_by(|a, b| {
        b.activation_weight
            .partial_cmp(&a.activation_weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.attachment.id.cmp(&b.attachment.id))
    });
    attachments.truncate(n);
    attachments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attachment, AttachmentKind};
    use uuid::Uuid;

    fn activated(weight: f32) -> ActivatedAttachment {
        let attachment = Attachment::new(
            Uuid::new_v4(),
            AttachmentKind::Value,
            "fixture",
            5.0,
            0.0,
            0.5,
        );
        ActivatedAttachment::new(attachment, weight)
    }

    #[test]
    fn test_keeps_highest_weights() {
        let items = vec![activated(0.5), activated(1.0), activated(0.5), activated(1.0)];
        let top = select_top_by_activation(items, 2);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|a| a.activation_weight == 1.0));
    }

    #[test]
    fn test_fewer_items_than_n() {
        let items = vec![activated(0.5)];
        let top = select_top_by_activation(items, 3);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_deterministic_tie_break() {
        let items: Vec<_> = (0..5).map(|_| activated(0.5)).collect();
        let first = select_top_by_activation(items.clone(), 3);
        let second = select_top_by_activation(items, 3);
        let ids_first: Vec<_> = first.iter().map(|a| a.attachment.id).collect();
        let ids_second: Vec<_> = second.iter().map(|a| a.attachment.id).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[test]
    fn test_empty_input() {
        assert!(select_top_by_activation(Vec::new(), 3).is_empty());
    }
}
