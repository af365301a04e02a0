//! Addressed, incremental mutation of a rendered component forest.
//!
//! Updates address components by their stable `id` over the whole forest,
//! depth-first, first match wins. A failed update is never fatal: it is
//! reported as a typed outcome and a `tracing` warning, and the stream
//! carries on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::schema::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOp {
    /// Swap the addressed node for the payload, preserving its position.
    Replace,
    /// Shallow-merge the payload's fields into the addressed node. The
    /// node's `type` and `id` are immutable and survive the merge.
    Patch,
    /// Insert the payload as a new trailing child of the addressed node.
    Append,
    /// Delete the addressed node from its parent's children.
    Remove,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiUpdate {
    pub target_id: String,
    pub operation: UpdateOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Component>,
}

/// What happened to one update. Non-`Applied` outcomes are warnings, not
/// errors; they must surface as a signal but never abort the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Applied,
    /// No component in the forest carries the target id.
    TargetMissing { target_id: String },
    /// The target exists but the operation does not apply to it.
    Rejected {
        target_id: String,
        reason: String,
    },
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

/// Applies one update against a live forest. Lookup is depth-first over the
/// whole forest; with duplicate ids the first match wins.
pub fn apply_update(roots: &mut Vec<Component>, update: &UiUpdate) -> UpdateOutcome {
    let outcome = match apply_in(roots, update) {
        Some(outcome) => outcome,
        None => UpdateOutcome::TargetMissing {
            target_id: update.target_id.clone(),
        },
    };
    match &outcome {
        UpdateOutcome::Applied => {}
        UpdateOutcome::TargetMissing { target_id } => {
            warn!("ui update skipped: no component with id `{target_id}`");
        }
        UpdateOutcome::Rejected { target_id, reason } => {
            warn!("ui update rejected for `{target_id}`: {reason}");
        }
    }
    outcome
}

/// Applies a batch in order, returning one outcome per update.
pub fn apply_updates(roots: &mut Vec<Component>, updates: &[UiUpdate]) -> Vec<UpdateOutcome> {
    updates
        .iter()
        .map(|update| apply_update(roots, update))
        .collect()
}

fn apply_in(children: &mut Vec<Component>, update: &UiUpdate) -> Option<UpdateOutcome> {
    for index in 0..children.len() {
        if children[index].id() == Some(update.target_id.as_str()) {
            return Some(perform(children, index, update));
        }
        for slot in children[index].child_slots_mut() {
            if let Some(outcome) = apply_in(slot, update) {
                return Some(outcome);
            }
        }
    }
    None
}

fn perform(children: &mut Vec<Component>, index: usize, update: &UiUpdate) -> UpdateOutcome {
    let rejected = |reason: &str| UpdateOutcome::Rejected {
        target_id: update.target_id.clone(),
        reason: reason.to_string(),
    };
    match update.operation {
        UpdateOp::Replace => match &update.payload {
            Some(payload) => {
                children[index] = payload.clone();
                UpdateOutcome::Applied
            }
            None => rejected("replace requires a payload"),
        },
        UpdateOp::Patch => match &update.payload {
            Some(payload) => patch_node(&mut children[index], payload, &update.target_id),
            None => rejected("patch requires a payload"),
        },
        UpdateOp::Append => match &update.payload {
            Some(payload) => match children[index].appendable_children_mut() {
                Some(slot) => {
                    slot.push(payload.clone());
                    UpdateOutcome::Applied
                }
                None => rejected("target cannot hold children"),
            },
            None => rejected("append requires a payload"),
        },
        UpdateOp::Remove => {
            children.remove(index);
            UpdateOutcome::Applied
        }
    }
}

/// Shallow merge at the JSON level: payload fields win, except `type` and
/// `id`, which stay those of the existing node.
fn patch_node(node: &mut Component, payload: &Component, target_id: &str) -> UpdateOutcome {
    let rejected = |reason: String| UpdateOutcome::Rejected {
        target_id: target_id.to_string(),
        reason,
    };
    let mut base = match serde_json::to_value(&*node) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => return rejected("existing node is not patchable".to_string()),
    };
    let patch = match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => return rejected("patch payload is not an object".to_string()),
    };
    for (key, value) in patch {
        if key == "type" || key == "id" {
            continue;
        }
        base.insert(key, value);
    }
    match Component::from_value(&Value::Object(base)) {
        Ok(merged) => {
            *node = merged;
            UpdateOutcome::Applied
        }
        Err(err) => rejected(format!("merged node failed to decode: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Button, ButtonVariant, Card, Component, Text, TextVariant};

    fn text(id: &str, content: &str) -> Component {
        Component::Text(Text {
            id: Some(id.to_string()),
            content: content.to_string(),
            variant: TextVariant::Body,
        })
    }

    fn card(id: &str, content: Vec<Component>) -> Component {
        Component::Card(Card {
            id: Some(id.to_string()),
            title: None,
            description: None,
            content,
            footer: None,
        })
    }

    #[test]
    fn replace_preserves_position() {
        let mut roots = vec![text("a", "one"), text("b", "two"), text("c", "three")];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "b".into(),
                operation: UpdateOp::Replace,
                payload: Some(text("b", "TWO")),
            },
        );
        assert!(outcome.is_applied());
        assert!(matches!(&roots[1], Component::Text(t) if t.content == "TWO"));
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn patch_merges_fields_and_keeps_identity() {
        let mut roots = vec![card("c1", vec![text("t1", "hello")])];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "t1".into(),
                operation: UpdateOp::Patch,
                payload: Some(Component::Text(Text {
                    // a different id in the payload must not rebind the node
                    id: Some("imposter".into()),
                    content: "patched".into(),
                    variant: TextVariant::Caption,
                })),
            },
        );
        assert!(outcome.is_applied());
        let Component::Card(card) = &roots[0] else {
            panic!("expected card");
        };
        let Component::Text(t) = &card.content[0] else {
            panic!("expected text");
        };
        assert_eq!(t.id.as_deref(), Some("t1"));
        assert_eq!(t.content, "patched");
        assert_eq!(t.variant, TextVariant::Caption);
    }

    #[test]
    fn append_adds_trailing_child_to_card_body() {
        let mut roots = vec![card("c1", vec![text("t1", "first")])];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "c1".into(),
                operation: UpdateOp::Append,
                payload: Some(text("t2", "second")),
            },
        );
        assert!(outcome.is_applied());
        let Component::Card(card) = &roots[0] else {
            panic!("expected card");
        };
        assert_eq!(card.content.len(), 2);
        assert_eq!(card.content[1].id(), Some("t2"));
    }

    #[test]
    fn append_to_leaf_is_rejected_not_fatal() {
        let mut roots = vec![text("t1", "leaf")];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "t1".into(),
                operation: UpdateOp::Append,
                payload: Some(text("t2", "x")),
            },
        );
        assert!(matches!(outcome, UpdateOutcome::Rejected { .. }));
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn remove_missing_target_leaves_tree_unchanged() {
        let mut roots = vec![card("c1", vec![text("t1", "kept")])];
        let before = roots.clone();
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "ghost".into(),
                operation: UpdateOp::Remove,
                payload: None,
            },
        );
        assert!(matches!(
            outcome,
            UpdateOutcome::TargetMissing { ref target_id } if target_id == "ghost"
        ));
        assert_eq!(roots, before);
    }

    #[test]
    fn remove_deletes_nested_node() {
        let mut roots = vec![card("c1", vec![text("t1", "a"), text("t2", "b")])];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "t1".into(),
                operation: UpdateOp::Remove,
                payload: None,
            },
        );
        assert!(outcome.is_applied());
        let Component::Card(card) = &roots[0] else {
            panic!("expected card");
        };
        assert_eq!(card.content.len(), 1);
        assert_eq!(card.content[0].id(), Some("t2"));
    }

    #[test]
    fn duplicate_ids_resolve_to_first_match() {
        let mut roots = vec![
            card("dup", vec![]),
            Component::Button(Button {
                id: Some("dup".into()),
                label: "second".into(),
                action_id: "x".into(),
                variant: ButtonVariant::Primary,
                disabled: false,
            }),
        ];
        let outcome = apply_update(
            &mut roots,
            &UiUpdate {
                target_id: "dup".into(),
                operation: UpdateOp::Append,
                payload: Some(text("t", "into first")),
            },
        );
        // first match is the card, which accepts children
        assert!(outcome.is_applied());
        assert!(matches!(&roots[0], Component::Card(c) if c.content.len() == 1));
    }
}
