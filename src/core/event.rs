//! User-interaction events and their outbound message encoding.
//!
//! An event is produced once by the renderer, encoded into the literal next
//! user-turn message, and discarded. The encodings below are part of the
//! protocol contract and must not change byte-for-byte: agents are prompted
//! against these exact shapes. There is deliberately no escaping step;
//! action ids and values travel verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default action id for a form submitted without an explicit submit button.
pub const DEFAULT_SUBMIT_ACTION: &str = "form_submit";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A form was submitted: the triggering action id plus every named
    /// input value aggregated from the enclosing form scope.
    FormSubmit {
        action_id: String,
        data: Map<String, Value>,
    },
    /// A bare button (no enclosing form) was activated.
    ButtonClick { action_id: String },
    /// A single input's value changed.
    InputChange { name: String, value: Value },
    /// A different tab was selected.
    TabChange { index: usize },
}

impl UiEvent {
    pub fn button_click(action_id: impl Into<String>) -> Self {
        UiEvent::ButtonClick {
            action_id: action_id.into(),
        }
    }

    pub fn input_change(name: impl Into<String>, value: Value) -> Self {
        UiEvent::InputChange {
            name: name.into(),
            value,
        }
    }

    /// Serializes the event into the instruction message sent back to the
    /// agent as its next user turn.
    pub fn encode(&self) -> String {
        match self {
            UiEvent::FormSubmit { action_id, data } => {
                let pretty = serde_json::to_string_pretty(data)
                    .unwrap_or_else(|_| "{}".to_string());
                format!("[UI Event: Form submitted]\nAction: {action_id}\nData:\n{pretty}")
            }
            UiEvent::ButtonClick { action_id } => {
                format!("[UI Event: Button clicked]\nAction: {action_id}")
            }
            UiEvent::InputChange { name, value } => {
                format!(
                    "[UI Event: Input changed]\nField: {name}\nValue: {}",
                    display_value(value)
                )
            }
            UiEvent::TabChange { index } => {
                format!("[UI Event: Tab changed]\nIndex: {index}")
            }
        }
    }
}

/// Human-readable rendering of a JSON value: strings print bare, everything
/// else prints as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
