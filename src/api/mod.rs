//! Wire payloads exchanged with an agent server.
//!
//! The outbound side is a single JSON body per turn. The inbound side is a
//! stream of SSE records; only the few envelope fields the extractor cares
//! about are typed here; everything else is probed as raw JSON, because a
//! UI payload may hide at any nesting depth (see [`crate::core::extract`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for one conversation turn. `new_message` carries either the
/// raw user text or an encoded UI event (see [`crate::core::event`]).
#[derive(Serialize, Clone)]
pub struct RunAgentRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub new_message: String,
    pub streaming: bool,
}

/// The slice of an inbound stream record the extractor consumes directly.
/// Unknown fields are ignored; records that do not fit this shape are still
/// searched structurally.
#[derive(Deserialize, Default)]
pub struct EventContent {
    #[serde(default)]
    pub parts: Vec<EventPart>,
}

/// One part of a record's content: inline narrative text and/or an encoded
/// side-channel blob.
#[derive(Deserialize, Default)]
pub struct EventPart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Extracts the typed `content` envelope from a raw record, tolerating any
/// extra structure around it.
pub fn content_of(record: &Value) -> Option<EventContent> {
    let content = record.get("content")?;
    serde_json::from_value(content.clone()).ok()
}

pub mod session;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_request_serializes_flat() {
        let request = RunAgentRequest {
            app_name: "demo".into(),
            user_id: "u1".into(),
            session_id: "s1".into(),
            new_message: "hi".into(),
            streaming: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["new_message"], "hi");
        assert_eq!(value["streaming"], true);
    }

    #[test]
    fn content_of_tolerates_extra_fields() {
        let record = json!({
            "id": "evt-1",
            "author": "agent",
            "content": {
                "role": "model",
                "parts": [
                    {"text": "hello", "thought": false},
                    {"inline_data": {"mime_type": "image/png", "data": "AA=="}},
                ],
            },
        });
        let content = content_of(&record).unwrap();
        assert_eq!(content.parts.len(), 2);
        assert_eq!(content.parts[0].text.as_deref(), Some("hello"));
        assert!(content.parts[1].inline_data.is_some());
    }

    #[test]
    fn content_of_missing_is_none() {
        assert!(content_of(&json!({"actions": []})).is_none());
    }
}
