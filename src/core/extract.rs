//! Heuristic extraction of UI payloads from a heterogeneous record stream.
//!
//! A record may be pure prose, pure structured UI, or prose with a UI JSON
//! blob buried inside, and the transport may wrap the payload in any
//! envelope at any depth. The authoritative signal is therefore "does this
//! JSON contain a `components` array anywhere", probed in a fixed tier
//! order per record: structural search over the whole record, then UI JSON
//! embedded in text parts, then the base64 side channel, then tool-call
//! action objects. Later tiers intentionally override earlier ones; across
//! a stream the last discovery wins.
//!
//! Every parse attempt here is individually fault tolerant. Nothing in this
//! module aborts a stream.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;
use tracing::debug;

use crate::api;
use crate::core::schema::Component;
use crate::core::update::UiUpdate;

/// MIME type tagging base64-encoded UI JSON carried as inline part data.
pub const UI_MIME_TYPE: &str = "application/vnd.adk.ui+json";

/// Depth-first, first-match search for a `components` array anywhere in a
/// JSON value. An object's own key is checked before its values, so the
/// shallowest match along the traversal wins; siblings after a match are
/// not searched.
pub fn find_components(value: &Value) -> Option<&Vec<Value>> {
    find_envelope(value, "components").map(|(_, items)| items)
}

/// Same traversal for in-stream update batches.
pub fn find_ui_updates(value: &Value) -> Option<&Vec<Value>> {
    find_envelope(value, "ui_updates").map(|(_, items)| items)
}

/// Like [`find_components`] but also yields the object owning the array,
/// so envelope-level fields (the theme hint) survive extraction.
fn find_envelope<'a>(
    value: &'a Value,
    key: &str,
) -> Option<(&'a serde_json::Map<String, Value>, &'a Vec<Value>)> {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get(key) {
                return Some((map, items));
            }
            map.values().find_map(|nested| find_envelope(nested, key))
        }
        Value::Array(items) => items.iter().find_map(|nested| find_envelope(nested, key)),
        _ => None,
    }
}

/// A decoded UI discovery: the component forest plus whatever envelope
/// metadata rode along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct UiPayload {
    pub components: Vec<Component>,
    pub theme: Option<String>,
}

fn payload_from(value: &Value) -> Option<UiPayload> {
    let (envelope, items) = find_envelope(value, "components")?;
    if items.is_empty() {
        return None;
    }
    Some(UiPayload {
        components: items.iter().map(Component::lenient_from_value).collect(),
        theme: envelope
            .get("theme")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Locates UI JSON embedded inside prose.
///
/// Two tiers, in order: (a) every balanced `{...}` substring mentioning a
/// `components` key is tried as JSON, first successful parse with a
/// non-empty components array wins; (b) failing that, the whole text is
/// parsed as JSON and searched structurally. Returns `None` when the text
/// is plain narrative.
pub fn scan_embedded_ui(text: &str) -> Option<UiPayload> {
    let bytes = text.as_bytes();
    if memchr::memmem::find(bytes, b"\"components\"").is_none() {
        return None;
    }

    for start in memchr::memchr_iter(b'{', bytes) {
        let Some(candidate) = balanced_object(text, start) else {
            continue;
        };
        if memchr::memmem::find(candidate.as_bytes(), b"\"components\"").is_none() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(candidate) else {
            continue;
        };
        if let Some(payload) = payload_from(&value) {
            return Some(payload);
        }
    }

    let value = serde_json::from_str::<Value>(text.trim()).ok()?;
    payload_from(&value)
}

/// Extracts the balanced object starting at the `{` at byte `start`,
/// honoring JSON string syntax so braces inside strings do not count.
fn balanced_object(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Everything one record contributes to the turn.
#[derive(Default)]
pub struct RecordScan {
    /// The last non-empty components array any tier produced, decoded.
    pub components: Option<UiPayload>,
    /// Narrative text from parts that did not carry embedded UI, in order.
    pub narrative: String,
    /// Addressed updates found in the record.
    pub updates: Vec<UiUpdate>,
}

/// Runs all search tiers against one parsed record.
pub fn scan_record(record: &Value) -> RecordScan {
    let mut scan = RecordScan::default();

    if let Some(payload) = payload_from(record) {
        scan.components = Some(payload);
    }

    let content = api::content_of(record);

    if let Some(content) = &content {
        for part in &content.parts {
            let Some(text) = &part.text else {
                continue;
            };
            match scan_embedded_ui(text) {
                Some(payload) => scan.components = Some(payload),
                None => scan.narrative.push_str(text),
            }
        }

        for part in &content.parts {
            let Some(inline) = &part.inline_data else {
                continue;
            };
            if inline.mime_type != UI_MIME_TYPE {
                continue;
            }
            let Ok(decoded) = BASE64.decode(&inline.data) else {
                debug!("discarding undecodable inline ui data");
                continue;
            };
            let Ok(value) = serde_json::from_slice::<Value>(&decoded) else {
                debug!("discarding non-json inline ui data");
                continue;
            };
            if let Some(payload) = payload_from(&value) {
                scan.components = Some(payload);
            }
        }
    }

    match record.get("actions") {
        Some(Value::Array(actions)) => {
            for action in actions {
                if let Some(payload) = payload_from(action) {
                    scan.components = Some(payload);
                }
            }
        }
        Some(actions) => {
            if let Some(payload) = payload_from(actions) {
                scan.components = Some(payload);
            }
        }
        None => {}
    }

    if let Some(items) = find_ui_updates(record) {
        for item in items {
            match serde_json::from_value::<UiUpdate>(item.clone()) {
                Ok(update) => scan.updates.push(update),
                Err(err) => debug!("discarding malformed ui update: {err}"),
            }
        }
    }

    scan
}
