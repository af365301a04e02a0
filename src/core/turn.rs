//! Per-turn accumulation of extracted stream state.
//!
//! One [`TurnAccumulator`] owns everything a single in-flight turn has
//! produced: the running narrative and the current candidate component
//! tree. A new turn gets a fresh accumulator (replaced wholesale, never
//! reused) so a cancelled stream can never bleed state into its successor.

use serde_json::Value;
use tracing::debug;

use crate::core::extract::{scan_record, RecordScan};
use crate::core::schema::{Alert, AlertVariant, Component};
use crate::core::update::{apply_updates, UpdateOutcome};

/// Shown when a stream ends without producing components or narrative.
pub const FALLBACK_TEXT: &str = "No response received.";

/// The consumer-facing resolution of a turn at some point in time.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutput {
    /// Structured UI was found; narrative is withheld.
    Components(Vec<Component>),
    /// No structured UI so far; show accumulated narrative text.
    Narrative(String),
}

#[derive(Default)]
pub struct TurnAccumulator {
    narrative: String,
    components: Option<Vec<Component>>,
    theme: Option<String>,
}

impl TurnAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw record payload (the bytes after `data: `) into the
    /// turn. Malformed payloads are discarded silently; they are expected
    /// and never abort the stream. Returns the outcomes of any addressed
    /// updates the record carried.
    pub fn ingest_payload(&mut self, payload: &str) -> Vec<UpdateOutcome> {
        let record = match serde_json::from_str::<Value>(payload) {
            Ok(record) => record,
            Err(err) => {
                debug!("discarding malformed stream record: {err}");
                return Vec::new();
            }
        };
        self.ingest_record(&record)
    }

    /// Same as [`ingest_payload`](Self::ingest_payload) for an already
    /// parsed record.
    pub fn ingest_record(&mut self, record: &Value) -> Vec<UpdateOutcome> {
        let RecordScan {
            components,
            narrative,
            updates,
        } = scan_record(record);

        // structured UI overwrites (last found wins); narrative accumulates
        if let Some(payload) = components {
            self.components = Some(payload.components);
            self.theme = payload.theme;
        }
        self.narrative.push_str(&narrative);

        if updates.is_empty() {
            return Vec::new();
        }
        match &mut self.components {
            Some(roots) => apply_updates(roots, &updates),
            None => updates
                .iter()
                .map(|update| {
                    let outcome = UpdateOutcome::TargetMissing {
                        target_id: update.target_id.clone(),
                    };
                    tracing::warn!("ui update arrived before any tree: {}", update.target_id);
                    outcome
                })
                .collect(),
        }
    }

    /// The current best guess while the stream is still open: the candidate
    /// tree if one was ever found, else the narrative so far (possibly
    /// empty).
    pub fn resolution(&self) -> TurnOutput {
        match &self.components {
            Some(components) if !components.is_empty() => {
                TurnOutput::Components(components.clone())
            }
            _ => TurnOutput::Narrative(self.narrative.clone()),
        }
    }

    /// The final resolution at stream end. An entirely empty turn yields
    /// the fixed fallback text.
    pub fn into_final(self) -> TurnOutput {
        match self.components {
            Some(components) if !components.is_empty() => TurnOutput::Components(components),
            _ => {
                if self.narrative.is_empty() {
                    TurnOutput::Narrative(FALLBACK_TEXT.to_string())
                } else {
                    TurnOutput::Narrative(self.narrative)
                }
            }
        }
    }

    /// Theme hint of the envelope the current candidate tree arrived in.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Direct access to the candidate forest, for applying out-of-band
    /// updates against an already rendered turn.
    pub fn components_mut(&mut self) -> Option<&mut Vec<Component>> {
        self.components.as_mut()
    }
}

/// The alert component injected into a conversation when the transport
/// fails. User-initiated cancellation never produces one of these.
pub fn transport_error_alert(message: impl Into<String>) -> Component {
    Component::Alert(Alert {
        id: None,
        title: "Request failed".to_string(),
        description: Some(message.into()),
        variant: AlertVariant::Error,
    })
}
