//! Cancellable SSE transport for agent turns.
//!
//! The service spawns one task per turn, frames the byte stream into SSE
//! lines, and forwards raw `data:` payloads over an unbounded channel
//! tagged with a stream id. Record-level interpretation happens on the
//! consumer side ([`crate::core::turn::TurnAccumulator`]); the transport
//! only recognizes `[DONE]` and HTTP-level failure. Cancellation is
//! cooperative and silent: a cancelled stream emits nothing further, so
//! user-initiated interruption never looks like an error.

use futures_util::StreamExt;
use memchr::memchr;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::RunAgentRequest;

#[derive(Clone, Debug)]
pub enum StreamMessage {
    /// One raw record payload (the text after `data:`).
    Record(String),
    /// Transport-level failure, formatted for display.
    Error(String),
    /// Normal termination (`[DONE]` or connection close).
    End,
}

fn extract_data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim_start)
}

fn handle_data_payload(
    payload: &str,
    tx: &mpsc::UnboundedSender<(StreamMessage, u64)>,
    stream_id: u64,
) -> bool {
    if payload == "[DONE]" {
        let _ = tx.send((StreamMessage::End, stream_id));
        return true;
    }
    if !payload.is_empty() {
        let _ = tx.send((StreamMessage::Record(payload.to_string()), stream_id));
    }
    false
}

fn process_sse_line(
    line: &str,
    tx: &mpsc::UnboundedSender<(StreamMessage, u64)>,
    stream_id: u64,
) -> bool {
    extract_data_payload(line)
        .map(|payload| handle_data_payload(payload, tx, stream_id))
        .unwrap_or(false)
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                serde_json::Value::Object(map) => map
                    .get("message")
                    .and_then(|message| message.as_str().map(str::to_owned)),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.trim().to_string()
    })
}

/// Formats a transport failure body for the error alert injected into the
/// conversation: a one-line summary when the server sent a recognizable
/// error envelope, the raw body otherwise.
pub fn format_transport_error(error_text: &str) -> String {
    let trimmed = error_text.trim();
    if trimmed.is_empty() {
        return "Agent server error: <empty response>".to_string();
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&value) {
            if !summary.is_empty() {
                return format!("Agent server error: {summary}");
            }
        }
    }
    format!("Agent server error: {trimmed}")
}

pub struct StreamParams {
    pub client: reqwest::Client,
    pub base_url: String,
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    /// Raw user text or an encoded [`crate::core::event::UiEvent`].
    pub message: String,
    pub cancel_token: CancellationToken,
    pub stream_id: u64,
}

/// Enforces the one-stream-per-turn discipline: beginning a new stream
/// cancels the previous one and advances the stream id, so stale messages
/// from a superseded stream can be recognized and dropped.
#[derive(Default)]
pub struct StreamGate {
    current_id: u64,
    cancel: Option<CancellationToken>,
}

impl StreamGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> (CancellationToken, u64) {
        self.cancel_current();
        self.current_id += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        (token, self.current_id)
    }

    pub fn cancel_current(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    pub fn is_current(&self, stream_id: u64) -> bool {
        self.current_id == stream_id
    }
}

#[derive(Clone)]
pub struct AgentStreamService {
    tx: mpsc::UnboundedSender<(StreamMessage, u64)>,
}

impl AgentStreamService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(StreamMessage, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_stream(&self, params: StreamParams) {
        let tx_clone = self.tx.clone();
        tokio::spawn(async move {
            let StreamParams {
                client,
                base_url,
                app_name,
                user_id,
                session_id,
                message,
                cancel_token,
                stream_id,
            } = params;

            let request = RunAgentRequest {
                app_name,
                user_id,
                session_id,
                new_message: message,
                streaming: true,
            };

            tokio::select! {
                _ = async {
                    let run_url = format!("{}/run_sse", base_url.trim_end_matches('/'));
                    match client
                        .post(run_url)
                        .header("Content-Type", "application/json")
                        .json(&request)
                        .send()
                        .await
                    {
                        Ok(response) => {
                            if !response.status().is_success() {
                                let error_text = response
                                    .text()
                                    .await
                                    .unwrap_or_else(|_| "<no body>".to_string());
                                let formatted = format_transport_error(&error_text);
                                let _ = tx_clone.send((StreamMessage::Error(formatted), stream_id));
                                let _ = tx_clone.send((StreamMessage::End, stream_id));
                                return;
                            }

                            let mut stream = response.bytes_stream();
                            let mut buffer: Vec<u8> = Vec::new();

                            while let Some(chunk) = stream.next().await {
                                if cancel_token.is_cancelled() {
                                    return;
                                }

                                if let Ok(chunk_bytes) = chunk {
                                    buffer.extend_from_slice(&chunk_bytes);

                                    while let Some(newline_pos) = memchr(b'\n', &buffer) {
                                        let line_str = match std::str::from_utf8(&buffer[..newline_pos]) {
                                            Ok(s) => s.trim(),
                                            Err(_) => {
                                                buffer.drain(..=newline_pos);
                                                continue;
                                            }
                                        };

                                        let should_end =
                                            process_sse_line(line_str, &tx_clone, stream_id);
                                        buffer.drain(..=newline_pos);
                                        if should_end {
                                            return;
                                        }
                                    }
                                }
                            }

                            let _ = tx_clone.send((StreamMessage::End, stream_id));
                        }
                        Err(e) => {
                            let formatted = format_transport_error(&e.to_string());
                            let _ = tx_clone.send((StreamMessage::Error(formatted), stream_id));
                            let _ = tx_clone.send((StreamMessage::End, stream_id));
                        }
                    }
                } => {}
                _ = cancel_token.cancelled() => {}
            }
        });
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_sse_line_handles_spacing_variants() {
        let (service, mut rx) = AgentStreamService::new();
        let variants = [
            (
                r#"data: {"content": {}}"#,
                r#"{"content": {}}"#,
                "data: [DONE]",
            ),
            (
                r#"data:{"content": {}}"#,
                r#"{"content": {}}"#,
                "data:[DONE]",
            ),
        ];

        for (index, (record_line, expected_payload, done_line)) in variants.iter().enumerate() {
            let stream_id = (index + 1) as u64;

            assert!(!process_sse_line(record_line, &service.tx, stream_id));
            let (message, received_id) = rx.try_recv().expect("expected record message");
            assert_eq!(received_id, stream_id);
            match message {
                StreamMessage::Record(payload) => assert_eq!(payload, *expected_payload),
                other => panic!("expected record message, got {other:?}"),
            }

            assert!(process_sse_line(done_line, &service.tx, stream_id));
            let (message, received_id) = rx.try_recv().expect("expected end message");
            assert_eq!(received_id, stream_id);
            assert!(matches!(message, StreamMessage::End));
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let (service, mut rx) = AgentStreamService::new();
        assert!(!process_sse_line("event: ping", &service.tx, 1));
        assert!(!process_sse_line(": keep-alive", &service.tx, 1));
        assert!(!process_sse_line("", &service.tx, 1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn malformed_payloads_still_flow_to_the_consumer() {
        // classification happens in the accumulator; the transport must
        // not drop records it cannot parse
        let (service, mut rx) = AgentStreamService::new();
        assert!(!process_sse_line("data: {not json", &service.tx, 7));
        let (message, _) = rx.try_recv().expect("expected record message");
        assert!(matches!(message, StreamMessage::Record(p) if p == "{not json"));
    }

    #[test]
    fn format_transport_error_prefers_summaries() {
        let raw = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        assert_eq!(
            format_transport_error(raw),
            "Agent server error: model overloaded"
        );
        assert_eq!(
            format_transport_error("backend exploded"),
            "Agent server error: backend exploded"
        );
        assert_eq!(
            format_transport_error("  "),
            "Agent server error: <empty response>"
        );
    }

    #[test]
    fn stream_gate_cancels_prior_stream_on_begin() {
        let mut gate = StreamGate::new();
        let (first_token, first_id) = gate.begin();
        assert!(gate.is_current(first_id));
        assert!(!first_token.is_cancelled());

        let (second_token, second_id) = gate.begin();
        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());
        assert!(gate.is_current(second_id));
        assert!(!gate.is_current(first_id));
    }
}
