//! Pergola is the protocol engine behind terminal clients that render
//! agent-described user interfaces: a remote agent streams a UI as data,
//! the client renders it, and user interactions flow back as structured
//! events, without either side sharing compiled UI code.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the protocol: the component schema and its decoding
//!   rules, the event model and its byte-exact encodings, the addressed
//!   update protocol, the stream extractor that tells structured UI apart
//!   from narrative text, per-turn accumulation, the cancellable SSE
//!   transport, and on-disk configuration.
//! - [`ui`] maps component trees to styled terminal lines, tracks input
//!   values and focus for a rendered turn, and turns user actions into
//!   protocol events.
//! - [`api`] defines the wire payloads exchanged with an agent server and
//!   the session-provisioning seam.
//!
//! A typical embedding drives one turn as: open a stream through
//! [`core::chat_stream::AgentStreamService`] (gated by a
//! [`core::chat_stream::StreamGate`] so a new turn cancels the previous
//! one), feed each record into a [`core::turn::TurnAccumulator`], render
//! its resolution with [`ui::render::render`], and send any dispatched
//! [`core::event::UiEvent`] back as the next turn's message via its
//! [`encode`](core::event::UiEvent::encode) form.

pub mod api;
pub mod core;
pub mod logging;
pub mod ui;
