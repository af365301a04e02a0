pub mod chat_stream;
pub mod config;
pub mod event;
pub mod extract;
pub mod schema;
pub mod turn;
pub mod update;
