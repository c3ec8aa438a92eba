//! # seed-bot
//!
//! Conversational assistant backend. Each chat turn is enriched with the user's
//! semantically closest past messages and, when one mood clearly dominates the
//! recent sessions, a trend hint, before it reaches the generation backend.

pub mod chat;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod reply;
pub mod session;
pub mod trend;

pub use chat::{ChatRequest, ChatService, ChatTurn, SessionChatTurn};
pub use components::{build_components, SeedComponents};
pub use config::SeedConfig;
pub use crate::core::{init_tracing, Result, SeedError};
pub use reply::{parse_reply, ChatReply};
pub use session::{JsonSessionStore, SessionStore, SessionTranscript, SessionTurn};
pub use trend::{TrendAnalyzer, TrendConfig, TrendHint};
