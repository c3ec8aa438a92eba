//! # Chat pipeline
//!
//! One stateless pass per turn: validate, embed, retrieve memory, analyze the
//! mood trend, assemble the system prompt, generate, record memory, parse.

mod service;

pub use service::{ChatRequest, ChatService, ChatTurn, SessionChatTurn};
