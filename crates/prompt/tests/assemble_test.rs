//! Unit tests for prompt assembly: block order, omission of empty blocks, memory block format
//! and message list construction.
//! External interactions: none (pure function tests).

use prompt::{
    assemble, build_messages, format_memory_block, ChatMessage, MessageRole, DEFAULT_SYSTEM_MESSAGE,
    SECTION_MEMORY,
};

const TREND: &str = "[PSYCHOLOGICAL TREND ANALYSIS]:\n- Last 5 days mood: 'JOY' (3/4).";

/// **Test: Base prompt alone is returned unchanged.**
#[test]
fn assemble_base_only() {
    assert_eq!(assemble(DEFAULT_SYSTEM_MESSAGE, None, None), "You are A SEED.");
}

/// **Test: Order is base, trend, memory, separated by blank lines.**
#[test]
fn assemble_orders_blocks() {
    let memory = format_memory_block(["likes tea"]).unwrap();
    let out = assemble("Base.", Some(TREND), Some(&memory));
    assert_eq!(
        out,
        format!("Base.\n\n{}\n\n[Relevant Context]:\n- likes tea", TREND)
    );
    let trend_at = out.find("[PSYCHOLOGICAL").unwrap();
    let memory_at = out.find(SECTION_MEMORY).unwrap();
    assert!(trend_at < memory_at);
}

/// **Test: Memory block without trend block follows the base prompt directly.**
#[test]
fn assemble_memory_without_trend() {
    let out = assemble("Base.", None, Some("[Relevant Context]:\n- x"));
    assert_eq!(out, "Base.\n\n[Relevant Context]:\n- x");
}

/// **Test: Blank blocks are skipped rather than producing stray separators.**
#[test]
fn assemble_skips_blank_blocks() {
    assert_eq!(assemble("Base.", Some("  \n"), Some("")), "Base.");
}

/// **Test: Output is identical across calls (no hidden state).**
#[test]
fn assemble_is_deterministic() {
    let a = assemble("Base.", Some(TREND), Some("[Relevant Context]:\n- x"));
    let b = assemble("Base.", Some(TREND), Some("[Relevant Context]:\n- x"));
    assert_eq!(a, b);
}

/// **Test: No snippets means no memory block.**
#[test]
fn memory_block_empty_is_none() {
    assert!(format_memory_block(Vec::<String>::new()).is_none());
}

/// **Test: Snippets keep their given order and non-ASCII text.**
#[test]
fn memory_block_keeps_order() {
    let block = format_memory_block(["Tôi thích trà", "second"]).unwrap();
    assert_eq!(block, "[Relevant Context]:\n- Tôi thích trà\n- second");
}

/// **Test: Messages are system, history (blank entries dropped), then the question.**
#[test]
fn build_messages_orders_history() {
    let history = vec![
        ChatMessage::user("hi"),
        ChatMessage::assistant(""),
        ChatMessage::assistant("hello!"),
    ];
    let messages = build_messages("sys", history, "how are you?");
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User
        ]
    );
    assert_eq!(messages[0].content, "sys");
    assert_eq!(messages.last().unwrap().content, "how are you?");
}

/// **Test: Role names parse case-insensitively; unknown roles are rejected.**
#[test]
fn message_role_parse() {
    assert_eq!(MessageRole::parse("Assistant"), Some(MessageRole::Assistant));
    assert_eq!(MessageRole::parse("user"), Some(MessageRole::User));
    assert_eq!(MessageRole::parse("tool"), None);
    assert_eq!(MessageRole::Assistant.as_str(), "assistant");
}
