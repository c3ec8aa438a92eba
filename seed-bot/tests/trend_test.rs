//! Trend analysis over transcripts persisted by [`JsonSessionStore`].

use std::sync::Arc;

use chrono::Utc;
use memory_core::UserId;
use seed_bot::session::{JsonSessionStore, SessionStore, SessionTranscript, SessionTurn};
use seed_bot::trend::{TrendAnalyzer, TrendConfig, SECONDS_PER_DAY};

fn user(raw: &str) -> UserId {
    UserId::parse(raw).unwrap()
}

fn transcript(id: &str, moods: &[&str]) -> SessionTranscript {
    let mut t = SessionTranscript::new(id);
    for mood in moods {
        t.turns.push(SessionTurn::user("..."));
        t.turns.push(SessionTurn::assistant("...", *mood));
    }
    t
}

#[tokio::test]
async fn test_dominant_negative_mood_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSessionStore::new(dir.path()));
    let alice = user("alice");
    store.save(&alice, transcript("a", &["sadness", "joy"])).await.unwrap();
    store.save(&alice, transcript("b", &["sadness", "sadness", "neutral"])).await.unwrap();

    let analyzer = TrendAnalyzer::new(store, TrendConfig::default());
    let hint = analyzer.analyze(&alice, Utc::now().timestamp()).await.unwrap();

    assert_eq!(hint.dominant_label, "sadness");
    assert_eq!((hint.count, hint.total), (3, 4));
    assert!(hint.is_negative);
    assert!(hint.render().starts_with("[PSYCHOLOGICAL TREND ANALYSIS]:\n- Last 5 days mood: 'SADNESS' (3/4)."));
}

#[tokio::test]
async fn test_single_sample_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSessionStore::new(dir.path()));
    let alice = user("alice");
    store.save(&alice, transcript("a", &["joy"])).await.unwrap();

    let analyzer = TrendAnalyzer::new(store, TrendConfig::default());
    assert!(analyzer.analyze(&alice, Utc::now().timestamp()).await.is_none());
}

#[tokio::test]
async fn test_sessions_outside_window_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSessionStore::new(dir.path()));
    let alice = user("alice");
    store.save(&alice, transcript("a", &["anger", "anger", "anger"])).await.unwrap();

    let analyzer = TrendAnalyzer::new(store, TrendConfig::default());
    let later = Utc::now().timestamp() + 6 * SECONDS_PER_DAY;
    assert!(analyzer.analyze(&alice, later).await.is_none());
}

#[tokio::test]
async fn test_other_users_sessions_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonSessionStore::new(dir.path()));
    store.save(&user("bob"), transcript("a", &["fear", "fear", "fear"])).await.unwrap();

    let analyzer = TrendAnalyzer::new(store, TrendConfig::default());
    assert!(analyzer.analyze(&user("alice"), Utc::now().timestamp()).await.is_none());
}
