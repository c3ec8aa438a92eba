//! End-to-end turn through [`build_components`] with mockito standing in for
//! the Ollama embedding and chat endpoints, and a temp data directory.

use std::path::Path;

use embedding::EnvEmbeddingConfig;
use llm_client::{EnvLlmConfig, LlmError};
use memory_core::{MemoryStore, UserId};
use mockito::Matcher;
use seed_bot::config::{BaseConfig, EnvMemoryConfig, EnvTrendConfig, SeedConfig};
use seed_bot::{build_components, SeedError, SessionStore, TrendConfig};

fn config(host: &str, data_dir: &Path) -> SeedConfig {
    let prompt_file = data_dir.join("prompt.txt");
    std::fs::write(&prompt_file, "You are a gardener.").unwrap();
    SeedConfig {
        base: BaseConfig {
            data_dir: data_dir.to_path_buf(),
            log_file: data_dir.join("seed-bot.log").to_string_lossy().into_owned(),
            system_prompt_file: prompt_file,
        },
        embedding: EnvEmbeddingConfig {
            ollama_host: host.to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_timeout_secs: 5,
            embedding_dimension: Some(2),
        },
        llm: EnvLlmConfig {
            ollama_host: host.to_string(),
            model_name: "llama3".to_string(),
            num_ctx: 4096,
            gen_temp: 0.7,
            top_p: 0.9,
            llm_timeout_secs: 10,
        },
        memory: EnvMemoryConfig { memory_top_k: 3 },
        trend: EnvTrendConfig {
            trend: TrendConfig::default(),
        },
    }
}

#[tokio::test]
async fn session_turn_over_http_records_memory_and_transcript() {
    let mut server = mockito::Server::new_async().await;
    let embed_mock = server
        .mock("POST", "/api/embeddings")
        .match_body(Matcher::PartialJsonString(r#"{"model": "nomic-embed-text"}"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"embedding": [0.6, 0.8]}"#)
        .expect(2)
        .create_async()
        .await;
    let chat_mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJsonString(r#"{"model": "llama3", "stream": false}"#.to_string()),
            Matcher::Regex("You are a gardener.".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": {"role": "assistant", "content": "{\"reply\": \"Plant tomatoes.\", \"emotion\": \"Joy\"}"}, "done": true}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let components = build_components(&config(&server.url(), dir.path())).unwrap();

    let outcome = components
        .chat
        .handle_session_turn("alice", None, "what should I grow?")
        .await
        .unwrap();

    assert_eq!(outcome.turn.reply, "Plant tomatoes.");
    assert_eq!(outcome.turn.emotion, "joy");
    embed_mock.assert_async().await;
    chat_mock.assert_async().await;

    let alice = UserId::parse("alice").unwrap();
    let records = components.memory_store.try_load(&alice).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(dir.path().join("memories").join("alice.json").exists());
    let sessions = components.sessions.list(&alice).await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, outcome.session_id);
    assert_eq!(sessions[0].turns[1].emotion.as_deref(), Some("joy"));
}

#[tokio::test]
async fn chat_backend_error_fails_turn_and_records_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _embed_mock = server
        .mock("POST", "/api/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"embedding": [0.6, 0.8]}"#)
        .create_async()
        .await;
    let _chat_mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let components = build_components(&config(&server.url(), dir.path())).unwrap();

    let err = components
        .chat
        .handle_session_turn("alice", Some("s1"), "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Generation(LlmError::Unavailable(_))));
    let alice = UserId::parse("alice").unwrap();
    assert!(components.memory_store.try_load(&alice).await.unwrap().is_empty());
    assert!(components.sessions.load(&alice, "s1").await.unwrap().is_none());
}
