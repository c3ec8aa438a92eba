//! Base config: data directory, log file, system prompt file. Loaded from env.

use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use prompt::DEFAULT_SYSTEM_MESSAGE;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// DATA_DIR; memories and sessions live below it
    pub data_dir: PathBuf,
    /// Log file path
    pub log_file: String,
    /// SYSTEM_PROMPT_FILE
    pub system_prompt_file: PathBuf,
}

impl BaseConfig {
    /// Load from environment variables.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/seed-bot.log".to_string());
        let system_prompt_file = env::var("SYSTEM_PROMPT_FILE")
            .unwrap_or_else(|_| "./training/a_seed_prompt.txt".to_string());
        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            log_file,
            system_prompt_file: PathBuf::from(system_prompt_file),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            anyhow::bail!("DATA_DIR must not be empty");
        }
        if self.log_file.trim().is_empty() {
            anyhow::bail!("LOG_FILE must not be empty");
        }
        Ok(())
    }

    pub fn memories_dir(&self) -> PathBuf {
        self.data_dir.join("memories")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    /// Contents of the system prompt file, or the built-in default when the
    /// file is missing, unreadable or blank.
    pub fn load_system_prompt(&self) -> String {
        read_prompt_file(&self.system_prompt_file)
            .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string())
    }
}

fn read_prompt_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(path = %path.display(), chars = text.len(), "System prompt loaded");
            Some(text)
        }
        Ok(_) => {
            warn!(path = %path.display(), "System prompt file is blank, using default");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "System prompt file unavailable, using default");
            None
        }
    }
}
