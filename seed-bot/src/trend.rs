//! Mood-trend analysis over a user's recent session transcripts.
//!
//! Counts the non-neutral mood labels the assistant attached to its replies
//! within a trailing window. When one label clearly dominates, a hint is
//! injected into the system prompt; negative moods add a suggestion to favor
//! behavioral intervention over reassurance.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use memory_core::UserId;
use tracing::{debug, info};

use crate::session::{SessionStore, SessionTranscript};

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const TREND_HEADER: &str = "[PSYCHOLOGICAL TREND ANALYSIS]:";
pub const NEGATIVE_SUGGESTION: &str =
    "- Lingering negative mood detected. Suggest behavioral intervention (rest, brain dump) instead of just comfort.";

/// Thresholds for emitting a [`TrendHint`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    pub window_days: u32,
    pub negative_labels: BTreeSet<String>,
    /// Dominant share must be strictly greater than this.
    pub dominance_ratio: f64,
    /// Minimum number of non-neutral labels in the window.
    pub min_samples: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: 5,
            negative_labels: ["sadness", "anger", "fear", "anxiety"]
                .into_iter()
                .map(String::from)
                .collect(),
            dominance_ratio: 0.4,
            min_samples: 3,
        }
    }
}

/// Dominant mood over the window. Computed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendHint {
    pub dominant_label: String,
    pub count: usize,
    pub total: usize,
    pub is_negative: bool,
    pub window_days: u32,
}

impl TrendHint {
    /// Prompt block naming the label, its count and the total.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n- Last {} days mood: '{}' ({}/{}).",
            TREND_HEADER,
            self.window_days,
            self.dominant_label.to_uppercase(),
            self.count,
            self.total
        );
        if self.is_negative {
            out.push('\n');
            out.push_str(NEGATIVE_SUGGESTION);
        }
        out
    }
}

/// Counts non-neutral assistant mood labels in transcripts updated within
/// `[now - window, now]`. Keys are ordered, so iteration is lexical.
pub fn tally_moods(transcripts: &[SessionTranscript], now: i64, window_days: u32) -> BTreeMap<String, usize> {
    let cutoff = now - i64::from(window_days) * SECONDS_PER_DAY;
    let mut tally = BTreeMap::new();
    for transcript in transcripts
        .iter()
        .filter(|t| t.updated >= cutoff && t.updated <= now)
    {
        for label in transcript
            .turns
            .iter()
            .filter(|turn| turn.is_assistant())
            .filter_map(|turn| turn.mood_label())
        {
            *tally.entry(label).or_insert(0) += 1;
        }
    }
    tally
}

/// Decides whether the window shows a dominant mood.
///
/// Ties on the highest count go to the lexically smallest label.
pub fn analyze_transcripts(transcripts: &[SessionTranscript], now: i64, config: &TrendConfig) -> Option<TrendHint> {
    let tally = tally_moods(transcripts, now, config.window_days);
    let total: usize = tally.values().sum();
    let mut dominant: Option<(&String, usize)> = None;
    for (label, &count) in &tally {
        if dominant.map_or(true, |(_, best)| count > best) {
            dominant = Some((label, count));
        }
    }
    let (label, count) = dominant?;
    let ratio = count as f64 / total as f64;
    debug!(label = %label, count, total, ratio, "Mood tally computed");
    if total < config.min_samples || ratio <= config.dominance_ratio {
        return None;
    }
    Some(TrendHint {
        dominant_label: label.clone(),
        count,
        total,
        is_negative: config.negative_labels.contains(label.as_str()),
        window_days: config.window_days,
    })
}

/// Reads a user's transcripts and derives a [`TrendHint`]. Never mutates anything.
pub struct TrendAnalyzer {
    sessions: Arc<dyn SessionStore>,
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(sessions: Arc<dyn SessionStore>, config: TrendConfig) -> Self {
        Self { sessions, config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub async fn analyze(&self, user: &UserId, now: i64) -> Option<TrendHint> {
        let transcripts = self.sessions.list(user).await;
        let hint = analyze_transcripts(&transcripts, now, &self.config);
        match &hint {
            Some(h) => info!(user = %user, label = %h.dominant_label, count = h.count, total = h.total, negative = h.is_negative, "step: trend hint emitted"),
            None => debug!(user = %user, sessions = transcripts.len(), "No trend hint"),
        }
        hint
    }
}
