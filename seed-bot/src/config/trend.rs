//! Trend analyzer thresholds from env.

use anyhow::Result;
use std::env;

use crate::trend::TrendConfig;

/// TREND_* variables; unset or unparsable values fall back to [`TrendConfig::default`].
#[derive(Debug, Clone)]
pub struct EnvTrendConfig {
    pub trend: TrendConfig,
}

impl EnvTrendConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = TrendConfig::default();
        let window_days = env::var("TREND_WINDOW_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.window_days);
        let negative_labels = env::var("TREND_NEGATIVE_LABELS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|l| l.trim().to_lowercase())
                    .filter(|l| !l.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.negative_labels);
        let dominance_ratio = env::var("TREND_DOMINANCE_RATIO")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.dominance_ratio);
        let min_samples = env::var("TREND_MIN_SAMPLES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_samples);
        Ok(Self {
            trend: TrendConfig {
                window_days,
                negative_labels,
                dominance_ratio,
                min_samples,
            },
        })
    }

    /// Ratio must lie in `[0, 1)` and the window must cover at least one day.
    pub fn validate(&self) -> Result<()> {
        if self.trend.window_days == 0 {
            anyhow::bail!("TREND_WINDOW_DAYS must be greater than zero");
        }
        if !(0.0..1.0).contains(&self.trend.dominance_ratio) {
            anyhow::bail!(
                "TREND_DOMINANCE_RATIO must be within 0.0..1.0, got {}",
                self.trend.dominance_ratio
            );
        }
        Ok(())
    }
}
