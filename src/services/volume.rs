//! Volume trend analysis over a trailing window.

use serde::{Deserialize, Serialize};

use crate::types::{AnalysisResult, Signal};

pub const DEFAULT_VOLUME_DAYS: usize = 5;
const SURGE_MULTIPLIER: f64 = 1.5;
const DRY_UP_MULTIPLIER: f64 = 0.5;
/// Average day-over-day change (percent) that counts as a trend.
const TREND_THRESHOLD_PCT: f64 = 10.0;

/// Summary numbers behind the volume signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStats {
    pub avg_volume: f64,
    pub last_volume: u64,
    /// Mean day-over-day change in percent.
    pub avg_trend_pct: f64,
}

/// Statistics over the last `days` volumes, or `None` for an empty window.
pub fn volume_stats(volumes: &[u64], days: usize) -> Option<VolumeStats> {
    if volumes.is_empty() || days == 0 {
        return None;
    }

    let window = &volumes[volumes.len().saturating_sub(days)..];
    let avg_volume = window.iter().map(|&v| v as f64).sum::<f64>() / window.len() as f64;
    let last_volume = *window.last()?;

    Some(VolumeStats {
        avg_volume,
        last_volume,
        avg_trend_pct: average_change_pct(window),
    })
}

/// Mean of day-over-day percent changes. A zero prior volume counts as 0%.
fn average_change_pct(window: &[u64]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }

    let total: f64 = window
        .windows(2)
        .map(|w| {
            let (prev, cur) = (w[0] as f64, w[1] as f64);
            if prev == 0.0 {
                0.0
            } else {
                (cur - prev) / prev * 100.0
            }
        })
        .sum();

    total / (window.len() - 1) as f64
}

/// Classify current volume against its trailing average.
pub fn analyze_volume(volumes: &[u64], days: usize) -> AnalysisResult {
    let Some(stats) = volume_stats(volumes, days) else {
        return AnalysisResult::new();
    };

    let last = stats.last_volume as f64;
    let mut result = AnalysisResult::new();

    result = if last > stats.avg_volume * SURGE_MULTIPLIER {
        result
            .with_signal(Signal::info("Volume surge, trading is active"))
            .with_signal(Signal::info("Watch whether price and volume move together"))
    } else if last < stats.avg_volume * DRY_UP_MULTIPLIER {
        result
            .with_signal(Signal::info("Volume has dried up, market is waiting"))
            .with_signal(Signal::info("Wait for volume to recover before entering"))
    } else {
        result.with_signal(Signal::info("Volume is stable"))
    };

    if stats.avg_trend_pct > TREND_THRESHOLD_PCT {
        result = result.with_signal(Signal::info(
            "Volume trend rising, trading interest is increasing",
        ));
    } else if stats.avg_trend_pct < -TREND_THRESHOLD_PCT {
        result = result.with_signal(Signal::info("Volume trend falling, advise caution"));
    }

    result
}
