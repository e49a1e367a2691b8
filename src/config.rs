use std::env;
use std::time::Duration;

/// Data-source fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Days of history requested from the live source.
    pub lookback_days: u32,
    /// Attempt ceiling for retryable fetch failures.
    pub max_attempts: u32,
    /// Delay before the first retry (ms); doubles on each further retry.
    pub base_delay_ms: u64,
    /// Upper bound on any single retry delay (ms).
    pub max_delay_ms: u64,
    /// HTTP request timeout (seconds).
    pub timeout_secs: u64,
    /// How long a fetched live series stays cached (seconds).
    pub cache_ttl_secs: u64,
    /// Fall back to a generated series when the live source fails.
    pub mock_fallback: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            lookback_days: 1825, // 5 years
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
            timeout_secs: 30,
            cache_ttl_secs: 300,
            mock_fallback: true,
        }
    }
}

impl FetchConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Parameters used when a request leaves them unspecified.
#[derive(Debug, Clone)]
pub struct AnalysisDefaults {
    /// Holding period in trading days.
    pub holding_period: usize,
    /// Number of price intervals (2-10).
    pub intervals: usize,
    /// Required profit as a fraction of the interval width.
    pub target_profit_ratio: f64,
    /// Buy-signal confidence threshold as a fraction (0-1).
    pub confidence: f64,
    /// Volume window for the volume trend analysis.
    pub volume_days: usize,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            holding_period: 10,
            intervals: 5,
            target_profit_ratio: 0.8,
            confidence: 0.6,
            volume_days: 5,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Data-source fetch configuration.
    pub fetch: FetchConfig,
    /// Default analysis parameters.
    pub analysis: AnalysisDefaults,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v == "true" || v == "1")
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let fetch_defaults = FetchConfig::default();
        let analysis_defaults = AnalysisDefaults::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("PORT").unwrap_or(3010),
            fetch: FetchConfig {
                lookback_days: env_parse("LOOKBACK_DAYS").unwrap_or(fetch_defaults.lookback_days),
                max_attempts: env_parse::<u32>("FETCH_MAX_ATTEMPTS")
                    .filter(|n| *n > 0)
                    .unwrap_or(fetch_defaults.max_attempts),
                base_delay_ms: env_parse("FETCH_BASE_DELAY_MS")
                    .unwrap_or(fetch_defaults.base_delay_ms),
                max_delay_ms: env_parse("FETCH_MAX_DELAY_MS").unwrap_or(fetch_defaults.max_delay_ms),
                timeout_secs: env_parse("FETCH_TIMEOUT_SECS").unwrap_or(fetch_defaults.timeout_secs),
                cache_ttl_secs: env_parse("SERIES_CACHE_TTL_SECS")
                    .unwrap_or(fetch_defaults.cache_ttl_secs),
                mock_fallback: env_flag("MOCK_FALLBACK").unwrap_or(fetch_defaults.mock_fallback),
            },
            analysis: AnalysisDefaults {
                holding_period: env_parse("DEFAULT_HOLDING_PERIOD")
                    .unwrap_or(analysis_defaults.holding_period),
                intervals: env_parse("DEFAULT_INTERVALS").unwrap_or(analysis_defaults.intervals),
                target_profit_ratio: env_parse("DEFAULT_TARGET_PROFIT_RATIO")
                    .unwrap_or(analysis_defaults.target_profit_ratio),
                confidence: env_parse("DEFAULT_CONFIDENCE").unwrap_or(analysis_defaults.confidence),
                volume_days: env_parse("DEFAULT_VOLUME_DAYS")
                    .unwrap_or(analysis_defaults.volume_days),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
