pub mod analysis;
pub mod cache;
pub mod estimator;
pub mod gate;
pub mod indicators;
pub mod optimizer;
pub mod partition;
pub mod rules;
pub mod technical;
pub mod volume;

pub use analysis::{analyze_columns, run_analysis, AnalysisService};
pub use cache::Cache;
pub use estimator::{BucketEstimate, ForwardReturnEstimator, ProbabilityEstimator};
pub use gate::{RequestGate, RequestToken};
pub use indicators::{compute_indicators, Indicator};
pub use optimizer::{GeneticOptimizer, OptimizerConfig};
pub use partition::{partition, price_buckets};
pub use rules::{generate_trading_rules, render_rules};
pub use technical::analyze_technical;
pub use volume::{analyze_volume, volume_stats, VolumeStats};
