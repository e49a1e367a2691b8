pub mod analysis;
pub mod chart;
pub mod indicator;
pub mod interval;
pub mod report;
pub mod rule;
pub mod series;
pub mod stock;

pub use analysis::*;
pub use chart::*;
pub use indicator::*;
pub use interval::*;
pub use report::*;
pub use rule::*;
pub use series::*;
pub use stock::*;
