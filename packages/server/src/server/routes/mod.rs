// HTTP routes
pub mod health;
pub mod parse_stats;

pub use health::*;
pub use parse_stats::*;
