pub mod generation;
pub mod spread;
pub mod usage;

pub use generation::Generation;
pub use spread::{Spread, StatLine};
pub use usage::{SpeciesUsage, UsageData, UsageInfo, WeightedUsage};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Sync + Send>>;
