#[macro_use]
extern crate log;

extern crate config as lib_config;

pub mod builder;
pub mod config;
pub mod heuristics;
pub mod logger;
pub mod pool;
pub mod predictor;
pub mod traits;
pub mod types;
pub mod utils;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

pub use crate::builder::predict_set;
pub use crate::config::Config;
pub use crate::heuristics::{combine, Ambivalent, Bias, Heuristic, Scorer, UsageHeuristic};
pub use crate::pool::WeightedPool;
pub use crate::predictor::TeamPredictor;
pub use crate::traits::{Dex, OpenDex, OpenValidator, SpeciesFacts, Validator};
pub use crate::types::{PokemonSet, Team, TeamMemberInfo};
pub use stats::*;

use std::error::Error;
