use crate::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A weighted map keeps its keys ordered so that two runs over the same dump
/// walk candidates in the same order. Replays depend on it.
pub type WeightedMap = BTreeMap<String, f64>;

/// One month of aggregate usage for a whole metagame, as served by the
/// `chaos/` JSON dumps on the stats site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageData {
    #[serde(default)]
    pub info: Option<UsageInfo>,
    #[serde(default)]
    pub data: BTreeMap<String, SpeciesUsage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageInfo {
    #[serde(default)]
    pub metagame: String,
    #[serde(default)]
    pub cutoff: f64,
    #[serde(rename = "number of battles", default)]
    pub battles: u64,
}

/// Per-species slice of the dump. The capitalized field names are the
/// dump's own spelling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesUsage {
    #[serde(default)]
    pub usage: WeightedUsage,
    #[serde(default)]
    pub lead: WeightedUsage,
    #[serde(rename = "Spreads", default)]
    pub spreads: WeightedMap,
    #[serde(rename = "Abilities", default)]
    pub abilities: WeightedMap,
    #[serde(rename = "Items", default)]
    pub items: WeightedMap,
    #[serde(rename = "Moves", default)]
    pub moves: WeightedMap,
    #[serde(rename = "Teammates", default)]
    pub teammates: WeightedMap,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeightedUsage {
    #[serde(default)]
    pub weighted: f64,
    #[serde(default)]
    pub raw: f64,
}

impl UsageData {
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        Ok(data)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let data = Self::from_json(&content)?;

        debug!(
            "loaded usage for {} species from {}",
            data.data.len(),
            path.as_ref().display(),
        );

        Ok(data)
    }

    pub fn species(&self, name: &str) -> Option<&SpeciesUsage> {
        self.data.get(name)
    }

    pub fn species_count(&self) -> usize {
        self.data.len()
    }
}

impl SpeciesUsage {
    pub fn teammate_weight(&self, name: &str) -> f64 {
        self.teammates.get(name).copied().unwrap_or(0.0)
    }
}
