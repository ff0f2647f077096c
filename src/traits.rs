use crate::types::PokemonSet;
use serde::{Deserialize, Serialize};

/// What the rules catalog already proved about a species. Handed back to
/// the validator with each candidate team so it can skip re-deriving the
/// same facts over and over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesFacts {
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// The rules catalog, consulted once per species when the predictor is
/// built. Statistics snapshots routinely carry species that have been
/// banned since the snapshot was taken; the first half of the answer says
/// whether that happened.
pub trait Dex {
    fn check_species(&self, id: &str) -> (bool, SpeciesFacts);
}

/// The legality oracle. `None` means legal; otherwise a list of
/// human-readable complaints.
pub trait Validator {
    fn validate_team(&self, team: &[PokemonSet], hints: &[&SpeciesFacts]) -> Option<Vec<String>>;

    fn validate_set(&self, set: &PokemonSet) -> Option<Vec<String>>;
}

/// Dex that trusts the statistics snapshot completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenDex;

impl Dex for OpenDex {
    fn check_species(&self, _id: &str) -> (bool, SpeciesFacts) {
        (false, SpeciesFacts::default())
    }
}

/// Validator with no rules at all. Useful stand-in when no oracle is wired
/// up, since a zero validation budget skips checking anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenValidator;

impl Validator for OpenValidator {
    fn validate_team(&self, _team: &[PokemonSet], _hints: &[&SpeciesFacts]) -> Option<Vec<String>> {
        None
    }

    fn validate_set(&self, _set: &PokemonSet) -> Option<Vec<String>> {
        None
    }
}
