use crate::utils::to_id;
use serde::{Deserialize, Serialize};
use stats::StatLine;
use std::fmt;

pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_MOVES: usize = 4;
pub const MAX_HAPPINESS: u8 = 255;
pub const DEFAULT_LEVEL: u8 = 100;

/// Slot order matters: the first member is the lead.
pub type Team = Vec<PokemonSet>;

/// One fully fleshed-out team member. Nothing in here is optional; unknown
/// ability/item come out as empty strings rather than holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonSet {
    pub species: String,
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub shiny: bool,
    #[serde(default)]
    pub ability: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub nature: String,
    #[serde(default)]
    pub ivs: StatLine,
    #[serde(default)]
    pub evs: StatLine,
    #[serde(default)]
    pub happiness: u8,
}

impl PokemonSet {
    /// Does the set carry this move? `id` must already be in flat id form.
    pub fn has_move(&self, id: &str) -> bool {
        self.moves.iter().any(|m| to_id(m) == id)
    }
}

/// Renders the set in the plain-text export format teambuilders swap around.
impl fmt::Display for PokemonSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.name.is_empty() && self.name != self.species {
            write!(f, "{} ({})", self.name, self.species)?;
        } else {
            write!(f, "{}", self.species)?;
        }

        if !self.item.is_empty() {
            write!(f, " @ {}", self.item)?;
        }
        writeln!(f)?;

        if !self.ability.is_empty() {
            writeln!(f, "Ability: {}", self.ability)?;
        }

        if self.level != DEFAULT_LEVEL {
            writeln!(f, "Level: {}", self.level)?;
        }

        if self.shiny {
            writeln!(f, "Shiny: Yes")?;
        }

        if self.happiness != MAX_HAPPINESS {
            writeln!(f, "Happiness: {}", self.happiness)?;
        }

        let evs = self.evs.ev_display();
        if !evs.is_empty() {
            writeln!(f, "EVs: {}", evs)?;
        }

        if !self.nature.is_empty() {
            writeln!(f, "{} Nature", self.nature)?;
        }

        let ivs = self.ivs.iv_display();
        if !ivs.is_empty() {
            writeln!(f, "IVs: {}", ivs)?;
        }

        for name in &self.moves {
            writeln!(f, "- {}", name)?;
        }

        Ok(())
    }
}

/// What the caller already knows about one opposing slot. The predictor
/// treats this as read-only and fills in everything that's `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberInfo {
    pub species: String,
    /// Nickname as shown in battle, when it differs from the species.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl TeamMemberInfo {
    pub fn new<S: Into<String>>(species: S) -> Self {
        Self {
            species: species.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_shows_only_what_matters() {
        let set = PokemonSet {
            species: "Pidgey".to_string(),
            name: "Pidgey".to_string(),
            level: DEFAULT_LEVEL,
            ability: "Keen Eye".to_string(),
            item: "Choice Band".to_string(),
            moves: vec!["Return".to_string(), "Roost".to_string()],
            nature: "Jolly".to_string(),
            ivs: StatLine::max_ivs(),
            evs: StatLine {
                atk: 252,
                spe: 252,
                spd: 4,
                ..StatLine::default()
            },
            happiness: MAX_HAPPINESS,
            ..PokemonSet::default()
        };

        let text = set.to_string();

        assert!(text.starts_with("Pidgey @ Choice Band\n"));
        assert!(text.contains("Ability: Keen Eye\n"));
        assert!(text.contains("EVs: 252 Attack / 4 Sp. Defend / 252 Speed\n"));
        assert!(text.contains("Jolly Nature\n"));
        assert!(text.contains("- Return\n"));
        assert!(!text.contains("Level:"));
        assert!(!text.contains("IVs:"));
        assert!(!text.contains("Happiness:"));
    }

    #[test]
    fn has_move_matches_on_ids() {
        let mut set = PokemonSet::default();
        set.moves = vec!["U-turn".to_string()];

        assert!(set.has_move("uturn"));
        assert!(!set.has_move("return"));
    }
}
