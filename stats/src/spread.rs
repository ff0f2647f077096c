use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type ParseError = Box<dyn std::error::Error + Sync + Send>;

/// One value per stat, in the hp/atk/def/spa/spd/spe order every dump uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub hp: u8,
    #[serde(default)]
    pub atk: u8,
    #[serde(default)]
    pub def: u8,
    #[serde(default)]
    pub spa: u8,
    #[serde(default)]
    pub spd: u8,
    #[serde(default)]
    pub spe: u8,
}

impl StatLine {
    /// 31 across the board, the assumption behind every usage dump.
    pub fn max_ivs() -> Self {
        Self {
            hp: 31,
            atk: 31,
            def: 31,
            spa: 31,
            spd: 31,
            spe: 31,
        }
    }

    pub fn values(&self) -> [u8; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    /// Parse the `252/4/0/0/0/252` part of a spread key.
    pub fn parse_slashed(s: &str) -> Result<Self, ParseError> {
        let mut values = [0u8; 6];
        let mut parts = s.split('/');

        for value in values.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| format!("`{}` is missing a stat value", s))?;
            *value = part.trim().parse()?;
        }

        if parts.next().is_some() {
            return Err(format!("`{}` has more than 6 stat values", s).into());
        }

        let [hp, atk, def, spa, spd, spe] = values;
        Ok(Self { hp, atk, def, spa, spd, spe })
    }

    /// Non-zero entries only, the way people actually write EV lines.
    pub fn ev_display(&self) -> String {
        self.display_entries(|v| v > 0)
    }

    /// Everything below a perfect 31, the only IVs worth mentioning.
    pub fn iv_display(&self) -> String {
        self.display_entries(|v| v < 31)
    }

    fn display_entries<F: Fn(u8) -> bool>(&self, keep: F) -> String {
        self.values()
            .iter()
            .zip(&["HP", "Attack", "Defend", "Sp. Attack", "Sp. Defend", "Speed"])
            .filter(|(v, _)| keep(**v))
            .map(|(v, name)| format!("{} {}", v, name))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl fmt::Display for StatLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}",
            self.hp, self.atk, self.def, self.spa, self.spd, self.spe
        )
    }
}

/// A nature + EV line as it appears in usage dumps (`Adamant:252/4/0/0/0/252`),
/// with IVs defaulting to perfect since dumps don't carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub nature: String,
    pub evs: StatLine,
    pub ivs: StatLine,
}

impl FromStr for Spread {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref SPREAD_RE: Regex =
                Regex::new(r"^([A-Za-z]+):(\d+(?:/\d+){5})$").unwrap();
        }

        let caps = SPREAD_RE
            .captures(s.trim())
            .ok_or_else(|| format!("`{}` is not a spread", s))?;

        Ok(Self {
            nature: caps[1].to_string(),
            evs: StatLine::parse_slashed(&caps[2])?,
            ivs: StatLine::max_ivs(),
        })
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.nature, self.evs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_key_roundtrip() {
        let spread: Spread = "Adamant:252/4/0/0/0/252".parse().unwrap();

        assert_eq!(spread.nature, "Adamant");
        assert_eq!(spread.evs.hp, 252);
        assert_eq!(spread.evs.atk, 4);
        assert_eq!(spread.evs.spe, 252);
        assert_eq!(spread.ivs, StatLine::max_ivs());
        assert_eq!(spread.to_string(), "Adamant:252/4/0/0/0/252");
    }

    #[test]
    fn rejects_garbage() {
        assert!("Adamant".parse::<Spread>().is_err());
        assert!("Adamant:252/4/0".parse::<Spread>().is_err());
        assert!("Adamant:252/4/0/0/0/252/0".parse::<Spread>().is_err());
        assert!(":0/0/0/0/0/0".parse::<Spread>().is_err());
    }

    #[test]
    fn ev_line_skips_empty_stats() {
        let spread: Spread = "Jolly:0/252/0/0/4/252".parse().unwrap();
        assert_eq!(spread.evs.ev_display(), "252 Attack / 4 Sp. Defend / 252 Speed");
        assert_eq!(spread.ivs.iv_display(), "");
    }
}
