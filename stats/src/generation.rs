use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Game generations, named by their flagship versions like the dex sites do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Generation {
    RedBlue,
    GoldSilver,
    RubySapphire,
    DiamondPearl,
    BlackWhite,
    XY,
    SunMoon,
    SwordShield,
}

impl Generation {
    pub fn number(self) -> u8 {
        match self {
            Self::RedBlue => 1,
            Self::GoldSilver => 2,
            Self::RubySapphire => 3,
            Self::DiamondPearl => 4,
            Self::BlackWhite => 5,
            Self::XY => 6,
            Self::SunMoon => 7,
            Self::SwordShield => 8,
        }
    }

    pub fn shorthand(self) -> &'static str {
        match self {
            Self::RedBlue => "rb",
            Self::GoldSilver => "gs",
            Self::RubySapphire => "rs",
            Self::DiamondPearl => "dp",
            Self::BlackWhite => "bw",
            Self::XY => "xy",
            Self::SunMoon => "sm",
            Self::SwordShield => "ss",
        }
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::SwordShield
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "gen{}", self.number())
    }
}

impl FromStr for Generation {
    type Err = Box<dyn std::error::Error + Sync + Send>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let gen = match s.to_lowercase().trim_start_matches("gen") {
            "1" | "rb" | "redblue" => Self::RedBlue,
            "2" | "gs" | "goldsilver" => Self::GoldSilver,
            "3" | "rs" | "rubysapphire" => Self::RubySapphire,
            "4" | "dp" | "diamondpearl" => Self::DiamondPearl,
            "5" | "bw" | "blackwhite" => Self::BlackWhite,
            "6" | "xy" => Self::XY,
            "7" | "sm" | "sunmoon" => Self::SunMoon,
            "8" | "ss" | "swsh" | "swordshield" => Self::SwordShield,
            _ => return Err(format!("unknown generation `{}`", s).into()),
        };

        Ok(gen)
    }
}

impl TryFrom<String> for Generation {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|_| format!("unknown generation `{}`", s))
    }
}

impl From<Generation> for String {
    fn from(gen: Generation) -> Self {
        gen.shorthand().to_string()
    }
}
