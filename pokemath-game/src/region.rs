//! Regions of the adventure map, one per multiplication table.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A themed map region, mapped 1:1 onto the multiplication table it drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl Region {
    pub const ALL: [Self; 8] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
    ];

    /// Region for a table number, or `None` outside 2..=9.
    #[must_use]
    pub const fn from_number(table_number: u32) -> Option<Self> {
        match table_number {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            7 => Some(Self::Seven),
            8 => Some(Self::Eight),
            9 => Some(Self::Nine),
            _ => None,
        }
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
        }
    }

    /// Flat star dust added to every reward earned on this table.
    #[must_use]
    pub const fn star_dust_bonus(self) -> u32 {
        match self {
            Self::Two => 0,
            Self::Three => 2,
            Self::Four => 3,
            Self::Five => 4,
            Self::Six => 5,
            Self::Seven => 6,
            Self::Eight => 8,
            Self::Nine => 10,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Star dust bonus for a raw table number; 0 outside the known regions.
#[must_use]
pub fn table_bonus(table_number: u32) -> u32 {
    Region::from_number(table_number).map_or(0, Region::star_dust_bonus)
}
