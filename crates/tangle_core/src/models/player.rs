use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat of a player within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerColor {
    A,
    B,
}

impl PlayerColor {
    pub fn opponent(self) -> PlayerColor {
        match self {
            PlayerColor::A => PlayerColor::B,
            PlayerColor::B => PlayerColor::A,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerColor::A => write!(f, "A"),
            PlayerColor::B => write!(f, "B"),
        }
    }
}

/// Who sat in a seat. `id` is the key the lifetime profile is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_ai: bool,
}

impl PlayerIdentity {
    pub fn human(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), is_ai: false }
    }

    pub fn ai(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: display_name.into(), is_ai: true }
    }

    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// Axial hex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexPos {
    pub q: i32,
    pub r: i32,
}

impl HexPos {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl fmt::Display for HexPos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
