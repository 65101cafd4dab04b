//! Per-turn records appended to a match ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::player::{HexPos, PlayerColor};

/// One word formed by a cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScored {
    pub word: String,
    pub length_points: u32,
    pub ownership_points: u32,
    pub total_points: u32,
    pub positions: Vec<HexPos>,
    /// Line direction index, 0..6.
    pub direction: u8,
    pub own_tiles: u32,
    pub total_tiles: u32,
}

impl WordScored {
    /// Word whose points and tile counts are given directly; positions are left empty.
    pub fn new(word: impl Into<String>, total_points: u32, own_tiles: u32, total_tiles: u32) -> Self {
        let word = word.into();
        let length_points = word.chars().count() as u32;
        Self {
            word,
            length_points,
            ownership_points: total_points.saturating_sub(length_points),
            total_points,
            positions: Vec::new(),
            direction: 0,
            own_tiles,
            total_tiles,
        }
    }

    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// A piece that became trapped during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangleEvent {
    pub player: PlayerColor,
    pub piece_index: u8,
    /// The tangled player's own move closed the zone.
    pub self_inflicted: bool,
    pub position: HexPos,
}

/// A finalized turn. Exactly one letter is cast per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub player: PlayerColor,
    pub piece_index: u8,
    pub from: HexPos,
    pub to: HexPos,
    pub cast_position: HexPos,
    pub cast_letter: char,
    /// Empty when the turn scored nothing.
    #[serde(default)]
    pub words: Vec<WordScored>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub cycle_mode: bool,
    #[serde(default)]
    pub tiles_cycled: u32,
    #[serde(default)]
    pub cast_on_opponent_line: bool,
    #[serde(default)]
    pub moved_onto_opponent_line: bool,
    #[serde(default)]
    pub tangles: Vec<TangleEvent>,
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(turn: u32, player: PlayerColor, cast_letter: char) -> Self {
        Self {
            turn,
            player,
            piece_index: 0,
            from: HexPos::default(),
            to: HexPos::default(),
            cast_position: HexPos::default(),
            cast_letter,
            words: Vec::new(),
            points: 0,
            cycle_mode: false,
            tiles_cycled: 0,
            cast_on_opponent_line: false,
            moved_onto_opponent_line: false,
            tangles: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_piece(mut self, piece_index: u8, from: HexPos, to: HexPos, cast: HexPos) -> Self {
        self.piece_index = piece_index;
        self.from = from;
        self.to = to;
        self.cast_position = cast;
        self
    }

    /// Adds a scored word and its points to the turn total.
    pub fn with_word(mut self, word: WordScored) -> Self {
        self.points += word.total_points;
        self.words.push(word);
        self
    }

    pub fn with_cycle(mut self, tiles_cycled: u32) -> Self {
        self.cycle_mode = true;
        self.tiles_cycled = tiles_cycled;
        self
    }

    pub fn with_tangle(mut self, event: TangleEvent) -> Self {
        self.tangles.push(event);
        self
    }

    pub fn with_contact(mut self, cast_on_line: bool, moved_onto_line: bool) -> Self {
        self.cast_on_opponent_line = cast_on_line;
        self.moved_onto_opponent_line = moved_onto_line;
        self
    }

    pub fn is_scoring(&self) -> bool {
        !self.words.is_empty()
    }
}
