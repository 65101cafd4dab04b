//! Opponent-line contact detection.
//!
//! Board geometry belongs to the game; this module only asks it one question
//! through [`BoardGeometry`]: which positions lie along a line.

use crate::models::{HexPos, MoveRecord};

/// Number of line directions from any hex.
pub const HEX_DIRECTIONS: u8 = 6;

/// Line-membership query answered by the board collaborator.
pub trait BoardGeometry {
    /// Positions along the ray from `origin` in `direction` (0..6), nearest
    /// first, excluding `origin` itself.
    fn line_from(&self, origin: HexPos, direction: u8) -> Vec<HexPos>;

    /// `pos` lies on any of the six lines radiating from `origin`.
    fn on_any_line(&self, origin: HexPos, pos: HexPos) -> bool {
        (0..HEX_DIRECTIONS).any(|dir| self.line_from(origin, dir).contains(&pos))
    }
}

/// Contact flags for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpponentContact {
    pub cast_on_opponent_line: bool,
    pub moved_onto_opponent_line: bool,
}

impl OpponentContact {
    /// Checks the cast position and the piece's destination against the lines
    /// of every opponent piece.
    pub fn detect<G: BoardGeometry + ?Sized>(
        geometry: &G,
        opponent_pieces: &[HexPos],
        cast_position: HexPos,
        to: HexPos,
    ) -> Self {
        let mut contact = OpponentContact::default();
        for &piece in opponent_pieces {
            for dir in 0..HEX_DIRECTIONS {
                let line = geometry.line_from(piece, dir);
                contact.cast_on_opponent_line |= line.contains(&cast_position);
                contact.moved_onto_opponent_line |= line.contains(&to);
            }
            if contact.cast_on_opponent_line && contact.moved_onto_opponent_line {
                break;
            }
        }
        contact
    }

    /// Detects contact for `record` and stores the flags on it.
    pub fn apply<G: BoardGeometry + ?Sized>(geometry: &G, opponent_pieces: &[HexPos], record: &mut MoveRecord) {
        let contact = Self::detect(geometry, opponent_pieces, record.cast_position, record.to);
        record.cast_on_opponent_line = contact.cast_on_opponent_line;
        record.moved_onto_opponent_line = contact.moved_onto_opponent_line;
    }
}
