pub mod ledger;
pub mod moves;
pub mod player;
pub mod result;

pub use ledger::MatchLedger;
pub use moves::{MoveRecord, TangleEvent, WordScored};
pub use player::{HexPos, PlayerColor, PlayerIdentity};
pub use result::{Forfeit, ForfeitReason, GameOutcome, MatchResult, Winner};
