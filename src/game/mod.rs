//! Scoring model: the card sequence, each player's score sheet, and the
//! session state machine that drives score entry and round changes.

mod player;
mod round;
mod session;

pub use player::{parse_score, players_from_names, shuffle_players, title_case, Player, WinRule};
pub use round::{card_index, RoundSequencer, CARDS, ROUND_COUNT};
pub use session::{Event, GamePhase, GameSession, ScoreTable, Step, DEFAULT_MAX_DIGITS};
