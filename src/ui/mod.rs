//! Terminal UI: the scoreboard table, the score entry panel, and the key
//! handling loop that feeds the game session.

mod app;
pub mod scoreboard_view;
pub mod snapshot;

pub use app::App;
pub use snapshot::{LiveEntry, Snapshot, TableRow};
