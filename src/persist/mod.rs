//! Saving finished games as JSON.

mod record;
mod store;

pub use record::{GameRecord, PlayerRecord};
pub use store::GameStore;
