use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::record::GameRecord;
use crate::config::PersistenceConfig;
use crate::error::PersistError;
use crate::game::GameSession;

/// Writes finished games as JSON files under a save directory.
pub struct GameStore {
    save_dir: PathBuf,
}

impl GameStore {
    pub fn new(config: &PersistenceConfig) -> Self {
        GameStore {
            save_dir: config.save_dir.clone(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Save the session and return the file it was written to.
    ///
    /// The JSON is also written to the log so a game survives even if the
    /// save directory is unusable.
    pub fn save(&self, session: &GameSession) -> Result<PathBuf, PersistError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let record = GameRecord::from_session(session, timestamp);
        let json = serde_json::to_string_pretty(&record)?;
        tracing::info!(game = %json, "final game state");

        fs::create_dir_all(&self.save_dir)?;
        let final_path = self.free_path(timestamp);
        write_then_rename(&final_path, &json)?;

        tracing::info!(path = %final_path.display(), "game saved");
        Ok(final_path)
    }

    /// Read a saved game back.
    pub fn load(path: &Path) -> Result<GameRecord, PersistError> {
        let json = fs::read_to_string(path).map_err(|e| PersistError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| PersistError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Saved game files, oldest first. A missing save directory is empty.
    pub fn list(&self) -> Result<Vec<PathBuf>, PersistError> {
        if !self.save_dir.exists() {
            return Ok(Vec::new());
        }
        let mut games = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            let order = path.file_name().and_then(|n| n.to_str()).and_then(save_order);
            if let Some(order) = order {
                if path.is_file() {
                    games.push((order, path));
                }
            }
        }
        games.sort();
        Ok(games.into_iter().map(|(_, path)| path).collect())
    }

    fn free_path(&self, timestamp: u64) -> PathBuf {
        let mut path = self.save_dir.join(format!("game_{timestamp}.json"));
        let mut n = 1;
        while path.exists() {
            path = self.save_dir.join(format!("game_{timestamp}_{n}.json"));
            n += 1;
        }
        path
    }
}

/// Write `json` next to `path` and rename it into place. The temporary file
/// is removed if either step fails.
fn write_then_rename(path: &Path, json: &str) -> Result<(), PersistError> {
    let tmp_path = path.with_extension("json.tmp");
    let result = fs::write(&tmp_path, json).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    Ok(result?)
}

/// `(timestamp, n)` for `game_<timestamp>.json` (n = 0) and
/// `game_<timestamp>_<n>.json`; `None` for anything else.
fn save_order(file_name: &str) -> Option<(u64, u64)> {
    let stem = file_name.strip_prefix("game_")?.strip_suffix(".json")?;
    match stem.split_once('_') {
        Some((ts, n)) => Some((ts.parse().ok()?, n.parse().ok()?)),
        None => Some((stem.parse().ok()?, 0)),
    }
}
