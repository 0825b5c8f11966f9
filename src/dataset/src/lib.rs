use log::debug;
use optimizer::PlayerRecord;
use std::path::Path;
use thiserror::Error;

const STATIC_PLAYERS_JSON: &str = include_str!("../data/players.json");

#[derive(Error, Debug)]
pub enum PlayerDataError {
    #[error("player file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("player file malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct PlayerLoader;

impl PlayerLoader {
    /// Bundled candidate pool: 100 players with nine projected gameweeks.
    pub fn load() -> Vec<PlayerRecord> {
        serde_json::from_str(STATIC_PLAYERS_JSON).unwrap()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<PlayerRecord>, PlayerDataError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<PlayerRecord> = serde_json::from_str(&raw)?;
        debug!(
            "loaded {} players from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optimizer::{PlayerPool, PlayerPosition};

    #[test]
    fn test_embedded_dataset_parses() {
        let records = PlayerLoader::load();

        assert_eq!(records.len(), 100);
        let mut ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_embedded_dataset_builds_a_pool() {
        let pool = PlayerPool::from_records(PlayerLoader::load()).unwrap();

        assert_eq!(pool.len(), 100);
        assert_eq!(pool.gameweeks(), 9);
        // Enough depth at every position for a full 2-5-5-3 squad
        assert!(pool.position_count(PlayerPosition::Goalkeeper) >= 2);
        assert!(pool.position_count(PlayerPosition::Defender) >= 5);
        assert!(pool.position_count(PlayerPosition::Midfielder) >= 5);
        assert!(pool.position_count(PlayerPosition::Forward) >= 3);
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = PlayerLoader::load_from_file("/nonexistent/players.json").unwrap_err();
        assert!(matches!(err, PlayerDataError::Io(_)));
    }
}
