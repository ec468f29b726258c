use super::{read_gz_json, write_gz_json, TimeSource};
use crate::api::models::{AccountId, StatsType};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryEntry<P> {
    written_at: DateTime<Utc>,
    payload: P,
}

/// Per-player match history lists. New matches get played, so entries only
/// count as hits while younger than the TTL.
pub struct HistoryStore {
    root: PathBuf,
    ttl: Duration,
    clock: Box<dyn TimeSource>,
}

impl HistoryStore {
    pub fn open(root: PathBuf, ttl: Duration, clock: Box<dyn TimeSource>) -> Result<Self, AppError> {
        fs::create_dir_all(&root)?;
        Ok(HistoryStore { root, ttl, clock })
    }

    pub fn path_for(&self, account_id: AccountId, stats_type: StatsType) -> PathBuf {
        self.root
            .join(format!("{}_matches_{}.gz", account_id, stats_type))
    }

    pub fn get(&self, account_id: AccountId, stats_type: StatsType) -> Result<Option<Value>, AppError> {
        let path = self.path_for(account_id, stats_type);
        if !path.is_file() {
            log::debug!("no {} history cached for {}", stats_type, account_id);
            return Ok(None);
        }

        let entry: HistoryEntry<Value> = read_gz_json(&path)?;
        let age = self.clock.now().signed_duration_since(entry.written_at);
        // a timestamp from the future (clock skew) counts as fresh
        let fresh = age.to_std().map_or(true, |age| age < self.ttl);
        if !fresh {
            log::debug!(
                "{} history for {} is stale ({}s old)",
                stats_type,
                account_id,
                age.num_seconds()
            );
            return Ok(None);
        }

        log::debug!("{} history for {} served from cache", stats_type, account_id);
        Ok(Some(entry.payload))
    }

    pub fn put(&self, account_id: AccountId, stats_type: StatsType, payload: &Value) -> Result<(), AppError> {
        let entry = HistoryEntry {
            written_at: self.clock.now(),
            payload,
        };
        write_gz_json(&self.path_for(account_id, stats_type), &entry)?;
        log::info!("cached {} history for {}", stats_type, account_id);
        Ok(())
    }
}
