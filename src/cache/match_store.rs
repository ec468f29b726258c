use super::{read_gz_json, write_gz_json};
use crate::api::models::{MatchId, RawMatchRecord};
use crate::error::AppError;
use std::fs;
use std::path::PathBuf;

const BUCKET_WIDTH: usize = 4;

/// Finished matches, one gzip blob per match, bucketed by id prefix.
pub struct MatchStore {
    root: PathBuf,
}

impl MatchStore {
    pub fn open(root: PathBuf) -> Result<Self, AppError> {
        fs::create_dir_all(&root)?;
        Ok(MatchStore { root })
    }

    /// Leading digits of the id, so no single directory grows unbounded.
    pub fn bucket_for(match_id: MatchId) -> String {
        match_id.to_string().chars().take(BUCKET_WIDTH).collect()
    }

    pub fn path_for(&self, match_id: MatchId) -> PathBuf {
        self.root
            .join(Self::bucket_for(match_id))
            .join(format!("{}.gz", match_id))
    }

    pub fn contains(&self, match_id: MatchId) -> bool {
        self.path_for(match_id).is_file()
    }

    pub fn get(&self, match_id: MatchId) -> Result<Option<RawMatchRecord>, AppError> {
        let path = self.path_for(match_id);
        if !path.is_file() {
            log::debug!("match {} not cached", match_id);
            return Ok(None);
        }
        log::debug!("match {} served from cache", match_id);
        read_gz_json(&path).map(Some)
    }

    /// Returns `false` when the match was already stored; stored matches are
    /// never replaced.
    pub fn insert(&self, match_id: MatchId, record: &RawMatchRecord) -> Result<bool, AppError> {
        let path = self.path_for(match_id);
        if path.is_file() {
            return Ok(false);
        }
        if let Some(bucket) = path.parent() {
            fs::create_dir_all(bucket)?;
        }
        write_gz_json(&path, record)?;
        log::info!("cached match {}", match_id);
        Ok(true)
    }
}
