//! Durable local storage in front of the stats service.
//!
//! Three independent stores share one cache directory:
//!
//! * `match/` holds finished matches, which never change once played.
//! * `player/` holds per-player match history lists, valid for a short TTL.
//! * `stats.db` maps nicknames and hero ids to their display values.

mod history_store;
mod lookup;
mod match_store;

pub use history_store::HistoryStore;
pub use lookup::LookupStore;
pub use match_store::MatchStore;

use crate::error::AppError;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

pub const MATCH_CACHE_DIR: &str = "match";
pub const PLAYER_CACHE_DIR: &str = "player";
pub const LOOKUP_DB_FILE: &str = "stats.db";

pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

pub struct CacheStore {
    pub matches: MatchStore,
    pub history: HistoryStore,
    pub lookup: LookupStore,
}

impl CacheStore {
    pub fn open(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self, AppError> {
        Self::open_with_clock(dir, ttl, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        dir: impl Into<PathBuf>,
        ttl: Duration,
        clock: Box<dyn TimeSource>,
    ) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("opening cache at {}", dir.display());

        Ok(CacheStore {
            matches: MatchStore::open(dir.join(MATCH_CACHE_DIR))?,
            history: HistoryStore::open(dir.join(PLAYER_CACHE_DIR), ttl, clock)?,
            lookup: LookupStore::open(dir.join(LOOKUP_DB_FILE))?,
        })
    }
}

pub(crate) fn read_gz_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let reader = BufReader::new(GzDecoder::new(File::open(path)?));
    Ok(serde_json::from_reader(reader)?)
}

/// Writes through a temporary sibling so readers never see a half-written blob.
pub(crate) fn write_gz_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let tmp = path.with_extension("gz.tmp");
    {
        let mut encoder = GzEncoder::new(BufWriter::new(File::create(&tmp)?), Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        encoder.finish()?.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
