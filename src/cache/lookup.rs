use crate::api::models::{AccountId, HeroId};
use crate::error::AppError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS player (
    nick TEXT PRIMARY KEY,
    id   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS account (
    id   INTEGER PRIMARY KEY,
    nick TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hero (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
";

/// Append-only identity tables. A nickname maps to the first account seen
/// with it, and an account to the first nickname seen for it. The two
/// directions are kept apart since nicknames get reused.
pub struct LookupStore {
    conn: Connection,
}

impl LookupStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch(SCHEMA)?;
        Ok(LookupStore { conn })
    }

    pub fn account_for_nick(&self, nick: &str) -> Result<Option<AccountId>, AppError> {
        let id = self
            .conn
            .query_row("SELECT id FROM player WHERE nick = ?1", params![nick], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        Ok(id.map(|id| id as AccountId))
    }

    pub fn nick_for_account(&self, account_id: AccountId) -> Result<Option<String>, AppError> {
        Ok(self
            .conn
            .query_row(
                "SELECT nick FROM account WHERE id = ?1",
                params![account_id as i64],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Returns whether the nickname was new.
    pub fn insert_player(&self, account_id: AccountId, nick: &str) -> Result<bool, AppError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO player (nick, id) VALUES (?1, ?2)",
            params![nick, account_id as i64],
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO account (id, nick) VALUES (?1, ?2)",
            params![account_id as i64, nick],
        )?;
        Ok(changed > 0)
    }

    pub fn hero_name(&self, hero_id: HeroId) -> Result<Option<String>, AppError> {
        Ok(self
            .conn
            .query_row(
                "SELECT name FROM hero WHERE id = ?1",
                params![hero_id],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub fn insert_hero(&self, hero_id: HeroId, name: &str) -> Result<bool, AppError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO hero (id, name) VALUES (?1, ?2)",
            params![hero_id, name],
        )?;
        Ok(changed > 0)
    }
}
