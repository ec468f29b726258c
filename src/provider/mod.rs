//! Read-through access to the stats service.
//!
//! Every remote answer that can be reused is written to the [`CacheStore`]
//! first; callers only ever see parsed models and [`Match`] values.

mod identity;

pub use identity::hero_nick;

use crate::analysis::{HeroSortKey, HeroUsageSummary, HeroUsageTracker, Match, SortOrder};
use crate::api::client::{Fetch, RemoteFetcher};
use crate::api::endpoints;
use crate::api::models::{
    parse_match_history, AccountId, HeroId, HeroInfo, MatchId, PlayerStats, RawMatchRecord, StatsType,
};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::AppError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keeps only matches where `account_id` played the named hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFilter {
    pub account_id: AccountId,
    /// Display name (case-insensitive) or numeric hero id.
    pub hero: String,
}

pub struct DataProvider<F: Fetch = RemoteFetcher> {
    api: F,
    cache: CacheStore,
}

impl DataProvider<RemoteFetcher> {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let cache = CacheStore::open(&config.cache_dir, config.cache_ttl)?;
        Ok(DataProvider::new(RemoteFetcher::from_config(config), cache))
    }
}

impl<F: Fetch> DataProvider<F> {
    pub fn new(api: F, cache: CacheStore) -> Self {
        DataProvider { api, cache }
    }

    pub fn api(&self) -> &F {
        &self.api
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn fetch_player(&self, id_or_nick: &str, stats_type: StatsType) -> Result<PlayerStats, AppError> {
        let payload = self
            .api
            .fetch(&endpoints::player_statistics(stats_type, id_or_nick))?;
        let player = PlayerStats::from_payload(payload)?;

        if id_or_nick.parse::<AccountId>().is_err() {
            if let Ok(account_id) = player.account_id() {
                self.cache.lookup.insert_player(account_id, id_or_nick)?;
            }
        }
        Ok(player)
    }

    /// Match ids of the player's history, most recent first.
    pub fn matches(&self, id_or_nick: &str, stats_type: StatsType) -> Result<Vec<MatchId>, AppError> {
        let account_id = self.nick2id(id_or_nick)?;

        let payload = match self.cache.history.get(account_id, stats_type)? {
            Some(payload) => payload,
            None => {
                let payload = self
                    .api
                    .fetch(&endpoints::match_history(stats_type, account_id))?;
                self.cache.history.put(account_id, stats_type, &payload)?;
                payload
            }
        };

        parse_match_history(&payload)
    }

    /// A match the service does not know about comes back as [`Match::Empty`].
    pub fn fetch_match(&self, match_id: MatchId) -> Result<Match, AppError> {
        if let Some(record) = self.cache.matches.get(match_id)? {
            return Ok(Match::Real(record));
        }

        let record = match self.fetch_match_record(match_id) {
            Ok(record) => record,
            Err(AppError::NotFound(path)) => {
                log::warn!("match {} unavailable ({})", match_id, path);
                return Ok(Match::Empty);
            }
            Err(e) => return Err(e),
        };

        self.cache.matches.insert(match_id, &record)?;
        Ok(Match::Real(record))
    }

    fn fetch_match_record(&self, match_id: MatchId) -> Result<RawMatchRecord, AppError> {
        let summary = self.api.fetch(&endpoints::match_summary(match_id))?;
        let all = self.api.fetch(&endpoints::match_all(match_id))?;
        RawMatchRecord::assemble(summary, all)
    }

    /// Fetches `match_ids` in order, keeping at most `limit` matches that pass
    /// `hero_filter`.
    pub fn fetch_match_data(
        &self,
        match_ids: &[MatchId],
        limit: Option<usize>,
        hero_filter: Option<&HeroFilter>,
    ) -> Result<BTreeMap<MatchId, Match>, AppError> {
        let mut kept = BTreeMap::new();

        for &match_id in match_ids {
            if limit.is_some_and(|limit| kept.len() >= limit) {
                break;
            }

            let game = self.fetch_match(match_id)?;
            if let Some(filter) = hero_filter {
                if !self.played_hero(&game, filter)? {
                    continue;
                }
            }
            kept.insert(match_id, game);
        }

        Ok(kept)
    }

    fn played_hero(&self, game: &Match, filter: &HeroFilter) -> Result<bool, AppError> {
        if game.player_row(filter.account_id).is_none() {
            return Ok(false);
        }
        let hero_id = game.player_stat(filter.account_id, "hero_id")? as HeroId;

        if let Ok(wanted) = filter.hero.trim().parse::<HeroId>() {
            return Ok(hero_id == wanted);
        }
        Ok(self
            .heroid2name(hero_id)?
            .eq_ignore_ascii_case(filter.hero.trim()))
    }

    /// Full hero catalog; every name seen is remembered for `heroid2name`.
    pub fn heroes(&self) -> Result<BTreeMap<HeroId, HeroInfo>, AppError> {
        let payload = self.api.fetch(endpoints::HEROES_ALL)?;

        let mut heroes = BTreeMap::new();
        for row in catalog_rows(payload) {
            let hero = HeroInfo::from_row(row)?;
            if !hero.name.is_empty() {
                self.cache.lookup.insert_hero(hero.hero_id, &hero.name)?;
            }
            heroes.insert(hero.hero_id, hero);
        }
        Ok(heroes)
    }

    pub fn hero_usage(
        &self,
        id_or_nick: &str,
        stats_type: StatsType,
        sort_by: HeroSortKey,
        order: SortOrder,
    ) -> Result<Vec<HeroUsageSummary>, AppError> {
        self.hero_usage_with_progress(id_or_nick, stats_type, sort_by, order, |_, _| {})
    }

    /// `on_match(done, total)` is called after every match of the history.
    pub fn hero_usage_with_progress(
        &self,
        id_or_nick: &str,
        stats_type: StatsType,
        sort_by: HeroSortKey,
        order: SortOrder,
        mut on_match: impl FnMut(usize, usize),
    ) -> Result<Vec<HeroUsageSummary>, AppError> {
        let account_id = self.nick2id(id_or_nick)?;
        let match_ids = self.matches(id_or_nick, stats_type)?;
        let mut tracker = HeroUsageTracker::new();

        for (done, &match_id) in match_ids.iter().enumerate() {
            match self.fetch_match(match_id)?.derived_stats(account_id) {
                Ok(stats) => tracker.record(&stats),
                Err(AppError::PlayerNotInMatch { .. }) => {
                    log::debug!("skipping match {} for account {}", match_id, account_id);
                }
                Err(e) => return Err(e),
            }
            on_match(done + 1, match_ids.len());
        }

        log::info!(
            "{} heroes over {} matches for {}",
            tracker.hero_count(),
            tracker.matches_examined(),
            account_id
        );
        Ok(tracker.summarize(sort_by, order))
    }
}

/// Hero objects out of the catalog payload, which is keyed by hero id and
/// sometimes nested one level deeper.
fn catalog_rows(payload: Value) -> Vec<serde_json::Map<String, Value>> {
    let values: Vec<Value> = match payload {
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Array(values) => values,
        _ => return Vec::new(),
    };

    values
        .into_iter()
        .flat_map(|value| match value {
            Value::Object(row) if row.contains_key("hero_id") => vec![row],
            Value::Object(nested) => nested
                .into_iter()
                .filter_map(|(_, v)| match v {
                    Value::Object(row) if row.contains_key("hero_id") => Some(row),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}
