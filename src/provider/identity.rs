use super::DataProvider;
use crate::api::client::Fetch;
use crate::api::endpoints;
use crate::api::models::{row_str, AccountId, HeroId, PlayerStats, RawRow, StatsType};
use crate::error::AppError;
use serde_json::Value;

/// Community short names that beat the catalog's display names.
const HERO_NICKS: [(HeroId, &str); 5] = [
    (6, "Devo"),
    (9, "Elec"),
    (161, "Gladi"),
    (185, "Sil"),
    (192, "RA"),
];

pub fn hero_nick(hero_id: HeroId) -> Option<&'static str> {
    HERO_NICKS
        .iter()
        .find(|(id, _)| *id == hero_id)
        .map(|(_, nick)| *nick)
}

impl<F: Fetch> DataProvider<F> {
    /// Numeric tokens are taken as account ids as-is; nicknames go through
    /// the lookup store and, once, through the stats service.
    pub fn nick2id(&self, id_or_nick: &str) -> Result<AccountId, AppError> {
        if let Ok(account_id) = id_or_nick.parse::<AccountId>() {
            return Ok(account_id);
        }

        if let Some(account_id) = self.cache.lookup.account_for_nick(id_or_nick)? {
            log::debug!("nickname {} resolved from lookup store", id_or_nick);
            return Ok(account_id);
        }

        let player = PlayerStats::from_payload(
            self.api
                .fetch(&endpoints::player_statistics(StatsType::Ranked, id_or_nick))?,
        )?;
        let account_id = player.account_id()?;
        self.cache.lookup.insert_player(account_id, id_or_nick)?;
        log::info!("nickname {} is account {}", id_or_nick, account_id);
        Ok(account_id)
    }

    /// Never fails: without a known nickname the account id is shown instead.
    pub fn id2nick(&self, account_id: AccountId) -> String {
        match self.lookup_nick(account_id) {
            Ok(Some(nick)) => nick,
            Ok(None) => account_id.to_string(),
            Err(e) => {
                log::warn!("could not resolve nickname for {}: {}", account_id, e);
                account_id.to_string()
            }
        }
    }

    fn lookup_nick(&self, account_id: AccountId) -> Result<Option<String>, AppError> {
        if let Some(nick) = self.cache.lookup.nick_for_account(account_id)? {
            return Ok(Some(nick));
        }

        let payload = match self.api.fetch(&endpoints::player_statistics(
            StatsType::Ranked,
            &account_id.to_string(),
        )) {
            Ok(payload) => payload,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let player = PlayerStats::from_payload(payload)?;
        let Some(nick) = player.nickname().map(str::to_string) else {
            return Ok(None);
        };
        self.cache.lookup.insert_player(account_id, &nick)?;
        Ok(Some(nick))
    }

    pub fn heroid2name(&self, hero_id: HeroId) -> Result<String, AppError> {
        if let Some(nick) = hero_nick(hero_id) {
            return Ok(nick.to_string());
        }

        if let Some(name) = self.cache.lookup.hero_name(hero_id)? {
            return Ok(name);
        }

        let payload = self.api.fetch(&endpoints::hero(hero_id))?;
        let name = hero_display_name(&payload)
            .ok_or_else(|| AppError::Malformed(format!("hero {} has no display name", hero_id)))?;
        self.cache.lookup.insert_hero(hero_id, &name)?;
        Ok(name)
    }
}

fn hero_display_name(payload: &Value) -> Option<String> {
    let row: &RawRow = match payload {
        Value::Object(row) => row,
        Value::Array(rows) => rows.first()?.as_object()?,
        _ => return None,
    };
    row_str(row, "disp_name").map(|name| name.trim().to_string())
}
