// Request paths, relative to the service base URL.

use super::models::{AccountId, HeroId, MatchId, StatsType};

/// `accountid/{id}` for numeric tokens, `nickname/{nick}` otherwise.
pub fn account_selector(id_or_nick: &str) -> String {
    if id_or_nick.parse::<AccountId>().is_ok() {
        format!("accountid/{}", id_or_nick)
    } else {
        format!("nickname/{}", id_or_nick)
    }
}

pub fn player_statistics(stats_type: StatsType, id_or_nick: &str) -> String {
    format!(
        "player_statistics/{}/{}",
        stats_type.as_str(),
        account_selector(id_or_nick)
    )
}

pub fn match_history(stats_type: StatsType, account_id: AccountId) -> String {
    format!("match_history/{}/accountid/{}", stats_type.as_str(), account_id)
}

pub fn match_summary(match_id: MatchId) -> String {
    format!("match/summ/matchid/{}", match_id)
}

pub fn match_all(match_id: MatchId) -> String {
    format!("match/all/matchid/{}", match_id)
}

pub fn hero(hero_id: HeroId) -> String {
    format!("heroes/id/{}", hero_id)
}

pub const HEROES_ALL: &str = "heroes/all";
