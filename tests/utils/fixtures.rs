#![allow(dead_code)]

use super::mocks::FakeApi;
use honstats::api::endpoints;
use honstats::api::models::{AccountId, HeroId, MatchId, StatsType};
use serde_json::{json, Value};

pub fn player_row(
    account_id: AccountId,
    team: u8,
    hero_id: HeroId,
    kills: i64,
    deaths: i64,
    won: bool,
) -> Value {
    json!({
        "account_id": account_id.to_string(),
        "team": team.to_string(),
        "hero_id": hero_id.to_string(),
        "level": "18",
        "herokills": kills.to_string(),
        "deaths": deaths.to_string(),
        "heroassists": "6",
        "teamcreepkills": "80",
        "neutralcreepkills": "20",
        "denies": "9",
        "wards": "2",
        "wins": if won { "1" } else { "0" },
        "losses": if won { "0" } else { "1" },
        "gold": "12000",
        "goldlost2death": "450"
    })
}

pub fn match_summary_payload(match_id: MatchId, duration_secs: u64) -> Value {
    json!([{
        "match_id": match_id.to_string(),
        "time_played": duration_secs.to_string(),
        "mdt": "2014-04-12 19:34:03"
    }])
}

pub fn match_all_payload(ap: bool, players: Vec<Value>) -> Value {
    json!([
        [{ "ap": if ap { "1" } else { "0" }, "ar": "0" }],
        [{ "account_id": "1", "item_1": "Ring" }],
        players
    ])
}

pub fn history_payload(match_ids: &[MatchId]) -> Value {
    let history = match_ids
        .iter()
        .map(|id| format!("{}|1|04/12/2014", id))
        .collect::<Vec<_>>()
        .join(",");
    json!([{ "account_id": "42", "history": history }])
}

/// Builds one match and serves it from a [`FakeApi`].
pub struct MatchFixture {
    pub match_id: MatchId,
    pub duration_secs: u64,
    pub all_pick: bool,
    pub players: Vec<Value>,
}

impl MatchFixture {
    pub fn new(match_id: MatchId) -> Self {
        Self {
            match_id,
            duration_secs: 1800,
            all_pick: false,
            players: Vec::new(),
        }
    }

    pub fn with_player(mut self, row: Value) -> Self {
        self.players.push(row);
        self
    }

    pub fn with_duration(mut self, duration_secs: u64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn all_pick(mut self) -> Self {
        self.all_pick = true;
        self
    }

    pub fn serve(self, api: &FakeApi) {
        api.respond(
            &endpoints::match_summary(self.match_id),
            match_summary_payload(self.match_id, self.duration_secs),
        );
        api.respond(
            &endpoints::match_all(self.match_id),
            match_all_payload(self.all_pick, self.players),
        );
    }
}

pub fn serve_history(api: &FakeApi, account_id: AccountId, stats_type: StatsType, match_ids: &[MatchId]) {
    api.respond(
        &endpoints::match_history(stats_type, account_id),
        history_payload(match_ids),
    );
}

pub fn serve_player(api: &FakeApi, stats_type: StatsType, id_or_nick: &str, account_id: AccountId, nickname: &str) {
    let prefix = stats_type.field_prefix();
    let mut row = serde_json::Map::new();
    row.insert("account_id".into(), json!(account_id.to_string()));
    row.insert("nickname".into(), json!(nickname));
    for (field, value) in [
        ("amm_team_rating", "1612.500"),
        ("herokills", "300"),
        ("deaths", "150"),
        ("heroassists", "420"),
        ("games_played", "50"),
        ("wards", "75"),
        ("denies", "200"),
        ("wins", "30"),
    ] {
        row.insert(format!("{}_{}", prefix, field), json!(value));
    }
    row.insert("acc_pub_skill".into(), json!("1500.0"));
    api.respond(&endpoints::player_statistics(stats_type, id_or_nick), Value::Object(row));
}
