use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type AccountId = u64;
pub type MatchId = u64;
pub type HeroId = u32;

/// One flat JSON object as returned by the stats service.
pub type RawRow = Map<String, Value>;

/// Which matchmaking pool a statistics request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum StatsType {
    #[default]
    Ranked,
    Public,
    Casual,
}

impl StatsType {
    /// Path segment used by the remote API.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsType::Ranked => "ranked",
            StatsType::Public => "public",
            StatsType::Casual => "casual",
        }
    }

    /// Field prefix used inside player statistics payloads.
    pub fn field_prefix(&self) -> &'static str {
        match self {
            StatsType::Ranked => "rnk",
            StatsType::Public => "acc",
            StatsType::Casual => "cs",
        }
    }
}

impl fmt::Display for StatsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an integer out of a raw value. The service sends most numbers as
/// strings, sometimes with a fractional part, which is truncated.
pub fn raw_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

pub fn row_int(row: &RawRow, field: &str) -> Result<i64, AppError> {
    row.get(field)
        .and_then(raw_int)
        .ok_or_else(|| AppError::Malformed(format!("missing or non-numeric field `{}`", field)))
}

pub fn row_str<'a>(row: &'a RawRow, field: &str) -> Option<&'a str> {
    row.get(field).and_then(Value::as_str)
}

/// `[summary, options, items, player rows]` exactly as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatchRecord(pub RawRow, pub RawRow, pub Value, pub Vec<RawRow>);

impl RawMatchRecord {
    /// Joins the `summ` and `all` match payloads into one record.
    pub fn assemble(summary: Value, all: Value) -> Result<Self, AppError> {
        let summary = match summary {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Object(_) => summary,
            _ => return Err(AppError::Malformed("match summary is empty".to_string())),
        };
        let summary = into_row(summary, "match summary")?;

        let mut sections = match all {
            Value::Array(sections) if sections.len() >= 3 => sections,
            _ => {
                return Err(AppError::Malformed(
                    "match detail does not have settings, items and player sections".to_string(),
                ))
            }
        };
        let players = sections.swap_remove(2);
        let items = sections.swap_remove(1);
        let options = match sections.swap_remove(0) {
            Value::Array(mut settings) if !settings.is_empty() => settings.swap_remove(0),
            other => other,
        };
        let options = into_row(options, "match settings")?;

        let players = match players {
            Value::Array(rows) => rows
                .into_iter()
                .map(|row| into_row(row, "player stats"))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(AppError::Malformed("player stats is not a list".to_string())),
        };

        Ok(RawMatchRecord(summary, options, items, players))
    }

    pub fn summary(&self) -> &RawRow {
        &self.0
    }

    pub fn options(&self) -> &RawRow {
        &self.1
    }

    pub fn items(&self) -> &Value {
        &self.2
    }

    pub fn player_rows(&self) -> &[RawRow] {
        &self.3
    }
}

fn into_row(value: Value, what: &str) -> Result<RawRow, AppError> {
    match value {
        Value::Object(row) => Ok(row),
        _ => Err(AppError::Malformed(format!("{} is not an object", what))),
    }
}

/// View over a `player_statistics` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub data: RawRow,
}

impl PlayerStats {
    pub fn from_payload(payload: Value) -> Result<Self, AppError> {
        let data = match payload {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            other => other,
        };
        Ok(PlayerStats {
            data: into_row(data, "player statistics")?,
        })
    }

    pub fn account_id(&self) -> Result<AccountId, AppError> {
        Ok(row_int(&self.data, "account_id")? as AccountId)
    }

    pub fn nickname(&self) -> Option<&str> {
        row_str(&self.data, "nickname")
    }

    fn stat(&self, stats_type: StatsType, field: &str) -> Result<i64, AppError> {
        row_int(&self.data, &format!("{}_{}", stats_type.field_prefix(), field))
    }

    pub fn rating(&self, stats_type: StatsType) -> Result<i64, AppError> {
        match stats_type {
            StatsType::Public => row_int(&self.data, "acc_pub_skill"),
            _ => self.stat(stats_type, "amm_team_rating"),
        }
    }

    pub fn kills(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "herokills")
    }

    pub fn deaths(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "deaths")
    }

    pub fn assists(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "heroassists")
    }

    pub fn games_played(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "games_played")
    }

    pub fn wards(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "wards")
    }

    pub fn denies(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "denies")
    }

    pub fn wins(&self, stats_type: StatsType) -> Result<i64, AppError> {
        self.stat(stats_type, "wins")
    }

    pub fn summary(&self, stats_type: StatsType) -> Result<PlayerSummary, AppError> {
        let games = self.games_played(stats_type)?;
        let kills = self.kills(stats_type)?;
        let deaths = self.deaths(stats_type)?;
        let per_game = |value: i64| {
            if games > 0 {
                value as f64 / games as f64
            } else {
                0.0
            }
        };

        Ok(PlayerSummary {
            rating: self.rating(stats_type)?,
            kills,
            deaths,
            assists: self.assists(stats_type)?,
            wards_per_game: per_game(self.wards(stats_type)?),
            denies_per_game: per_game(self.denies(stats_type)?),
            kdr: if deaths > 0 {
                kills as f64 / deaths as f64
            } else {
                kills as f64
            },
            games_played: games,
            win_percentage: per_game(self.wins(stats_type)? * 100),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub rating: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub wards_per_game: f64,
    pub denies_per_game: f64,
    pub kdr: f64,
    pub games_played: i64,
    pub win_percentage: f64,
}

/// Hero catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroInfo {
    pub hero_id: HeroId,
    pub name: String,
    pub data: RawRow,
}

impl HeroInfo {
    pub fn from_row(row: RawRow) -> Result<Self, AppError> {
        let hero_id = row_int(&row, "hero_id")? as HeroId;
        let name = row_str(&row, "disp_name").unwrap_or_default().trim().to_string();
        Ok(HeroInfo {
            hero_id,
            name,
            data: row,
        })
    }
}

/// Match ids out of a `match_history` payload, most recent first.
///
/// The payload is `[{"history": "mid|team|date,mid|team|date,..."}]`.
pub fn parse_match_history(payload: &Value) -> Result<Vec<MatchId>, AppError> {
    let history = match payload {
        Value::Array(rows) => match rows.first() {
            Some(Value::Object(row)) => row_str(row, "history").unwrap_or_default(),
            Some(_) => return Err(AppError::Malformed("history entry is not an object".into())),
            None => "",
        },
        Value::Object(row) => row_str(row, "history").unwrap_or_default(),
        _ => return Err(AppError::Malformed("match history is not a list".into())),
    };

    let mut ids = history
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let id = entry.split('|').next().unwrap_or_default();
            id.parse::<MatchId>()
                .map_err(|_| AppError::Malformed(format!("bad match id in history: {}", entry)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ids.sort_unstable_by(|a, b| b.cmp(a));
    ids.dedup();
    Ok(ids)
}
