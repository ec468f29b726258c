use crate::api::models::{raw_int, row_int, row_str, AccountId, HeroId, MatchId, RawMatchRecord, RawRow};
use crate::error::AppError;
use chrono::NaiveDateTime;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    AllPick,
    AllRandom,
    SingleDraft,
}

impl GameType {
    /// First set flag wins: all-pick, then all-random, else single draft.
    pub fn from_options(options: &RawRow) -> Self {
        let flag = |name: &str| options.get(name).and_then(raw_int).unwrap_or(0) > 0;
        if flag("ap") {
            GameType::AllPick
        } else if flag("ar") {
            GameType::AllRandom
        } else {
            GameType::SingleDraft
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GameType::AllPick => "AP",
            GameType::AllRandom => "AR",
            GameType::SingleDraft => "SD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Legion,
    Hellbourne,
}

impl Team {
    pub fn id(&self) -> i64 {
        match self {
            Team::Legion => 1,
            Team::Hellbourne => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Team::Legion => "Legion",
            Team::Hellbourne => "Hellbourne",
        }
    }
}

/// Integer gold per minute; a zero-length match earns nothing.
pub fn gold_per_minute(gold: i64, duration_secs: u64) -> i64 {
    if duration_secs == 0 {
        0
    } else {
        gold.saturating_mul(60) / duration_secs as i64
    }
}

/// One player's numbers for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMatchStats {
    pub match_id: MatchId,
    pub account_id: AccountId,
    pub game_type: GameType,
    pub duration_secs: u64,
    pub played_at: Option<NaiveDateTime>,
    pub hero_id: HeroId,
    pub level: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub creep_kills: i64,
    pub denies: i64,
    pub wards: i64,
    pub won: bool,
    pub losses: i64,
    pub gold: i64,
    pub gpm: i64,
    pub gold_lost_to_death: i64,
}

/// A fetched match, or the inert stand-in used when there is nothing to show
/// (match unavailable, or the requested player did not take part).
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    Real(RawMatchRecord),
    Empty,
}

impl Match {
    /// Collapses to `Empty` when `account_id` is not on the roster.
    pub fn for_account(self, account_id: AccountId) -> Self {
        match self {
            Match::Real(record) if find_row(&record, account_id).is_some() => Match::Real(record),
            Match::Real(_) => {
                log::debug!("account {} not found in match, using empty match", account_id);
                Match::Empty
            }
            Match::Empty => Match::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Match::Empty)
    }

    pub fn record(&self) -> Option<&RawMatchRecord> {
        match self {
            Match::Real(record) => Some(record),
            Match::Empty => None,
        }
    }

    /// 0 for the empty match.
    pub fn match_id(&self) -> MatchId {
        match self {
            Match::Real(record) => row_int(record.summary(), "match_id").unwrap_or(0) as MatchId,
            Match::Empty => 0,
        }
    }

    pub fn game_type(&self) -> Option<GameType> {
        match self {
            Match::Real(record) => Some(GameType::from_options(record.options())),
            Match::Empty => None,
        }
    }

    pub fn duration_secs(&self) -> u64 {
        match self {
            Match::Real(record) => row_int(record.summary(), "time_played")
                .unwrap_or(0)
                .max(0) as u64,
            Match::Empty => 0,
        }
    }

    pub fn played_at(&self) -> Option<NaiveDateTime> {
        let raw = row_str(self.record()?.summary(), "mdt")?;
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
    }

    /// Roster in payload order, optionally restricted to one side.
    pub fn players(&self, team: Option<Team>) -> Vec<(AccountId, &RawRow)> {
        let Match::Real(record) = self else {
            return Vec::new();
        };
        record
            .player_rows()
            .iter()
            .filter(|row| match team {
                Some(team) => row_int(row, "team").ok() == Some(team.id()),
                None => true,
            })
            .filter_map(|row| Some((row_int(row, "account_id").ok()? as AccountId, row)))
            .collect()
    }

    /// Both sides for head-to-head display.
    pub fn teams(&self) -> (Vec<(AccountId, &RawRow)>, Vec<(AccountId, &RawRow)>) {
        (
            self.players(Some(Team::Legion)),
            self.players(Some(Team::Hellbourne)),
        )
    }

    /// Whether `team` won, judged by its first listed player.
    pub fn team_won(&self, team: Team) -> Option<bool> {
        let players = self.players(Some(team));
        let (_, row) = players.first()?;
        Some(row_int(row, "wins").ok()? > 0)
    }

    pub fn player_row(&self, account_id: AccountId) -> Option<&RawRow> {
        match self {
            Match::Real(record) => find_row(record, account_id),
            Match::Empty => None,
        }
    }

    /// Raw numeric field of one player's row; the empty match answers 0.
    pub fn player_stat(&self, account_id: AccountId, field: &str) -> Result<i64, AppError> {
        match self {
            Match::Real(_) => row_int(self.require_row(account_id)?, field),
            Match::Empty => Ok(0),
        }
    }

    pub fn derived_stats(&self, account_id: AccountId) -> Result<DerivedMatchStats, AppError> {
        let row = self.require_row(account_id)?;
        let optional = |field: &str| row.get(field).and_then(raw_int).unwrap_or(0);

        let duration_secs = self.duration_secs();
        let gold = row_int(row, "gold")?;
        let wins = row_int(row, "wins")?;
        let won = wins > 0;

        Ok(DerivedMatchStats {
            match_id: self.match_id(),
            account_id,
            game_type: self.game_type().unwrap_or(GameType::SingleDraft),
            duration_secs,
            played_at: self.played_at(),
            hero_id: row_int(row, "hero_id")? as HeroId,
            level: optional("level"),
            kills: row_int(row, "herokills")?,
            deaths: row_int(row, "deaths")?,
            assists: row_int(row, "heroassists")?,
            creep_kills: row_int(row, "teamcreepkills")?.saturating_add(row_int(row, "neutralcreepkills")?),
            denies: row_int(row, "denies")?,
            wards: row_int(row, "wards")?,
            won,
            losses: row
                .get("losses")
                .and_then(raw_int)
                .unwrap_or(if won { 0 } else { 1 }),
            gold,
            gpm: gold_per_minute(gold, duration_secs),
            gold_lost_to_death: optional("goldlost2death"),
        })
    }

    fn require_row(&self, account_id: AccountId) -> Result<&RawRow, AppError> {
        self.player_row(account_id)
            .ok_or(AppError::PlayerNotInMatch {
                account_id,
                match_id: self.match_id(),
            })
    }
}

fn find_row(record: &RawMatchRecord, account_id: AccountId) -> Option<&RawRow> {
    record
        .player_rows()
        .iter()
        .find(|row| row_int(row, "account_id").ok() == Some(account_id as i64))
}
