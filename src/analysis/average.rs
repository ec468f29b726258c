use super::match_stats::DerivedMatchStats;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct AverageStats {
    pub matches: usize,
    pub duration_secs: u64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub kdr: f64,
    pub wards: i64,
    pub creep_kills: i64,
    pub denies: i64,
    pub gpm: i64,
}

#[derive(Debug, Clone, Default)]
pub struct AverageAccumulator {
    matches: usize,
    duration_secs: u64,
    kills: i64,
    deaths: i64,
    assists: i64,
    wards: i64,
    creep_kills: i64,
    denies: i64,
    gpm: i64,
}

impl AverageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stats: &DerivedMatchStats) {
        self.matches += 1;
        self.duration_secs += stats.duration_secs;
        self.kills += stats.kills;
        self.deaths += stats.deaths;
        self.assists += stats.assists;
        self.wards += stats.wards;
        self.creep_kills += stats.creep_kills;
        self.denies += stats.denies;
        self.gpm += stats.gpm;
    }

    pub fn len(&self) -> usize {
        self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches == 0
    }

    /// KDR comes from the averaged kills and deaths, not from per-match ratios.
    pub fn finish(&self) -> Result<AverageStats, AppError> {
        if self.matches == 0 {
            return Err(AppError::DivisionUndefined);
        }
        let n = self.matches as i64;
        let kills = self.kills / n;
        let deaths = self.deaths / n;

        Ok(AverageStats {
            matches: self.matches,
            duration_secs: self.duration_secs / self.matches as u64,
            kills,
            deaths,
            assists: self.assists / n,
            kdr: if deaths > 0 {
                kills as f64 / deaths as f64
            } else {
                kills as f64
            },
            wards: self.wards / n,
            creep_kills: self.creep_kills / n,
            denies: self.denies / n,
            gpm: self.gpm / n,
        })
    }
}

pub fn average(window: &[DerivedMatchStats]) -> Result<AverageStats, AppError> {
    let mut acc = AverageAccumulator::new();
    for stats in window {
        acc.add(stats);
    }
    acc.finish()
}
