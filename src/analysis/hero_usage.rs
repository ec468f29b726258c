use super::match_stats::{gold_per_minute, DerivedMatchStats};
use crate::api::models::HeroId;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct HeroTotals {
    uses: i64,
    kills: i64,
    deaths: i64,
    assists: i64,
    wins: i64,
    losses: i64,
    gold: i64,
    wards: i64,
    played_secs: u64,
}

/// Finalized per-hero numbers for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroUsageSummary {
    pub hero_id: HeroId,
    pub uses: i64,
    pub perc: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub wins: i64,
    pub losses: i64,
    pub gold: i64,
    pub wards: i64,
    pub played_secs: u64,
    pub kdr: f64,
    pub kpg: f64,
    pub dpg: f64,
    pub apg: f64,
    pub wpg: f64,
    pub gpm: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HeroSortKey {
    #[default]
    Use,
    Perc,
    Kdr,
    K,
    D,
    A,
    Kpg,
    Dpg,
    Apg,
    Gpm,
    Wpg,
    Wins,
    Losses,
}

impl HeroSortKey {
    pub fn value(&self, summary: &HeroUsageSummary) -> f64 {
        match self {
            HeroSortKey::Use => summary.uses as f64,
            HeroSortKey::Perc => summary.perc as f64,
            HeroSortKey::Kdr => summary.kdr,
            HeroSortKey::K => summary.kills as f64,
            HeroSortKey::D => summary.deaths as f64,
            HeroSortKey::A => summary.assists as f64,
            HeroSortKey::Kpg => summary.kpg,
            HeroSortKey::Dpg => summary.dpg,
            HeroSortKey::Apg => summary.apg,
            HeroSortKey::Gpm => summary.gpm as f64,
            HeroSortKey::Wpg => summary.wpg,
            HeroSortKey::Wins => summary.wins as f64,
            HeroSortKey::Losses => summary.losses as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Folds one player's matches into per-hero totals.
#[derive(Debug, Default)]
pub struct HeroUsageTracker {
    heroes: BTreeMap<HeroId, HeroTotals>,
    matches_examined: usize,
}

impl HeroUsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: &DerivedMatchStats) {
        self.matches_examined += 1;

        let entry = self.heroes.entry(stats.hero_id).or_default();
        entry.uses += 1;
        entry.kills += stats.kills;
        entry.deaths += stats.deaths;
        entry.assists += stats.assists;
        entry.wins += stats.won as i64;
        entry.losses += stats.losses;
        entry.gold += stats.gold;
        entry.wards += stats.wards;
        entry.played_secs += stats.duration_secs;
    }

    pub fn matches_examined(&self) -> usize {
        self.matches_examined
    }

    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    /// Rates for every hero, in ascending hero id order.
    pub fn finalize(&self) -> Vec<HeroUsageSummary> {
        let total = self.matches_examined as i64;
        self.heroes
            .iter()
            .map(|(&hero_id, totals)| {
                let per_game = |value: i64| value as f64 / totals.uses as f64;
                HeroUsageSummary {
                    hero_id,
                    uses: totals.uses,
                    perc: if total > 0 { totals.uses * 100 / total } else { 0 },
                    kills: totals.kills,
                    deaths: totals.deaths,
                    assists: totals.assists,
                    wins: totals.wins,
                    losses: totals.losses,
                    gold: totals.gold,
                    wards: totals.wards,
                    played_secs: totals.played_secs,
                    kdr: if totals.deaths > 0 {
                        totals.kills as f64 / totals.deaths as f64
                    } else {
                        totals.kills as f64
                    },
                    kpg: per_game(totals.kills),
                    dpg: per_game(totals.deaths),
                    apg: per_game(totals.assists),
                    wpg: per_game(totals.wards),
                    gpm: gold_per_minute(totals.gold, totals.played_secs),
                }
            })
            .collect()
    }

    pub fn summarize(&self, key: HeroSortKey, order: SortOrder) -> Vec<HeroUsageSummary> {
        let mut summaries = self.finalize();
        sort_summaries(&mut summaries, key, order);
        summaries
    }
}

/// Stable sort, so equal values keep their incoming order.
pub fn sort_summaries(summaries: &mut [HeroUsageSummary], key: HeroSortKey, order: SortOrder) {
    summaries.sort_by(|a, b| {
        let ordering = key
            .value(a)
            .partial_cmp(&key.value(b))
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
