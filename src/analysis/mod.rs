pub mod average;
pub mod hero_usage;
pub mod match_stats;

pub use average::{average, AverageAccumulator, AverageStats};
pub use hero_usage::{HeroSortKey, HeroUsageSummary, HeroUsageTracker, SortOrder};
pub use match_stats::{DerivedMatchStats, GameType, Match, Team};
