//! Caching client and aggregation layer for Heroes of Newerth statistics.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod provider;
pub mod rate_limit;

pub use error::AppError;
pub use provider::{DataProvider, HeroFilter};
