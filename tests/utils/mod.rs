pub mod fixtures;
pub mod mocks;
pub mod setup;

#[allow(unused_imports)]
pub use fixtures::{player_row, serve_history, serve_player, MatchFixture};
#[allow(unused_imports)]
pub use mocks::{FakeApi, ManualClock};
#[allow(unused_imports)]
pub use setup::TestSetup;
