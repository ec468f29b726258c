use super::mocks::{FakeApi, ManualClock};
use honstats::cache::CacheStore;
use honstats::DataProvider;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

pub const TTL: Duration = Duration::from_secs(300);

/// A provider over a fresh cache directory, a fake service and a manual clock.
pub struct TestSetup {
    pub provider: DataProvider<FakeApi>,
    pub clock: Rc<ManualClock>,
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestSetup {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let clock = Rc::new(ManualClock::new());
        let cache = CacheStore::open_with_clock(dir.path(), TTL, Box::new(clock.clone()))
            .expect("cache should open");

        Self {
            provider: DataProvider::new(FakeApi::new(), cache),
            clock,
            dir,
        }
    }

    pub fn api(&self) -> &FakeApi {
        self.provider.api()
    }

    /// Same cache directory, new provider: what the next CLI invocation sees.
    pub fn reopen(self) -> Self {
        let TestSetup { provider, clock, dir } = self;
        drop(provider);
        let cache = CacheStore::open_with_clock(dir.path(), TTL, Box::new(clock.clone()))
            .expect("cache should reopen");

        Self {
            provider: DataProvider::new(FakeApi::new(), cache),
            clock,
            dir,
        }
    }
}
