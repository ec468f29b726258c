use chrono::{DateTime, Duration, TimeZone, Utc};
use honstats::api::client::Fetch;
use honstats::cache::TimeSource;
use honstats::AppError;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// ============================================================================
// In-memory stats service
// ============================================================================

type ErrorFactory = Box<dyn Fn() -> AppError>;

/// Answers requests from a path -> payload table and records every call.
/// Unknown paths answer `NotFound`, like the real service.
pub struct FakeApi {
    responses: RefCell<HashMap<String, Value>>,
    failures: RefCell<HashMap<String, ErrorFactory>>,
    calls: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn respond(&self, path: &str, payload: Value) {
        self.responses
            .borrow_mut()
            .insert(path.trim_matches('/').to_string(), payload);
    }

    /// Every request to `path` fails with the error `make` builds.
    pub fn respond_err(&self, path: &str, make: impl Fn() -> AppError + 'static) {
        self.failures
            .borrow_mut()
            .insert(path.trim_matches('/').to_string(), Box::new(make));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.as_str() == path)
            .count()
    }
}

impl Fetch for FakeApi {
    fn fetch(&self, path: &str) -> Result<Value, AppError> {
        let path = path.trim_matches('/').to_string();
        self.calls.borrow_mut().push(path.clone());
        if let Some(make) = self.failures.borrow().get(&path) {
            return Err(make());
        }
        self.responses
            .borrow()
            .get(&path)
            .cloned()
            .ok_or(AppError::NotFound(path))
    }
}

// ============================================================================
// Controllable clock
// ============================================================================

pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Utc.with_ymd_and_hms(2014, 4, 12, 20, 0, 0).unwrap()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
