use crate::config::{Config, DEFAULT_RETRY_INTERVAL};
use crate::error::AppError;
use crate::rate_limit::RequestPacer;
use serde_json::Value;
use std::thread;
use std::time::Duration;

/// A single logical request against the stats service.
pub trait Fetch {
    fn fetch(&self, path: &str) -> Result<Value, AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-success status code.
    Status(u16),
    /// No usable answer at all (DNS, refused connection, timeout, unreadable body).
    Failed(String),
}

pub trait Transport {
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("honstats/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpTransport { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        match self.agent.get(url).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| TransportError::Failed(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(TransportError::Status(code)),
            Err(e) => Err(TransportError::Failed(e.to_string())),
        }
    }
}

const TOO_MANY_REQUESTS: u16 = 429;
const NOT_FOUND: u16 = 404;

pub struct RemoteFetcher<T: Transport = HttpTransport> {
    base_url: String,
    token: String,
    transport: T,
    pacer: RequestPacer,
    retry_interval: Duration,
}

impl RemoteFetcher<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        RemoteFetcher::new(config.base_url(), config.token.clone(), HttpTransport::new())
            .with_pacer(RequestPacer::from_config(config.requests_per_second))
            .with_retry_interval(config.retry_interval)
    }
}

impl<T: Transport> RemoteFetcher<T> {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, transport: T) -> Self {
        RemoteFetcher {
            base_url: base_url.into(),
            token: token.into(),
            transport,
            pacer: RequestPacer::unlimited(),
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/?token={}",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/'),
            self.token
        )
    }
}

impl<T: Transport> Fetch for RemoteFetcher<T> {
    /// Throttled requests are retried forever at a fixed interval; any other
    /// failure is returned on the first occurrence.
    fn fetch(&self, path: &str) -> Result<Value, AppError> {
        let url = self.url(path);

        loop {
            self.pacer.wait();
            log::info!("fetching {}", path);

            match self.transport.get(&url) {
                Ok(body) => return Ok(serde_json::from_str(&body)?),
                Err(TransportError::Status(TOO_MANY_REQUESTS)) => {
                    log::warn!(
                        "too many requests for {}, retrying in {}ms",
                        path,
                        self.retry_interval.as_millis()
                    );
                    thread::sleep(self.retry_interval);
                }
                Err(TransportError::Status(NOT_FOUND)) => {
                    return Err(AppError::NotFound(path.to_string()));
                }
                Err(TransportError::Status(status)) => {
                    return Err(AppError::Remote {
                        status,
                        path: path.to_string(),
                    });
                }
                Err(TransportError::Failed(reason)) => {
                    return Err(AppError::Transport(reason));
                }
            }
        }
    }
}
