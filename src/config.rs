use crate::error::AppError;
use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "api.heroesofnewerth.com";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub host: String,
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub retry_interval: Duration,
    pub requests_per_second: Option<NonZeroU32>,
}

impl Config {
    /// Reads `HONSTATS_*` variables, loading a `.env` file first when present.
    ///
    /// `token` and `host` given on the command line win over the environment.
    pub fn from_env(token: Option<String>, host: Option<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(token, host, |key| env::var(key).ok())
    }

    pub fn from_lookup(
        token: Option<String>,
        host: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let token = token.or_else(|| lookup("HONSTATS_TOKEN")).ok_or_else(|| {
            AppError::ConfigError("token not specified and HONSTATS_TOKEN not set".to_string())
        })?;

        let host = host
            .or_else(|| lookup("HONSTATS_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let cache_dir = lookup("HONSTATS_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        let cache_ttl = match lookup("HONSTATS_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("HONSTATS_CACHE_TTL_SECS is not a number: {}", raw))
            })?),
            None => DEFAULT_CACHE_TTL,
        };

        let requests_per_second = match lookup("HONSTATS_REQUESTS_PER_SECOND") {
            Some(raw) => Some(raw.trim().parse::<NonZeroU32>().map_err(|_| {
                AppError::ConfigError(format!(
                    "HONSTATS_REQUESTS_PER_SECOND must be a positive number: {}",
                    raw
                ))
            })?),
            None => None,
        };

        Ok(Config {
            token,
            host,
            cache_dir,
            cache_ttl,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            requests_per_second,
        })
    }

    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", self.host.trim_end_matches('/'))
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".honstats")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        load_with(None, vars)
    }

    fn load_with(token: Option<&str>, vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(token.map(str::to_string), None, |key| vars.get(key).cloned())
    }

    #[test]
    fn missing_token_is_a_config_error() {
        assert!(matches!(load(&[]), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = load(&[("HONSTATS_TOKEN", "abc")]).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.cache_dir, default_cache_dir());
        assert!(config.cache_dir.ends_with(".honstats"));
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
        assert_eq!(config.retry_interval, DEFAULT_RETRY_INTERVAL);
        assert_eq!(config.requests_per_second, None);
    }

    #[test]
    fn command_line_token_and_host_win() {
        let config = Config::from_lookup(
            Some("cli".to_string()),
            Some("stats.local".to_string()),
            |key| match key {
                "HONSTATS_TOKEN" => Some("env".to_string()),
                "HONSTATS_HOST" => Some("api.env".to_string()),
                _ => None,
            },
        )
        .unwrap();

        assert_eq!(config.token, "cli");
        assert_eq!(config.host, "stats.local");
    }

    #[test]
    fn environment_overrides_are_read() {
        let config = load_with(
            Some("t"),
            &[
                ("HONSTATS_HOST", "stats.local"),
                ("HONSTATS_CACHE_DIR", "/tmp/hon"),
                ("HONSTATS_CACHE_TTL_SECS", "60"),
                ("HONSTATS_REQUESTS_PER_SECOND", "5"),
            ],
        )
        .unwrap();

        assert_eq!(config.host, "stats.local");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/hon"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.requests_per_second, NonZeroU32::new(5));
    }

    #[test]
    fn non_numeric_ttl_is_rejected() {
        assert!(matches!(
            load_with(Some("t"), &[("HONSTATS_CACHE_TTL_SECS", "five minutes")]),
            Err(AppError::ConfigError(msg)) if msg.contains("HONSTATS_CACHE_TTL_SECS")
        ));
    }

    #[test]
    fn zero_request_rate_is_rejected() {
        assert!(matches!(
            load_with(Some("t"), &[("HONSTATS_REQUESTS_PER_SECOND", "0")]),
            Err(AppError::ConfigError(msg)) if msg.contains("HONSTATS_REQUESTS_PER_SECOND")
        ));
    }

    fn config_with_host(host: &str) -> Config {
        Config {
            token: "t".into(),
            host: host.into(),
            cache_dir: PathBuf::from("."),
            cache_ttl: DEFAULT_CACHE_TTL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            requests_per_second: None,
        }
    }

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(
            config_with_host("api.example.com").base_url(),
            "http://api.example.com"
        );
    }

    #[test]
    fn explicit_scheme_is_kept_and_trailing_slash_dropped() {
        assert_eq!(
            config_with_host("https://api.example.com/").base_url(),
            "https://api.example.com"
        );
    }
}
