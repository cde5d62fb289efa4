//! Runtime configuration for the dashboard.
//!
//! Native builds read the process environment (after `dotenvy` has loaded a
//! `.env` file); browser builds have no environment at runtime, so the same
//! variable names are captured at compile time instead.

use std::{str::FromStr, time::Duration as StdDuration};

use chrono::{Duration, FixedOffset};
use dioxus_logger::tracing::Level;

use crate::error::ConfigError;

const DEFAULT_PAGE_SIZE: u32 = 10;
/// Gulf Standard Time, where the shop operates.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 240;
const DEFAULT_NEW_ORDER_WINDOW_MINUTES: i64 = 20;
const DEFAULT_NOTIFICATION_SOUND: &str = "/notification.mp3";

pub const API_URL: &str = "BLOSSOM_API_URL";
pub const SOCKET_URL: &str = "BLOSSOM_SOCKET_URL";
pub const PAGE_SIZE: &str = "BLOSSOM_PAGE_SIZE";
pub const CLIENT_REFILTER: &str = "BLOSSOM_CLIENT_REFILTER";
pub const DEDUP_WINDOW_SECS: &str = "BLOSSOM_DEDUP_WINDOW_SECS";
pub const UTC_OFFSET_MINUTES: &str = "BLOSSOM_UTC_OFFSET_MINUTES";
pub const NEW_ORDER_WINDOW_MINUTES: &str = "BLOSSOM_NEW_ORDER_WINDOW_MINUTES";
pub const NOTIFICATION_SOUND: &str = "BLOSSOM_NOTIFICATION_SOUND";
pub const FIREBASE_VAPID_KEY: &str = "BLOSSOM_FIREBASE_VAPID_KEY";
pub const LOG_LEVEL: &str = "BLOSSOM_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Origin of the Socket.IO server.
    pub socket_url: String,
    /// Rows per order-table page.
    pub page_size: u32,
    /// Re-check status and date filters locally on each fetched page.
    pub client_refilter: bool,
    /// Cross-channel notification dedup window; zero disables deduplication.
    pub dedup_window: Duration,
    /// Offset used to resolve "today", "this month" and custom date ranges.
    pub utc_offset: FixedOffset,
    /// Orders younger than this get the "New" badge.
    pub new_order_window: Duration,
    /// Sound played when a new paid order arrives.
    pub notification_sound: String,
    /// VAPID key passed to the push-messaging SDK when requesting a token.
    pub firebase_vapid_key: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration captured from the build environment.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let captured: [(&str, Option<&'static str>); 10] = [
            (API_URL, option_env!("BLOSSOM_API_URL")),
            (SOCKET_URL, option_env!("BLOSSOM_SOCKET_URL")),
            (PAGE_SIZE, option_env!("BLOSSOM_PAGE_SIZE")),
            (CLIENT_REFILTER, option_env!("BLOSSOM_CLIENT_REFILTER")),
            (DEDUP_WINDOW_SECS, option_env!("BLOSSOM_DEDUP_WINDOW_SECS")),
            (UTC_OFFSET_MINUTES, option_env!("BLOSSOM_UTC_OFFSET_MINUTES")),
            (
                NEW_ORDER_WINDOW_MINUTES,
                option_env!("BLOSSOM_NEW_ORDER_WINDOW_MINUTES"),
            ),
            (NOTIFICATION_SOUND, option_env!("BLOSSOM_NOTIFICATION_SOUND")),
            (FIREBASE_VAPID_KEY, option_env!("BLOSSOM_FIREBASE_VAPID_KEY")),
            (LOG_LEVEL, option_env!("BLOSSOM_LOG_LEVEL")),
        ];

        Self::from_lookup(|key| {
            captured
                .iter()
                .find(|(name, _)| *name == key)
                .and_then(|(_, value)| value.map(str::to_string))
        })
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `BLOSSOM_API_URL` is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_URL.to_string()))?
            .trim_end_matches('/')
            .to_string();

        let socket_url = match get(SOCKET_URL) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => api_url
                .strip_suffix("/api")
                .unwrap_or(&api_url)
                .to_string(),
        };

        let page_size = parse_or(get(PAGE_SIZE), PAGE_SIZE, DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: PAGE_SIZE.to_string(),
                reason: "page size must be at least 1".to_string(),
            });
        }

        let client_refilter = parse_or(get(CLIENT_REFILTER), CLIENT_REFILTER, false)?;
        let dedup_window_secs: u64 = parse_or(get(DEDUP_WINDOW_SECS), DEDUP_WINDOW_SECS, 0)?;

        let offset_minutes: i32 = parse_or(
            get(UTC_OFFSET_MINUTES),
            UTC_OFFSET_MINUTES,
            DEFAULT_UTC_OFFSET_MINUTES,
        )?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::InvalidEnvValue {
                var: UTC_OFFSET_MINUTES.to_string(),
                reason: format!("{} minutes is not a valid UTC offset", offset_minutes),
            })?;

        let new_order_window_minutes: i64 = parse_or(
            get(NEW_ORDER_WINDOW_MINUTES),
            NEW_ORDER_WINDOW_MINUTES,
            DEFAULT_NEW_ORDER_WINDOW_MINUTES,
        )?;
        let new_order_window = Duration::try_minutes(new_order_window_minutes)
            .filter(|window| *window >= Duration::zero())
            .ok_or_else(|| ConfigError::InvalidEnvValue {
                var: NEW_ORDER_WINDOW_MINUTES.to_string(),
                reason: format!("{} minutes is not a usable window", new_order_window_minutes),
            })?;

        let dedup_window = Duration::from_std(StdDuration::from_secs(dedup_window_secs))
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: DEDUP_WINDOW_SECS.to_string(),
                reason: e.to_string(),
            })?;

        let log_level = parse_or(get(LOG_LEVEL), LOG_LEVEL, Level::INFO)?;

        Ok(Self {
            api_url,
            socket_url,
            page_size,
            client_refilter,
            dedup_window,
            utc_offset,
            new_order_window,
            notification_sound: get(NOTIFICATION_SOUND)
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_SOUND.to_string()),
            firebase_vapid_key: get(FIREBASE_VAPID_KEY),
            log_level,
        })
    }
}

fn parse_or<T>(raw: Option<String>, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    /// Expect defaults for every optional variable when only the API URL is set
    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[(API_URL, "http://localhost:4000/api/")]))
            .expect("config should load");

        assert_eq!(config.api_url, "http://localhost:4000/api");
        assert_eq!(config.socket_url, "http://localhost:4000");
        assert_eq!(config.page_size, 10);
        assert!(!config.client_refilter);
        assert_eq!(config.dedup_window, Duration::zero());
        assert_eq!(config.utc_offset.local_minus_utc(), 4 * 3600);
        assert_eq!(config.new_order_window, Duration::minutes(20));
        assert_eq!(config.notification_sound, "/notification.mp3");
        assert_eq!(config.firebase_vapid_key, None);
        assert_eq!(config.log_level, Level::INFO);
    }

    /// Expect MissingEnvVar when the API URL is absent
    #[test]
    fn requires_api_url() {
        let result = Config::from_lookup(lookup(&[]));

        assert_eq!(result, Err(ConfigError::MissingEnvVar(API_URL.to_string())));
    }

    /// Expect InvalidEnvValue naming the variable that failed to parse
    #[test]
    fn rejects_invalid_values() {
        let result = Config::from_lookup(lookup(&[
            (API_URL, "http://localhost:4000/api"),
            (PAGE_SIZE, "ten"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == PAGE_SIZE
        ));

        let result = Config::from_lookup(lookup(&[
            (API_URL, "http://localhost:4000/api"),
            (PAGE_SIZE, "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvValue { .. })));
    }

    /// Expect explicit values to override defaults
    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_URL, "https://api.example.com/api"),
            (SOCKET_URL, "https://ws.example.com/"),
            (PAGE_SIZE, "25"),
            (CLIENT_REFILTER, "true"),
            (DEDUP_WINDOW_SECS, "30"),
            (UTC_OFFSET_MINUTES, "0"),
            (LOG_LEVEL, "debug"),
        ]))
        .expect("config should load");

        assert_eq!(config.socket_url, "https://ws.example.com");
        assert_eq!(config.page_size, 25);
        assert!(config.client_refilter);
        assert_eq!(config.dedup_window, Duration::seconds(30));
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    /// Expect out-of-range durations and offsets to be rejected instead of overflowing
    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            (NEW_ORDER_WINDOW_MINUTES, "9223372036854775807"),
            (NEW_ORDER_WINDOW_MINUTES, "-5"),
            (UTC_OFFSET_MINUTES, "100000000"),
            (UTC_OFFSET_MINUTES, "-2000"),
            (DEDUP_WINDOW_SECS, "18446744073709551615"),
            (DEDUP_WINDOW_SECS, "-1"),
        ];

        for (name, value) in cases {
            let result = Config::from_lookup(lookup(&[
                (API_URL, "http://localhost:4000/api"),
                (name, value),
            ]));
            assert!(
                matches!(result, Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == name),
                "{name}={value} gave {result:?}"
            );
        }
    }
}
