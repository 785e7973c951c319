pub mod domain;
pub mod feed;
pub mod report;

pub mod config {
    use crate::domain::range::DateRange;
    use anyhow::Context;
    use chrono::NaiveDate;

    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_FEED_BASE_URL: &str = "https://api.nasa.gov";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub api_key: Option<String>,
        pub feed_base_url: String,
        pub feed_timeout_secs: Option<u64>,
        pub default_range: DateRange,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from an arbitrary variable source. Blank values count as unset.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

            let port = var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT);

            let feed_timeout_secs = match var("NEO_FEED_TIMEOUT_SECS") {
                Some(v) => Some(
                    v.parse::<u64>()
                        .with_context(|| format!("NEO_FEED_TIMEOUT_SECS must be seconds (got {v})"))?,
                ),
                None => None,
            };

            let fallback = DateRange::default();
            let default_range = DateRange::new(
                default_date(var("NEO_DEFAULT_START"), "NEO_DEFAULT_START", fallback.start)?,
                default_date(var("NEO_DEFAULT_END"), "NEO_DEFAULT_END", fallback.end)?,
            );

            Ok(Self {
                port,
                api_key: var("YOUR_API_KEY"),
                feed_base_url: var("NEO_FEED_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_FEED_BASE_URL.to_string()),
                feed_timeout_secs,
                default_range,
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn require_api_key(&self) -> anyhow::Result<&str> {
            self.api_key
                .as_deref()
                .context("YOUR_API_KEY is required")
        }
    }

    // Caller-supplied dates are forwarded unchecked, but configured defaults must be real dates.
    fn default_date(value: Option<String>, key: &str, fallback: String) -> anyhow::Result<String> {
        let Some(value) = value else {
            return Ok(fallback);
        };
        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .with_context(|| format!("{key} must be YYYY-MM-DD (got {value})"))?;
        Ok(value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let map: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| map.get(key).cloned())
        }

        #[test]
        fn defaults_when_environment_is_empty() {
            let s = settings(&[]).unwrap();
            assert_eq!(s.port, 3000);
            assert_eq!(s.api_key, None);
            assert_eq!(s.feed_base_url, "https://api.nasa.gov");
            assert_eq!(s.feed_timeout_secs, None);
            assert_eq!(s.default_range, DateRange::new("2025-01-01", "2025-01-07"));
            assert!(s.require_api_key().is_err());
        }

        #[test]
        fn reads_overrides() {
            let s = settings(&[
                ("PORT", "8080"),
                ("YOUR_API_KEY", "DEMO_KEY"),
                ("NEO_FEED_BASE_URL", "http://127.0.0.1:9999"),
                ("NEO_FEED_TIMEOUT_SECS", "15"),
                ("NEO_DEFAULT_START", "2024-03-01"),
                ("NEO_DEFAULT_END", "2024-03-08"),
            ])
            .unwrap();
            assert_eq!(s.port, 8080);
            assert_eq!(s.require_api_key().unwrap(), "DEMO_KEY");
            assert_eq!(s.feed_base_url, "http://127.0.0.1:9999");
            assert_eq!(s.feed_timeout_secs, Some(15));
            assert_eq!(s.default_range, DateRange::new("2024-03-01", "2024-03-08"));
        }

        #[test]
        fn unparsable_port_falls_back() {
            let s = settings(&[("PORT", "http")]).unwrap();
            assert_eq!(s.port, DEFAULT_PORT);
        }

        #[test]
        fn blank_api_key_counts_as_missing() {
            let s = settings(&[("YOUR_API_KEY", "  ")]).unwrap();
            assert_eq!(s.api_key, None);
        }

        #[test]
        fn rejects_malformed_default_dates() {
            assert!(settings(&[("NEO_DEFAULT_START", "01/01/2025")]).is_err());
            assert!(settings(&[("NEO_DEFAULT_END", "2025-02-30")]).is_err());
        }

        #[test]
        fn rejects_malformed_timeout() {
            assert!(settings(&[("NEO_FEED_TIMEOUT_SECS", "soon")]).is_err());
        }
    }
}
