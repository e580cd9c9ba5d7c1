pub mod aggregate;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod report;
pub mod storage;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_DATA_DIR: &str = "docs";
    const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
    const DEFAULT_USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub anthropic_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
        pub data_dir: PathBuf,
        pub fetch_timeout_secs: u64,
        pub user_agent: String,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let fetch_timeout_secs = match std::env::var("GOLFDEALS_FETCH_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("GOLFDEALS_FETCH_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
            };

            Ok(Self {
                anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                data_dir: non_empty_var("GOLFDEALS_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
                fetch_timeout_secs,
                user_agent: non_empty_var("GOLFDEALS_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            })
        }

        pub fn require_anthropic_api_key(&self) -> anyhow::Result<&str> {
            self.anthropic_api_key
                .as_deref()
                .context("ANTHROPIC_API_KEY is required for the search fetch path")
        }

        /// Aggregated deals document written by the worker, read by the reporter.
        pub fn raw_deals_path(&self) -> PathBuf {
            self.data_dir.join("raw_deals.json")
        }

        pub fn deals_json_path(&self) -> PathBuf {
            self.data_dir.join("deals.json")
        }

        pub fn dashboard_path(&self) -> PathBuf {
            self.data_dir.join("index.html")
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                anthropic_api_key: None,
                sentry_dsn: None,
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

}
