use std::{path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://www.pro-football-reference.com";
pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_DELAY_SECS: u64 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT: &str = "nfl_stats.csv";
pub const DEFAULT_USER_AGENT: &str = concat!("proptrack/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct CollectConfig {
    pub base_url: String,
    pub season: u16,
    /// Pause after every request, successful or not
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub output: PathBuf,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            season: DEFAULT_SEASON,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
