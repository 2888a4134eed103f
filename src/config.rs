/// Profile scraped when neither `--username` nor `KAGGLE_USERNAME` is given.
pub const DEFAULT_USERNAME: &str = "kakuteki";
pub const USERNAME_ENV: &str = "KAGGLE_USERNAME";
pub const SPIDER_KEY_ENV: &str = "SPIDER_API_KEY";

pub const PROFILE_URL_BASE: &str = "https://www.kaggle.com";

pub const DEFAULT_OUT_DIR: &str = "kaggle-badges";
pub const DEFAULT_PROFILE_PATH: &str = "data/profile.json";
pub const PROFILE_JSON_FILE: &str = "profile_data.json";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Line windows used by the extractor. The numbers are tuned against the
/// profile page layout, not derived from anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub tier_before: usize,
    pub tier_after: usize,
    pub rank_lookback: usize,
    pub medal_lookback: usize,
    pub medal_lookahead: usize,
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            tier_before: 5,
            tier_after: 5,
            rank_lookback: 15,
            medal_lookback: 20,
            medal_lookahead: 15,
        }
    }
}

pub fn profile_url(username: &str) -> String {
    format!("{}/{}", PROFILE_URL_BASE, username)
}
