use std::time::Duration;

/// Hosted radar document used when `RADAR_ENTRIES_URL` is not set.
pub const DEFAULT_ENTRIES_URL: &str = "https://radar.sandbox.aetheron.com/radar-entries.json";

/// Default timeout for the startup fetch (10 seconds).
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub entries_url: String,
    pub fetch_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            entries_url: DEFAULT_ENTRIES_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `RADAR_ENTRIES_URL` (optional) — URL of the radar entries JSON array
    /// - `RADAR_FETCH_TIMEOUT_SECS` (optional, default 10) — max seconds for the startup fetch
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let entries_url = match lookup("RADAR_ENTRIES_URL") {
            Some(val) => {
                let val = val.trim();
                if val.is_empty() {
                    return Err("RADAR_ENTRIES_URL is set but empty".to_string());
                }
                val.to_string()
            }
            None => DEFAULT_ENTRIES_URL.to_string(),
        };

        let fetch_timeout_secs = match lookup("RADAR_FETCH_TIMEOUT_SECS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err("RADAR_FETCH_TIMEOUT_SECS must be a positive integer".to_string()),
            },
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        Ok(Self {
            entries_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}
