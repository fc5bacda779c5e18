use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Seat history API root, e.g. https://course-api.designedbymarvin.com
    pub base_url: String,
    /// CRN shown when the page path is empty.
    #[serde(default = "default_identifier")]
    pub default_identifier: String,
}

fn default_identifier() -> String {
    "1".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Fixed offset used for the "as of" line; the server has no browser locale to borrow.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub timestamp_unit: TimestampUnit,
    /// Initial state of the "Use optimized?" checkbox.
    #[serde(default)]
    pub optimized_default: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            timestamp_unit: TimestampUnit::default(),
            optimized_default: false,
        }
    }
}

/// Unit of `Snapshot::timestamp` as sent by the upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    #[default]
    Seconds,
    Milliseconds,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.upstream.base_url.starts_with("http://")
                || self.upstream.base_url.starts_with("https://"),
            "upstream.base_url must be an http(s) URL, got {:?}",
            self.upstream.base_url
        );
        anyhow::ensure!(
            !self.upstream.default_identifier.trim().is_empty(),
            "upstream.default_identifier must be non-empty"
        );
        anyhow::ensure!(
            self.display.utc_offset_minutes.abs() < 24 * 60,
            "display.utc_offset_minutes must be within +/-1439, got {}",
            self.display.utc_offset_minutes
        );
        Ok(())
    }
}
