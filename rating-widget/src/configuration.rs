use crate::error::FetchError;
use crate::source::HistoryClient;
use config::{Config, ConfigError, Environment, File};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub source: SourceSettings,
    pub viewport: ViewportSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SourceSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<HistoryClient, FetchError> {
        HistoryClient::new(self.base_url.clone(), self.timeout())
    }
}

/// Client size of the element the binary renders into.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct ViewportSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub width: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub height: f64,
}

/// Layers built-in defaults, an optional `configuration.yaml` in the working
/// directory, and `APP_`-prefixed environment variables, e.g.
/// `APP_SOURCE__BASE_URL`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("source.base_url", "https://atcoder.jp")?
        .set_default("source.timeout_milliseconds", 10_000_i64)?
        .set_default("viewport.width", 640_i64)?
        .set_default("viewport.height", 360_i64)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
