use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("geocodr.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub cache: Option<Cache>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub request_timeout: Option<Duration>,
    pub component_matching: Option<ComponentMatching>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    GoogleMaps,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentMatching {
    Positional,
    ByType,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub google_maps: Option<GoogleMaps>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleMaps {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cache {
    pub backend: CacheBackend,
    pub dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub default_lifetime: Option<Duration>,
}

impl Default for Cache {
    fn default() -> Self {
        Config::default().cache.expect("Cache configuration")
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheBackend {
    Memory,
    JsonFile,
}
