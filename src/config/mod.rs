use anyhow::{anyhow, Result};
use geocodr_core::usecases::DAILY_LIMIT_BLACKOUT;
use geocodr_gateways::google::{ComponentMatching, DEFAULT_ENDPOINT};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "geocodr.toml";

const ENV_NAME_API_KEY: &str = "GOOGLE_MAPS_GEOCODE_API_KEY";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_CACHE_DIR: &str = "geocodr-cache";

pub struct Config {
    pub geocoding: Geocoding,
    pub cache: Cache,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_api_key_override(env::var(ENV_NAME_API_KEY).ok());
        Ok(cfg)
    }

    fn apply_api_key_override(&mut self, api_key: Option<String>) {
        let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
            return;
        };
        match &mut self.geocoding.gateway {
            Some(GeocodingGateway::GoogleMaps { api_key: key, .. }) => {
                *key = Some(api_key);
            }
            None => {
                log::warn!("{ENV_NAME_API_KEY} is set but no geocoding gateway is configured");
            }
        }
    }
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub request_timeout: Duration,
    pub component_matching: ComponentMatching,
}

pub enum GeocodingGateway {
    GoogleMaps {
        api_key: Option<String>,
        endpoint: Url,
    },
}

pub struct Cache {
    pub backend: CacheBackend,
    /// Entries saved without an explicit lifetime expire after this period
    pub default_lifetime: Option<Duration>,
}

pub enum CacheBackend {
    /// Forgets everything when the process exits
    Memory,
    JsonFile {
        /// File system directory for the JSON files
        dir: PathBuf,
    },
}

impl From<raw::ComponentMatching> for ComponentMatching {
    fn from(from: raw::ComponentMatching) -> Self {
        match from {
            raw::ComponentMatching::Positional => Self::Positional,
            raw::ComponentMatching::ByType => Self::ByType,
        }
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            cache,
        } = from;

        let raw::Geocoding {
            gateway: gw_name,
            request_timeout,
            component_matching,
        } = geocoding.unwrap_or_default();

        let gateway = match gw_name {
            Some(raw::GeocodingGateway::GoogleMaps) => {
                let raw::GoogleMaps { api_key, endpoint } = gateway
                    .unwrap_or_default()
                    .google_maps
                    .ok_or_else(|| anyhow!("Missing 'gateway.google-maps' configuration"))?;
                let endpoint = endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
                let endpoint = endpoint
                    .parse::<Url>()
                    .map_err(|err| anyhow!("Invalid geocoding endpoint '{endpoint}': {err}"))?;
                let api_key = api_key.filter(|key| !key.is_empty());
                log::info!("Use Google Maps geocoding gateway");
                Some(GeocodingGateway::GoogleMaps { api_key, endpoint })
            }
            None => None,
        };

        let request_timeout = request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(anyhow!("The request timeout must not be zero"));
        }

        let geocoding = Geocoding {
            gateway,
            request_timeout,
            component_matching: component_matching.map(Into::into).unwrap_or_default(),
        };

        let raw::Cache {
            backend,
            dir,
            default_lifetime,
        } = cache.unwrap_or_default();
        let backend = match backend {
            raw::CacheBackend::Memory => CacheBackend::Memory,
            raw::CacheBackend::JsonFile => CacheBackend::JsonFile {
                dir: dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            },
        };
        if let Some(lifetime) = default_lifetime {
            let min_secs = DAILY_LIMIT_BLACKOUT.whole_seconds().unsigned_abs();
            if lifetime.as_secs() < min_secs {
                return Err(anyhow!(
                    "The cache lifetime ({lifetime:?}) must not be shorter than the daily limit blackout ({min_secs}s)"
                ));
            }
        }
        let cache = Cache {
            backend,
            default_lifetime,
        };

        Ok(Self { geocoding, cache })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cfg: &str) -> Result<Config> {
        let raw: raw::Config = toml::from_str(cfg)?;
        Config::try_from(raw)
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = Some(Path::new("does-not-exist.toml"));
        let cfg = Config::try_load_from_file_or_default(file).unwrap();
        assert!(cfg.geocoding.gateway.is_some());
        assert_eq!(DEFAULT_REQUEST_TIMEOUT, cfg.geocoding.request_timeout);
        assert_eq!(
            ComponentMatching::Positional,
            cfg.geocoding.component_matching
        );
    }

    #[test]
    fn load_full_example() {
        let cfg = Config::try_load_from_file_or_default(Some(
            "src/config/geocodr.full-example.toml",
        ))
        .unwrap();
        assert_eq!(Duration::from_secs(5), cfg.geocoding.request_timeout);
        assert_eq!(ComponentMatching::ByType, cfg.geocoding.component_matching);
        let Some(GeocodingGateway::GoogleMaps { api_key, .. }) = cfg.geocoding.gateway else {
            panic!("Google Maps gateway expected");
        };
        // The environment may override the key
        assert!(api_key.is_some());
        assert!(matches!(cfg.cache.backend, CacheBackend::JsonFile { .. }));
        assert_eq!(
            Some(Duration::from_secs(7 * 24 * 60 * 60)),
            cfg.cache.default_lifetime
        );
    }

    #[test]
    fn empty_api_key_is_missing() {
        let cfg = parse(
            r#"
            [geocoding]
            gateway = "google-maps"
            [gateway.google-maps]
            api-key = ""
            "#,
        )
        .unwrap();
        let Some(GeocodingGateway::GoogleMaps { api_key, endpoint }) = cfg.geocoding.gateway
        else {
            panic!("Google Maps gateway expected");
        };
        assert!(api_key.is_none());
        assert_eq!(DEFAULT_ENDPOINT, endpoint.as_str());
    }

    #[test]
    fn google_maps_without_gateway_section_uses_defaults() {
        let cfg = parse("[geocoding]\ngateway = \"google-maps\"").unwrap();
        assert!(matches!(
            cfg.geocoding.gateway,
            Some(GeocodingGateway::GoogleMaps { .. })
        ));
    }

    #[test]
    fn reject_invalid_endpoint() {
        let res = parse(
            r#"
            [geocoding]
            gateway = "google-maps"
            [gateway.google-maps]
            endpoint = "not a url"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn reject_zero_timeout() {
        let res = parse("[geocoding]\nrequest-timeout = \"0s\"");
        assert!(res.is_err());
    }

    #[test]
    fn geocoding_can_be_disabled() {
        let cfg = parse("[geocoding]\n[cache]\nbackend = \"memory\"").unwrap();
        assert!(cfg.geocoding.gateway.is_none());
        assert!(matches!(cfg.cache.backend, CacheBackend::Memory));
        assert!(cfg.cache.default_lifetime.is_none());
    }

    #[test]
    fn json_file_cache_defaults_to_local_dir() {
        let cfg = parse("[cache]\nbackend = \"json-file\"").unwrap();
        let CacheBackend::JsonFile { dir } = cfg.cache.backend else {
            panic!("JSON file cache expected");
        };
        assert_eq!(PathBuf::from(DEFAULT_CACHE_DIR), dir);
    }

    #[test]
    fn cache_lifetime_must_cover_the_daily_limit() {
        assert!(parse("[cache]\nbackend = \"memory\"\ndefault-lifetime = \"23h\"").is_err());
        let cfg = parse("[cache]\nbackend = \"memory\"\ndefault-lifetime = \"24h\"").unwrap();
        assert_eq!(
            Some(Duration::from_secs(24 * 60 * 60)),
            cfg.cache.default_lifetime
        );
    }

    #[test]
    fn override_api_key_from_environment() {
        let mut cfg = parse("[geocoding]\ngateway = \"google-maps\"").unwrap();
        cfg.apply_api_key_override(Some(String::new()));
        let Some(GeocodingGateway::GoogleMaps { api_key, .. }) = &cfg.geocoding.gateway else {
            panic!("Google Maps gateway expected");
        };
        assert!(api_key.is_none());

        cfg.apply_api_key_override(Some("from-env".into()));
        let Some(GeocodingGateway::GoogleMaps { api_key, .. }) = &cfg.geocoding.gateway else {
            panic!("Google Maps gateway expected");
        };
        assert_eq!(Some("from-env"), api_key.as_deref());
    }
}
