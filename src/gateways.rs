use crate::config::{self, CacheBackend, Config, GeocodingGateway};
use anyhow::{Context as _, Result};
use geocodr_core::gateways::{cache::KeyValueCache, geocode::GeoCodingGateway};
use geocodr_gateways::{
    cache::{InMemoryCache, JsonFileCache},
    google::GoogleMaps,
    http::ReqwestTransport,
};
use std::sync::Arc;

pub type GeoCodingGw = Box<dyn GeoCodingGateway + Send + Sync>;

pub fn geocoding_gateway(cfg: &Config) -> Result<Option<GeoCodingGw>> {
    let Some(gateway) = &cfg.geocoding.gateway else {
        log::warn!("No geocoding gateway configured");
        return Ok(None);
    };
    let gw = match gateway {
        GeocodingGateway::GoogleMaps { api_key, endpoint } => {
            if api_key.is_none() {
                log::warn!("No Google Maps API key found");
            }
            let transport = ReqwestTransport::try_new(cfg.geocoding.request_timeout)?;
            let gw = GoogleMaps::new(
                Arc::new(api_key.clone()),
                Arc::new(transport),
                cache(&cfg.cache)?,
            )
            .with_endpoint(endpoint.as_str())
            .with_component_matching(cfg.geocoding.component_matching);
            Box::new(gw) as GeoCodingGw
        }
    };
    Ok(Some(gw))
}

fn cache(cfg: &config::Cache) -> Result<Arc<dyn KeyValueCache + Send + Sync>> {
    let config::Cache {
        backend,
        default_lifetime,
    } = cfg;
    let cache: Arc<dyn KeyValueCache + Send + Sync> = match backend {
        CacheBackend::Memory => {
            log::debug!("Use in-memory cache");
            let cache = match default_lifetime {
                Some(lifetime) => InMemoryCache::with_default_lifetime(*lifetime),
                None => InMemoryCache::new(),
            };
            Arc::new(cache)
        }
        CacheBackend::JsonFile { dir } => {
            log::debug!("Use JSON file cache ({})", dir.display());
            let mut cache = JsonFileCache::try_new(dir)
                .with_context(|| format!("Unable to open cache directory {}", dir.display()))?;
            if let Some(lifetime) = default_lifetime {
                cache = cache.with_default_lifetime(*lifetime);
            }
            Arc::new(cache)
        }
    };
    Ok(cache)
}
