use geocodr_core::{
    entities::{AddressInput, ErrorCode, GeocodeResult},
    gateways::{
        cache::KeyValueCache,
        clock::{Clock, SystemClock},
        config::ApiKeyProvider,
        geocode::GeoCodingGateway,
        http::HttpTransport,
    },
    usecases::{is_over_daily_limit, mark_daily_limit},
    util::address::normalize_address,
};
use serde::Deserialize as _;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

mod response;

pub use self::response::ComponentMatching;
use self::response::{GeocodeResults, GeocodeStatus};

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const OVER_LIMIT_MESSAGE: &str =
    "Google geocoding service is over the daily limit. Please try again later.";

const API_KEY_PARAM: &str = "key";

/// Geocoding with the Google Maps API.
pub struct GoogleMaps {
    endpoint: String,
    component_matching: ComponentMatching,
    api_key: Arc<dyn ApiKeyProvider + Send + Sync>,
    transport: Arc<dyn HttpTransport + Send + Sync>,
    cache: Arc<dyn KeyValueCache + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl std::fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("endpoint", &self.endpoint)
            .field("component_matching", &self.component_matching)
            .finish_non_exhaustive()
    }
}

impl GoogleMaps {
    pub fn new(
        api_key: Arc<dyn ApiKeyProvider + Send + Sync>,
        transport: Arc<dyn HttpTransport + Send + Sync>,
        cache: Arc<dyn KeyValueCache + Send + Sync>,
    ) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            component_matching: ComponentMatching::default(),
            api_key,
            transport,
            cache,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_component_matching(mut self, component_matching: ComponentMatching) -> Self {
        self.component_matching = component_matching;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    fn mark_limit(&self) {
        mark_daily_limit(&*self.cache, &*self.clock);
    }

    fn request_url(&self, address: &str) -> Result<Url, url::ParseError> {
        let api_key = self.api_key.geocoding_api_key();
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("sensor", "false"),
                ("address", address),
                (API_KEY_PARAM, &api_key),
            ],
        )
    }

    fn fetch(&self, url: &Url, location: &Url) -> Option<Value> {
        let body = match self.transport.get(url) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("Could not call geocoding API at {location}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&body) {
            Ok(response) => Some(response),
            Err(err) => {
                log::warn!("Could not decode geocoding response from {location}: {err}");
                None
            }
        }
    }
}

impl GeoCodingGateway for GoogleMaps {
    fn is_over_limit(&self) -> bool {
        is_over_daily_limit(&*self.cache, &*self.clock)
    }

    fn geocode(&self, address: &AddressInput) -> GeocodeResult {
        if self.is_over_limit() {
            return GeocodeResult::failure(ErrorCode::OverQueryLimit, OVER_LIMIT_MESSAGE, false);
        }

        let address = normalize_address(address);
        let url = match self.request_url(&address) {
            Ok(url) => url,
            Err(err) => {
                log::error!("Invalid geocoding endpoint '{}': {err}", self.endpoint);
                return unknown_error(&self.endpoint);
            }
        };
        let location = redact_api_key(&url);
        log::debug!("Geocoding '{address}' at {location}");

        let Some(response) = self.fetch(&url, &location) else {
            return unknown_error(&location);
        };
        let status = match GeocodeStatus::deserialize(&response) {
            Ok(GeocodeStatus { status }) => status,
            Err(err) => {
                log::warn!("Missing status in geocoding response from {location}: {err}");
                return unknown_error(&location);
            }
        };

        if let Ok(code) = status.parse::<ErrorCode>() {
            let cacheable = code != ErrorCode::OverQueryLimit;
            if !cacheable {
                self.mark_limit();
            }
            log::warn!("Failed to geocode '{address}': {code}");
            let message = format!("Google error code: {code} at url {location}");
            return GeocodeResult::failure(code, message, cacheable);
        }

        let results = match GeocodeResults::deserialize(&response) {
            Ok(results) => results,
            Err(err) => {
                log::warn!("Could not decode geocoding results from {location}: {err}");
                return unknown_error(&location);
            }
        };
        let result = match results.first() {
            Some(Ok(result)) => result,
            Some(Err(err)) => {
                log::warn!("Could not decode geocoding result from {location}: {err}");
                return unknown_error(&location);
            }
            None => {
                log::warn!("No results for '{address}' although the status is OK");
                return GeocodeResult::failure(
                    ErrorCode::UnknownError,
                    format!("Google returned no results at url {location}"),
                    false,
                );
            }
        };
        let geocoded = result.into_geocoded_address(self.component_matching);
        log::debug!(
            "Resolved address location '{address}': ({}, {})",
            geocoded.latitude,
            geocoded.longitude
        );
        GeocodeResult::success(geocoded)
    }
}

fn unknown_error(location: impl std::fmt::Display) -> GeocodeResult {
    GeocodeResult::failure(
        ErrorCode::UnknownError,
        format!("Could not call google api at url {location}"),
        false,
    )
}

/// Replaces the API key of a request URL so it can be logged and reported.
fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == API_KEY_PARAM && !value.is_empty() {
                "***".to_owned()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
