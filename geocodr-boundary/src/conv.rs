use super::*;
use geocodr_entities::geocode as e;

impl From<e::GeocodedAddress> for GeocodedAddress {
    fn from(from: e::GeocodedAddress) -> Self {
        let e::GeocodedAddress {
            latitude,
            longitude,
            street_number,
            street_name,
            street_name_short,
            suburb,
            council,
            council_short,
            state,
            state_short,
            country,
            country_short,
            post_code,
        } = from;
        Self {
            latitude,
            longitude,
            street_number,
            street_name,
            street_name_short,
            suburb,
            council,
            council_short,
            state,
            state_short,
            country,
            country_short,
            post_code,
        }
    }
}

impl From<GeocodedAddress> for e::GeocodedAddress {
    fn from(from: GeocodedAddress) -> Self {
        let GeocodedAddress {
            latitude,
            longitude,
            street_number,
            street_name,
            street_name_short,
            suburb,
            council,
            council_short,
            state,
            state_short,
            country,
            country_short,
            post_code,
        } = from;
        Self {
            latitude,
            longitude,
            street_number,
            street_name,
            street_name_short,
            suburb,
            council,
            council_short,
            state,
            state_short,
            country,
            country_short,
            post_code,
        }
    }
}

impl From<e::GeocodeResult> for GeocodeResult {
    fn from(from: e::GeocodeResult) -> Self {
        let e::GeocodeResult { cacheable, outcome } = from;
        let (success, details) = match outcome {
            e::GeocodeOutcome::Success(addr) => (true, GeocodeDetails::Address(addr.into())),
            e::GeocodeOutcome::Failure(e::GeocodeFailure { code, message }) => (
                false,
                GeocodeDetails::Error(GeocodeError {
                    error_code: code.to_string(),
                    error_message: message,
                }),
            ),
        };
        Self {
            success,
            cacheable,
            details,
        }
    }
}

/// The `success` flag contradicts the fields of a [`GeocodeResult`].
#[derive(Debug, thiserror::Error)]
#[error("The result is marked with success = {success} but carries the other set of fields")]
pub struct InconsistentResultError {
    pub success: bool,
}

impl TryFrom<GeocodeResult> for e::GeocodeResult {
    type Error = InconsistentResultError;

    fn try_from(from: GeocodeResult) -> Result<Self, Self::Error> {
        let GeocodeResult {
            success,
            cacheable,
            details,
        } = from;
        let outcome = match (success, details) {
            (true, GeocodeDetails::Address(addr)) => e::GeocodeOutcome::Success(addr.into()),
            (
                false,
                GeocodeDetails::Error(GeocodeError {
                    error_code,
                    error_message,
                }),
            ) => {
                let code = error_code
                    .parse()
                    .unwrap_or(e::ErrorCode::Other(error_code));
                e::GeocodeOutcome::Failure(e::GeocodeFailure {
                    code,
                    message: error_message,
                })
            }
            (success, _) => return Err(InconsistentResultError { success }),
        };
        Ok(Self { cacheable, outcome })
    }
}
