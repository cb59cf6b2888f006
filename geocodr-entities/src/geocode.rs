use std::{fmt, str::FromStr};
use thiserror::Error;

/// Outcome code of a failed geocoding request.
///
/// The well-known codes of the Google geocoding API have their own
/// variants, everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    OverQueryLimit,
    UnknownError,
    ZeroResults,
    RequestDenied,
    InvalidRequest,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("The status 'OK' is not an error code")]
pub struct ErrorCodeParseError;

impl FromStr for ErrorCode {
    type Err = ErrorCodeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s {
            "OK" => return Err(ErrorCodeParseError),
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "UNKNOWN_ERROR" => Self::UnknownError,
            "ZERO_RESULTS" => Self::ZeroResults,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            other => Self::Other(other.to_owned()),
        };
        Ok(code)
    }
}

/// A successfully resolved address.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodedAddress {
    pub latitude          : f64,
    pub longitude         : f64,
    pub street_number     : String,
    pub street_name       : String,
    pub street_name_short : String,
    pub suburb            : String,
    pub council           : String,
    pub council_short     : String,
    pub state             : String,
    pub state_short       : String,
    pub country           : String,
    pub country_short     : String,
    pub post_code         : String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeFailure {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Success(GeocodedAddress),
    Failure(GeocodeFailure),
}

/// The uniform result of a geocoding request.
///
/// `cacheable` tells the caller whether the result is reproducible
/// and may be remembered for identical requests. A result that is
/// not cacheable is transient and the request should be retried later.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub cacheable: bool,
    pub outcome: GeocodeOutcome,
}

impl GeocodeResult {
    pub fn success(address: GeocodedAddress) -> Self {
        Self {
            cacheable: true,
            outcome: GeocodeOutcome::Success(address),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>, cacheable: bool) -> Self {
        Self {
            cacheable,
            outcome: GeocodeOutcome::Failure(GeocodeFailure {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, GeocodeOutcome::Success(_))
    }

    pub fn address(&self) -> Option<&GeocodedAddress> {
        match &self.outcome {
            GeocodeOutcome::Success(addr) => Some(addr),
            GeocodeOutcome::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&GeocodeFailure> {
        match &self.outcome {
            GeocodeOutcome::Success(_) => None,
            GeocodeOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn error_code(&self) -> Option<&ErrorCode> {
        self.failure_ref().map(|f| &f.code)
    }

    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        self.address().map(|a| (a.latitude, a.longitude))
    }
}
