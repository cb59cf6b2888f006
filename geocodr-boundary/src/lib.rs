use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use self::conv::InconsistentResultError;

/// A geocoding result as exchanged with callers.
///
/// `success` and `cacheable` are always present. Either the
/// coordinates and address fields or the error fields are set,
/// depending on `success`.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub success: bool,
    pub cacheable: bool,
    #[serde(flatten)]
    pub details: GeocodeDetails,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(untagged)]
pub enum GeocodeDetails {
    Address(GeocodedAddress),
    Error(GeocodeError),
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
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

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct GeocodeError {
    pub error_code: String,
    pub error_message: String,
}
