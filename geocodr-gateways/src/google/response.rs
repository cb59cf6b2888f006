//! Payload of the Google geocoding API.
//!
//! The `status` is decoded first and on its own. Everything else
//! is optional and tolerates `null` or unexpected values.

use geocodr_entities::geocode::GeocodedAddress;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// How address components are assigned to the fields of a [`GeocodedAddress`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComponentMatching {
    /// Take the component at a fixed position.
    ///
    /// Components are not checked for their type, so a
    /// short or reordered list leads to wrong or empty fields.
    #[default]
    Positional,
    /// Take the first component with the expected type.
    ByType,
}

/// The part of a response that decides between success and failure.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResults {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<Value>,
}

impl GeocodeResults {
    /// Decodes the first result, the others are never looked at.
    pub fn first(&self) -> Option<serde_json::Result<GeocodeResultPayload>> {
        self.results.first().map(GeocodeResultPayload::deserialize)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GeocodeResultPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_default")]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Default, Deserialize)]
struct Geometry {
    #[serde(default, deserialize_with = "null_as_default")]
    location: Location,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default, deserialize_with = "number_or_zero")]
    lat: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
struct AddressComponent {
    #[serde(default, deserialize_with = "coerce_to_string")]
    long_name: Option<String>,
    #[serde(default, deserialize_with = "coerce_to_string")]
    short_name: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    types: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .unwrap_or_default())
}

fn coerce_to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(name) => Some(name),
        other => Some(other.to_string()),
    };
    Ok(name)
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(item) => Some(item),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}

/// Position and type of a component in a regular street address.
#[derive(Debug, Clone, Copy)]
struct Slot {
    position: usize,
    kind: &'static str,
}

#[rustfmt::skip]
mod slots {
    use super::Slot;
    pub const STREET_NUMBER : Slot = Slot { position: 0, kind: "street_number" };
    pub const STREET_NAME   : Slot = Slot { position: 1, kind: "route" };
    pub const SUBURB        : Slot = Slot { position: 2, kind: "locality" };
    pub const COUNCIL       : Slot = Slot { position: 3, kind: "administrative_area_level_2" };
    pub const STATE         : Slot = Slot { position: 4, kind: "administrative_area_level_1" };
    pub const COUNTRY       : Slot = Slot { position: 5, kind: "country" };
    pub const POST_CODE     : Slot = Slot { position: 6, kind: "postal_code" };
}

impl GeocodeResultPayload {
    fn component(&self, matching: ComponentMatching, slot: Slot) -> Option<&AddressComponent> {
        match matching {
            ComponentMatching::Positional => self.address_components.get(slot.position),
            ComponentMatching::ByType => self
                .address_components
                .iter()
                .find(|c| c.types.iter().any(|t| t == slot.kind)),
        }
    }

    fn long_name(&self, matching: ComponentMatching, slot: Slot) -> String {
        self.component(matching, slot)
            .and_then(|c| c.long_name.clone())
            .unwrap_or_default()
    }

    fn short_name(&self, matching: ComponentMatching, slot: Slot) -> String {
        self.component(matching, slot)
            .and_then(|c| c.short_name.clone())
            .unwrap_or_default()
    }

    pub fn into_geocoded_address(self, matching: ComponentMatching) -> GeocodedAddress {
        use slots::*;
        let long = |slot| self.long_name(matching, slot);
        let short = |slot| self.short_name(matching, slot);
        GeocodedAddress {
            latitude: self.geometry.location.lat,
            longitude: self.geometry.location.lng,
            street_number: long(STREET_NUMBER),
            street_name: long(STREET_NAME),
            street_name_short: short(STREET_NAME),
            suburb: long(SUBURB),
            council: long(COUNCIL),
            council_short: short(COUNCIL),
            state: long(STATE),
            state_short: short(STATE),
            country: long(COUNTRY),
            country_short: short(COUNTRY),
            post_code: long(POST_CODE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> GeocodeResultPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let addr = payload("{}").into_geocoded_address(ComponentMatching::Positional);
        assert_eq!(GeocodedAddress::default(), addr);
    }

    #[test]
    fn null_names_become_empty_strings() {
        let addr = payload(
            r#"{"address_components":[{"long_name":null,"short_name":"1"},{"long_name":"Main St"}]}"#,
        )
        .into_geocoded_address(ComponentMatching::Positional);
        assert_eq!("", addr.street_number);
        assert_eq!("Main St", addr.street_name);
        assert_eq!("", addr.street_name_short);
    }

    #[test]
    fn positional_matching_ignores_component_types() {
        let json = r#"{"address_components":[
            {"long_name":"Main St","short_name":"Main St","types":["route"]},
            {"long_name":"Springfield","short_name":"Springfield","types":["locality"]}
        ]}"#;
        let addr = payload(json).into_geocoded_address(ComponentMatching::Positional);
        assert_eq!("Main St", addr.street_number);
        assert_eq!("Springfield", addr.street_name);
        assert_eq!("", addr.suburb);
    }

    #[test]
    fn match_components_by_type() {
        let json = r#"{"address_components":[
            {"long_name":"Main Street","short_name":"Main St","types":["route"]},
            {"long_name":"Springfield","short_name":"Springfield","types":["locality","political"]},
            {"long_name":"Victoria","short_name":"VIC","types":["administrative_area_level_1","political"]}
        ]}"#;
        let addr = payload(json).into_geocoded_address(ComponentMatching::ByType);
        assert_eq!("", addr.street_number);
        assert_eq!("Main Street", addr.street_name);
        assert_eq!("Main St", addr.street_name_short);
        assert_eq!("Springfield", addr.suburb);
        assert_eq!("Victoria", addr.state);
        assert_eq!("VIC", addr.state_short);
        assert_eq!("", addr.country);
    }

    #[test]
    fn null_coordinates_become_zero() {
        let addr = payload(r#"{"geometry":{"location":{"lat":null,"lng":144.9}}}"#)
            .into_geocoded_address(ComponentMatching::Positional);
        assert_eq!(0.0, addr.latitude);
        assert_eq!(144.9, addr.longitude);

        let addr =
            payload(r#"{"geometry":null}"#).into_geocoded_address(ComponentMatching::Positional);
        assert_eq!((0.0, 0.0), (addr.latitude, addr.longitude));
    }

    #[test]
    fn names_are_coerced_to_strings() {
        let json = r#"{"address_components":[
            {"long_name":12,"short_name":true},
            {"long_name":"Main St","types":null},
            {"long_name":"Springfield","types":["locality",7]}
        ]}"#;
        let addr = payload(json).into_geocoded_address(ComponentMatching::Positional);
        assert_eq!("12", addr.street_number);
        assert_eq!("Main St", addr.street_name);
        assert_eq!("Springfield", addr.suburb);

        let addr = payload(json).into_geocoded_address(ComponentMatching::ByType);
        assert_eq!("Springfield", addr.suburb);
    }

    #[test]
    fn decode_only_the_first_result() {
        let results: GeocodeResults =
            serde_json::from_str(r#"{"results":[{"address_components":[]},"garbage"]}"#).unwrap();
        assert!(results.first().unwrap().is_ok());

        let results: GeocodeResults = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(results.first().is_none());
    }

    #[test]
    fn status_ignores_the_rest_of_the_response() {
        let status: GeocodeStatus =
            serde_json::from_str(r#"{"status":"OVER_QUERY_LIMIT","results":{"odd":1}}"#).unwrap();
        assert_eq!("OVER_QUERY_LIMIT", status.status);
        assert!(serde_json::from_str::<GeocodeStatus>(r#"{"status":null}"#).is_err());
    }
}
