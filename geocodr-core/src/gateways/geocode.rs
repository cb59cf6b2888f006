use crate::entities::{Address, AddressInput, GeocodeResult};

/// A service that resolves postal addresses.
pub trait GeoCodingGateway {
    /// Never fails: every failure is reported within the result.
    fn geocode(&self, address: &AddressInput) -> GeocodeResult;

    /// Whether the provider has reported that its daily quota is used up.
    fn is_over_limit(&self) -> bool {
        false
    }

    fn resolve_address_lat_lng(&self, addr: &Address) -> Option<(f64, f64)> {
        if addr.is_empty() {
            return None;
        }
        self.geocode(&AddressInput::from(addr)).lat_lng()
    }
}
