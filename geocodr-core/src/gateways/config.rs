/// Read access to the configured credentials of the geocoding provider.
pub trait ApiKeyProvider {
    /// An empty string if no key has been configured.
    fn geocoding_api_key(&self) -> String;
}

impl ApiKeyProvider for String {
    fn geocoding_api_key(&self) -> String {
        self.clone()
    }
}

impl ApiKeyProvider for Option<String> {
    fn geocoding_api_key(&self) -> String {
        self.clone().unwrap_or_default()
    }
}
