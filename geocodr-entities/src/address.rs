#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street  : Option<String>,
    pub zip     : Option<String>,
    pub city    : Option<String>,
    pub state   : Option<String>,
    pub country : Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.parts().next().is_none()
    }

    /// The non-empty parts in the order a postal address is written.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.street, &self.zip, &self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(Option::as_deref)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The address that should be geocoded, either as a
/// single line or as an ordered list of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressInput {
    Line(String),
    Components(Vec<String>),
}

impl From<&str> for AddressInput {
    fn from(from: &str) -> Self {
        Self::Line(from.to_owned())
    }
}

impl From<String> for AddressInput {
    fn from(from: String) -> Self {
        Self::Line(from)
    }
}

impl From<Vec<String>> for AddressInput {
    fn from(from: Vec<String>) -> Self {
        Self::Components(from)
    }
}

impl From<&[&str]> for AddressInput {
    fn from(from: &[&str]) -> Self {
        Self::Components(from.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AddressInput {
    fn from(from: [&str; N]) -> Self {
        Self::from(&from[..])
    }
}

impl From<&Address> for AddressInput {
    fn from(from: &Address) -> Self {
        Self::Components(from.parts().map(ToOwned::to_owned).collect())
    }
}
