use crate::entities::AddressInput;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

const COMPONENT_SEPARATOR: &str = ", ";

lazy_static! {
    static ref LINE_BREAKS: Regex = Regex::new(r"\n+").unwrap();
}

/// Turns an address into a single line that can be sent to a geocoding provider.
///
/// Components are joined with `", "`, every run of line breaks
/// is replaced by `", "` and the result is trimmed.
pub fn normalize_address(address: &AddressInput) -> String {
    let joined = match address {
        AddressInput::Line(line) => line.clone(),
        AddressInput::Components(parts) => parts.iter().join(COMPONENT_SEPARATOR),
    };
    LINE_BREAKS
        .replace_all(&joined, COMPONENT_SEPARATOR)
        .trim()
        .to_owned()
}
