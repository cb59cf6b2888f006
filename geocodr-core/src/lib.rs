pub mod gateways;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use geocodr_entities::{address::*, geocode::*};
}
