pub mod cache;
pub mod clock;
pub mod config;
pub mod geocode;
pub mod http;
