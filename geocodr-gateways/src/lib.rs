pub mod cache;
pub mod google;
pub mod http;
