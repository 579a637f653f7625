//! External API integrations

pub mod signature;
pub mod station_api;

pub use station_api::{StationApiClient, UpstreamRequest};
