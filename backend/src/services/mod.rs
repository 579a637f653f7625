//! Gateway, caching and ET0 services for the station proxy

pub mod cache;
pub mod et0;
pub mod gateway;
pub mod historical;
pub mod sanitize;

pub use cache::ResponseCache;
pub use et0::Et0Service;
pub use gateway::TelemetryGateway;
pub use sanitize::Sanitizer;
