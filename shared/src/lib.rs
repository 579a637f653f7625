//! Shared types and the reference evapotranspiration (ET0) engine
//!
//! This crate contains the pure computational core used by the backend proxy
//! and by the browser dashboard (via WASM). Nothing in here performs I/O.

pub mod et0;
pub mod models;
pub mod types;
pub mod validation;

pub use et0::*;
pub use models::*;
pub use types::*;
pub use validation::*;
