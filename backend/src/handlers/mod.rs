//! HTTP request handlers

pub mod et0;
pub mod health;
pub mod weather;

pub use et0::*;
pub use health::*;
pub use weather::*;
