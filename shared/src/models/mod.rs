//! Domain models for station telemetry and ET0 estimates

mod estimate;
mod parameters;
mod reading;
mod station;

pub use estimate::*;
pub use parameters::*;
pub use reading::*;
pub use station::*;
