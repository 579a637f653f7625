//! Reference evapotranspiration (ET0) engine
//!
//! Pipeline: raw readings are reduced by the extractor to
//! [`AggregatedParameters`](crate::AggregatedParameters), then the selector
//! walks an ordered chain of methods (Penman-Monteith FAO-56,
//! Hargreaves-Samani, Priestley-Taylor, temperature-only) and returns the
//! first acceptable estimate. The selector never fails: the last method
//! always yields a value, degrading the quality grade as data gets sparser.

mod atmosphere;
mod error;
mod extractor;
mod methods;
mod radiation;
mod seasonal;
mod selector;

pub use atmosphere::*;
pub use error::*;
pub use extractor::*;
pub use methods::*;
pub use radiation::*;
pub use seasonal::*;
pub use selector::*;
