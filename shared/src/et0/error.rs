use thiserror::Error;

/// Reasons an individual ET0 method cannot produce a value.
///
/// Both variants are recoverable: the selector moves on to the next method.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Et0Error {
    /// A required input is absent
    #[error("missing data: {0}")]
    MissingData(&'static str),

    /// Inputs lead to an undefined result (invalid latitude, negative
    /// square-root argument, non-finite output...)
    #[error("numeric domain error: {0}")]
    NumericDomain(String),
}

pub type Et0Outcome<T> = Result<T, Et0Error>;

/// Reject NaN and infinities produced by a formula
pub(crate) fn ensure_finite(value: f64, what: &str) -> Et0Outcome<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Et0Error::NumericDomain(format!("{what} is not a finite number")))
    }
}
