//! Error taxonomy shared by the solver, planner, drag controller and converter.
//!
//! Every error is local and recoverable: the operation that produced it
//! rejects its input and leaves prior state untouched.

/// Layout computation error.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A width, height, or ratio component is ≤ 0, infinite, or NaN.
    #[error("invalid {field}: {value} (must be finite and greater than zero)")]
    InvalidDimension {
        /// Which input was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A ratio component of exactly zero.
    #[error("ratio component {field} is zero")]
    DivisionByZero {
        /// `"ratio width"` or `"ratio height"`.
        field: &'static str,
    },

    /// A sampling plan was requested before any source image was loaded.
    #[error("no source image loaded")]
    NoSourceImage,

    /// Text input (ratio, mode, anchor, color) could not be parsed.
    #[error("could not parse {field}")]
    Unparseable {
        /// Which kind of value was expected.
        field: &'static str,
    },
}

impl LayoutError {
    pub(crate) const fn invalid(field: &'static str, value: f64) -> Self {
        Self::InvalidDimension { field, value }
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::invalid(field, value))
    }
}
