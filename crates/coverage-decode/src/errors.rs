//! Decode error types.

use thiserror::Error;

/// Errors from decoding a coverage response into display records.
///
/// Only structural problems are errors. Absent parameters, null samples and
/// truncated grids degrade to missing values with a logged warning instead.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The response carries no usable `t` axis, which is a hard
    /// precondition for point/time decoding.
    #[error("Response has no time axis (domain.axes.t.values missing or not an array)")]
    MissingTimeAxis,

    /// The response carries no usable `x`/`y` axes for a grid decode.
    #[error("Response has no spatial axes (domain.axes.x/y.values missing or not arrays)")]
    MissingSpatialAxes,

    /// A point-mode value array is not aligned with the time axis.
    #[error("Range '{parameter}' has {actual} values, expected {expected} to match the time axis")]
    LengthMismatch {
        /// The parameter whose range is misaligned.
        parameter: String,
        /// Time axis length.
        expected: usize,
        /// Range array length.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::LengthMismatch {
            parameter: "Temperature".to_string(),
            expected: 24,
            actual: 7,
        };
        let display = format!("{}", err);
        assert!(display.contains("Temperature"));
        assert!(display.contains("24"));
        assert!(display.contains("7"));
    }
}
