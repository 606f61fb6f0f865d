// ============================================================================
// Numeric Errors
// Error types for 1e18 fixed-point arithmetic
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur during fixed-point arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericError {
    /// Result exceeded the u128 range of a wad
    Overflow,
    /// Result would be negative
    Underflow,
    /// Divisor was zero, e.g. a zero exchange rate or imbalance unit
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Malformed decimal string, e.g. a sign or stray character
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result would be negative")
            },
            NumericError::DivisionByZero => {
                write!(f, "division by zero: rate or scale divisor was zero")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(
            NumericError::DivisionByZero.to_string(),
            "division by zero: rate or scale divisor was zero"
        );
        assert_eq!(
            NumericError::Underflow.to_string(),
            "arithmetic underflow: result would be negative"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::Underflow);
    }
}
