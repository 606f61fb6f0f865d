// ============================================================================
// Wad Fixed-Point
// Unsigned 1e18-scaled fixed-point arithmetic with explicit rounding
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[allow(clippy::all)]
mod wide {
    uint::construct_uint! {
        /// 256-bit unsigned integer used for intermediate products.
        pub struct U256(4);
    }
}

use wide::U256;

/// Rounding direction for fixed-point division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Round toward zero (floor for unsigned values)
    Down,
    /// Round away from zero (ceiling for unsigned values)
    Up,
}

/// Unsigned fixed-point number with 18 decimal places.
///
/// Internally stores `value × 10^18` as a u128. Every token amount, price,
/// exchange rate and fee fraction in the crate is a `Wad`.
///
/// Products and quotients go through a 256-bit intermediate, so
/// `scaled_mul`/`scaled_div` only fail when the final result does not fit
/// in a u128.
///
/// # Value Range
/// - Minimum: 0
/// - Maximum: ~340,282,366,920,938,463,463.374607431768211455
/// - Precision: 0.000000000000000001 (one wei)
///
/// # Example
/// ```
/// use oracle_swap::numeric::Wad;
///
/// let amount = Wad::from_integer(10).unwrap();
/// let rate: Wad = "2.5".parse().unwrap();
/// assert_eq!(amount.scaled_mul(rate).unwrap(), Wad::from_integer(25).unwrap());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Wad(u128);

/// Number of decimal places carried by a [`Wad`].
pub const WAD_DECIMALS: u32 = 18;

impl Wad {
    /// The scale factor (10^18)
    pub const SCALE: u128 = 1_000_000_000_000_000_000;

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(Self::SCALE);

    /// Maximum representable value
    pub const MAX: Self = Self(u128::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation (already scaled by 1e18).
    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Create from a whole number of units.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: u128) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from integer and fractional parts.
    ///
    /// `fraction` is expressed in units of 1e-18 and must be below `SCALE`.
    ///
    /// ```
    /// # use oracle_swap::numeric::Wad;
    /// // 0.003
    /// let fee = Wad::from_parts(0, 3_000_000_000_000_000).unwrap();
    /// assert_eq!(fee.to_string(), "0.003000000000000000");
    /// ```
    #[inline]
    pub fn from_parts(integer: u128, fraction: u128) -> NumericResult<Self> {
        if fraction >= Self::SCALE {
            return Err(NumericError::InvalidInput);
        }

        integer
            .checked_mul(Self::SCALE)
            .and_then(|scaled| scaled.checked_add(fraction))
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create a fraction `numerator / denominator`, rounded toward zero.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a zero denominator and `Overflow` if the
    /// ratio does not fit.
    pub fn from_ratio(numerator: u128, denominator: u128) -> NumericResult<Self> {
        mul_div(numerator, Self::SCALE, denominator, Rounding::Down).map(Self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled by 1e18).
    #[inline]
    pub const fn raw_value(self) -> u128 {
        self.0
    }

    /// Get the integer part (truncated).
    #[inline]
    pub const fn integer_part(self) -> u128 {
        self.0 / Self::SCALE
    }

    /// Get the fractional part in units of 1e-18.
    #[inline]
    pub const fn fractional_part(self) -> u128 {
        self.0 % Self::SCALE
    }

    /// Check if value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Check if value is strictly positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Underflow` if `rhs > self`.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Underflow)
    }

    /// Fixed-point multiplication, rounded toward zero: `self * rhs / 1e18`.
    ///
    /// # Errors
    /// Returns `Overflow` if the result does not fit in a u128.
    #[inline]
    pub fn scaled_mul(self, rhs: Self) -> NumericResult<Self> {
        mul_div(self.0, rhs.0, Self::SCALE, Rounding::Down).map(Self)
    }

    /// Fixed-point multiplication, rounded up.
    #[inline]
    pub fn scaled_mul_up(self, rhs: Self) -> NumericResult<Self> {
        mul_div(self.0, rhs.0, Self::SCALE, Rounding::Up).map(Self)
    }

    /// Fixed-point division, rounded toward zero: `self * 1e18 / rhs`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero and `Overflow` if the
    /// quotient does not fit in a u128.
    #[inline]
    pub fn scaled_div(self, rhs: Self) -> NumericResult<Self> {
        mul_div(self.0, Self::SCALE, rhs.0, Rounding::Down).map(Self)
    }

    /// Fixed-point division, rounded up.
    #[inline]
    pub fn scaled_div_up(self, rhs: Self) -> NumericResult<Self> {
        mul_div(self.0, Self::SCALE, rhs.0, Rounding::Up).map(Self)
    }

    /// Multiply by a plain integer (no rescaling).
    #[inline]
    pub fn checked_mul_int(self, rhs: u128) -> NumericResult<Self> {
        self.0
            .checked_mul(rhs)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Divide by a plain integer (no rescaling), rounded toward zero.
    #[inline]
    pub fn checked_div_int(self, rhs: u128) -> NumericResult<Self> {
        self.0
            .checked_div(rhs)
            .map(Self)
            .ok_or(NumericError::DivisionByZero)
    }

    /// Returns `|self - other|`.
    #[inline]
    pub fn abs_diff(self, other: Self) -> Self {
        Self(self.0.abs_diff(other.0))
    }

    /// Returns the minimum of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Returns the maximum of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

/// Computes `a * b / c` with a 256-bit intermediate and explicit rounding.
///
/// # Errors
/// - `DivisionByZero` if `c` is zero
/// - `Overflow` if the quotient does not fit in a u128
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> NumericResult<u128> {
    if c == 0 {
        return Err(NumericError::DivisionByZero);
    }

    let product = U256::from(a) * U256::from(b);
    let divisor = U256::from(c);
    let mut quotient = product / divisor;

    if rounding == Rounding::Up && !(product % divisor).is_zero() {
        quotient += U256::one();
    }

    if quotient.bits() > 128 {
        return Err(NumericError::Overflow);
    }
    Ok(quotient.low_u128())
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wad({}, raw={})", self, self.0)
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0>width$}",
            self.integer_part(),
            self.fractional_part(),
            width = WAD_DECIMALS as usize
        )
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl Wad {
    /// Convert from rust_decimal::Decimal.
    ///
    /// Intended for API boundaries (fee rates typed by an operator, display
    /// prices). The value must be non-negative and carry at most 18 decimals.
    ///
    /// # Errors
    /// - `Underflow` for negative input
    /// - `PrecisionLoss` if significant digits would be lost
    /// - `Overflow` if the value is too large
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        if d.is_sign_negative() && !d.is_zero() {
            return Err(NumericError::Underflow);
        }

        let multiplier = rust_decimal::Decimal::from(Self::SCALE as u64);
        let scaled = d.checked_mul(multiplier).ok_or(NumericError::Overflow)?;

        if !scaled.fract().is_zero() {
            return Err(NumericError::PrecisionLoss);
        }

        scaled.to_u128().map(Self).ok_or(NumericError::Overflow)
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// Returns `Overflow` when the value exceeds Decimal's 96-bit mantissa.
    pub fn to_decimal(self) -> NumericResult<rust_decimal::Decimal> {
        let raw = i128::try_from(self.0).map_err(|_| NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(raw, WAD_DECIMALS)
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Wad {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "123" -> 123.000000000000000000
    /// - "0.003" -> 0.003000000000000000
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.starts_with('-') {
            return Err(NumericError::InvalidInput);
        }

        let (int_str, frac_str) = match s.find('.') {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };

        // u128::from_str would accept a sign in either part
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_str) || !frac_str.map_or(true, all_digits) {
            return Err(NumericError::InvalidInput);
        }
        if int_str.is_empty() && frac_str.map_or(true, str::is_empty) {
            return Err(NumericError::InvalidInput);
        }

        let int_val: u128 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let frac_val: u128 = match frac_str {
            None | Some("") => 0,
            Some(frac) if frac.len() > WAD_DECIMALS as usize => {
                return Err(NumericError::PrecisionLoss);
            },
            Some(frac) => {
                let padded = format!("{:0<width$}", frac, width = WAD_DECIMALS as usize);
                padded.parse().map_err(|_| NumericError::InvalidInput)?
            },
        };

        Self::from_parts(int_val, frac_val)
    }
}

// ============================================================================
// Tests
// ============================================================================
