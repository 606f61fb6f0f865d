// ============================================================================
// Numeric Module
// Fixed-point arithmetic shared by every pricing and ledger operation
// ============================================================================
//
// This module provides:
// - Wad: unsigned fixed-point decimal with 18 decimal places
// - mul_div: a * b / c through a 256-bit intermediate
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Rounding direction is always explicit

mod errors;
mod wad;

pub use errors::{NumericError, NumericResult};
pub use wad::{mul_div, Rounding, Wad, WAD_DECIMALS};
