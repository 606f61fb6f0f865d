// ============================================================================
// Fee Model
// Two-part fee curve: flat base rate plus a size-proportional imbalance rate
// ============================================================================

use crate::domain::{ExchangeError, ExchangeResult, FeeConfig, FeeKind};
use crate::numeric::Wad;

/// Fee curve applied to a swap's gross output.
///
/// ```text
/// fee_fraction(gross) = base_rate + imbalance_rate * (gross / imbalance_unit)
/// net(gross)          = gross * (1 - fee_fraction(gross))
/// ```
///
/// All products and quotients round toward zero. The fraction must stay
/// below one for every swap it prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeModel {
    config: FeeConfig,
    imbalance_unit: Wad,
}

impl FeeModel {
    /// Create a fee model.
    ///
    /// # Errors
    /// `InvalidFeeConfig` if the base rate is not below one, `InvalidConfig`
    /// for a zero imbalance unit.
    pub fn new(config: FeeConfig, imbalance_unit: Wad) -> ExchangeResult<Self> {
        config.validate()?;
        if imbalance_unit.is_zero() {
            return Err(ExchangeError::InvalidConfig(
                "Imbalance unit must be positive".to_string(),
            ));
        }
        Ok(Self {
            config,
            imbalance_unit,
        })
    }

    pub fn config(&self) -> FeeConfig {
        self.config
    }

    pub fn base_fee(&self) -> Wad {
        self.config.base_fee_rate
    }

    pub fn imbalance_fee(&self) -> Wad {
        self.config.imbalance_fee_rate
    }

    pub fn imbalance_unit(&self) -> Wad {
        self.imbalance_unit
    }

    // ========================================================================
    // Fee Curve
    // ========================================================================

    /// Combined fee fraction charged on `gross_amount_out`.
    ///
    /// # Errors
    /// `InvalidFeeConfig` when the fraction reaches one.
    pub fn total_fee_fraction(&self, gross_amount_out: Wad) -> ExchangeResult<Wad> {
        let size = gross_amount_out.scaled_div(self.imbalance_unit)?;
        let imbalance = self.config.imbalance_fee_rate.scaled_mul(size)?;
        let fee_fraction = self.config.base_fee_rate.checked_add(imbalance)?;

        if fee_fraction >= Wad::ONE {
            return Err(ExchangeError::InvalidFeeConfig { fee_fraction });
        }
        Ok(fee_fraction)
    }

    /// Net output after deducting the fee from `gross_amount_out`.
    pub fn apply_fee(&self, gross_amount_out: Wad) -> ExchangeResult<Wad> {
        self.apply_fee_with_fraction(gross_amount_out)
            .map(|(_, net)| net)
    }

    /// Fee fraction and resulting net output for `gross_amount_out`.
    pub fn apply_fee_with_fraction(&self, gross_amount_out: Wad) -> ExchangeResult<(Wad, Wad)> {
        let fee_fraction = self.total_fee_fraction(gross_amount_out)?;
        let kept = Wad::ONE.checked_sub(fee_fraction)?;
        let net = gross_amount_out.scaled_mul(kept)?;
        Ok((fee_fraction, net))
    }

    /// Smallest gross output whose net output reaches `desired_net`.
    ///
    /// Inverse of [`apply_fee`](Self::apply_fee) using the same rounding,
    /// so `apply_fee(gross_for_net(x)) >= x`.
    ///
    /// # Errors
    /// `InvalidFeeConfig` if the imbalance fee grows too fast for any gross
    /// amount to yield `desired_net`.
    pub fn gross_for_net(&self, desired_net: Wad) -> ExchangeResult<Wad> {
        let mut lo = desired_net;
        let (fee_at_target, net_at_target) = self.apply_fee_with_fraction(desired_net)?;
        if net_at_target >= desired_net {
            return Ok(desired_net);
        }

        let mut hi = match self.peak_gross() {
            Some(peak) => {
                if peak <= lo || self.apply_fee(peak)? < desired_net {
                    return Err(ExchangeError::InvalidFeeConfig {
                        fee_fraction: fee_at_target,
                    });
                }
                peak
            },
            None => {
                // Net output is increasing over the whole range: grow from
                // the estimate that divides by (1 - fee) at the target.
                let kept = Wad::ONE.checked_sub(fee_at_target)?;
                let mut hi = desired_net.scaled_div_up(kept)?;
                while self.apply_fee(hi)? < desired_net {
                    lo = hi;
                    hi = hi.checked_mul_int(2)?;
                }
                hi
            },
        };

        // Invariant: net(lo) < desired_net <= net(hi)
        while hi.raw_value() - lo.raw_value() > 1 {
            let mid = Wad::from_raw(lo.raw_value() + (hi.raw_value() - lo.raw_value()) / 2);
            if self.apply_fee(mid)? >= desired_net {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        Ok(hi)
    }

    /// Gross output at which net output peaks:
    /// `(1 - base_rate) * imbalance_unit / (2 * imbalance_rate)`.
    ///
    /// `None` without an imbalance fee, or when the peak lies beyond the
    /// representable range.
    fn peak_gross(&self) -> Option<Wad> {
        if self.config.imbalance_fee_rate.is_zero() {
            return None;
        }
        let kept = Wad::ONE.checked_sub(self.config.base_fee_rate).ok()?;
        kept.scaled_div(self.config.imbalance_fee_rate)
            .and_then(|ratio| ratio.scaled_mul(self.imbalance_unit))
            .and_then(|scaled| scaled.checked_div_int(2))
            .ok()
    }

    // ========================================================================
    // Configuration Updates
    // ========================================================================

    /// Replace one fee rate, returning the previous value.
    ///
    /// # Errors
    /// - `NoOpUpdate` if `rate` equals the stored value
    /// - `InvalidFeeConfig` for a base rate of one or more
    pub fn set_rate(&mut self, kind: FeeKind, rate: Wad) -> ExchangeResult<Wad> {
        let previous = self.config.rate(kind);
        if previous == rate {
            return Err(ExchangeError::NoOpUpdate);
        }

        let mut updated = self.config;
        match kind {
            FeeKind::Base => updated.base_fee_rate = rate,
            FeeKind::Imbalance => updated.imbalance_fee_rate = rate,
        }
        updated.validate()?;

        self.config = updated;
        Ok(previous)
    }
}
