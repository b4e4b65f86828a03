use anchor_lang::prelude::*;
use crate::constants::{PRICE_SCALE, UNIFIED_PERCENT_SCALE};
use crate::error::ErrorCode;

/// Fixed-point value: `val / 10^scale`. Every monetary quantity in the program
/// is a Decimal; amounts passed in instructions are u64 and widened at the edge.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decimal {
    pub val: u128,
    pub scale: u8,
}

impl Decimal {
    pub const fn new(val: u128, scale: u8) -> Self {
        Decimal { val, scale }
    }

    pub fn from_integer(value: u64, scale: u8) -> Result<Self> {
        let val = (value as u128)
            .checked_mul(pow10(scale)?)
            .ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale })
    }

    /// Fraction of one at the unified percent scale, e.g. 30 bps -> 0.003.
    pub fn from_bps(bps: u16) -> Self {
        Decimal {
            val: (bps as u128) * 100,
            scale: UNIFIED_PERCENT_SCALE,
        }
    }

    pub const fn from_price(price: u64) -> Self {
        Decimal {
            val: price as u128,
            scale: PRICE_SCALE,
        }
    }

    pub fn denominator(&self) -> Result<u128> {
        pow10(self.scale)
    }

    pub fn is_zero(&self) -> bool {
        self.val == 0
    }

    pub fn add(self, other: Decimal) -> Result<Decimal> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        let val = self.val.checked_add(other.val).ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale: self.scale })
    }

    pub fn sub(self, other: Decimal) -> Result<Decimal> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        let val = self.val.checked_sub(other.val).ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self * other`, keeping self's scale. Truncates toward zero.
    pub fn mul(self, other: Decimal) -> Result<Decimal> {
        let val = self
            .val
            .checked_mul(other.val)
            .ok_or(ErrorCode::Overflow)?
            .checked_div(other.denominator()?)
            .ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self * other`, rounding the quotient up.
    pub fn mul_up(self, other: Decimal) -> Result<Decimal> {
        let denominator = other.denominator()?;
        let val = div_up(
            self.val.checked_mul(other.val).ok_or(ErrorCode::Overflow)?,
            denominator,
        )?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self / other`, keeping self's scale. Truncates toward zero.
    pub fn div(self, other: Decimal) -> Result<Decimal> {
        let val = self
            .val
            .checked_mul(other.denominator()?)
            .ok_or(ErrorCode::Overflow)?
            .checked_div(other.val)
            .ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self / other`, rounding the quotient up.
    pub fn div_up(self, other: Decimal) -> Result<Decimal> {
        let val = div_up(
            self.val
                .checked_mul(other.denominator()?)
                .ok_or(ErrorCode::Overflow)?,
            other.val,
        )?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self * numerator / denominator`, truncating. Used for elapsed-time
    /// proration where the ratio is not itself a Decimal.
    pub fn mul_ratio(self, numerator: u128, denominator: u128) -> Result<Decimal> {
        let val = self
            .val
            .checked_mul(numerator)
            .ok_or(ErrorCode::Overflow)?
            .checked_div(denominator)
            .ok_or(ErrorCode::Overflow)?;
        Ok(Decimal { val, scale: self.scale })
    }

    /// `self * numerator / denominator`, rounding up.
    pub fn mul_ratio_up(self, numerator: u128, denominator: u128) -> Result<Decimal> {
        let val = div_up(
            self.val.checked_mul(numerator).ok_or(ErrorCode::Overflow)?,
            denominator,
        )?;
        Ok(Decimal { val, scale: self.scale })
    }

    pub fn to_scale(self, target: u8) -> Result<Decimal> {
        let val = if target > self.scale {
            self.val
                .checked_mul(pow10(target - self.scale)?)
                .ok_or(ErrorCode::Overflow)?
        } else {
            self.val
                .checked_div(pow10(self.scale - target)?)
                .ok_or(ErrorCode::Overflow)?
        };
        Ok(Decimal { val, scale: target })
    }

    pub fn to_scale_up(self, target: u8) -> Result<Decimal> {
        let val = if target > self.scale {
            self.val
                .checked_mul(pow10(target - self.scale)?)
                .ok_or(ErrorCode::Overflow)?
        } else {
            div_up(self.val, pow10(self.scale - target)?)?
        };
        Ok(Decimal { val, scale: target })
    }

    pub fn to_u64(self) -> Result<u64> {
        u64::try_from(self.val).map_err(|_| ErrorCode::Overflow.into())
    }

    pub fn gt(self, other: Decimal) -> Result<bool> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        Ok(self.val > other.val)
    }

    pub fn lt(self, other: Decimal) -> Result<bool> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        Ok(self.val < other.val)
    }

    pub fn gte(self, other: Decimal) -> Result<bool> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        Ok(self.val >= other.val)
    }

    pub fn lte(self, other: Decimal) -> Result<bool> {
        require!(self.scale == other.scale, ErrorCode::DifferentScale);
        Ok(self.val <= other.val)
    }

    pub const SIZE: usize = 16 + 1;
}

pub fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or(ErrorCode::Overflow.into())
}

fn div_up(numerator: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, ErrorCode::Overflow);
    numerator
        .checked_add(denominator - 1)
        .ok_or(ErrorCode::Overflow)?
        .checked_div(denominator)
        .ok_or(ErrorCode::Overflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub_same_scale() {
        let a = Decimal::new(2_000_000, 6);
        let b = Decimal::new(500_000, 6);
        assert_eq!(a.add(b).unwrap(), Decimal::new(2_500_000, 6));
        assert_eq!(a.sub(b).unwrap(), Decimal::new(1_500_000, 6));
    }

    #[test]
    fn test_add_different_scale_fails() {
        let a = Decimal::new(1, 6);
        let b = Decimal::new(1, 8);
        assert!(a.add(b).is_err());
        assert!(a.sub(b).is_err());
        assert!(a.gt(b).is_err());
    }

    #[test]
    fn test_sub_underflow_fails() {
        let a = Decimal::new(1, 6);
        let b = Decimal::new(2, 6);
        assert!(a.sub(b).is_err());
    }

    #[test]
    fn test_mul_keeps_left_scale() {
        // 1000.0 (scale 6) * 0.5 (scale 6) = 500.0
        let amount = Decimal::new(1_000_000_000, 6);
        let ratio = Decimal::new(500_000, 6);
        assert_eq!(amount.mul(ratio).unwrap(), Decimal::new(500_000_000, 6));
    }

    #[test]
    fn test_mul_truncates_and_mul_up_rounds() {
        // 1 * 1/3
        let one = Decimal::new(1, 0);
        let third = Decimal::new(333_333, 6);
        assert_eq!(one.mul(third).unwrap().val, 0);
        assert_eq!(one.mul_up(third).unwrap().val, 1);
    }

    #[test]
    fn test_div_and_div_up() {
        let a = Decimal::new(10, 6);
        let b = Decimal::new(3_000_000, 6);
        assert_eq!(a.div(b).unwrap().val, 3);
        assert_eq!(a.div_up(b).unwrap().val, 4);
    }

    #[test]
    fn test_div_by_zero_fails() {
        let a = Decimal::new(10, 6);
        assert!(a.div(Decimal::new(0, 6)).is_err());
    }

    #[test]
    fn test_mul_overflow_detected() {
        let a = Decimal::new(u128::MAX, 6);
        let b = Decimal::new(2_000_000, 6);
        assert!(a.mul(b).is_err());
    }

    #[test]
    fn test_to_scale() {
        let a = Decimal::new(2_000_000, 6);
        assert_eq!(a.to_scale(8).unwrap(), Decimal::new(200_000_000, 8));
        assert_eq!(a.to_scale(3).unwrap(), Decimal::new(2_000, 3));
        // 0.0000019 at scale 7 -> scale 6 truncates vs rounds up
        let b = Decimal::new(19, 7);
        assert_eq!(b.to_scale(6).unwrap().val, 1);
        assert_eq!(b.to_scale_up(6).unwrap().val, 2);
    }

    #[test]
    fn test_from_bps() {
        // 30 bps = 0.003
        assert_eq!(Decimal::from_bps(30), Decimal::new(3_000, 6));
        // 10_000 bps = 1.0
        assert_eq!(Decimal::from_bps(10_000), Decimal::new(1_000_000, 6));
    }

    #[test]
    fn test_mul_ratio() {
        // 100.0 prorated by 1 hour / 1 year
        let a = Decimal::new(100_000_000, 6);
        let hour = a.mul_ratio(3600, 365 * 24 * 3600).unwrap();
        assert_eq!(hour.val, 11_415);
        let hour_up = a.mul_ratio_up(3600, 365 * 24 * 3600).unwrap();
        assert_eq!(hour_up.val, 11_416);
    }
}
