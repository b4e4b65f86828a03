use anchor_lang::prelude::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;

/// Fixed-fee, capped conversion channel between one native collateral and one
/// synthetic. Never consults an oracle.
#[account]
pub struct Swapline {
    pub bump: u8,
    pub halted: bool,

    pub synthetic: Pubkey,
    pub collateral: Pubkey,
    pub collateral_reserve: Pubkey,

    pub fee: Decimal, // fraction
    pub accumulated_fee: Decimal, // collateral scale
    pub balance: Decimal, // net amount converted, never above limit
    pub limit: Decimal,

    // Reserved for future use
    pub _reserved: [u8; 32],
}

impl Swapline {
    pub const LEN: usize = 8 // discriminator
        + 1   // bump
        + 1   // halted
        + 32 * 3 // synthetic, collateral, reserve
        + Decimal::SIZE * 4
        + 32; // reserved

    /// Balance after converting `amount` toward synthetic, or SwaplineLimit.
    pub fn balance_after_native_in(&self, amount: Decimal) -> Result<Decimal> {
        let new_balance = self.balance.add(amount)?;
        require!(new_balance.lte(self.limit)?, ErrorCode::SwaplineLimit);
        Ok(new_balance)
    }

    /// Balance after converting `amount` back to native, or SwaplineLimit.
    /// More cannot leave the line than ever entered it.
    pub fn balance_after_native_out(&self, amount: Decimal) -> Result<Decimal> {
        require!(amount.lte(self.balance)?, ErrorCode::SwaplineLimit);
        self.balance.sub(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapline_with_limit(limit: u128) -> Swapline {
        Swapline {
            bump: 0,
            halted: false,
            synthetic: Pubkey::default(),
            collateral: Pubkey::default(),
            collateral_reserve: Pubkey::default(),
            fee: Decimal::from_bps(30),
            accumulated_fee: Decimal::new(0, 6),
            balance: Decimal::new(0, 6),
            limit: Decimal::new(limit, 6),
            _reserved: [0u8; 32],
        }
    }

    #[test]
    fn test_limit_reached_exactly() {
        let mut swapline = swapline_with_limit(500);
        swapline.balance = swapline
            .balance_after_native_in(Decimal::new(500, 6))
            .unwrap();
        assert_eq!(swapline.balance.val, 500);
        // one unit over the cap fails
        assert!(swapline.balance_after_native_in(Decimal::new(1, 6)).is_err());
    }

    #[test]
    fn test_cannot_redeem_more_than_entered() {
        let mut swapline = swapline_with_limit(500);
        swapline.balance = Decimal::new(300, 6);
        assert!(swapline
            .balance_after_native_out(Decimal::new(301, 6))
            .is_err());
        swapline.balance = swapline
            .balance_after_native_out(Decimal::new(300, 6))
            .unwrap();
        assert_eq!(swapline.balance.val, 0);
    }
}
