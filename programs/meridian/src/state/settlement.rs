use anchor_lang::prelude::*;
use crate::math::decimal::Decimal;

/// Wind-down record for a deprecated synthetic: after settlement the token
/// converts into USD at a fixed ratio, with no further price risk.
#[account]
pub struct Settlement {
    pub bump: u8,
    pub reserve_address: Pubkey,
    pub token_in_address: Pubkey,
    pub token_out_address: Pubkey, // the USD synthetic
    pub decimals_in: u8,
    pub decimals_out: u8,
    pub ratio: Decimal, // settlement price, PRICE_SCALE
}

impl Settlement {
    pub const LEN: usize = 8 // discriminator
        + 1   // bump
        + 32 * 3
        + 1   // decimals_in
        + 1   // decimals_out
        + Decimal::SIZE;
}
