use anchor_lang::prelude::*;
use crate::math::decimal::Decimal;

/// Isolated borrowing market for one synthetic backed by one collateral.
/// Vault debt never touches the shared debt-share pool.
#[account]
pub struct Vault {
    pub bump: u8,
    pub halted: bool,

    pub synthetic: Pubkey,
    pub collateral: Pubkey,
    pub collateral_reserve: Pubkey,
    pub liquidation_fund: Pubkey,

    // Oracle
    pub collateral_price_feed: Pubkey,
    pub oracle_type: u8,

    // Parameters
    pub open_fee: Decimal, // fraction charged on every borrow
    pub debt_interest_rate: Decimal, // per year, INTEREST_RATE_SCALE
    pub collateral_ratio: Decimal, // fraction <= 1
    pub liquidation_threshold: Decimal, // fraction of debt value
    pub liquidation_ratio: Decimal, // max fraction of debt repaid per liquidation
    pub penalty_to_liquidator: Decimal,
    pub penalty_to_exchange: Decimal,
    pub max_borrow: Decimal, // cap on mint_amount, synthetic scale

    // Accounting
    pub mint_amount: Decimal, // synthetic owed by all entries
    pub collateral_amount: Decimal, // collateral held for all entries
    pub accumulated_interest: Decimal, // interest charged so far, synthetic scale
    pub accumulated_interest_rate: Decimal, // monotone accumulator, INTEREST_RATE_SCALE
    pub last_update: i64,

    // Reserved for future use
    pub _reserved: [u8; 64],
}

impl Vault {
    pub const LEN: usize = 8 // discriminator
        + 1   // bump
        + 1   // halted
        + 32 * 5 // synthetic, collateral, reserve, liquidation fund, price feed
        + 1   // oracle_type
        + Decimal::SIZE * 8 // parameters
        + Decimal::SIZE * 4 // accounting
        + 8   // last_update
        + 64; // reserved
}

/// One user's position in a vault.
#[account]
pub struct VaultEntry {
    pub owner: Pubkey,
    pub vault: Pubkey,
    pub bump: u8,

    pub last_accumulated_interest_rate: Decimal,
    pub synthetic_amount: Decimal,
    pub collateral_amount: Decimal,
}

impl VaultEntry {
    pub const LEN: usize = 8 // discriminator
        + 32  // owner
        + 32  // vault
        + 1   // bump
        + Decimal::SIZE * 3;
}
