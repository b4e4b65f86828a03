use anchor_lang::prelude::*;
use crate::math::decimal::Decimal;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct StakingRound {
    pub start: u64, // slot when the round starts
    pub amount: u64, // staking-token amount distributed in this round
    pub all_points: u64, // points backing pro-rata reward shares
}

impl StakingRound {
    pub const SIZE: usize = 8 + 8 + 8;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Staking {
    pub fund_account: Pubkey, // source account of staking-token rewards
    pub round_length: u32, // in slots
    pub amount_per_round: u64,
    pub finished_round: StakingRound,
    pub current_round: StakingRound,
    pub next_round: StakingRound,
}

impl Staking {
    pub const SIZE: usize = 32 + 4 + 8 + StakingRound::SIZE * 3;
}

/// Global singleton. Every operation reads it; `halted` is enforced by account
/// constraints ahead of all other validation.
#[account]
pub struct Exchange {
    pub admin: Pubkey,
    pub bump: u8,
    pub halted: bool,

    pub registry: Pubkey,

    // Shared debt pool
    pub debt_shares: u64,
    pub health_factor: Decimal, // fraction <= 1 applied to borrow capacity
    pub debt_interest_rate: Decimal, // per year, INTEREST_RATE_SCALE
    pub accumulated_debt_interest: Decimal, // claimable by admin, PRICE_SCALE
    pub last_debt_adjustment: i64,

    // Swap
    pub fee: Decimal, // fraction, e.g. 0.003
    pub swap_tax_ratio: Decimal, // fraction of the fee retained as tax
    pub swap_tax_reserve: Decimal, // claimable by admin, PRICE_SCALE

    // Liquidation
    pub liquidation_rate: Decimal, // max fraction of debt repaid per liquidation
    pub penalty_to_liquidator: Decimal,
    pub penalty_to_exchange: Decimal,
    pub liquidation_buffer: u32, // slots given to fix collateralization

    // Oracle
    pub max_delay: u32, // seconds

    pub staking: Staking,

    // Reserved for future use
    pub _reserved: [u8; 64],
}

impl Exchange {
    pub const LEN: usize = 8 // discriminator
        + 32  // admin
        + 1   // bump
        + 1   // halted
        + 32  // registry
        + 8   // debt_shares
        + Decimal::SIZE // health_factor
        + Decimal::SIZE // debt_interest_rate
        + Decimal::SIZE // accumulated_debt_interest
        + 8   // last_debt_adjustment
        + Decimal::SIZE // fee
        + Decimal::SIZE // swap_tax_ratio
        + Decimal::SIZE // swap_tax_reserve
        + Decimal::SIZE // liquidation_rate
        + Decimal::SIZE // penalty_to_liquidator
        + Decimal::SIZE // penalty_to_exchange
        + 4   // liquidation_buffer
        + 4   // max_delay
        + Staking::SIZE
        + 64; // reserved
}
