use anchor_lang::prelude::*;

// PDA Seeds
#[constant]
pub const STATE_SEED: &[u8] = b"state";
#[constant]
pub const EXCHANGE_ACCOUNT_SEED: &[u8] = b"exchange_account";
#[constant]
pub const VAULT_SEED: &[u8] = b"vault";
#[constant]
pub const VAULT_ENTRY_SEED: &[u8] = b"vault_entry";
#[constant]
pub const SWAPLINE_SEED: &[u8] = b"swapline";
#[constant]
pub const SETTLEMENT_SEED: &[u8] = b"settlement";

// Decimal scales
pub const PRICE_SCALE: u8 = 6; // USD values and oracle prices (1e6)
pub const UNIFIED_PERCENT_SCALE: u8 = 6; // fractions of one (1e6 = 100%)
pub const INTEREST_RATE_SCALE: u8 = 18; // per-year rates and rate accumulators

// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

// Fixed registry slots: the USD asset/synthetic always sits at index 0,
// the main (staking) collateral at collateral index 0.
pub const USD_ASSET_INDEX: u8 = 0;
pub const USD_SYNTHETIC_INDEX: u8 = 0;
pub const MAIN_COLLATERAL_INDEX: u8 = 0;

// Capacity limits
pub const MAX_ASSETS: usize = 255;
pub const MAX_COLLATERAL_ENTRIES: usize = 32;

// Parameter bounds (in basis points)
pub const MAX_FEE_BPS: u16 = 100; // 1%
pub const MAX_SWAP_TAX_BPS: u16 = 3_000; // 30%
pub const MAX_DEBT_INTEREST_RATE_BPS: u16 = 2_000; // 20%
pub const MAX_LIQUIDATION_PENALTY_BPS: u16 = 2_500; // 25%
pub const MAX_LIQUIDATION_RATE_BPS: u16 = 10_000; // 100%
pub const MAX_HEALTH_FACTOR_BPS: u16 = 10_000; // 100%

// Oracle
pub const MAX_CONFIDENCE_RATIO_BPS: u16 = 250; // confidence/price above 2.5% rejects the batch
pub const TWAP_WINDOW_SECONDS: i64 = 3600;
pub const PYTH_PROGRAM_ID: Pubkey = pubkey!("FsJ3A3u2vn5cTVofAjvy6y5kwABJAqYWpe4975bi2epH");
pub const CHAINLINK_PROGRAM_ID: Pubkey = pubkey!("HEvSKofvBgfaexv23kMabbYqxasxU3mQ4ibBMEmJWHny");

// Interest accrual
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

// Swap fee discount tiers: holding DISCOUNT_TIER_BASE * 2^n units of the main
// collateral grants (n + 1) percent off the swap fee, capped at MAX_DISCOUNT_PERCENT.
pub const DISCOUNT_TIER_BASE: u64 = 100_000_000; // 100 tokens at 6 decimals
pub const MAX_DISCOUNT_PERCENT: u8 = 15;
