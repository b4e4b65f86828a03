use anchor_lang::prelude::*;

// Exchange events
#[event]
pub struct ExchangeInitialized {
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PricesUpdated {
    pub registry: Pubkey,
    pub feeds: u8,
    pub timestamp: i64,
}

#[event]
pub struct CollateralDeposited {
    pub user: Pubkey,
    pub collateral: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct CollateralWithdrawn {
    pub user: Pubkey,
    pub collateral: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct SyntheticMinted {
    pub user: Pubkey,
    pub amount: u64,
    pub shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct SyntheticBurned {
    pub user: Pubkey,
    pub amount: u64,
    pub shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct SwapExecuted {
    pub user: Pubkey,
    pub token_in: Pubkey,
    pub token_for: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_usd: u64,
    pub timestamp: i64,
}

#[event]
pub struct AccountLiquidated {
    pub user: Pubkey,
    pub liquidator: Pubkey,
    pub debt_repaid: u64,
    pub collateral_to_liquidator: u64,
    pub collateral_to_exchange: u64,
    pub timestamp: i64,
}

// Vault events
#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub synthetic: Pubkey,
    pub collateral: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct VaultCollateralDeposited {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultCollateralWithdrawn {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultBorrowed {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultRepaid {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultLiquidated {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub liquidator: Pubkey,
    pub debt_repaid: u64,
    pub collateral_seized: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultInterestSettled {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub synthetic_amount: u64,
    pub timestamp: i64,
}

// Swapline events
#[event]
pub struct SwaplineCreated {
    pub swapline: Pubkey,
    pub synthetic: Pubkey,
    pub collateral: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct SwaplineSwap {
    pub user: Pubkey,
    pub swapline: Pubkey,
    pub to_synthetic: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub timestamp: i64,
}

// Settlement events
#[event]
pub struct SyntheticSettled {
    pub synthetic: Pubkey,
    pub settlement: Pubkey,
    pub ratio: u64,
    pub timestamp: i64,
}

// Staking events
#[event]
pub struct RewardsClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardsWithdrawn {
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
