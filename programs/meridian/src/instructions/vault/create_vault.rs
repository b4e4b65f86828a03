use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultCreated;
use crate::math::decimal::Decimal;
use crate::math::oracle::OracleType;
use crate::state::{AssetRegistry, Exchange, Vault};
use anchor_spl::token::{Mint, TokenAccount};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateVaultParams {
    pub open_fee_bps: u16,
    pub debt_interest_rate_bps: u16,
    pub collateral_ratio_bps: u16,
    pub liquidation_threshold_bps: u16,
    pub liquidation_ratio_bps: u16,
    pub penalty_to_liquidator_bps: u16,
    pub penalty_to_exchange_bps: u16,
    pub max_borrow: u64,
    pub oracle_type: u8,
}

#[derive(Accounts)]
pub struct CreateVault<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        init,
        payer = admin,
        space = Vault::LEN,
        seeds = [VAULT_SEED, synthetic_token.key().as_ref(), collateral_token.key().as_ref()],
        bump,
    )]
    pub vault: Box<Account<'info, Vault>>,

    pub synthetic_token: Account<'info, Mint>,
    pub collateral_token: Account<'info, Mint>,

    #[account(constraint = collateral_reserve.mint == collateral_token.key())]
    pub collateral_reserve: Account<'info, TokenAccount>,

    #[account(constraint = liquidation_fund.mint == collateral_token.key())]
    pub liquidation_fund: Account<'info, TokenAccount>,

    /// CHECK: price feed for the collateral, read on every vault operation
    pub collateral_price_feed: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateVault>, params: CreateVaultParams) -> Result<()> {
    require!(
        params.open_fee_bps <= MAX_FEE_BPS
            && params.debt_interest_rate_bps <= MAX_DEBT_INTEREST_RATE_BPS
            && params.collateral_ratio_bps <= BPS_DENOMINATOR as u16
            && params.liquidation_ratio_bps <= MAX_LIQUIDATION_RATE_BPS
            && params.penalty_to_liquidator_bps <= MAX_LIQUIDATION_PENALTY_BPS
            && params.penalty_to_exchange_bps <= MAX_LIQUIDATION_PENALTY_BPS,
        ErrorCode::ParameterOutOfRange
    );
    OracleType::try_from_u8(params.oracle_type)?;

    // the synthetic must be registered so vault mints show up in its supply
    let registry = &ctx.accounts.registry;
    let synthetic_index = registry
        .synthetic_position_by_address(&ctx.accounts.synthetic_token.key())
        .ok_or(ErrorCode::NoAssetFound)?;
    let synthetic_scale = registry.synthetics[synthetic_index].supply.scale;
    let collateral_scale = ctx.accounts.collateral_token.decimals;

    let clock = Clock::get()?;
    let vault = &mut ctx.accounts.vault;
    vault.bump = ctx.bumps.vault;
    vault.halted = false;
    vault.synthetic = ctx.accounts.synthetic_token.key();
    vault.collateral = ctx.accounts.collateral_token.key();
    vault.collateral_reserve = ctx.accounts.collateral_reserve.key();
    vault.liquidation_fund = ctx.accounts.liquidation_fund.key();
    vault.collateral_price_feed = ctx.accounts.collateral_price_feed.key();
    vault.oracle_type = params.oracle_type;
    vault.open_fee = Decimal::from_bps(params.open_fee_bps);
    vault.debt_interest_rate =
        Decimal::from_bps(params.debt_interest_rate_bps).to_scale(INTEREST_RATE_SCALE)?;
    vault.collateral_ratio = Decimal::from_bps(params.collateral_ratio_bps);
    vault.liquidation_threshold = Decimal::from_bps(params.liquidation_threshold_bps);
    vault.liquidation_ratio = Decimal::from_bps(params.liquidation_ratio_bps);
    vault.penalty_to_liquidator = Decimal::from_bps(params.penalty_to_liquidator_bps);
    vault.penalty_to_exchange = Decimal::from_bps(params.penalty_to_exchange_bps);
    vault.max_borrow = Decimal::new(params.max_borrow as u128, synthetic_scale);
    vault.mint_amount = Decimal::new(0, synthetic_scale);
    vault.collateral_amount = Decimal::new(0, collateral_scale);
    vault.accumulated_interest = Decimal::new(0, synthetic_scale);
    vault.accumulated_interest_rate = Decimal::new(0, INTEREST_RATE_SCALE);
    vault.last_update = clock.unix_timestamp;
    vault._reserved = [0u8; 64];

    emit!(VaultCreated {
        vault: vault.key(),
        synthetic: vault.synthetic,
        collateral: vault.collateral,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
