use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::math::oracle::OracleType;
use crate::state::{Asset, AssetRegistry, Collateral, Exchange, PriceStatus, Synthetic};
use anchor_spl::token::{Mint, TokenAccount};

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeRegistryParams {
    pub main_collateral_ratio_bps: u16,
    pub main_collateral_max: u64,
    pub main_collateral_oracle_type: u8,
}

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
        constraint = state.registry == Pubkey::default() @ ErrorCode::Initialized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(zero)]
    pub registry: Box<Account<'info, AssetRegistry>>,

    pub usd_token: Account<'info, Mint>,
    pub main_collateral_token: Account<'info, Mint>,

    /// CHECK: price feed of the main collateral, matched on updates
    pub main_collateral_feed: UncheckedAccount<'info>,

    #[account(constraint = main_collateral_reserve.mint == main_collateral_token.key())]
    pub main_collateral_reserve: Account<'info, TokenAccount>,

    #[account(constraint = main_collateral_liquidation_fund.mint == main_collateral_token.key())]
    pub main_collateral_liquidation_fund: Account<'info, TokenAccount>,
}

pub fn handler(ctx: Context<InitializeRegistry>, params: InitializeRegistryParams) -> Result<()> {
    require!(
        params.main_collateral_ratio_bps <= BPS_DENOMINATOR as u16,
        ErrorCode::ParameterOutOfRange
    );
    OracleType::try_from_u8(params.main_collateral_oracle_type)?;

    let registry = &mut ctx.accounts.registry;
    let usd_scale = ctx.accounts.usd_token.decimals;
    let collateral_scale = ctx.accounts.main_collateral_token.decimals;

    // The USD asset: price pinned to 1.0 and never updated
    registry.append_asset(Asset {
        feed_address: Pubkey::default(),
        price: Decimal::from_integer(1, PRICE_SCALE)?,
        confidence: Decimal::new(0, PRICE_SCALE),
        last_update: i64::MAX,
        twap: Decimal::from_integer(1, PRICE_SCALE)?,
        twac: Decimal::new(0, PRICE_SCALE),
        status: PriceStatus::Trading.into(),
        oracle_type: OracleType::Pyth.into(),
    })?;
    registry.append_synthetic(Synthetic {
        asset_index: USD_ASSET_INDEX,
        asset_address: ctx.accounts.usd_token.key(),
        supply: Decimal::new(0, usd_scale),
        max_supply: Decimal::new(u64::MAX as u128, usd_scale),
        borrowed_supply: Decimal::new(0, usd_scale),
        swapline_supply: Decimal::new(0, usd_scale),
        settlement_slot: u64::MAX,
    })?;

    // The main collateral, priced by its feed
    let collateral_asset_index = registry.append_asset(Asset {
        feed_address: ctx.accounts.main_collateral_feed.key(),
        price: Decimal::new(0, PRICE_SCALE),
        confidence: Decimal::new(0, PRICE_SCALE),
        last_update: 0,
        twap: Decimal::new(0, PRICE_SCALE),
        twac: Decimal::new(0, PRICE_SCALE),
        status: PriceStatus::Unknown.into(),
        oracle_type: params.main_collateral_oracle_type,
    })?;
    registry.append_collateral(Collateral {
        asset_index: collateral_asset_index,
        collateral_address: ctx.accounts.main_collateral_token.key(),
        reserve_address: ctx.accounts.main_collateral_reserve.key(),
        liquidation_fund: ctx.accounts.main_collateral_liquidation_fund.key(),
        reserve_balance: Decimal::new(0, collateral_scale),
        collateral_ratio: Decimal::from_bps(params.main_collateral_ratio_bps),
        max_collateral: Decimal::new(params.main_collateral_max as u128, collateral_scale),
    })?;

    ctx.accounts.state.registry = registry.key();
    Ok(())
}
