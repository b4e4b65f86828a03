use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::math::oracle::OracleType;
use crate::state::{Asset, AssetRegistry, Collateral, Exchange, PriceStatus, Synthetic};
use anchor_spl::token::{Mint, TokenAccount};

#[derive(Accounts)]
pub struct ManageRegistry<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,
}

pub fn add_asset(
    ctx: Context<ManageRegistry>,
    feed_address: Pubkey,
    oracle_type: u8,
) -> Result<()> {
    OracleType::try_from_u8(oracle_type)?;
    let registry = &mut ctx.accounts.registry;
    require!(
        registry.asset_index_by_feed(&feed_address).is_none(),
        ErrorCode::Initialized
    );
    registry.append_asset(Asset {
        feed_address,
        price: Decimal::new(0, PRICE_SCALE),
        confidence: Decimal::new(0, PRICE_SCALE),
        last_update: 0,
        twap: Decimal::new(0, PRICE_SCALE),
        twac: Decimal::new(0, PRICE_SCALE),
        status: PriceStatus::Unknown.into(),
        oracle_type,
    })?;
    Ok(())
}

pub fn set_max_supply(
    ctx: Context<ManageRegistry>,
    asset_address: Pubkey,
    new_max_supply: u64,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let position = registry
        .synthetic_position_by_address(&asset_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    let synthetic = &mut registry.synthetics[position];
    synthetic.max_supply = Decimal::new(new_max_supply as u128, synthetic.max_supply.scale);
    Ok(())
}

pub fn set_collateral_ratio(
    ctx: Context<ManageRegistry>,
    collateral_address: Pubkey,
    collateral_ratio_bps: u16,
) -> Result<()> {
    require!(
        collateral_ratio_bps <= BPS_DENOMINATOR as u16,
        ErrorCode::ParameterOutOfRange
    );
    let registry = &mut ctx.accounts.registry;
    let position = registry
        .collateral_position_by_address(&collateral_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    registry.collaterals[position].collateral_ratio = Decimal::from_bps(collateral_ratio_bps);
    Ok(())
}

pub fn set_max_collateral(
    ctx: Context<ManageRegistry>,
    collateral_address: Pubkey,
    max_collateral: u64,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let position = registry
        .collateral_position_by_address(&collateral_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    let collateral = &mut registry.collaterals[position];
    collateral.max_collateral = Decimal::new(max_collateral as u128, collateral.decimals());
    Ok(())
}

pub fn set_price_feed(
    ctx: Context<ManageRegistry>,
    old_feed_address: Pubkey,
    new_feed_address: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let asset = registry
        .asset_by_feed_mut(&old_feed_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    asset.feed_address = new_feed_address;
    Ok(())
}

pub fn set_settlement_slot(
    ctx: Context<ManageRegistry>,
    synthetic_address: Pubkey,
    settlement_slot: u64,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let position = registry
        .synthetic_position_by_address(&synthetic_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    require!(position != USD_SYNTHETIC_INDEX as usize, ErrorCode::UsdSettlement);
    registry.synthetics[position].settlement_slot = settlement_slot;
    Ok(())
}

#[derive(Accounts)]
pub struct AddCollateral<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    pub collateral_token: Account<'info, Mint>,

    #[account(constraint = reserve_account.mint == collateral_token.key())]
    pub reserve_account: Account<'info, TokenAccount>,

    #[account(constraint = liquidation_fund.mint == collateral_token.key())]
    pub liquidation_fund: Account<'info, TokenAccount>,
}

pub fn add_collateral(
    ctx: Context<AddCollateral>,
    feed_address: Pubkey,
    collateral_ratio_bps: u16,
    max_collateral: u64,
) -> Result<()> {
    require!(
        collateral_ratio_bps <= BPS_DENOMINATOR as u16,
        ErrorCode::ParameterOutOfRange
    );
    let registry = &mut ctx.accounts.registry;
    let asset_index = registry
        .asset_index_by_feed(&feed_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    // a synthetic's mint cannot double as collateral
    require!(
        registry
            .synthetic_position_by_address(&ctx.accounts.collateral_token.key())
            .is_none(),
        ErrorCode::SyntheticCollateral
    );
    let decimals = ctx.accounts.collateral_token.decimals;
    registry.append_collateral(Collateral {
        asset_index: asset_index as u8,
        collateral_address: ctx.accounts.collateral_token.key(),
        reserve_address: ctx.accounts.reserve_account.key(),
        liquidation_fund: ctx.accounts.liquidation_fund.key(),
        reserve_balance: Decimal::new(0, decimals),
        collateral_ratio: Decimal::from_bps(collateral_ratio_bps),
        max_collateral: Decimal::new(max_collateral as u128, decimals),
    })?;
    Ok(())
}

#[derive(Accounts)]
pub struct AddSynthetic<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    pub synthetic_token: Account<'info, Mint>,
}

pub fn add_synthetic(
    ctx: Context<AddSynthetic>,
    feed_address: Pubkey,
    max_supply: u64,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let asset_index = registry
        .asset_index_by_feed(&feed_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    let decimals = ctx.accounts.synthetic_token.decimals;
    registry.append_synthetic(Synthetic {
        asset_index: asset_index as u8,
        asset_address: ctx.accounts.synthetic_token.key(),
        supply: Decimal::new(0, decimals),
        max_supply: Decimal::new(max_supply as u128, decimals),
        borrowed_supply: Decimal::new(0, decimals),
        swapline_supply: Decimal::new(0, decimals),
        settlement_slot: u64::MAX,
    })?;
    Ok(())
}
