use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::CollateralWithdrawn;
use crate::math::debt::{
    calculate_max_debt, calculate_max_withdraw_in_usd, calculate_pool_debt, shares_to_value,
    usd_to_token_amount, value_in_usd,
};
use crate::math::decimal::Decimal;
use crate::math::interest::accrue_pool_debt_interest;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(
        mut,
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        mut,
        seeds = [EXCHANGE_ACCOUNT_SEED, owner.key().as_ref()],
        bump = exchange_account.bump,
        constraint = exchange_account.owner == owner.key() @ ErrorCode::InvalidExchangeAccount,
    )]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,

    #[account(mut)]
    pub reserve_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_collateral_account.owner == owner.key() @ ErrorCode::InvalidSigner,
        constraint = user_collateral_account.mint == reserve_account.mint @ ErrorCode::MismatchedTokens,
    )]
    pub user_collateral_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw collateral, re-validating collateralization. `u64::MAX` withdraws
/// as much as the account's debt allows.
pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let registry = &mut ctx.accounts.registry;
    registry.assert_synthetic_prices_fresh(state.max_delay, clock.unix_timestamp)?;
    registry.assert_collateral_prices_fresh(exchange_account, state.max_delay, clock.unix_timestamp)?;

    let pool_debt = calculate_pool_debt(registry)?;
    let total_debt = accrue_pool_debt_interest(state, pool_debt, clock.unix_timestamp)?;
    let user_debt = shares_to_value(exchange_account.debt_shares, state.debt_shares, total_debt)?;
    let max_debt = calculate_max_debt(exchange_account, registry)?;
    let max_borrow = max_debt.mul(state.health_factor)?;

    let collateral_index = registry
        .collateral_position_by_reserve(&ctx.accounts.reserve_account.key())
        .ok_or(ErrorCode::NoAssetFound)?;
    let collateral = registry.collaterals[collateral_index];
    let collateral_asset = registry.assets[collateral.asset_index as usize];
    collateral_asset.assert_fresh(state.max_delay, clock.unix_timestamp)?;

    let entry_index = exchange_account
        .entry_position(&collateral.collateral_address)
        .ok_or(ErrorCode::NoAssetFound)?;

    let max_withdraw_in_usd = calculate_max_withdraw_in_usd(
        max_borrow,
        user_debt,
        collateral.collateral_ratio,
        state.health_factor,
    )?;

    let amount_to_withdraw = if amount == u64::MAX {
        let max_in_token = usd_to_token_amount(
            collateral_asset.price,
            max_withdraw_in_usd,
            collateral.decimals(),
        )?;
        max_in_token.min(exchange_account.collaterals[entry_index].amount)
    } else {
        let amount_in_usd = value_in_usd(collateral_asset.price, amount, collateral.decimals())?;
        require!(
            amount_in_usd.lte(max_withdraw_in_usd)?,
            ErrorCode::WithdrawLimit
        );
        amount
    };

    let entry = &mut exchange_account.collaterals[entry_index];
    entry.amount = entry
        .amount
        .checked_sub(amount_to_withdraw)
        .ok_or(ErrorCode::InsufficientCollateral)?;
    if entry.amount == 0 {
        exchange_account.remove(entry_index);
    }

    let collateral = &mut registry.collaterals[collateral_index];
    collateral.reserve_balance = collateral
        .reserve_balance
        .sub(Decimal::new(amount_to_withdraw as u128, collateral.decimals()))?;

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.reserve_account.to_account_info(),
                to: ctx.accounts.user_collateral_account.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        amount_to_withdraw,
    )?;

    emit!(CollateralWithdrawn {
        user: ctx.accounts.owner.key(),
        collateral: ctx.accounts.reserve_account.mint,
        amount: amount_to_withdraw,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
