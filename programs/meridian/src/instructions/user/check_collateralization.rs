use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::debt::{calculate_max_debt, calculate_pool_debt, shares_to_value};
use crate::math::interest::accrue_pool_debt_interest;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount};

#[derive(Accounts)]
pub struct CheckCollateralization<'info> {
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

    #[account(mut)]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,
}

/// Flag an undercollateralized account for liquidation after the buffer, or
/// clear the flag once it is healthy again.
pub fn handler(ctx: Context<CheckCollateralization>) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let registry = &ctx.accounts.registry;
    registry.assert_synthetic_prices_fresh(state.max_delay, clock.unix_timestamp)?;
    registry.assert_collateral_prices_fresh(exchange_account, state.max_delay, clock.unix_timestamp)?;

    let pool_debt = calculate_pool_debt(registry)?;
    let total_debt = accrue_pool_debt_interest(state, pool_debt, clock.unix_timestamp)?;
    let user_debt = shares_to_value(exchange_account.debt_shares, state.debt_shares, total_debt)?;
    let max_debt = calculate_max_debt(exchange_account, registry)?;

    if max_debt.gt(user_debt)? {
        exchange_account.liquidation_deadline = u64::MAX;
    } else if exchange_account.liquidation_deadline == u64::MAX {
        exchange_account.liquidation_deadline = clock
            .slot
            .checked_add(state.liquidation_buffer as u64)
            .ok_or(ErrorCode::Overflow)?;
    }

    Ok(())
}
