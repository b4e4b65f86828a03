use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::AccountLiquidated;
use crate::math::debt::{
    calculate_max_debt, calculate_pool_debt, shares_for_burn, shares_to_value,
    usd_to_token_amount,
};
use crate::math::decimal::Decimal;
use crate::math::interest::accrue_pool_debt_interest;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct Liquidate<'info> {
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

    /// The undercollateralized account being liquidated
    #[account(mut)]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,

    /// CHECK: must be the USD synthetic mint, validated in the handler
    #[account(mut)]
    pub usd_token: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = liquidator_usd_account.owner == liquidator.key() @ ErrorCode::InvalidSigner,
    )]
    pub liquidator_usd_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub liquidator_collateral_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub liquidation_fund: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reserve_account: Account<'info, TokenAccount>,

    pub liquidator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Repay part of an undercollateralized account's debt in USD synthetic and
/// seize its collateral at a penalty, split between the liquidator and the
/// collateral's liquidation fund.
pub fn handler(ctx: Context<Liquidate>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let registry = &mut ctx.accounts.registry;
    require!(
        ctx.accounts.usd_token.key()
            == registry.synthetics[USD_SYNTHETIC_INDEX as usize].asset_address,
        ErrorCode::MismatchedTokens
    );
    registry.assert_synthetic_prices_fresh(state.max_delay, clock.unix_timestamp)?;
    registry.assert_collateral_prices_fresh(exchange_account, state.max_delay, clock.unix_timestamp)?;

    // The account must have been flagged and the grace period elapsed
    require!(
        exchange_account.liquidation_deadline <= clock.slot,
        ErrorCode::LiquidationDeadline
    );

    let pool_debt = calculate_pool_debt(registry)?;
    let total_debt = accrue_pool_debt_interest(state, pool_debt, clock.unix_timestamp)?;
    let user_debt = shares_to_value(exchange_account.debt_shares, state.debt_shares, total_debt)?;
    let max_debt = calculate_max_debt(exchange_account, registry)?;

    require!(!max_debt.gt(user_debt)?, ErrorCode::InvalidLiquidation);

    // At most liquidation_rate of the debt per call
    let max_repay = user_debt.mul(state.liquidation_rate)?;
    let repaid = Decimal::new(amount as u128, PRICE_SCALE);
    require!(repaid.lte(max_repay)?, ErrorCode::InvalidLiquidation);

    // Collateral seized: repaid value plus both penalties, rounded against the
    // liquidated account
    let one = Decimal::from_bps(BPS_DENOMINATOR as u16);
    let penalty_factor = one
        .add(state.penalty_to_liquidator)?
        .add(state.penalty_to_exchange)?;
    let seized_in_usd = repaid.mul_up(penalty_factor)?;

    let collateral_index = registry
        .collateral_position_by_reserve(&ctx.accounts.reserve_account.key())
        .ok_or(ErrorCode::NoAssetFound)?;
    let collateral = registry.collaterals[collateral_index];
    require!(
        ctx.accounts.liquidation_fund.key().eq(&collateral.liquidation_fund),
        ErrorCode::InvalidLiquidationFund
    );
    let collateral_asset = registry.assets[collateral.asset_index as usize];

    let seized_in_token =
        usd_to_token_amount(collateral_asset.price, seized_in_usd, collateral.decimals())?;

    // Rounding down: debt is burned in the system's favor
    let burned_shares = shares_for_burn(state.debt_shares, total_debt, amount)?;
    state.debt_shares = state
        .debt_shares
        .checked_sub(burned_shares)
        .ok_or(ErrorCode::Overflow)?;
    exchange_account.debt_shares = exchange_account
        .debt_shares
        .checked_sub(burned_shares)
        .ok_or(ErrorCode::Overflow)?;

    let entry_index = exchange_account
        .entry_position(&collateral.collateral_address)
        .ok_or(ErrorCode::NoAssetFound)?;
    let entry = &mut exchange_account.collaterals[entry_index];
    entry.amount = entry
        .amount
        .checked_sub(seized_in_token)
        .ok_or(ErrorCode::InsufficientCollateral)?;
    if entry.amount == 0 {
        exchange_account.remove(entry_index);
    }

    let seized = Decimal::new(seized_in_token as u128, collateral.decimals());
    {
        let collateral = &mut registry.collaterals[collateral_index];
        collateral.reserve_balance = collateral.reserve_balance.sub(seized)?;
    }

    // Split: the exchange's share of the penalty goes to the liquidation fund
    let to_exchange = seized
        .mul(state.penalty_to_exchange)?
        .div_up(penalty_factor)?
        .to_u64()?;
    let to_liquidator = seized_in_token
        .checked_sub(to_exchange)
        .ok_or(ErrorCode::Overflow)?;

    // Liquidation wipes the account's staking points for open rounds
    state.staking.next_round.all_points = state.debt_shares;
    state.staking.current_round.all_points = state
        .staking
        .current_round
        .all_points
        .checked_sub(exchange_account.user_staking.current_round_points)
        .ok_or(ErrorCode::Overflow)?;
    state.staking.finished_round.all_points = state
        .staking
        .finished_round
        .all_points
        .checked_sub(exchange_account.user_staking.finished_round_points)
        .ok_or(ErrorCode::Overflow)?;
    exchange_account.user_staking.finished_round_points = 0;
    exchange_account.user_staking.current_round_points = 0;
    exchange_account.user_staking.next_round_points = exchange_account.debt_shares;

    {
        let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
        let burned = Decimal::new(amount as u128, usd_synthetic.supply.scale);
        let new_supply = usd_synthetic.supply.sub(burned)?;
        usd_synthetic.set_supply(new_supply)?;
    }

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];

    // collateral to the liquidator
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.reserve_account.to_account_info(),
                to: ctx.accounts.liquidator_collateral_account.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        to_liquidator,
    )?;

    // penalty share to the liquidation fund
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.reserve_account.to_account_info(),
                to: ctx.accounts.liquidation_fund.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        to_exchange,
    )?;

    // burn the liquidator's USD
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.usd_token.to_account_info(),
                from: ctx.accounts.liquidator_usd_account.to_account_info(),
                authority: ctx.accounts.liquidator.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(AccountLiquidated {
        user: exchange_account.owner,
        liquidator: ctx.accounts.liquidator.key(),
        debt_repaid: amount,
        collateral_to_liquidator: to_liquidator,
        collateral_to_exchange: to_exchange,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
