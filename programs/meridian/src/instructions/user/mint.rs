use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SyntheticMinted;
use crate::math::debt::{calculate_max_debt, calculate_pool_debt, shares_for_mint, shares_to_value};
use crate::math::decimal::Decimal;
use crate::math::interest::accrue_pool_debt_interest;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct MintSynthetic<'info> {
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

    /// CHECK: must be the USD synthetic mint, validated in the handler
    #[account(mut)]
    pub usd_token: UncheckedAccount<'info>,

    #[account(mut)]
    pub to: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Mint USD synthetic against deposited collateral. Only the USD synthetic is
/// pool-mintable; everything else enters supply through swaps, vaults or
/// swaplines.
pub fn handler(ctx: Context<MintSynthetic>, amount: u64) -> Result<()> {
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

    let pool_debt = calculate_pool_debt(registry)?;
    let total_debt = accrue_pool_debt_interest(state, pool_debt, clock.unix_timestamp)?;
    let user_debt = shares_to_value(exchange_account.debt_shares, state.debt_shares, total_debt)?;
    let max_debt = calculate_max_debt(exchange_account, registry)?;
    let max_borrow = max_debt.mul(state.health_factor)?;

    let debt_after = user_debt.add(Decimal::new(amount as u128, PRICE_SCALE))?;
    require!(debt_after.lte(max_borrow)?, ErrorCode::MintLimit);

    // Rounding up: debt is created in the system's favor
    let new_shares = shares_for_mint(state.debt_shares, total_debt, amount)?;
    state.debt_shares = state
        .debt_shares
        .checked_add(new_shares)
        .ok_or(ErrorCode::Overflow)?;
    exchange_account.debt_shares = exchange_account
        .debt_shares
        .checked_add(new_shares)
        .ok_or(ErrorCode::Overflow)?;

    // Staking points follow debt shares into the next round
    exchange_account.user_staking.next_round_points = exchange_account.debt_shares;
    state.staking.next_round.all_points = state.debt_shares;

    let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
    let minted = Decimal::new(amount as u128, usd_synthetic.supply.scale);
    let new_supply = usd_synthetic.supply.add(minted)?;
    usd_synthetic.set_supply(new_supply)?;

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.usd_token.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(SyntheticMinted {
        user: ctx.accounts.owner.key(),
        amount,
        shares: new_shares,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
