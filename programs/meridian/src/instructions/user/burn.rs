use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SyntheticBurned;
use crate::math::debt::{calculate_pool_debt, shares_for_burn, shares_to_value};
use crate::math::decimal::Decimal;
use crate::math::interest::accrue_pool_debt_interest;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct BurnSynthetic<'info> {
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

    #[account(
        mut,
        constraint = user_token_account_burn.owner == owner.key() @ ErrorCode::InvalidSigner,
    )]
    pub user_token_account_burn: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Burn USD synthetic against the account's debt. Burning more than is owed
/// clamps to the full debt.
pub fn handler(ctx: Context<BurnSynthetic>, amount: u64) -> Result<()> {
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

    let pool_debt = calculate_pool_debt(registry)?;
    let total_debt = accrue_pool_debt_interest(state, pool_debt, clock.unix_timestamp)?;
    let user_debt = shares_to_value(exchange_account.debt_shares, state.debt_shares, total_debt)?;

    // Rounding down: debt is burned in the system's favor
    let burned_shares = shares_for_burn(state.debt_shares, total_debt, amount)?;

    let (burned_amount, burned_shares) = if burned_shares >= exchange_account.debt_shares {
        // burning everything: clamp the token amount to the debt owed
        (user_debt.to_u64()?, exchange_account.debt_shares)
    } else {
        (amount, burned_shares)
    };

    state.debt_shares = state
        .debt_shares
        .checked_sub(burned_shares)
        .ok_or(ErrorCode::Overflow)?;
    exchange_account.debt_shares = exchange_account
        .debt_shares
        .checked_sub(burned_shares)
        .ok_or(ErrorCode::Overflow)?;

    // Staking points follow debt shares; the current round loses at most what
    // the account had earned in it
    exchange_account.user_staking.next_round_points = exchange_account.debt_shares;
    state.staking.next_round.all_points = state.debt_shares;
    let current_points = exchange_account.user_staking.current_round_points;
    let removed_points = current_points.min(burned_shares);
    exchange_account.user_staking.current_round_points = current_points - removed_points;
    state.staking.current_round.all_points = state
        .staking
        .current_round
        .all_points
        .checked_sub(removed_points)
        .ok_or(ErrorCode::Overflow)?;

    let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
    let burned = Decimal::new(burned_amount as u128, usd_synthetic.supply.scale);
    let new_supply = usd_synthetic.supply.sub(burned)?;
    usd_synthetic.set_supply(new_supply)?;

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.usd_token.to_account_info(),
                from: ctx.accounts.user_token_account_burn.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        burned_amount,
    )?;

    emit!(SyntheticBurned {
        user: ctx.accounts.owner.key(),
        amount: burned_amount,
        shares: burned_shares,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
