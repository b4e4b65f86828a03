use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::CollateralDeposited;
use crate::math::decimal::Decimal;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{AssetRegistry, CollateralEntry, Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct Deposit<'info> {
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

    // anyone may deposit into any exchange account
    #[account(mut)]
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

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let registry = &mut ctx.accounts.registry;
    let collateral_index = registry
        .collateral_position_by_reserve(&ctx.accounts.reserve_account.key())
        .ok_or(ErrorCode::NoAssetFound)?;
    let collateral = &mut registry.collaterals[collateral_index];

    let deposited = Decimal::new(amount as u128, collateral.decimals());
    let new_reserve = collateral.reserve_balance.add(deposited)?;
    require!(
        new_reserve.lte(collateral.max_collateral)?,
        ErrorCode::CollateralLimitExceeded
    );
    collateral.reserve_balance = new_reserve;

    match exchange_account.entry_position(&collateral.collateral_address) {
        Some(position) => {
            let entry = &mut exchange_account.collaterals[position];
            entry.amount = entry.amount.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        }
        None => exchange_account.append(CollateralEntry {
            amount,
            collateral_address: collateral.collateral_address,
            index: collateral_index as u8,
        })?,
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.user_collateral_account.to_account_info(),
                to: ctx.accounts.reserve_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(CollateralDeposited {
        user: ctx.accounts.owner.key(),
        collateral: ctx.accounts.reserve_account.mint,
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
