use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultCollateralDeposited;
use crate::math::decimal::Decimal;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::state::{Exchange, Vault, VaultEntry};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct DepositVault<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.synthetic.as_ref(), vault.collateral.as_ref()],
        bump = vault.bump,
        constraint = !vault.halted @ ErrorCode::Halted,
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [VAULT_ENTRY_SEED, owner.key().as_ref(), vault.key().as_ref()],
        bump = vault_entry.bump,
        constraint = vault_entry.owner == owner.key() @ ErrorCode::InvalidExchangeAccount,
    )]
    pub vault_entry: Box<Account<'info, VaultEntry>>,

    #[account(
        mut,
        constraint = collateral_reserve.key() == vault.collateral_reserve @ ErrorCode::MismatchedTokens,
    )]
    pub collateral_reserve: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_collateral_account.owner == owner.key() @ ErrorCode::InvalidSigner,
        constraint = user_collateral_account.mint == vault.collateral @ ErrorCode::MismatchedTokens,
    )]
    pub user_collateral_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<DepositVault>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let vault = &mut ctx.accounts.vault;
    let entry = &mut ctx.accounts.vault_entry;
    adjust_vault_interest_rate(vault, clock.unix_timestamp)?;
    settle_vault_entry_interest(vault, entry)?;

    let deposited = Decimal::new(amount as u128, vault.collateral_amount.scale);
    entry.collateral_amount = entry.collateral_amount.add(deposited)?;
    vault.collateral_amount = vault.collateral_amount.add(deposited)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.user_collateral_account.to_account_info(),
                to: ctx.accounts.collateral_reserve.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(VaultCollateralDeposited {
        user: ctx.accounts.owner.key(),
        vault: vault.key(),
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
