use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::math::interest::adjust_vault_interest_rate;
use crate::state::{Exchange, Vault, VaultEntry};

#[derive(Accounts)]
pub struct CreateVaultEntry<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.synthetic.as_ref(), vault.collateral.as_ref()],
        bump = vault.bump,
        constraint = !vault.halted @ ErrorCode::Halted,
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init,
        payer = owner,
        space = VaultEntry::LEN,
        seeds = [VAULT_ENTRY_SEED, owner.key().as_ref(), vault.key().as_ref()],
        bump,
    )]
    pub vault_entry: Box<Account<'info, VaultEntry>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateVaultEntry>) -> Result<()> {
    let clock = Clock::get()?;
    let vault = &mut ctx.accounts.vault;
    adjust_vault_interest_rate(vault, clock.unix_timestamp)?;

    let entry = &mut ctx.accounts.vault_entry;
    entry.owner = ctx.accounts.owner.key();
    entry.vault = vault.key();
    entry.bump = ctx.bumps.vault_entry;
    entry.last_accumulated_interest_rate = vault.accumulated_interest_rate;
    entry.synthetic_amount = Decimal::new(0, vault.mint_amount.scale);
    entry.collateral_amount = Decimal::new(0, vault.collateral_amount.scale);
    Ok(())
}
