use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultInterestSettled;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::state::{Exchange, Vault, VaultEntry};

#[derive(Accounts)]
pub struct TriggerVaultEntryDebtAdjustment<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.synthetic.as_ref(), vault.collateral.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: owner of the entry being checkpointed
    pub position_owner: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_ENTRY_SEED, position_owner.key().as_ref(), vault.key().as_ref()],
        bump = vault_entry.bump,
    )]
    pub vault_entry: Box<Account<'info, VaultEntry>>,
}

/// Forced interest settlement with no other side effects, used to checkpoint
/// entries before a parameter change.
pub fn handler(ctx: Context<TriggerVaultEntryDebtAdjustment>) -> Result<()> {
    let clock = Clock::get()?;

    let vault = &mut ctx.accounts.vault;
    let entry = &mut ctx.accounts.vault_entry;
    adjust_vault_interest_rate(vault, clock.unix_timestamp)?;
    settle_vault_entry_interest(vault, entry)?;

    emit!(VaultInterestSettled {
        user: ctx.accounts.position_owner.key(),
        vault: vault.key(),
        synthetic_amount: entry.synthetic_amount.to_u64()?,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
