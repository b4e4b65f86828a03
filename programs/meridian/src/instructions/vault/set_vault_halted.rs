use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{Exchange, Vault};

#[derive(Accounts)]
pub struct SetVaultHalted<'info> {
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
}

pub fn handler(ctx: Context<SetVaultHalted>, halted: bool) -> Result<()> {
    ctx.accounts.vault.halted = halted;
    Ok(())
}
