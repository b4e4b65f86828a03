use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultRepaid;
use crate::math::decimal::Decimal;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::state::{AssetRegistry, Exchange, Vault, VaultEntry};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct RepayVault<'info> {
    #[account(
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
        seeds = [VAULT_SEED, vault.synthetic.as_ref(), vault.collateral.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [VAULT_ENTRY_SEED, owner.key().as_ref(), vault.key().as_ref()],
        bump = vault_entry.bump,
        constraint = vault_entry.owner == owner.key() @ ErrorCode::InvalidExchangeAccount,
    )]
    pub vault_entry: Box<Account<'info, VaultEntry>>,

    /// CHECK: the vault's synthetic mint
    #[account(
        mut,
        constraint = synthetic_token.key() == vault.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub synthetic_token: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = user_token_account.owner == owner.key() @ ErrorCode::InvalidSigner,
        constraint = user_token_account.mint == vault.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Repay vault debt, clamped to what is owed. `u64::MAX` repays everything.
pub fn handler(ctx: Context<RepayVault>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let vault = &mut ctx.accounts.vault;
    let entry = &mut ctx.accounts.vault_entry;
    adjust_vault_interest_rate(vault, clock.unix_timestamp)?;
    settle_vault_entry_interest(vault, entry)?;

    let owed = entry.synthetic_amount.to_u64()?;
    let repaid_amount = amount.min(owed);
    let repaid = Decimal::new(repaid_amount as u128, vault.mint_amount.scale);

    entry.synthetic_amount = entry.synthetic_amount.sub(repaid)?;
    vault.mint_amount = vault.mint_amount.sub(repaid)?;

    {
        let registry = &mut ctx.accounts.registry;
        let position = registry
            .synthetic_position_by_address(&vault.synthetic)
            .ok_or(ErrorCode::NoAssetFound)?;
        let synthetic = &mut registry.synthetics[position];
        let burned = Decimal::new(repaid_amount as u128, synthetic.supply.scale);
        // interest makes debt exceed what was minted; never underflow the
        // minted-through-vaults tracker
        synthetic.borrowed_supply = if burned.gte(synthetic.borrowed_supply)? {
            Decimal::new(0, synthetic.supply.scale)
        } else {
            synthetic.borrowed_supply.sub(burned)?
        };
        let new_supply = synthetic.supply.sub(burned)?;
        synthetic.set_supply(new_supply)?;
    }

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.synthetic_token.to_account_info(),
                from: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        repaid_amount,
    )?;

    emit!(VaultRepaid {
        user: ctx.accounts.owner.key(),
        vault: vault.key(),
        amount: repaid_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
