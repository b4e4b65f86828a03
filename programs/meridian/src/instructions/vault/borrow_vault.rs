use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultBorrowed;
use crate::math::decimal::Decimal;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::math::oracle::{read_price, OracleType};
use crate::state::{AssetRegistry, Exchange, Vault, VaultEntry};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct BorrowVault<'info> {
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

    /// CHECK: the vault's synthetic mint
    #[account(
        mut,
        constraint = synthetic_token.key() == vault.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub synthetic_token: UncheckedAccount<'info>,

    #[account(mut)]
    pub to: Account<'info, TokenAccount>,

    /// CHECK: the vault's configured collateral price feed
    #[account(
        constraint = collateral_price_feed.key() == vault.collateral_price_feed @ ErrorCode::InvalidOracleProgram,
    )]
    pub collateral_price_feed: UncheckedAccount<'info>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Borrow the vault's synthetic against deposited collateral. The open fee is
/// charged as extra debt, not minted.
pub fn handler(ctx: Context<BorrowVault>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let vault = &mut ctx.accounts.vault;
    let entry = &mut ctx.accounts.vault_entry;
    adjust_vault_interest_rate(vault, clock.unix_timestamp)?;
    settle_vault_entry_interest(vault, entry)?;

    let oracle_type = OracleType::try_from_u8(vault.oracle_type)?;
    let price_update = read_price(&ctx.accounts.collateral_price_feed, oracle_type)?;
    require!(
        clock.unix_timestamp.saturating_sub(price_update.publish_time)
            <= ctx.accounts.state.max_delay as i64,
        ErrorCode::OutdatedOracle
    );

    let borrowed = Decimal::new(amount as u128, vault.mint_amount.scale);
    let fee = borrowed.mul_up(vault.open_fee)?;
    let debt_increase = borrowed.add(fee)?;
    let debt_after = entry.synthetic_amount.add(debt_increase)?;

    // the synthetic trades at par against the collateral's USD value
    let collateral_value = entry
        .collateral_amount
        .mul(price_update.price)?
        .to_scale(PRICE_SCALE)?;
    let borrow_limit = collateral_value.mul(vault.collateral_ratio)?;
    let debt_after_value = debt_after.to_scale_up(PRICE_SCALE)?;
    require!(
        debt_after_value.lte(borrow_limit)?,
        ErrorCode::UserBorrowLimit
    );

    let new_mint_amount = vault.mint_amount.add(debt_increase)?;
    require!(
        new_mint_amount.lte(vault.max_borrow)?,
        ErrorCode::VaultBorrowLimit
    );

    entry.synthetic_amount = debt_after;
    vault.mint_amount = new_mint_amount;
    vault.accumulated_interest = vault.accumulated_interest.add(fee)?;

    {
        let registry = &mut ctx.accounts.registry;
        let position = registry
            .synthetic_position_by_address(&vault.synthetic)
            .ok_or(ErrorCode::NoAssetFound)?;
        let synthetic = &mut registry.synthetics[position];
        let minted = Decimal::new(amount as u128, synthetic.supply.scale);
        synthetic.borrowed_supply = synthetic.borrowed_supply.add(minted)?;
        let new_supply = synthetic.supply.add(minted)?;
        synthetic.set_supply(new_supply)?;
    }

    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.synthetic_token.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(VaultBorrowed {
        user: ctx.accounts.owner.key(),
        vault: vault.key(),
        amount,
        fee: fee.to_u64()?,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
