use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultCollateralWithdrawn;
use crate::math::debt::usd_to_token_amount;
use crate::math::decimal::Decimal;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::math::oracle::{read_price, OracleType};
use crate::state::{Exchange, Vault, VaultEntry};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct WithdrawVault<'info> {
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

    /// CHECK: the vault's configured collateral price feed
    #[account(
        constraint = collateral_price_feed.key() == vault.collateral_price_feed @ ErrorCode::InvalidOracleProgram,
    )]
    pub collateral_price_feed: UncheckedAccount<'info>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw vault collateral, re-validating collateralization afterwards.
/// `u64::MAX` withdraws as much as the debt allows.
pub fn handler(ctx: Context<WithdrawVault>, amount: u64) -> Result<()> {
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

    // capacity consumed by the debt, in collateral value
    let debt_value = entry.synthetic_amount.to_scale_up(PRICE_SCALE)?;
    let collateral_value = entry
        .collateral_amount
        .mul(price_update.price)?
        .to_scale(PRICE_SCALE)?;
    let required_value = debt_value.div_up(vault.collateral_ratio)?;
    let withdrawable_value = if required_value.gte(collateral_value)? {
        Decimal::new(0, PRICE_SCALE)
    } else {
        collateral_value.sub(required_value)?
    };
    let max_withdrawable = usd_to_token_amount(
        price_update.price,
        withdrawable_value,
        vault.collateral_amount.scale,
    )?;

    let amount_to_withdraw = if amount == u64::MAX {
        max_withdrawable.min(entry.collateral_amount.to_u64()?)
    } else {
        require!(amount <= max_withdrawable, ErrorCode::VaultWithdrawLimit);
        amount
    };

    let withdrawn = Decimal::new(amount_to_withdraw as u128, vault.collateral_amount.scale);
    entry.collateral_amount = entry.collateral_amount.sub(withdrawn)?;
    vault.collateral_amount = vault.collateral_amount.sub(withdrawn)?;

    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.collateral_reserve.to_account_info(),
                to: ctx.accounts.user_collateral_account.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        amount_to_withdraw,
    )?;

    emit!(VaultCollateralWithdrawn {
        user: ctx.accounts.owner.key(),
        vault: vault.key(),
        amount: amount_to_withdraw,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
