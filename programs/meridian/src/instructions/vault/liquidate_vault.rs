use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::VaultLiquidated;
use crate::math::debt::{usd_to_token_amount, vault_liquidatable};
use crate::math::decimal::Decimal;
use crate::math::interest::{adjust_vault_interest_rate, settle_vault_entry_interest};
use crate::math::oracle::{read_price, OracleType};
use crate::state::{AssetRegistry, Exchange, Vault, VaultEntry};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct LiquidateVault<'info> {
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

    /// CHECK: owner of the position being liquidated
    pub position_owner: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_ENTRY_SEED, position_owner.key().as_ref(), vault.key().as_ref()],
        bump = vault_entry.bump,
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
        constraint = liquidator_synthetic_account.owner == liquidator.key() @ ErrorCode::InvalidSigner,
        constraint = liquidator_synthetic_account.mint == vault.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub liquidator_synthetic_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub liquidator_collateral_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = collateral_reserve.key() == vault.collateral_reserve @ ErrorCode::MismatchedTokens,
    )]
    pub collateral_reserve: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = liquidation_fund.key() == vault.liquidation_fund @ ErrorCode::InvalidLiquidationFund,
    )]
    pub liquidation_fund: Account<'info, TokenAccount>,

    /// CHECK: the vault's configured collateral price feed
    #[account(
        constraint = collateral_price_feed.key() == vault.collateral_price_feed @ ErrorCode::InvalidOracleProgram,
    )]
    pub collateral_price_feed: UncheckedAccount<'info>,

    pub liquidator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Cover part of an undercollateralized vault position with synthetic and
/// seize discounted collateral, split between liquidator and liquidation fund.
pub fn handler(ctx: Context<LiquidateVault>, amount: u64) -> Result<()> {
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

    // liquidatable only while collateral value sits below the threshold
    let collateral_value = entry
        .collateral_amount
        .mul(price_update.price)?
        .to_scale(PRICE_SCALE)?;
    let debt_value = entry.synthetic_amount.to_scale_up(PRICE_SCALE)?;
    require!(
        vault_liquidatable(collateral_value, debt_value, vault.liquidation_threshold)?,
        ErrorCode::InvalidLiquidation
    );

    let max_repay = entry.synthetic_amount.mul(vault.liquidation_ratio)?;
    let repaid = Decimal::new(amount as u128, vault.mint_amount.scale);
    require!(repaid.lte(max_repay)?, ErrorCode::InvalidLiquidation);

    // seized collateral: repaid value plus penalties, rounded against the
    // position
    let one = Decimal::from_bps(BPS_DENOMINATOR as u16);
    let penalty_factor = one
        .add(vault.penalty_to_liquidator)?
        .add(vault.penalty_to_exchange)?;
    let seized_value = repaid.to_scale_up(PRICE_SCALE)?.mul_up(penalty_factor)?;
    let seized_in_token = usd_to_token_amount(
        price_update.price,
        seized_value,
        vault.collateral_amount.scale,
    )?;
    let seized = Decimal::new(seized_in_token as u128, vault.collateral_amount.scale);
    require!(
        seized.lte(entry.collateral_amount)?,
        ErrorCode::InsufficientCollateral
    );

    entry.synthetic_amount = entry.synthetic_amount.sub(repaid)?;
    vault.mint_amount = vault.mint_amount.sub(repaid)?;
    entry.collateral_amount = entry.collateral_amount.sub(seized)?;
    vault.collateral_amount = vault.collateral_amount.sub(seized)?;

    let to_exchange = seized
        .mul(vault.penalty_to_exchange)?
        .div_up(penalty_factor)?
        .to_u64()?;
    let to_liquidator = seized_in_token
        .checked_sub(to_exchange)
        .ok_or(ErrorCode::Overflow)?;

    {
        let registry = &mut ctx.accounts.registry;
        let position = registry
            .synthetic_position_by_address(&vault.synthetic)
            .ok_or(ErrorCode::NoAssetFound)?;
        let synthetic = &mut registry.synthetics[position];
        let burned = Decimal::new(amount as u128, synthetic.supply.scale);
        synthetic.borrowed_supply = if burned.gte(synthetic.borrowed_supply)? {
            Decimal::new(0, synthetic.supply.scale)
        } else {
            synthetic.borrowed_supply.sub(burned)?
        };
        let new_supply = synthetic.supply.sub(burned)?;
        synthetic.set_supply(new_supply)?;
    }

    // burn the liquidator's synthetic
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.synthetic_token.to_account_info(),
                from: ctx.accounts.liquidator_synthetic_account.to_account_info(),
                authority: ctx.accounts.liquidator.to_account_info(),
            },
        ),
        amount,
    )?;

    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.collateral_reserve.to_account_info(),
                to: ctx.accounts.liquidator_collateral_account.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        to_liquidator,
    )?;

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.collateral_reserve.to_account_info(),
                to: ctx.accounts.liquidation_fund.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        to_exchange,
    )?;

    emit!(VaultLiquidated {
        user: ctx.accounts.position_owner.key(),
        vault: vault.key(),
        liquidator: ctx.accounts.liquidator.key(),
        debt_repaid: amount,
        collateral_seized: seized_in_token,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
