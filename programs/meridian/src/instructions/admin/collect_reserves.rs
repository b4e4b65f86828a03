use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::state::{AssetRegistry, Exchange};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct WithdrawUsdReserve<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    /// CHECK: must be the USD synthetic mint, validated in the handler
    #[account(mut)]
    pub usd_token: UncheckedAccount<'info>,

    #[account(mut)]
    pub to: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

fn mint_usd<'info>(ctx: &Context<WithdrawUsdReserve<'info>>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.usd_token.key()
            == ctx.accounts.registry.synthetics[USD_SYNTHETIC_INDEX as usize].asset_address,
        ErrorCode::MismatchedTokens
    );
    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.usd_token.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Mint the swap tax collected so far to the admin. `u64::MAX` withdraws all.
pub fn withdraw_swap_tax(ctx: Context<WithdrawUsdReserve>, amount: u64) -> Result<()> {
    let reserve = ctx.accounts.state.swap_tax_reserve;
    let actual_amount = if amount == u64::MAX {
        reserve.to_u64()?
    } else {
        amount
    };
    let withdrawn = Decimal::new(actual_amount as u128, reserve.scale);
    require!(
        withdrawn.lte(reserve)?,
        ErrorCode::InsufficientAdminWithdraw
    );
    ctx.accounts.state.swap_tax_reserve = reserve.sub(withdrawn)?;

    mint_usd(&ctx, actual_amount)
}

/// Mint accumulated debt-pool interest to the admin. `u64::MAX` withdraws all.
/// Minting raises the USD supply, which keeps the pool debt consistent with
/// the interest already counted into it.
pub fn withdraw_accumulated_debt_interest(
    ctx: Context<WithdrawUsdReserve>,
    amount: u64,
) -> Result<()> {
    let reserve = ctx.accounts.state.accumulated_debt_interest;
    let actual_amount = if amount == u64::MAX {
        reserve.to_u64()?
    } else {
        amount
    };
    let withdrawn = Decimal::new(actual_amount as u128, reserve.scale);
    require!(
        withdrawn.lte(reserve)?,
        ErrorCode::InsufficientAdminWithdraw
    );
    ctx.accounts.state.accumulated_debt_interest = reserve.sub(withdrawn)?;

    {
        let registry = &mut ctx.accounts.registry;
        let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
        let new_supply = usd_synthetic
            .supply
            .add(Decimal::new(actual_amount as u128, usd_synthetic.supply.scale))?;
        usd_synthetic.set_supply(new_supply)?;
    }

    mint_usd(&ctx, actual_amount)
}

#[derive(Accounts)]
pub struct WithdrawLiquidationPenalty<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(mut)]
    pub liquidation_fund: Account<'info, TokenAccount>,

    #[account(mut)]
    pub to: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Transfer seized liquidation penalties out of a collateral's fund account.
pub fn withdraw_liquidation_penalty(
    ctx: Context<WithdrawLiquidationPenalty>,
    amount: u64,
) -> Result<()> {
    let fund_key = ctx.accounts.liquidation_fund.key();
    require!(
        ctx.accounts
            .registry
            .collaterals()
            .iter()
            .any(|x| x.liquidation_fund.eq(&fund_key)),
        ErrorCode::InvalidLiquidationFund
    );
    let actual_amount = if amount == u64::MAX {
        ctx.accounts.liquidation_fund.amount
    } else {
        amount
    };
    require!(
        actual_amount <= ctx.accounts.liquidation_fund.amount,
        ErrorCode::InsufficientAdminWithdraw
    );

    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.liquidation_fund.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        actual_amount,
    )
}
