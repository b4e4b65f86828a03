use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SwaplineCreated;
use crate::math::decimal::Decimal;
use crate::state::{AssetRegistry, Exchange, Swapline};
use anchor_spl::token::{Mint, TokenAccount};

#[derive(Accounts)]
pub struct CreateSwapline<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        constraint = registry.key() == state.registry @ ErrorCode::InvalidRegistry,
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        init,
        payer = admin,
        space = Swapline::LEN,
        seeds = [SWAPLINE_SEED, synthetic_token.key().as_ref(), collateral_token.key().as_ref()],
        bump,
    )]
    pub swapline: Box<Account<'info, Swapline>>,

    pub synthetic_token: Account<'info, Mint>,
    pub collateral_token: Account<'info, Mint>,

    #[account(constraint = collateral_reserve.mint == collateral_token.key())]
    pub collateral_reserve: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateSwapline>, limit: u64, fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, ErrorCode::ParameterOutOfRange);

    let registry = &ctx.accounts.registry;
    require!(
        registry
            .synthetic_position_by_address(&ctx.accounts.synthetic_token.key())
            .is_some(),
        ErrorCode::NoAssetFound
    );
    // the fixed-ratio path only works when both sides use the same scale
    require!(
        ctx.accounts.synthetic_token.decimals == ctx.accounts.collateral_token.decimals,
        ErrorCode::DifferentScale
    );

    let collateral_scale = ctx.accounts.collateral_token.decimals;
    let swapline = &mut ctx.accounts.swapline;
    swapline.bump = ctx.bumps.swapline;
    swapline.halted = false;
    swapline.synthetic = ctx.accounts.synthetic_token.key();
    swapline.collateral = ctx.accounts.collateral_token.key();
    swapline.collateral_reserve = ctx.accounts.collateral_reserve.key();
    swapline.fee = Decimal::from_bps(fee_bps);
    swapline.accumulated_fee = Decimal::new(0, collateral_scale);
    swapline.balance = Decimal::new(0, collateral_scale);
    swapline.limit = Decimal::new(limit as u128, collateral_scale);
    swapline._reserved = [0u8; 32];

    let clock = Clock::get()?;
    emit!(SwaplineCreated {
        swapline: swapline.key(),
        synthetic: swapline.synthetic,
        collateral: swapline.collateral,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
