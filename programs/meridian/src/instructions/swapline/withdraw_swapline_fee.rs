use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::state::{Exchange, Swapline};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct WithdrawSwaplineFee<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SWAPLINE_SEED, swapline.synthetic.as_ref(), swapline.collateral.as_ref()],
        bump = swapline.bump,
    )]
    pub swapline: Box<Account<'info, Swapline>>,

    #[account(
        mut,
        constraint = collateral_reserve.key() == swapline.collateral_reserve @ ErrorCode::MismatchedTokens,
    )]
    pub collateral_reserve: Account<'info, TokenAccount>,

    #[account(mut)]
    pub to: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Transfer accrued swapline fees out of the collateral reserve. `u64::MAX`
/// withdraws everything.
pub fn handler(ctx: Context<WithdrawSwaplineFee>, amount: u64) -> Result<()> {
    let swapline = &mut ctx.accounts.swapline;

    let actual_amount = if amount == u64::MAX {
        swapline.accumulated_fee.to_u64()?
    } else {
        amount
    };
    let withdrawn = Decimal::new(actual_amount as u128, swapline.accumulated_fee.scale);
    require!(
        withdrawn.lte(swapline.accumulated_fee)?,
        ErrorCode::InsufficientAdminWithdraw
    );
    swapline.accumulated_fee = swapline.accumulated_fee.sub(withdrawn)?;

    let seeds = &[STATE_SEED, &[ctx.accounts.state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.collateral_reserve.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        actual_amount,
    )
}
