use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SwaplineSwap;
use crate::math::decimal::Decimal;
use crate::state::{AssetRegistry, Exchange, Swapline};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct SyntheticToNative<'info> {
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
        seeds = [SWAPLINE_SEED, swapline.synthetic.as_ref(), swapline.collateral.as_ref()],
        bump = swapline.bump,
        constraint = !swapline.halted @ ErrorCode::Halted,
    )]
    pub swapline: Box<Account<'info, Swapline>>,

    /// CHECK: the swapline's synthetic mint
    #[account(
        mut,
        constraint = synthetic_token.key() == swapline.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub synthetic_token: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = collateral_reserve.key() == swapline.collateral_reserve @ ErrorCode::MismatchedTokens,
    )]
    pub collateral_reserve: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_synthetic_account.owner == owner.key() @ ErrorCode::InvalidSigner,
        constraint = user_synthetic_account.mint == swapline.synthetic @ ErrorCode::MismatchedTokens,
    )]
    pub user_synthetic_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_collateral_account.mint == swapline.collateral @ ErrorCode::MismatchedTokens,
    )]
    pub user_collateral_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Convert synthetic back into native collateral 1:1 minus the fixed fee,
/// bounded by what the swapline has taken in.
pub fn handler(ctx: Context<SyntheticToNative>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let swapline = &mut ctx.accounts.swapline;
    let swapped = Decimal::new(amount as u128, swapline.balance.scale);
    let new_balance = swapline.balance_after_native_out(swapped)?;

    let fee = swapped.mul_up(swapline.fee)?;
    let amount_out = swapped.sub(fee)?;
    require!(!amount_out.is_zero(), ErrorCode::InsufficientValueTrade);

    swapline.balance = new_balance;
    swapline.accumulated_fee = swapline.accumulated_fee.add(fee)?;

    {
        let registry = &mut ctx.accounts.registry;
        let position = registry
            .synthetic_position_by_address(&swapline.synthetic)
            .ok_or(ErrorCode::NoAssetFound)?;
        let synthetic = &mut registry.synthetics[position];
        let burned = Decimal::new(amount as u128, synthetic.supply.scale);
        synthetic.swapline_supply = if burned.gte(synthetic.swapline_supply)? {
            Decimal::new(0, synthetic.supply.scale)
        } else {
            synthetic.swapline_supply.sub(burned)?
        };
        let new_supply = synthetic.supply.sub(burned)?;
        synthetic.set_supply(new_supply)?;
    }

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.synthetic_token.to_account_info(),
                from: ctx.accounts.user_synthetic_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    let amount_out_tokens = amount_out.to_u64()?;
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
        amount_out_tokens,
    )?;

    emit!(SwaplineSwap {
        user: ctx.accounts.owner.key(),
        swapline: ctx.accounts.swapline.key(),
        to_synthetic: false,
        amount_in: amount,
        amount_out: amount_out_tokens,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
