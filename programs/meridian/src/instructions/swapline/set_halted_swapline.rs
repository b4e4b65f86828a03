use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{Exchange, Swapline};

#[derive(Accounts)]
pub struct SetHaltedSwapline<'info> {
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
}

pub fn handler(ctx: Context<SetHaltedSwapline>, halted: bool) -> Result<()> {
    ctx.accounts.swapline.halted = halted;
    Ok(())
}
