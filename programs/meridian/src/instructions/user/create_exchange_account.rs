use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{CollateralEntry, Exchange, ExchangeAccount, UserStaking};

#[derive(Accounts)]
pub struct CreateExchangeAccount<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(
        init,
        payer = owner,
        space = ExchangeAccount::LEN,
        seeds = [EXCHANGE_ACCOUNT_SEED, owner.key().as_ref()],
        bump,
    )]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateExchangeAccount>) -> Result<()> {
    let account = &mut ctx.accounts.exchange_account;
    account.owner = ctx.accounts.owner.key();
    account.bump = ctx.bumps.exchange_account;
    account.debt_shares = 0;
    account.liquidation_deadline = u64::MAX;
    account.user_staking = UserStaking::default();
    account.head = 0;
    account.collaterals = [CollateralEntry::default(); 32];
    Ok(())
}
