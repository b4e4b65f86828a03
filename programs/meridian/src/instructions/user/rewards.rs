use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{RewardsClaimed, RewardsWithdrawn};
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::state::{Exchange, ExchangeAccount};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(mut)]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,
}

/// Bank the finished round's pro-rata reward into the account.
pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let finished = state.staking.finished_round;
    if finished.amount > 0 && finished.all_points > 0 {
        let reward_amount = (finished.amount as u128)
            .checked_mul(exchange_account.user_staking.finished_round_points as u128)
            .ok_or(ErrorCode::Overflow)?
            .checked_div(finished.all_points as u128)
            .ok_or(ErrorCode::Overflow)?;
        let reward_amount = u64::try_from(reward_amount).map_err(|_| ErrorCode::Overflow)?;

        exchange_account.user_staking.amount_to_claim = exchange_account
            .user_staking
            .amount_to_claim
            .checked_add(reward_amount)
            .ok_or(ErrorCode::Overflow)?;
        exchange_account.user_staking.finished_round_points = 0;

        emit!(RewardsClaimed {
            user: exchange_account.owner,
            amount: reward_amount,
            timestamp: clock.unix_timestamp,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawRewards<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(
        mut,
        seeds = [EXCHANGE_ACCOUNT_SEED, owner.key().as_ref()],
        bump = exchange_account.bump,
        constraint = exchange_account.owner == owner.key() @ ErrorCode::InvalidExchangeAccount,
    )]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,

    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = staking_fund_account.key() == state.staking.fund_account @ ErrorCode::Unauthorized,
    )]
    pub staking_fund_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Pay out rewards banked by `claim_rewards` from the staking fund.
pub fn withdraw_rewards(ctx: Context<WithdrawRewards>) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let amount = exchange_account.user_staking.amount_to_claim;
    require!(amount > 0, ErrorCode::NoRewards);

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.staking_fund_account.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    exchange_account.user_staking.amount_to_claim = 0;

    emit!(RewardsWithdrawn {
        user: ctx.accounts.owner.key(),
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
