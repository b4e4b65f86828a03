use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::ExchangeInitialized;
use crate::math::decimal::Decimal;
use crate::state::{Exchange, Staking, StakingRound};
use anchor_spl::token::TokenAccount;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeExchangeParams {
    pub staking_round_length: u32,
    pub staking_amount_per_round: u64,
}

#[derive(Accounts)]
pub struct InitializeExchange<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = Exchange::LEN,
        seeds = [STATE_SEED],
        bump,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub staking_fund_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeExchange>, params: InitializeExchangeParams) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    state.admin = ctx.accounts.admin.key();
    state.bump = ctx.bumps.state;
    state.halted = false;
    state.registry = Pubkey::default();
    state.debt_shares = 0;

    // Defaults, adjustable through the admin setters
    state.health_factor = Decimal::from_bps(5_000); // 50%
    state.debt_interest_rate = Decimal::from_bps(100).to_scale(INTEREST_RATE_SCALE)?; // 1%
    state.accumulated_debt_interest = Decimal::new(0, PRICE_SCALE);
    state.last_debt_adjustment = clock.unix_timestamp;
    state.fee = Decimal::from_bps(30); // 0.3%
    state.swap_tax_ratio = Decimal::from_bps(2_000); // 20% of the fee
    state.swap_tax_reserve = Decimal::new(0, PRICE_SCALE);
    state.liquidation_rate = Decimal::from_bps(2_000); // 20% of debt per liquidation
    state.penalty_to_liquidator = Decimal::from_bps(500); // 5%
    state.penalty_to_exchange = Decimal::from_bps(500); // 5%
    state.liquidation_buffer = 172_800; // about 24 hours of slots
    state.max_delay = 0;

    state.staking = Staking {
        fund_account: ctx.accounts.staking_fund_account.key(),
        round_length: params.staking_round_length,
        amount_per_round: params.staking_amount_per_round,
        finished_round: StakingRound {
            start: 0,
            amount: 0,
            all_points: 0,
        },
        current_round: StakingRound {
            start: clock.slot,
            amount: 0,
            all_points: 0,
        },
        next_round: StakingRound {
            start: clock
                .slot
                .checked_add(params.staking_round_length as u64)
                .ok_or(ErrorCode::Overflow)?,
            amount: params.staking_amount_per_round,
            all_points: 0,
        },
    };
    state._reserved = [0u8; 64];

    emit!(ExchangeInitialized {
        admin: state.admin,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
