use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::state::Exchange;

#[derive(Accounts)]
pub struct AdminAction<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub state: Box<Account<'info, Exchange>>,

    pub admin: Signer<'info>,
}

// Unhalting must work while halted, so none of these carry the halted constraint.
pub fn set_halted(ctx: Context<AdminAction>, halted: bool) -> Result<()> {
    ctx.accounts.state.halted = halted;
    Ok(())
}

pub fn set_max_delay(ctx: Context<AdminAction>, max_delay: u32) -> Result<()> {
    ctx.accounts.state.max_delay = max_delay;
    Ok(())
}

pub fn set_fee(ctx: Context<AdminAction>, fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, ErrorCode::ParameterOutOfRange);
    ctx.accounts.state.fee = Decimal::from_bps(fee_bps);
    Ok(())
}

pub fn set_swap_tax_ratio(ctx: Context<AdminAction>, swap_tax_ratio_bps: u16) -> Result<()> {
    require!(
        swap_tax_ratio_bps <= MAX_SWAP_TAX_BPS,
        ErrorCode::ParameterOutOfRange
    );
    ctx.accounts.state.swap_tax_ratio = Decimal::from_bps(swap_tax_ratio_bps);
    Ok(())
}

pub fn set_debt_interest_rate(ctx: Context<AdminAction>, rate_bps: u16) -> Result<()> {
    require!(
        rate_bps <= MAX_DEBT_INTEREST_RATE_BPS,
        ErrorCode::ParameterOutOfRange
    );
    ctx.accounts.state.debt_interest_rate =
        Decimal::from_bps(rate_bps).to_scale(INTEREST_RATE_SCALE)?;
    Ok(())
}

pub fn set_liquidation_rate(ctx: Context<AdminAction>, liquidation_rate_bps: u16) -> Result<()> {
    require!(
        liquidation_rate_bps <= MAX_LIQUIDATION_RATE_BPS,
        ErrorCode::ParameterOutOfRange
    );
    ctx.accounts.state.liquidation_rate = Decimal::from_bps(liquidation_rate_bps);
    Ok(())
}

pub fn set_liquidation_buffer(ctx: Context<AdminAction>, liquidation_buffer: u32) -> Result<()> {
    ctx.accounts.state.liquidation_buffer = liquidation_buffer;
    Ok(())
}

pub fn set_liquidation_penalties(
    ctx: Context<AdminAction>,
    penalty_to_exchange_bps: u16,
    penalty_to_liquidator_bps: u16,
) -> Result<()> {
    require!(
        penalty_to_exchange_bps <= MAX_LIQUIDATION_PENALTY_BPS
            && penalty_to_liquidator_bps <= MAX_LIQUIDATION_PENALTY_BPS,
        ErrorCode::ParameterOutOfRange
    );
    ctx.accounts.state.penalty_to_exchange = Decimal::from_bps(penalty_to_exchange_bps);
    ctx.accounts.state.penalty_to_liquidator = Decimal::from_bps(penalty_to_liquidator_bps);
    Ok(())
}

pub fn set_health_factor(ctx: Context<AdminAction>, health_factor_bps: u16) -> Result<()> {
    require!(
        health_factor_bps <= MAX_HEALTH_FACTOR_BPS,
        ErrorCode::ParameterOutOfRange
    );
    ctx.accounts.state.health_factor = Decimal::from_bps(health_factor_bps);
    Ok(())
}

pub fn set_staking_amount_per_round(ctx: Context<AdminAction>, amount_per_round: u64) -> Result<()> {
    ctx.accounts.state.staking.amount_per_round = amount_per_round;
    Ok(())
}

pub fn set_staking_round_length(ctx: Context<AdminAction>, round_length: u32) -> Result<()> {
    ctx.accounts.state.staking.round_length = round_length;
    Ok(())
}
