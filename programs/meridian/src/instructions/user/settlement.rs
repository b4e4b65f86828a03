use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SyntheticSettled;
use crate::math::decimal::Decimal;
use crate::state::{AssetRegistry, Exchange, Settlement};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct SettleSynthetic<'info> {
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
        init,
        payer = payer,
        space = Settlement::LEN,
        seeds = [SETTLEMENT_SEED, token_to_settle.key().as_ref()],
        bump,
    )]
    pub settlement: Box<Account<'info, Settlement>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: the synthetic mint being wound down, validated in the handler
    pub token_to_settle: UncheckedAccount<'info>,

    /// CHECK: must be the USD synthetic mint, validated in the handler
    #[account(mut)]
    pub usd_token: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = settlement_reserve.mint == usd_token.key() @ ErrorCode::MismatchedTokens,
    )]
    pub settlement_reserve: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Wind down a deprecated synthetic after its settlement slot: mint its
/// outstanding supply's USD value into the settlement reserve at the current
/// price, record the fixed ratio and drop it from the registry.
pub fn settle_synthetic(ctx: Context<SettleSynthetic>) -> Result<()> {
    let clock = Clock::get()?;

    let state = &ctx.accounts.state;
    let registry = &mut ctx.accounts.registry;
    require!(
        ctx.accounts.usd_token.key()
            == registry.synthetics[USD_SYNTHETIC_INDEX as usize].asset_address,
        ErrorCode::MismatchedTokens
    );

    let synthetic_index = registry
        .synthetic_position_by_address(&ctx.accounts.token_to_settle.key())
        .ok_or(ErrorCode::NoAssetFound)?;
    require!(
        synthetic_index != USD_SYNTHETIC_INDEX as usize,
        ErrorCode::UsdSettlement
    );
    let synthetic = registry.synthetics[synthetic_index];
    let asset = registry.assets[synthetic.asset_index as usize];

    asset.assert_fresh(state.max_delay, clock.unix_timestamp)?;
    require!(
        synthetic.settlement_slot <= clock.slot,
        ErrorCode::SettlementNotReached
    );

    let usd_scale = registry.synthetics[USD_SYNTHETIC_INDEX as usize].supply.scale;
    let usd_value = synthetic.supply.mul(asset.price)?.to_scale(usd_scale)?;
    let usd_amount = usd_value.to_u64()?;

    let settlement = &mut ctx.accounts.settlement;
    settlement.bump = ctx.bumps.settlement;
    settlement.reserve_address = ctx.accounts.settlement_reserve.key();
    settlement.token_in_address = synthetic.asset_address;
    settlement.token_out_address = ctx.accounts.usd_token.key();
    settlement.decimals_in = synthetic.supply.scale;
    settlement.decimals_out = usd_scale;
    settlement.ratio = asset.price;

    {
        let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
        let new_supply = usd_synthetic.supply.add(usd_value)?;
        usd_synthetic.set_supply(new_supply)?;
    }

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.usd_token.to_account_info(),
                to: ctx.accounts.settlement_reserve.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        usd_amount,
    )?;

    registry.remove_synthetic(synthetic_index)?;

    emit!(SyntheticSettled {
        synthetic: ctx.accounts.token_to_settle.key(),
        settlement: ctx.accounts.settlement.key(),
        ratio: ctx.accounts.settlement.ratio.to_u64()?,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SwapSettledSynthetic<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = !state.halted @ ErrorCode::Halted,
    )]
    pub state: Box<Account<'info, Exchange>>,

    #[account(
        seeds = [SETTLEMENT_SEED, token_to_settle.key().as_ref()],
        bump = settlement.bump,
    )]
    pub settlement: Box<Account<'info, Settlement>>,

    /// CHECK: settled synthetic mint recorded in the settlement
    #[account(
        mut,
        constraint = token_to_settle.key() == settlement.token_in_address @ ErrorCode::MismatchedTokens,
    )]
    pub token_to_settle: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = user_settled_token_account.owner == signer.key() @ ErrorCode::InvalidSigner,
        constraint = user_settled_token_account.mint == settlement.token_in_address @ ErrorCode::MismatchedTokens,
    )]
    pub user_settled_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_usd_account.mint == settlement.token_out_address @ ErrorCode::MismatchedTokens,
    )]
    pub user_usd_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = settlement_reserve.key() == settlement.reserve_address @ ErrorCode::MismatchedTokens,
    )]
    pub settlement_reserve: Account<'info, TokenAccount>,

    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Convert a settled synthetic into USD at the recorded fixed ratio.
pub fn swap_settled_synthetic(ctx: Context<SwapSettledSynthetic>, amount: u64) -> Result<()> {
    let settlement = &ctx.accounts.settlement;

    let usd_amount = Decimal::new(amount as u128, settlement.decimals_in)
        .mul(settlement.ratio)?
        .to_scale(settlement.decimals_out)?
        .to_u64()?;

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.token_to_settle.to_account_info(),
                from: ctx.accounts.user_settled_token_account.to_account_info(),
                authority: ctx.accounts.signer.to_account_info(),
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
                from: ctx.accounts.settlement_reserve.to_account_info(),
                to: ctx.accounts.user_usd_account.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            },
            signer_seeds,
        ),
        usd_amount,
    )?;

    Ok(())
}
