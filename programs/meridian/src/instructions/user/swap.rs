use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::SwapExecuted;
use crate::math::decimal::Decimal;
use crate::math::staking::{adjust_staking_account, adjust_staking_rounds};
use crate::math::swap::{
    amount_to_discount, calculate_swap_out_amount, calculate_swap_tax, effective_fee,
};
use crate::state::{AssetRegistry, Exchange, ExchangeAccount, PriceStatus};
use anchor_spl::token::{self, Token, TokenAccount};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        mut,
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
        seeds = [EXCHANGE_ACCOUNT_SEED, owner.key().as_ref()],
        bump = exchange_account.bump,
        constraint = exchange_account.owner == owner.key() @ ErrorCode::InvalidExchangeAccount,
    )]
    pub exchange_account: Box<Account<'info, ExchangeAccount>>,

    /// CHECK: synthetic mint being sold, validated against the registry
    #[account(mut)]
    pub token_in: UncheckedAccount<'info>,

    /// CHECK: synthetic mint being bought, validated against the registry
    #[account(mut)]
    pub token_for: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = user_token_account_in.owner == owner.key() @ ErrorCode::InvalidSigner,
        constraint = user_token_account_in.mint == token_in.key() @ ErrorCode::MismatchedTokens,
    )]
    pub user_token_account_in: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_account_for.mint == token_for.key() @ ErrorCode::MismatchedTokens,
    )]
    pub user_token_account_for: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Convert one synthetic into another at oracle prices, burning the input and
/// minting the output. The swap fee (less its tax share) shrinks output
/// supply; the tax share accrues as USD owed to the exchange.
pub fn handler(ctx: Context<Swap>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let state = &mut ctx.accounts.state;
    let exchange_account = &mut ctx.accounts.exchange_account;
    adjust_staking_rounds(state, clock.slot)?;
    adjust_staking_account(exchange_account, &state.staking);

    let token_in_key = ctx.accounts.token_in.key();
    let token_for_key = ctx.accounts.token_for.key();
    require!(!token_in_key.eq(&token_for_key), ErrorCode::WashTrade);

    let registry = &mut ctx.accounts.registry;
    let in_index = registry
        .synthetic_position_by_address(&token_in_key)
        .ok_or(ErrorCode::MismatchedTokens)?;
    let for_index = registry
        .synthetic_position_by_address(&token_for_key)
        .ok_or(ErrorCode::MismatchedTokens)?;

    let asset_in = registry.assets[registry.synthetics[in_index].asset_index as usize];
    let asset_for = registry.assets[registry.synthetics[for_index].asset_index as usize];

    require!(
        asset_in.status == u8::from(PriceStatus::Trading)
            && asset_for.status == u8::from(PriceStatus::Trading),
        ErrorCode::SwapUnavailable
    );
    asset_in.assert_fresh(state.max_delay, clock.unix_timestamp)?;
    asset_for.assert_fresh(state.max_delay, clock.unix_timestamp)?;

    // Fee discount from the user's main-collateral holdings
    let main_collateral = registry.collaterals[MAIN_COLLATERAL_INDEX as usize];
    let collateral_balance =
        exchange_account.collateral_balance(&main_collateral.collateral_address);
    let discount = amount_to_discount(collateral_balance);
    let fee = effective_fee(state.fee, discount)?;

    let decimals_in = registry.synthetics[in_index].supply.scale;
    let decimals_for = registry.synthetics[for_index].supply.scale;
    let (amount_for, fee_usd) =
        calculate_swap_out_amount(&asset_in, &asset_for, decimals_in, decimals_for, amount, fee)?;

    // Swap tax: an independent second deduction, retained by the exchange as
    // USD debt of the pool
    let swap_tax = calculate_swap_tax(fee_usd, state.swap_tax_ratio)?;
    state.swap_tax_reserve = state.swap_tax_reserve.add(swap_tax)?;
    {
        let usd_synthetic = &mut registry.synthetics[USD_SYNTHETIC_INDEX as usize];
        let tax_supply = swap_tax.to_scale(usd_synthetic.supply.scale)?;
        let new_supply = usd_synthetic.supply.add(tax_supply)?;
        usd_synthetic.set_supply(new_supply)?;
    }

    // Output supply up (MaxSupply enforced), input supply down
    {
        let synthetic_for = &mut registry.synthetics[for_index];
        let minted = Decimal::new(amount_for as u128, synthetic_for.supply.scale);
        let new_supply = synthetic_for.supply.add(minted)?;
        synthetic_for.set_supply(new_supply)?;
    }
    {
        let synthetic_in = &mut registry.synthetics[in_index];
        let burned = Decimal::new(amount as u128, synthetic_in.supply.scale);
        let new_supply = synthetic_in.supply.sub(burned)?;
        synthetic_in.set_supply(new_supply)?;
    }

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.token_in.to_account_info(),
                from: ctx.accounts.user_token_account_in.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    let seeds = &[STATE_SEED, &[state.bump]];
    let signer_seeds = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.token_for.to_account_info(),
                to: ctx.accounts.user_token_account_for.to_account_info(),
                authority: state.to_account_info(),
            },
            signer_seeds,
        ),
        amount_for,
    )?;

    emit!(SwapExecuted {
        user: ctx.accounts.owner.key(),
        token_in: token_in_key,
        token_for: token_for_key,
        amount_in: amount,
        amount_out: amount_for,
        fee_usd: fee_usd.to_u64()?,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
