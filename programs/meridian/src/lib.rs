#![allow(ambiguous_glob_reexports)]

pub mod constants;
pub mod error;
pub mod events;
pub mod state;
pub mod math;
pub mod instructions;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod meridian {
    use super::*;

    // ── Admin ───────────────────────────────────────────────

    pub fn initialize_exchange(
        ctx: Context<InitializeExchange>,
        params: instructions::admin::initialize_exchange::InitializeExchangeParams,
    ) -> Result<()> {
        instructions::admin::initialize_exchange::handler(ctx, params)
    }

    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        params: instructions::admin::initialize_registry::InitializeRegistryParams,
    ) -> Result<()> {
        instructions::admin::initialize_registry::handler(ctx, params)
    }

    pub fn set_halted(ctx: Context<AdminAction>, halted: bool) -> Result<()> {
        instructions::admin::set_parameters::set_halted(ctx, halted)
    }

    pub fn set_max_delay(ctx: Context<AdminAction>, max_delay: u32) -> Result<()> {
        instructions::admin::set_parameters::set_max_delay(ctx, max_delay)
    }

    pub fn set_fee(ctx: Context<AdminAction>, fee_bps: u16) -> Result<()> {
        instructions::admin::set_parameters::set_fee(ctx, fee_bps)
    }

    pub fn set_swap_tax_ratio(ctx: Context<AdminAction>, swap_tax_ratio_bps: u16) -> Result<()> {
        instructions::admin::set_parameters::set_swap_tax_ratio(ctx, swap_tax_ratio_bps)
    }

    pub fn set_debt_interest_rate(ctx: Context<AdminAction>, rate_bps: u16) -> Result<()> {
        instructions::admin::set_parameters::set_debt_interest_rate(ctx, rate_bps)
    }

    pub fn set_liquidation_rate(
        ctx: Context<AdminAction>,
        liquidation_rate_bps: u16,
    ) -> Result<()> {
        instructions::admin::set_parameters::set_liquidation_rate(ctx, liquidation_rate_bps)
    }

    pub fn set_liquidation_buffer(
        ctx: Context<AdminAction>,
        liquidation_buffer: u32,
    ) -> Result<()> {
        instructions::admin::set_parameters::set_liquidation_buffer(ctx, liquidation_buffer)
    }

    pub fn set_liquidation_penalties(
        ctx: Context<AdminAction>,
        penalty_to_exchange_bps: u16,
        penalty_to_liquidator_bps: u16,
    ) -> Result<()> {
        instructions::admin::set_parameters::set_liquidation_penalties(
            ctx,
            penalty_to_exchange_bps,
            penalty_to_liquidator_bps,
        )
    }

    pub fn set_health_factor(ctx: Context<AdminAction>, health_factor_bps: u16) -> Result<()> {
        instructions::admin::set_parameters::set_health_factor(ctx, health_factor_bps)
    }

    pub fn set_staking_amount_per_round(
        ctx: Context<AdminAction>,
        amount_per_round: u64,
    ) -> Result<()> {
        instructions::admin::set_parameters::set_staking_amount_per_round(ctx, amount_per_round)
    }

    pub fn set_staking_round_length(ctx: Context<AdminAction>, round_length: u32) -> Result<()> {
        instructions::admin::set_parameters::set_staking_round_length(ctx, round_length)
    }

    pub fn add_asset(
        ctx: Context<ManageRegistry>,
        feed_address: Pubkey,
        oracle_type: u8,
    ) -> Result<()> {
        instructions::admin::manage_assets::add_asset(ctx, feed_address, oracle_type)
    }

    pub fn add_collateral(
        ctx: Context<AddCollateral>,
        feed_address: Pubkey,
        collateral_ratio_bps: u16,
        max_collateral: u64,
    ) -> Result<()> {
        instructions::admin::manage_assets::add_collateral(
            ctx,
            feed_address,
            collateral_ratio_bps,
            max_collateral,
        )
    }

    pub fn add_synthetic(
        ctx: Context<AddSynthetic>,
        feed_address: Pubkey,
        max_supply: u64,
    ) -> Result<()> {
        instructions::admin::manage_assets::add_synthetic(ctx, feed_address, max_supply)
    }

    pub fn set_max_supply(
        ctx: Context<ManageRegistry>,
        asset_address: Pubkey,
        new_max_supply: u64,
    ) -> Result<()> {
        instructions::admin::manage_assets::set_max_supply(ctx, asset_address, new_max_supply)
    }

    pub fn set_collateral_ratio(
        ctx: Context<ManageRegistry>,
        collateral_address: Pubkey,
        collateral_ratio_bps: u16,
    ) -> Result<()> {
        instructions::admin::manage_assets::set_collateral_ratio(
            ctx,
            collateral_address,
            collateral_ratio_bps,
        )
    }

    pub fn set_max_collateral(
        ctx: Context<ManageRegistry>,
        collateral_address: Pubkey,
        max_collateral: u64,
    ) -> Result<()> {
        instructions::admin::manage_assets::set_max_collateral(
            ctx,
            collateral_address,
            max_collateral,
        )
    }

    pub fn set_price_feed(
        ctx: Context<ManageRegistry>,
        old_feed_address: Pubkey,
        new_feed_address: Pubkey,
    ) -> Result<()> {
        instructions::admin::manage_assets::set_price_feed(ctx, old_feed_address, new_feed_address)
    }

    pub fn set_settlement_slot(
        ctx: Context<ManageRegistry>,
        synthetic_address: Pubkey,
        settlement_slot: u64,
    ) -> Result<()> {
        instructions::admin::manage_assets::set_settlement_slot(
            ctx,
            synthetic_address,
            settlement_slot,
        )
    }

    pub fn withdraw_swap_tax(ctx: Context<WithdrawUsdReserve>, amount: u64) -> Result<()> {
        instructions::admin::collect_reserves::withdraw_swap_tax(ctx, amount)
    }

    pub fn withdraw_accumulated_debt_interest(
        ctx: Context<WithdrawUsdReserve>,
        amount: u64,
    ) -> Result<()> {
        instructions::admin::collect_reserves::withdraw_accumulated_debt_interest(ctx, amount)
    }

    pub fn withdraw_liquidation_penalty(
        ctx: Context<WithdrawLiquidationPenalty>,
        amount: u64,
    ) -> Result<()> {
        instructions::admin::collect_reserves::withdraw_liquidation_penalty(ctx, amount)
    }

    // ── Oracle ──────────────────────────────────────────────

    pub fn update_prices(ctx: Context<UpdatePrices>) -> Result<()> {
        instructions::oracle::update_prices::handler(ctx)
    }

    // ── Exchange ────────────────────────────────────────────

    pub fn create_exchange_account(ctx: Context<CreateExchangeAccount>) -> Result<()> {
        instructions::user::create_exchange_account::handler(ctx)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::user::deposit::handler(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::user::withdraw::handler(ctx, amount)
    }

    pub fn mint(ctx: Context<MintSynthetic>, amount: u64) -> Result<()> {
        instructions::user::mint::handler(ctx, amount)
    }

    pub fn burn(ctx: Context<BurnSynthetic>, amount: u64) -> Result<()> {
        instructions::user::burn::handler(ctx, amount)
    }

    pub fn swap(ctx: Context<Swap>, amount: u64) -> Result<()> {
        instructions::user::swap::handler(ctx, amount)
    }

    pub fn liquidate(ctx: Context<Liquidate>, amount: u64) -> Result<()> {
        instructions::user::liquidate::handler(ctx, amount)
    }

    pub fn check_account_collateralization(ctx: Context<CheckCollateralization>) -> Result<()> {
        instructions::user::check_collateralization::handler(ctx)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::user::rewards::claim_rewards(ctx)
    }

    pub fn withdraw_rewards(ctx: Context<WithdrawRewards>) -> Result<()> {
        instructions::user::rewards::withdraw_rewards(ctx)
    }

    pub fn settle_synthetic(ctx: Context<SettleSynthetic>) -> Result<()> {
        instructions::user::settlement::settle_synthetic(ctx)
    }

    pub fn swap_settled_synthetic(ctx: Context<SwapSettledSynthetic>, amount: u64) -> Result<()> {
        instructions::user::settlement::swap_settled_synthetic(ctx, amount)
    }

    // ── Vaults ──────────────────────────────────────────────

    pub fn create_vault(
        ctx: Context<CreateVault>,
        params: instructions::vault::create_vault::CreateVaultParams,
    ) -> Result<()> {
        instructions::vault::create_vault::handler(ctx, params)
    }

    pub fn create_vault_entry(ctx: Context<CreateVaultEntry>) -> Result<()> {
        instructions::vault::create_vault_entry::handler(ctx)
    }

    pub fn deposit_vault(ctx: Context<DepositVault>, amount: u64) -> Result<()> {
        instructions::vault::deposit_vault::handler(ctx, amount)
    }

    pub fn borrow_vault(ctx: Context<BorrowVault>, amount: u64) -> Result<()> {
        instructions::vault::borrow_vault::handler(ctx, amount)
    }

    pub fn withdraw_vault(ctx: Context<WithdrawVault>, amount: u64) -> Result<()> {
        instructions::vault::withdraw_vault::handler(ctx, amount)
    }

    pub fn repay_vault(ctx: Context<RepayVault>, amount: u64) -> Result<()> {
        instructions::vault::repay_vault::handler(ctx, amount)
    }

    pub fn liquidate_vault(ctx: Context<LiquidateVault>, amount: u64) -> Result<()> {
        instructions::vault::liquidate_vault::handler(ctx, amount)
    }

    pub fn trigger_vault_entry_debt_adjustment(
        ctx: Context<TriggerVaultEntryDebtAdjustment>,
    ) -> Result<()> {
        instructions::vault::trigger_debt_adjustment::handler(ctx)
    }

    pub fn set_vault_halted(ctx: Context<SetVaultHalted>, halted: bool) -> Result<()> {
        instructions::vault::set_vault_halted::handler(ctx, halted)
    }

    // ── Swaplines ───────────────────────────────────────────

    pub fn create_swapline(ctx: Context<CreateSwapline>, limit: u64, fee_bps: u16) -> Result<()> {
        instructions::swapline::create_swapline::handler(ctx, limit, fee_bps)
    }

    pub fn native_to_synthetic(ctx: Context<NativeToSynthetic>, amount: u64) -> Result<()> {
        instructions::swapline::native_to_synthetic::handler(ctx, amount)
    }

    pub fn synthetic_to_native(ctx: Context<SyntheticToNative>, amount: u64) -> Result<()> {
        instructions::swapline::synthetic_to_native::handler(ctx, amount)
    }

    pub fn withdraw_swapline_fee(ctx: Context<WithdrawSwaplineFee>, amount: u64) -> Result<()> {
        instructions::swapline::withdraw_swapline_fee::handler(ctx, amount)
    }

    pub fn set_halted_swapline(ctx: Context<SetHaltedSwapline>, halted: bool) -> Result<()> {
        instructions::swapline::set_halted_swapline::handler(ctx, halted)
    }
}
