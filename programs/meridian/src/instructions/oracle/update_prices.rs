use anchor_lang::prelude::*;
use crate::error::ErrorCode;
use crate::events::PricesUpdated;
use crate::math::oracle::{check_confidence, ewma, read_price, OracleType, PriceUpdate};
use crate::state::AssetRegistry;

#[derive(Accounts)]
pub struct UpdatePrices<'info> {
    #[account(mut)]
    pub registry: Box<Account<'info, AssetRegistry>>,
    // price feed accounts are passed as remaining accounts
}

/// Refresh prices for every feed passed in. Validation is two-phase: all feeds
/// are parsed and checked before any asset is touched, so a single bad feed
/// rejects the whole batch.
pub fn handler(ctx: Context<UpdatePrices>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    let mut updates: Vec<(usize, PriceUpdate)> = Vec::with_capacity(ctx.remaining_accounts.len());
    for oracle_account in ctx.remaining_accounts.iter() {
        let index = registry
            .asset_index_by_feed(oracle_account.key)
            .ok_or(ErrorCode::NoAssetFound)?;
        let oracle_type = OracleType::try_from_u8(registry.assets[index].oracle_type)?;
        let update = read_price(oracle_account, oracle_type)?;
        check_confidence(update.price, update.confidence)?;
        updates.push((index, update));
    }

    let feeds = updates.len() as u8;
    for (index, update) in updates {
        let asset = &mut registry.assets[index];
        let elapsed = update.publish_time.saturating_sub(asset.last_update);
        asset.twap = ewma(asset.twap, update.price, elapsed)?;
        asset.twac = ewma(asset.twac, update.confidence, elapsed)?;
        asset.price = update.price;
        asset.confidence = update.confidence;
        asset.status = update.status.into();
        asset.last_update = update.publish_time;
    }

    let clock = Clock::get()?;
    emit!(PricesUpdated {
        registry: ctx.accounts.registry.key(),
        feeds,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
