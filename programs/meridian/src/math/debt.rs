use anchor_lang::prelude::*;
use crate::constants::PRICE_SCALE;
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::state::{AssetRegistry, ExchangeAccount};

/// USD value (PRICE_SCALE) of `amount` raw token units with `decimals`.
pub fn value_in_usd(price: Decimal, amount: u64, decimals: u8) -> Result<Decimal> {
    Decimal::new(amount as u128, decimals)
        .mul(price)?
        .to_scale(PRICE_SCALE)
}

/// Token amount bought by `usd_value` at `price`. Truncates, so value paid out
/// never exceeds value owed.
pub fn usd_to_token_amount(price: Decimal, usd_value: Decimal, decimals: u8) -> Result<u64> {
    usd_value.div(price)?.to_scale(decimals)?.to_u64()
}

/// Shares minted against `amount` of new debt. Rounds up: debt is created in
/// the system's favor.
pub fn shares_for_mint(all_shares: u64, total_debt: Decimal, amount: u64) -> Result<u64> {
    if all_shares == 0 {
        return Ok(amount);
    }
    require!(!total_debt.is_zero(), ErrorCode::Overflow);
    let shares = (amount as u128)
        .checked_mul(all_shares as u128)
        .ok_or(ErrorCode::Overflow)?
        .checked_add(total_debt.val - 1)
        .ok_or(ErrorCode::Overflow)?
        .checked_div(total_debt.val)
        .ok_or(ErrorCode::Overflow)?;
    u64::try_from(shares).map_err(|_| ErrorCode::Overflow.into())
}

/// Shares removed for burning `amount` of debt. Rounds down: debt is burned in
/// the system's favor.
pub fn shares_for_burn(all_shares: u64, total_debt: Decimal, amount: u64) -> Result<u64> {
    if all_shares == 0 || total_debt.is_zero() {
        return Ok(0);
    }
    let shares = (amount as u128)
        .checked_mul(all_shares as u128)
        .ok_or(ErrorCode::Overflow)?
        .checked_div(total_debt.val)
        .ok_or(ErrorCode::Overflow)?;
    u64::try_from(shares).map_err(|_| ErrorCode::Overflow.into())
}

/// USD value (PRICE_SCALE) of a user's debt shares, rounded down.
pub fn shares_to_value(shares: u64, all_shares: u64, total_debt: Decimal) -> Result<Decimal> {
    if all_shares == 0 {
        return Ok(Decimal::new(0, PRICE_SCALE));
    }
    let val = (shares as u128)
        .checked_mul(total_debt.val)
        .ok_or(ErrorCode::Overflow)?
        .checked_div(all_shares as u128)
        .ok_or(ErrorCode::Overflow)?;
    Ok(Decimal::new(val, PRICE_SCALE))
}

/// Debt owed by the shared pool: for every synthetic, pool-minted supply times
/// price. Vault- and swapline-minted supply carries its own backing.
pub fn calculate_pool_debt(registry: &AssetRegistry) -> Result<Decimal> {
    let mut debt = Decimal::new(0, PRICE_SCALE);
    for synthetic in registry.synthetics() {
        let asset = &registry.assets[synthetic.asset_index as usize];
        let pool_supply = synthetic.pool_supply()?;
        let value = pool_supply.mul(asset.price)?.to_scale(PRICE_SCALE)?;
        debt = debt.add(value)?;
    }
    Ok(debt)
}

/// Borrow capacity in USD: sum of deposited collateral values, each discounted
/// by its collateral ratio.
pub fn calculate_max_debt(
    account: &ExchangeAccount,
    registry: &AssetRegistry,
) -> Result<Decimal> {
    let mut max_debt = Decimal::new(0, PRICE_SCALE);
    for entry in account.entries() {
        let collateral = &registry.collaterals[entry.index as usize];
        let asset = &registry.assets[collateral.asset_index as usize];
        let value = value_in_usd(asset.price, entry.amount, collateral.decimals())?;
        max_debt = max_debt.add(value.mul(collateral.collateral_ratio)?)?;
    }
    Ok(max_debt)
}

/// Vault liquidation trigger: collateral value strictly below debt value
/// times the liquidation threshold.
pub fn vault_liquidatable(
    collateral_value: Decimal,
    debt_value: Decimal,
    liquidation_threshold: Decimal,
) -> Result<bool> {
    collateral_value.lt(debt_value.mul(liquidation_threshold)?)
}

/// Largest USD value withdrawable from one collateral without breaking the
/// collateralization requirement.
pub fn calculate_max_withdraw_in_usd(
    max_borrow: Decimal,
    user_debt: Decimal,
    collateral_ratio: Decimal,
    health_factor: Decimal,
) -> Result<Decimal> {
    if !max_borrow.gt(user_debt)? {
        return Ok(Decimal::new(0, PRICE_SCALE));
    }
    let headroom = max_borrow.sub(user_debt)?;
    // withdrawing value v costs v * ratio * health_factor of capacity
    headroom.div(collateral_ratio.mul(health_factor)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Asset, Collateral, CollateralEntry, Synthetic};

    fn usd(val: u128) -> Decimal {
        Decimal::new(val, PRICE_SCALE)
    }

    #[test]
    fn test_shares_empty_pool() {
        assert_eq!(shares_for_mint(0, usd(0), 100).unwrap(), 100);
        assert_eq!(shares_for_burn(0, usd(0), 100).unwrap(), 0);
        assert_eq!(shares_to_value(0, 0, usd(0)).unwrap().val, 0);
    }

    #[test]
    fn test_shares_rounding_directions() {
        // S = 100, D = 300: minting 100 -> ceil(100 * 100 / 300) = 34
        assert_eq!(shares_for_mint(100, usd(300), 100).unwrap(), 34);
        // burning 100 -> floor = 33
        assert_eq!(shares_for_burn(100, usd(300), 100).unwrap(), 33);
    }

    #[test]
    fn test_mint_burn_round_trip() {
        // one user, no price change: value of shares after mint equals the
        // minted amount up to ledger rounding in the system's favor
        let mut all_shares = 0u64;
        let mut total_debt = usd(0);
        let amount = 1_000_000u64;

        let minted = shares_for_mint(all_shares, total_debt, amount).unwrap();
        all_shares += minted;
        total_debt = total_debt.add(usd(amount as u128)).unwrap();

        let user_debt = shares_to_value(minted, all_shares, total_debt).unwrap();
        assert_eq!(user_debt.val, amount as u128);

        let burned = shares_for_burn(all_shares, total_debt, amount).unwrap();
        assert!(burned <= minted);
        all_shares -= burned;
        total_debt = total_debt.sub(usd(amount as u128)).unwrap();
        assert_eq!(total_debt.val, 0);
    }

    #[test]
    fn test_share_value_dilutes_with_interest() {
        // interest raises D without touching S: every share owes more
        let all_shares = 1_000u64;
        let before = shares_to_value(500, all_shares, usd(1_000_000)).unwrap();
        let after = shares_to_value(500, all_shares, usd(1_100_000)).unwrap();
        assert!(after.gt(before).unwrap());
    }

    #[test]
    fn test_value_in_usd() {
        // 1000 units at 6 decimals, price 2.0
        let price = Decimal::from_price(2_000_000);
        let value = value_in_usd(price, 1_000_000_000, 6).unwrap();
        assert_eq!(value, usd(2_000_000_000));
    }

    #[test]
    fn test_usd_to_token_amount_truncates() {
        let price = Decimal::from_price(3_000_000);
        // 10.0 USD at price 3.0 -> 3.333333 tokens
        let amount = usd_to_token_amount(price, usd(10_000_000), 6).unwrap();
        assert_eq!(amount, 3_333_333);
    }

    fn registry_with_collateral(price: u64, ratio_bps: u16) -> AssetRegistry {
        let mut registry = AssetRegistry::default();
        registry
            .append_asset(Asset {
                price: Decimal::from_price(price),
                ..Default::default()
            })
            .unwrap();
        registry
            .append_collateral(Collateral {
                asset_index: 0,
                reserve_balance: Decimal::new(0, 6),
                collateral_ratio: Decimal::from_bps(ratio_bps),
                max_collateral: Decimal::new(u64::MAX as u128, 6),
                ..Default::default()
            })
            .unwrap();
        registry
    }

    #[test]
    fn test_max_debt_scenario() {
        // price 2.0, deposit 1000 units, ratio 0.5 -> capacity 1000 USD
        let registry = registry_with_collateral(2_000_000, 5_000);
        let mut account = ExchangeAccount {
            owner: Pubkey::default(),
            bump: 0,
            debt_shares: 0,
            liquidation_deadline: u64::MAX,
            user_staking: Default::default(),
            head: 0,
            collaterals: [CollateralEntry::default(); 32],
        };
        account
            .append(CollateralEntry {
                amount: 1_000_000_000,
                collateral_address: Pubkey::default(),
                index: 0,
            })
            .unwrap();

        let max_debt = calculate_max_debt(&account, &registry).unwrap();
        assert_eq!(max_debt, usd(1_000_000_000));
    }

    #[test]
    fn test_pool_debt_skips_vault_and_swapline_supply() {
        let mut registry = registry_with_collateral(2_000_000, 5_000);
        registry
            .append_synthetic(Synthetic {
                asset_index: 0,
                supply: Decimal::new(1_000_000_000, 6),
                max_supply: Decimal::new(u64::MAX as u128, 6),
                borrowed_supply: Decimal::new(400_000_000, 6),
                swapline_supply: Decimal::new(100_000_000, 6),
                ..Default::default()
            })
            .unwrap();
        // 500 tokens * 2.0 = 1000 USD
        let debt = calculate_pool_debt(&registry).unwrap();
        assert_eq!(debt, usd(1_000_000_000));
    }

    #[test]
    fn test_vault_liquidatable_boundary() {
        let threshold = Decimal::from_bps(12_000); // 120%
        let debt = usd(1_000_000_000);
        // exactly at the threshold: refused
        assert!(!vault_liquidatable(usd(1_200_000_000), debt, threshold).unwrap());
        assert!(!vault_liquidatable(usd(1_200_000_001), debt, threshold).unwrap());
        // strictly below: allowed
        assert!(vault_liquidatable(usd(1_199_999_999), debt, threshold).unwrap());
    }

    #[test]
    fn test_max_withdraw() {
        let ratio = Decimal::from_bps(5_000);
        let health = Decimal::from_bps(10_000);
        // capacity 1000, debt 400 -> headroom 600 / 0.5 = 1200 USD of collateral
        let max = calculate_max_withdraw_in_usd(usd(1_000_000_000), usd(400_000_000), ratio, health)
            .unwrap();
        assert_eq!(max, usd(1_200_000_000));
        // no headroom
        let none =
            calculate_max_withdraw_in_usd(usd(400_000_000), usd(400_000_000), ratio, health)
                .unwrap();
        assert_eq!(none.val, 0);
    }
}
