use anchor_lang::prelude::*;
use crate::constants::SECONDS_PER_YEAR;
use crate::math::decimal::Decimal;
use crate::state::{Exchange, Vault, VaultEntry};

/// Accrue interest on the shared debt pool since the last adjustment and
/// return the total debt including all accumulated interest. Interest inflates
/// the pool debt, diluting every share uniformly; the accrued amount is
/// claimable by the admin. Rounds up, charged against debtors.
pub fn accrue_pool_debt_interest(
    state: &mut Exchange,
    pool_debt: Decimal,
    now: i64,
) -> Result<Decimal> {
    let mut total_debt = pool_debt.add(state.accumulated_debt_interest)?;

    let elapsed = now.saturating_sub(state.last_debt_adjustment);
    if elapsed > 0 && !state.debt_interest_rate.is_zero() && !total_debt.is_zero() {
        let interest = total_debt
            .mul_up(state.debt_interest_rate)?
            .mul_ratio_up(elapsed as u128, SECONDS_PER_YEAR as u128)?;
        state.accumulated_debt_interest = state.accumulated_debt_interest.add(interest)?;
        total_debt = total_debt.add(interest)?;
    }
    state.last_debt_adjustment = now;
    Ok(total_debt)
}

/// Advance a vault's interest-rate accumulator: rate_per_year * elapsed / year,
/// applied lazily at last_update.
pub fn adjust_vault_interest_rate(vault: &mut Vault, now: i64) -> Result<()> {
    let elapsed = now.saturating_sub(vault.last_update);
    if elapsed > 0 {
        let delta = vault
            .debt_interest_rate
            .mul_ratio(elapsed as u128, SECONDS_PER_YEAR as u128)?;
        vault.accumulated_interest_rate = vault.accumulated_interest_rate.add(delta)?;
        vault.last_update = now;
    }
    Ok(())
}

/// Settle interest owed by an entry since it was last touched. Must run before
/// any other entry mutation. Rounds up, charged against the borrower.
pub fn settle_vault_entry_interest(vault: &mut Vault, entry: &mut VaultEntry) -> Result<()> {
    let delta = vault
        .accumulated_interest_rate
        .sub(entry.last_accumulated_interest_rate)?;
    if !delta.is_zero() && !entry.synthetic_amount.is_zero() {
        let owed = entry.synthetic_amount.mul_up(delta)?;
        entry.synthetic_amount = entry.synthetic_amount.add(owed)?;
        vault.accumulated_interest = vault.accumulated_interest.add(owed)?;
        vault.mint_amount = vault.mint_amount.add(owed)?;
    }
    entry.last_accumulated_interest_rate = vault.accumulated_interest_rate;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{INTEREST_RATE_SCALE, PRICE_SCALE};

    fn vault_with_rate(rate_bps: u16) -> Vault {
        Vault {
            bump: 0,
            halted: false,
            synthetic: Pubkey::default(),
            collateral: Pubkey::default(),
            collateral_reserve: Pubkey::default(),
            liquidation_fund: Pubkey::default(),
            collateral_price_feed: Pubkey::default(),
            oracle_type: 0,
            open_fee: Decimal::from_bps(0),
            debt_interest_rate: Decimal::from_bps(rate_bps)
                .to_scale(INTEREST_RATE_SCALE)
                .unwrap(),
            collateral_ratio: Decimal::from_bps(5_000),
            liquidation_threshold: Decimal::from_bps(10_000),
            liquidation_ratio: Decimal::from_bps(5_000),
            penalty_to_liquidator: Decimal::from_bps(500),
            penalty_to_exchange: Decimal::from_bps(500),
            max_borrow: Decimal::new(u64::MAX as u128, 6),
            mint_amount: Decimal::new(0, 6),
            collateral_amount: Decimal::new(0, 6),
            accumulated_interest: Decimal::new(0, 6),
            accumulated_interest_rate: Decimal::new(0, INTEREST_RATE_SCALE),
            last_update: 0,
            _reserved: [0u8; 64],
        }
    }

    fn entry_with_debt(amount: u128) -> VaultEntry {
        VaultEntry {
            owner: Pubkey::default(),
            vault: Pubkey::default(),
            bump: 0,
            last_accumulated_interest_rate: Decimal::new(0, INTEREST_RATE_SCALE),
            synthetic_amount: Decimal::new(amount, 6),
            collateral_amount: Decimal::new(0, 6),
        }
    }

    #[test]
    fn test_vault_rate_accumulator_monotone() {
        let mut vault = vault_with_rate(1_000); // 10% per year
        adjust_vault_interest_rate(&mut vault, 0).unwrap();
        let r0 = vault.accumulated_interest_rate;
        adjust_vault_interest_rate(&mut vault, 3600).unwrap();
        let r1 = vault.accumulated_interest_rate;
        assert!(r1.gt(r0).unwrap());
        // going backwards in time is a no-op
        adjust_vault_interest_rate(&mut vault, 1800).unwrap();
        assert_eq!(vault.accumulated_interest_rate, r1);
        assert_eq!(vault.last_update, 3600);
    }

    #[test]
    fn test_entry_interest_settlement_monotone() {
        let mut vault = vault_with_rate(1_000);
        let mut entry = entry_with_debt(1_000_000_000); // 1000.0

        // a year passes
        adjust_vault_interest_rate(&mut vault, SECONDS_PER_YEAR as i64).unwrap();
        let before = entry.synthetic_amount;
        settle_vault_entry_interest(&mut vault, &mut entry).unwrap();
        assert!(entry.synthetic_amount.gt(before).unwrap());
        // 10% of 1000.0, rounded up
        assert_eq!(entry.synthetic_amount.val, 1_100_000_000);
        assert_eq!(vault.accumulated_interest.val, 100_000_000);
        assert_eq!(vault.mint_amount.val, 100_000_000);

        // settling again with no elapsed time changes nothing
        let snapshot = entry.synthetic_amount;
        settle_vault_entry_interest(&mut vault, &mut entry).unwrap();
        assert_eq!(entry.synthetic_amount, snapshot);
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        let mut vault = vault_with_rate(0);
        let mut entry = entry_with_debt(1_000_000_000);
        adjust_vault_interest_rate(&mut vault, SECONDS_PER_YEAR as i64).unwrap();
        settle_vault_entry_interest(&mut vault, &mut entry).unwrap();
        assert_eq!(entry.synthetic_amount.val, 1_000_000_000);
    }

    fn fresh_state() -> Exchange {
        Exchange {
            admin: Pubkey::default(),
            bump: 0,
            halted: false,
            registry: Pubkey::default(),
            debt_shares: 0,
            health_factor: Decimal::from_bps(10_000),
            debt_interest_rate: Decimal::from_bps(100)
                .to_scale(INTEREST_RATE_SCALE)
                .unwrap(), // 1% per year
            accumulated_debt_interest: Decimal::new(0, PRICE_SCALE),
            last_debt_adjustment: 0,
            fee: Decimal::from_bps(30),
            swap_tax_ratio: Decimal::from_bps(2_000),
            swap_tax_reserve: Decimal::new(0, PRICE_SCALE),
            liquidation_rate: Decimal::from_bps(2_000),
            penalty_to_liquidator: Decimal::from_bps(500),
            penalty_to_exchange: Decimal::from_bps(500),
            liquidation_buffer: 172_800,
            max_delay: 0,
            staking: Default::default(),
            _reserved: [0u8; 64],
        }
    }

    #[test]
    fn test_pool_debt_interest_accrues_and_checkpoints() {
        let mut state = fresh_state();
        let pool_debt = Decimal::new(1_000_000_000, PRICE_SCALE); // 1000 USD

        let total = accrue_pool_debt_interest(&mut state, pool_debt, SECONDS_PER_YEAR as i64)
            .unwrap();
        // 1% of 1000 = 10 USD
        assert_eq!(state.accumulated_debt_interest.val, 10_000_000);
        assert_eq!(total.val, 1_010_000_000);
        assert_eq!(state.last_debt_adjustment, SECONDS_PER_YEAR as i64);

        // immediately after, nothing further accrues
        let again = accrue_pool_debt_interest(&mut state, pool_debt, SECONDS_PER_YEAR as i64)
            .unwrap();
        assert_eq!(again.val, 1_010_000_000);
    }
}
