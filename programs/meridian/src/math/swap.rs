use anchor_lang::prelude::*;
use crate::constants::{DISCOUNT_TIER_BASE, MAX_DISCOUNT_PERCENT};
use crate::error::ErrorCode;
use crate::math::debt::{usd_to_token_amount, value_in_usd};
use crate::math::decimal::Decimal;
use crate::state::Asset;

/// Swap fee discount in percent, based on the user's main-collateral balance.
/// Each doubling of the base holding earns another percent, capped.
pub fn amount_to_discount(collateral_balance: u64) -> u8 {
    let mut threshold = DISCOUNT_TIER_BASE;
    let mut discount = 0u8;
    while collateral_balance >= threshold && discount < MAX_DISCOUNT_PERCENT {
        discount += 1;
        threshold = match threshold.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    discount
}

/// Fee after applying a percent discount.
pub fn effective_fee(fee: Decimal, discount: u8) -> Result<Decimal> {
    fee.mul_ratio(100 - discount as u128, 100)
}

/// Output token amount and the fee taken, converting `amount` of the input
/// synthetic at oracle prices. The fee is subtracted from the output value.
pub fn calculate_swap_out_amount(
    asset_in: &Asset,
    asset_for: &Asset,
    decimals_in: u8,
    decimals_for: u8,
    amount: u64,
    fee: Decimal,
) -> Result<(u64, Decimal)> {
    let value_in = value_in_usd(asset_in.price, amount, decimals_in)?;
    // fee rounds up, output value down: both against the trader
    let fee_usd = value_in.mul_up(fee)?;
    let value_out = value_in.sub(fee_usd)?;
    let amount_for = usd_to_token_amount(asset_for.price, value_out, decimals_for)?;
    require!(amount_for > 0, ErrorCode::InsufficientValueTrade);
    Ok((amount_for, fee_usd))
}

/// Portion of the swap fee retained by the exchange as tax.
pub fn calculate_swap_tax(fee_usd: Decimal, swap_tax_ratio: Decimal) -> Result<Decimal> {
    fee_usd.mul(swap_tax_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRICE_SCALE;

    fn asset_with_price(price: u64) -> Asset {
        Asset {
            price: Decimal::from_price(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_amount_to_discount_tiers() {
        assert_eq!(amount_to_discount(0), 0);
        assert_eq!(amount_to_discount(DISCOUNT_TIER_BASE - 1), 0);
        assert_eq!(amount_to_discount(DISCOUNT_TIER_BASE), 1);
        assert_eq!(amount_to_discount(DISCOUNT_TIER_BASE * 2), 2);
        assert_eq!(amount_to_discount(DISCOUNT_TIER_BASE * 4), 3);
        assert_eq!(amount_to_discount(u64::MAX), MAX_DISCOUNT_PERCENT);
    }

    #[test]
    fn test_effective_fee() {
        let fee = Decimal::from_bps(30); // 0.3%
        assert_eq!(effective_fee(fee, 0).unwrap(), fee);
        // 10% off
        assert_eq!(effective_fee(fee, 10).unwrap(), Decimal::new(2_700, 6));
        // full ladder
        assert_eq!(
            effective_fee(fee, MAX_DISCOUNT_PERCENT).unwrap(),
            Decimal::new(2_550, 6)
        );
    }

    #[test]
    fn test_swap_out_amount() {
        // sell 10.0 of a 2.0-priced synthetic for a 1.0-priced one, 0.3% fee
        let asset_in = asset_with_price(2_000_000);
        let asset_for = asset_with_price(1_000_000);
        let (amount_for, fee_usd) = calculate_swap_out_amount(
            &asset_in,
            &asset_for,
            6,
            6,
            10_000_000,
            Decimal::from_bps(30),
        )
        .unwrap();
        // value in = 20.0, fee = 0.06, out = 19.94
        assert_eq!(fee_usd, Decimal::new(60_000, PRICE_SCALE));
        assert_eq!(amount_for, 19_940_000);
    }

    #[test]
    fn test_swap_zero_output_rejected() {
        let asset_in = asset_with_price(1);
        let asset_for = asset_with_price(2_000_000_000);
        let result =
            calculate_swap_out_amount(&asset_in, &asset_for, 6, 6, 1, Decimal::from_bps(30));
        assert!(result.is_err());
    }

    #[test]
    fn test_swap_tax() {
        // 20% of a 0.06 fee
        let tax = calculate_swap_tax(
            Decimal::new(60_000, PRICE_SCALE),
            Decimal::from_bps(2_000),
        )
        .unwrap();
        assert_eq!(tax, Decimal::new(12_000, PRICE_SCALE));
    }
}
