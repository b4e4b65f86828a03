use anchor_lang::prelude::*;
use crate::constants::{
    BPS_DENOMINATOR, CHAINLINK_PROGRAM_ID, MAX_CONFIDENCE_RATIO_BPS, PRICE_SCALE,
    PYTH_PROGRAM_ID, TWAP_WINDOW_SECONDS,
};
use crate::error::ErrorCode;
use crate::math::decimal::Decimal;
use crate::state::PriceStatus;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleType {
    Pyth,
    Chainlink,
}

impl OracleType {
    pub fn try_from_u8(raw: u8) -> Result<OracleType> {
        match raw {
            0 => Ok(OracleType::Pyth),
            1 => Ok(OracleType::Chainlink),
            _ => Err(ErrorCode::InvalidOracleType.into()),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        match self {
            OracleType::Pyth => PYTH_PROGRAM_ID,
            OracleType::Chainlink => CHAINLINK_PROGRAM_ID,
        }
    }
}

impl From<OracleType> for u8 {
    fn from(oracle_type: OracleType) -> u8 {
        match oracle_type {
            OracleType::Pyth => 0,
            OracleType::Chainlink => 1,
        }
    }
}

/// Parsed sample from a price feed, normalized to PRICE_SCALE.
pub struct PriceUpdate {
    pub price: Decimal,
    pub confidence: Decimal,
    pub publish_time: i64,
    pub status: PriceStatus,
}

/// Read a price from a feed account of the given kind. The account's owner
/// must be the oracle program configured for that kind.
pub fn read_price(oracle_account: &AccountInfo, oracle_type: OracleType) -> Result<PriceUpdate> {
    require!(
        oracle_account.owner.eq(&oracle_type.program_id()),
        ErrorCode::InvalidOracleProgram
    );
    match oracle_type {
        OracleType::Pyth => read_pyth_price(oracle_account),
        OracleType::Chainlink => read_chainlink_price(oracle_account),
    }
}

// Pyth PriceUpdateV2 layout after discriminator(8) + write_authority(32)
// + verification_level(1):
//   feed_id: [u8; 32] at offset 41
//   price: i64 at offset 73
//   conf: u64 at offset 81
//   exponent: i32 at offset 89
//   publish_time: i64 at offset 93
fn read_pyth_price(oracle_account: &AccountInfo) -> Result<PriceUpdate> {
    let data = oracle_account.try_borrow_data()?;
    require!(data.len() >= 101, ErrorCode::InvalidOracleProgram);

    let price_raw = i64::from_le_bytes(
        data[73..81]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );
    let conf_raw = u64::from_le_bytes(
        data[81..89]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );
    let exponent = i32::from_le_bytes(
        data[89..93]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );
    let publish_time = i64::from_le_bytes(
        data[93..101]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );

    require!(price_raw > 0, ErrorCode::PriceConfidenceOutOfRange);

    Ok(PriceUpdate {
        price: Decimal::from_price(normalize_price(price_raw as u64, exponent)?),
        confidence: Decimal::from_price(normalize_price(conf_raw, exponent)?),
        publish_time,
        status: PriceStatus::Trading,
    })
}

// Chainlink store transmission layout (header then latest round):
//   decimals: u8 at offset 138
//   latest round timestamp: u32 at offset 184
//   latest round answer: i128 at offset 192
fn read_chainlink_price(oracle_account: &AccountInfo) -> Result<PriceUpdate> {
    let data = oracle_account.try_borrow_data()?;
    require!(data.len() >= 208, ErrorCode::InvalidOracleProgram);

    let decimals = data[138];
    let timestamp = u32::from_le_bytes(
        data[184..188]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );
    let answer = i128::from_le_bytes(
        data[192..208]
            .try_into()
            .map_err(|_| ErrorCode::InvalidOracleProgram)?,
    );

    require!(answer > 0, ErrorCode::PriceConfidenceOutOfRange);
    let price = Decimal::new(answer as u128, decimals).to_scale(PRICE_SCALE)?;

    Ok(PriceUpdate {
        price,
        // Chainlink rounds publish no confidence interval
        confidence: Decimal::new(0, PRICE_SCALE),
        publish_time: timestamp as i64,
        status: PriceStatus::Trading,
    })
}

/// Scale a raw oracle mantissa with `exponent` to PRICE_SCALE.
pub fn normalize_price(raw_price: u64, exponent: i32) -> Result<u64> {
    let shift = PRICE_SCALE as i32 + exponent; // e.g. 6 + (-8) = -2
    if shift >= 0 {
        (raw_price as u128)
            .checked_mul(10u128.pow(shift as u32))
            .ok_or(ErrorCode::Overflow)?
            .try_into()
            .map_err(|_| ErrorCode::Overflow.into())
    } else {
        Ok(raw_price / 10u64.pow((-shift) as u32))
    }
}

/// Confidence must stay within a fixed fraction of price, or the whole price
/// update batch is rejected.
pub fn check_confidence(price: Decimal, confidence: Decimal) -> Result<()> {
    let bound = price
        .val
        .checked_mul(MAX_CONFIDENCE_RATIO_BPS as u128)
        .ok_or(ErrorCode::Overflow)?;
    let scaled_confidence = confidence
        .val
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(ErrorCode::Overflow)?;
    require!(scaled_confidence <= bound, ErrorCode::PriceConfidenceOutOfRange);
    Ok(())
}

/// Exponentially-weighted rolling average, weighted by elapsed time over the
/// TWAP window. A full window (or more) replaces the average entirely.
pub fn ewma(previous: Decimal, sample: Decimal, elapsed: i64) -> Result<Decimal> {
    if previous.is_zero() || elapsed >= TWAP_WINDOW_SECONDS {
        return Ok(sample);
    }
    let elapsed = elapsed.max(0) as u128;
    let window = TWAP_WINDOW_SECONDS as u128;
    if sample.gte(previous)? {
        let step = sample.sub(previous)?.mul_ratio(elapsed, window)?;
        previous.add(step)
    } else {
        let step = previous.sub(sample)?.mul_ratio(elapsed, window)?;
        previous.sub(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_type_round_trip() {
        assert_eq!(OracleType::try_from_u8(0).unwrap(), OracleType::Pyth);
        assert_eq!(OracleType::try_from_u8(1).unwrap(), OracleType::Chainlink);
        assert!(OracleType::try_from_u8(2).is_err());
    }

    #[test]
    fn test_normalize_price() {
        // pyth-style exponent -8: 2.0 -> 200_000_000 raw
        assert_eq!(normalize_price(200_000_000, -8).unwrap(), 2_000_000);
        // exponent -4: 2.0 -> 20_000 raw
        assert_eq!(normalize_price(20_000, -4).unwrap(), 2_000_000);
        // exponent 0: whole units
        assert_eq!(normalize_price(2, 0).unwrap(), 2_000_000);
    }

    #[test]
    fn test_check_confidence() {
        let price = Decimal::from_price(2_000_000);
        // 2.5% of 2.0 = 0.05
        assert!(check_confidence(price, Decimal::from_price(50_000)).is_ok());
        assert!(check_confidence(price, Decimal::from_price(50_001)).is_err());
    }

    #[test]
    fn test_ewma_weighting() {
        let previous = Decimal::from_price(1_000_000);
        let sample = Decimal::from_price(2_000_000);
        // half a window moves halfway
        let half = ewma(previous, sample, TWAP_WINDOW_SECONDS / 2).unwrap();
        assert_eq!(half.val, 1_500_000);
        // full window replaces
        let full = ewma(previous, sample, TWAP_WINDOW_SECONDS).unwrap();
        assert_eq!(full, sample);
        // downward move is symmetric
        let down = ewma(sample, previous, TWAP_WINDOW_SECONDS / 2).unwrap();
        assert_eq!(down.val, 1_500_000);
        // fresh average seeds from the sample
        let seeded = ewma(Decimal::from_price(0), sample, 1).unwrap();
        assert_eq!(seeded, sample);
    }
}
