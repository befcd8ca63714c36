//! Fixed-point price normalization and timestamp conversion
//!
//! Raw oracle prices are unscaled integers. Display values are computed as
//! `raw / 10^decimals` entirely in `U256` arithmetic and rendered with
//! [`DISPLAY_PRECISION`] fractional digits, rounding half away from zero.

use alloy_primitives::U256;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{OracleError, OracleResult};

/// Fractional digits in a normalized price
pub const DISPLAY_PRECISION: u8 = 2;

/// Largest decimals value whose scale factor fits in a `U256`
pub const MAX_DECIMALS: u8 = 77;

/// Scale of the `getPriceInUSD` representation
pub const USD_PRICE_DECIMALS: u8 = 2;

/// `10^exp`, or `None` if it overflows `U256`
pub fn pow10(exp: u32) -> Option<U256> {
    let ten = U256::from(10u8);
    (0..exp).try_fold(U256::from(1u8), |acc, _| acc.checked_mul(ten))
}

/// Scale `raw / 10^decimals` to an integer count of display units
/// (hundredths at the default precision), rounding half up.
fn to_display_units(raw: U256, decimals: u8) -> OracleResult<U256> {
    if decimals > MAX_DECIMALS {
        return Err(OracleError::DecimalsOutOfRange {
            decimals,
            max: MAX_DECIMALS,
        });
    }

    if decimals >= DISPLAY_PRECISION {
        let divisor = pow10(u32::from(decimals - DISPLAY_PRECISION))
            .ok_or(OracleError::DecimalsOutOfRange { decimals, max: MAX_DECIMALS })?;
        let units = raw / divisor;
        let rem = raw % divisor;

        // rem / divisor >= 1/2, written without doubling rem
        if !rem.is_zero() && rem >= divisor - rem {
            units
                .checked_add(U256::from(1u8))
                .ok_or_else(|| OracleError::PriceOutOfRange(raw.to_string()))
        } else {
            Ok(units)
        }
    } else {
        let multiplier = pow10(u32::from(DISPLAY_PRECISION - decimals))
            .ok_or_else(|| OracleError::PriceOutOfRange(raw.to_string()))?;
        raw.checked_mul(multiplier)
            .ok_or_else(|| OracleError::PriceOutOfRange(raw.to_string()))
    }
}

/// Render `raw / 10^decimals` with two fractional digits.
///
/// `normalize_price(U256::from(123456), 4)` yields `"12.35"`.
pub fn normalize_price(raw: U256, decimals: u8) -> OracleResult<String> {
    let units = to_display_units(raw, decimals)?;
    let scale = U256::from(100u8);
    let whole = units / scale;
    let frac = (units % scale).as_limbs()[0];

    Ok(format!("{}.{:02}", whole, frac))
}

/// Convert seconds since the Unix epoch to an ISO-8601 UTC string with
/// millisecond precision, e.g. `2023-11-14T22:13:20.000Z`.
pub fn to_iso8601(updated_at: u64) -> OracleResult<String> {
    let secs = i64::try_from(updated_at)
        .map_err(|_| OracleError::TimestampOutOfRange(updated_at.to_string()))?;

    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| OracleError::TimestampOutOfRange(updated_at.to_string()))
}

/// Narrow a `U256` contract value to `u64`
pub fn u256_to_u64(value: U256) -> Option<u64> {
    if value.bit_len() <= 64 {
        Some(value.as_limbs()[0])
    } else {
        None
    }
}
