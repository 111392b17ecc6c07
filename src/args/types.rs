use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

use crate::error::ValidationError;

/// Fractional digits accepted on `--tps`.
const RATE_FRACTION_DIGITS: usize = 3;
const MILLI_PER_UNIT: u64 = 1_000;
/// One second in nanoseconds, scaled by `MILLI_PER_UNIT`.
const NANOS_PER_SEC_MILLI: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Target request rate, stored in milli-requests per second so pacing stays
/// in integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRate(NonZeroU64);

impl TargetRate {
    #[must_use]
    pub const fn milli_rps(self) -> u64 {
        self.0.get()
    }

    /// Requests per second scaled by 100, for two-decimal display.
    #[must_use]
    pub const fn rps_x100(self) -> u64 {
        self.milli_rps().saturating_add(5).saturating_div(10)
    }

    /// Time budget for one request at this rate.
    #[must_use]
    pub fn interval(self) -> Duration {
        let nanos = NANOS_PER_SEC_MILLI.checked_div(self.milli_rps()).unwrap_or(0);
        Duration::from_nanos(nanos)
    }
}

impl TryFrom<u64> for TargetRate {
    type Error = ValidationError;

    fn try_from(rps: u64) -> Result<Self, Self::Error> {
        let milli = rps
            .checked_mul(MILLI_PER_UNIT)
            .ok_or(ValidationError::RateOverflow)?;
        NonZeroU64::new(milli)
            .map(TargetRate)
            .ok_or(ValidationError::RateZero)
    }
}

impl std::str::FromStr for TargetRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ValidationError::RateEmpty);
        }
        let invalid = || ValidationError::InvalidRateFormat {
            value: value.to_owned(),
        };

        let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|ch| ch.is_ascii_digit())
            || !fraction.chars().all(|ch| ch.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > RATE_FRACTION_DIGITS {
            return Err(ValidationError::RateTooPrecise {
                value: value.to_owned(),
                max_digits: RATE_FRACTION_DIGITS,
            });
        }

        let whole_units: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|err| ValidationError::InvalidNumber { source: err })?
        };
        let fraction_milli: u64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = RATE_FRACTION_DIGITS);
            padded
                .parse()
                .map_err(|err| ValidationError::InvalidNumber { source: err })?
        };

        let milli = whole_units
            .checked_mul(MILLI_PER_UNIT)
            .and_then(|scaled| scaled.checked_add(fraction_milli))
            .ok_or(ValidationError::RateOverflow)?;
        NonZeroU64::new(milli)
            .map(TargetRate)
            .ok_or(ValidationError::RateZero)
    }
}

impl fmt::Display for TargetRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let milli = self.milli_rps();
        let whole = milli.checked_div(MILLI_PER_UNIT).unwrap_or(0);
        let fraction = milli.checked_rem(MILLI_PER_UNIT).unwrap_or(0);
        if fraction == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:03}", fraction);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}
