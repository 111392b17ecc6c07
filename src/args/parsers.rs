use std::time::Duration;

use reqwest::Url;

use super::types::TargetRate;
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_target_rate(s: &str) -> AppResult<TargetRate> {
    s.parse::<TargetRate>().map_err(AppError::from)
}

pub(crate) fn parse_target_url(s: &str) -> AppResult<Url> {
    let value = s.trim();
    let url = Url::parse(value).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: value.to_owned(),
            source: err,
        })
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            url: value.to_owned(),
        }));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(url)
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(AppError::validation(
            ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            },
        ));
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part.parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
    })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(AppError::validation(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            }));
        }
    };

    if duration.as_millis() == 0 {
        return Err(AppError::validation(ValidationError::DurationZero));
    }

    Ok(duration)
}
