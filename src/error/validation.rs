use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("TPS must not be empty.")]
    RateEmpty,
    #[error("Invalid TPS '{value}'. Expected a positive number like 100 or 2.5.")]
    InvalidRateFormat { value: String },
    #[error("TPS '{value}' has more than {max_digits} decimal places.")]
    RateTooPrecise { value: String, max_digits: usize },
    #[error("TPS overflow.")]
    RateOverflow,
    #[error("TPS must be > 0.")]
    RateZero,
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[error("URL is missing host.")]
    UrlMissingHost,
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
