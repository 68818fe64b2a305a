use thiserror::Error;

use crate::schemas::Currency;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("currency code is empty")]
    Empty,
    #[error("currency code `{0}` must be three ASCII letters")]
    Malformed(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("no exchange rate from {from} to {to}")]
    UnknownRate { from: Currency, to: Currency },
    #[error("invalid exchange rate {rate} for {currency}")]
    InvalidRate { currency: Currency, rate: f64 },
    #[error("converting {from} to {to} gave a non-finite amount")]
    NonFinite { from: Currency, to: Currency },
    #[error("exchange rate provider failed: {0}")]
    Provider(String),
}
