use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

pub type MemberName = String;

// Always three upper-case ASCII letters
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self, CurrencyError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CurrencyError::Empty);
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::Malformed(code.to_string()));
        }
        Ok(Currency(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// from_name owes to_name
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub from_name: MemberName,
    pub to_name: MemberName,
    pub amount: f64,
    pub currency: Currency,
}

impl Debt {
    pub fn new(from_name: &str, to_name: &str, amount: f64, currency: &Currency) -> Self {
        Debt {
            from_name: from_name.to_string(),
            to_name: to_name.to_string(),
            amount,
            currency: currency.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    pub payer: MemberName,
    pub receivers: Vec<MemberName>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub from_name: MemberName,
    pub to_name: MemberName,
    pub amount: f64,
    pub currency: Currency,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}
