use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ConversionError;
use crate::schemas::Currency;

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    async fn convert(
        &self,
        amount: f64,
        from: &Currency,
        to: &Currency,
    ) -> Result<f64, ConversionError>;
}

// rates[c] is how many units of c one unit of base buys
#[derive(Clone, Debug)]
pub struct RateTable {
    base: Currency,
    rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    pub fn new(base: Currency, rates: BTreeMap<Currency, f64>) -> Result<Self, ConversionError> {
        if let Some((currency, rate)) = rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(ConversionError::InvalidRate {
                currency: currency.clone(),
                rate: *rate,
            });
        }
        Ok(RateTable { base, rates })
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    fn rate(&self, currency: &Currency) -> Option<f64> {
        if *currency == self.base {
            return Some(1.0);
        }
        self.rates.get(currency).copied()
    }
}

#[async_trait]
impl CurrencyConverter for RateTable {
    async fn convert(
        &self,
        amount: f64,
        from: &Currency,
        to: &Currency,
    ) -> Result<f64, ConversionError> {
        if from == to {
            return Ok(amount);
        }
        match (self.rate(from), self.rate(to)) {
            (Some(from_rate), Some(to_rate)) => Ok(amount / from_rate * to_rate),
            _ => Err(ConversionError::UnknownRate {
                from: from.clone(),
                to: to.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn table() -> RateTable {
        let rates = BTreeMap::from([(currency("EUR"), 0.5), (currency("JPY"), 150.0)]);
        RateTable::new(currency("USD"), rates).unwrap()
    }

    #[tokio::test]
    async fn converts_through_the_base_currency() {
        let table = table();
        let usd = currency("USD");
        let eur = currency("EUR");
        let jpy = currency("JPY");

        assert_eq!(table.convert(10.0, &eur, &usd).await.unwrap(), 20.0);
        assert_eq!(table.convert(10.0, &usd, &eur).await.unwrap(), 5.0);
        assert_eq!(table.convert(1.0, &eur, &jpy).await.unwrap(), 300.0);
    }

    #[tokio::test]
    async fn same_currency_is_identity_even_without_a_rate() {
        let gbp = currency("GBP");
        assert_eq!(table().convert(7.25, &gbp, &gbp).await.unwrap(), 7.25);
    }

    #[tokio::test]
    async fn unknown_currency_is_an_error() {
        let err = table()
            .convert(1.0, &currency("GBP"), &currency("USD"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownRate {
                from: currency("GBP"),
                to: currency("USD"),
            }
        );
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        let rates = BTreeMap::from([(currency("EUR"), 0.0)]);
        assert!(matches!(
            RateTable::new(currency("USD"), rates),
            Err(ConversionError::InvalidRate { .. })
        ));
    }
}
