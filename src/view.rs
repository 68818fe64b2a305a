use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conversion::CurrencyConverter;
use crate::exchange::{aggregate_debts, simplify_per_currency, simplify_to_currency};
use crate::schemas::{Currency, Debt, MemberName};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementMode {
    All,
    SimplifiedPerCurrency,
    ToTripCurrency,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettlementView {
    pub mode: SettlementMode,
    /// Set only when every debt is expressed in a single currency.
    pub currency: Option<Currency>,
    pub debts: Vec<Debt>,
    /// The trip-currency projection failed and raw debts are shown instead.
    pub fallback: bool,
}

pub async fn settlement_view<C>(
    debts: &[Debt],
    mode: SettlementMode,
    trip_currency: &Currency,
    converter: &C,
) -> SettlementView
where
    C: CurrencyConverter + ?Sized,
{
    match mode {
        SettlementMode::All => SettlementView {
            mode,
            currency: None,
            debts: aggregate_debts(debts),
            fallback: false,
        },
        SettlementMode::SimplifiedPerCurrency => SettlementView {
            mode,
            currency: None,
            debts: simplify_per_currency(debts),
            fallback: false,
        },
        SettlementMode::ToTripCurrency => {
            match simplify_to_currency(debts, trip_currency, converter).await {
                Ok(settled) => SettlementView {
                    mode,
                    currency: Some(trip_currency.clone()),
                    debts: settled,
                    fallback: false,
                },
                Err(err) => {
                    warn!(%trip_currency, error = %err, "conversion failed, showing raw debts");
                    SettlementView {
                        mode,
                        currency: None,
                        debts: aggregate_debts(debts),
                        fallback: true,
                    }
                }
            }
        }
    }
}

pub fn group_by_debtor(debts: &[Debt]) -> BTreeMap<MemberName, Vec<Debt>> {
    let mut grouped: BTreeMap<MemberName, Vec<Debt>> = BTreeMap::new();
    for debt in debts {
        grouped
            .entry(debt.from_name.clone())
            .or_default()
            .push(debt.clone());
    }
    grouped
}
