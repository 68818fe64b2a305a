use std::collections::BTreeMap;

use crate::schemas::{Currency, Debt, Expense, MemberName, Payment, Trip};

// Amounts and balances at or below this count as settled
pub const EPSILON: f64 = 0.001;

// Negative means the member owes money overall
pub type Balance = BTreeMap<MemberName, f64>;

pub type CurrencyBalances = BTreeMap<Currency, Balance>;

pub fn is_material(amount: f64) -> bool {
    amount.is_finite() && amount > EPSILON
}

pub fn record(balance: &mut Balance, from: &str, to: &str, amount: f64) {
    *balance.entry(from.to_string()).or_insert(0.0) -= amount;
    *balance.entry(to.to_string()).or_insert(0.0) += amount;
}

pub fn balances_per_currency(debts: &[Debt]) -> CurrencyBalances {
    let mut balances = CurrencyBalances::new();
    for debt in debts.iter().filter(|debt| is_material(debt.amount)) {
        let balance = balances.entry(debt.currency.clone()).or_default();
        record(balance, &debt.from_name, &debt.to_name, debt.amount);
    }
    balances
}

// Every receiver except the payer owes the payer an equal share
pub fn debts_from_expense(expense: &Expense) -> Vec<Debt> {
    if expense.receivers.is_empty() || !is_material(expense.amount) {
        return Vec::new();
    }
    let amount_per_receiver = expense.amount / expense.receivers.len() as f64;
    expense
        .receivers
        .iter()
        .filter(|receiver| **receiver != expense.payer)
        .map(|receiver| {
            Debt::new(
                receiver,
                &expense.payer,
                amount_per_receiver,
                &expense.currency,
            )
        })
        .collect()
}

// Paying someone back is the same as them owing you that amount
pub fn debt_from_payment(payment: &Payment) -> Debt {
    Debt::new(
        &payment.to_name,
        &payment.from_name,
        payment.amount,
        &payment.currency,
    )
}

impl Trip {
    pub fn debts(&self) -> Vec<Debt> {
        self.expenses
            .iter()
            .flat_map(debts_from_expense)
            .chain(self.payments.iter().map(debt_from_payment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency::new("USD").unwrap()
    }

    fn expense(amount: f64, payer: &str, receivers: &[&str]) -> Expense {
        Expense {
            name: "dinner".to_string(),
            amount,
            currency: usd(),
            payer: payer.to_string(),
            receivers: receivers.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn expense_is_split_equally_and_payer_share_dropped() {
        let debts = debts_from_expense(&expense(90.0, "A", &["A", "B", "C"]));
        assert_eq!(
            debts,
            vec![
                Debt::new("B", "A", 30.0, &usd()),
                Debt::new("C", "A", 30.0, &usd()),
            ]
        );
    }

    #[test]
    fn expense_without_receivers_yields_nothing() {
        assert!(debts_from_expense(&expense(50.0, "A", &[])).is_empty());
        assert!(debts_from_expense(&expense(0.0, "A", &["B"])).is_empty());
    }

    #[test]
    fn payment_offsets_existing_debt() {
        let trip = Trip {
            id: "t".to_string(),
            name: "Trip".to_string(),
            currency: usd(),
            expenses: vec![expense(20.0, "A", &["A", "B"])],
            payments: vec![Payment {
                from_name: "B".to_string(),
                to_name: "A".to_string(),
                amount: 10.0,
                currency: usd(),
            }],
        };
        let balances = balances_per_currency(&trip.debts());
        let balance = &balances[&usd()];
        assert!(balance["A"].abs() < EPSILON);
        assert!(balance["B"].abs() < EPSILON);
    }

    #[test]
    fn balances_are_kept_apart_per_currency_and_sum_to_zero() {
        let eur = Currency::new("EUR").unwrap();
        let debts = vec![
            Debt::new("A", "B", 10.0, &usd()),
            Debt::new("B", "C", 4.0, &usd()),
            Debt::new("C", "A", 7.0, &eur),
            Debt::new("C", "A", f64::NAN, &eur),
            Debt::new("C", "A", -3.0, &eur),
        ];
        let balances = balances_per_currency(&debts);
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[&usd()]["A"], -10.0);
        assert_eq!(balances[&usd()]["B"], 6.0);
        assert_eq!(balances[&usd()]["C"], 4.0);
        assert_eq!(balances[&eur]["A"], 7.0);
        for balance in balances.values() {
            assert!(balance.values().sum::<f64>().abs() < EPSILON);
        }
    }
}
