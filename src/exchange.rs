use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::balance::{balances_per_currency, is_material, record, Balance, EPSILON};
use crate::conversion::CurrencyConverter;
use crate::error::ConversionError;
use crate::schemas::{Currency, Debt, MemberName};

#[derive(Clone, Debug)]
struct PersonalBalance {
    id: MemberName,
    balance: f64,
}

fn merge_into(exchanges: &mut Vec<Debt>, debt: Debt) {
    match exchanges.iter_mut().find(|existing| {
        existing.from_name == debt.from_name
            && existing.to_name == debt.to_name
            && existing.currency == debt.currency
    }) {
        Some(existing) => existing.amount += debt.amount,
        None => exchanges.push(debt),
    }
}

// Same direction only, opposite debts are not netted here
pub fn aggregate_debts(debts: &[Debt]) -> Vec<Debt> {
    let mut exchanges = Vec::new();
    for debt in debts.iter().filter(|debt| is_material(debt.amount)) {
        merge_into(&mut exchanges, debt.clone());
    }
    debug!(input = debts.len(), output = exchanges.len(), "aggregated debts");
    exchanges
}

// Members come out of the map in name order and the sorts are stable, so
// equal balances are matched in name order
fn settle_balance(balance: Balance, currency: &Currency, exchanges: &mut Vec<Debt>) {
    let mut payers = Vec::new();
    let mut receivers = Vec::new();
    for (id, balance) in balance {
        if !balance.is_finite() {
            warn!(member = %id, %currency, "skipping member with overflowed balance");
        } else if balance < -EPSILON {
            payers.push(PersonalBalance { id, balance });
        } else if balance > EPSILON {
            receivers.push(PersonalBalance { id, balance });
        }
    }
    payers.sort_by(|a, b| a.balance.total_cmp(&b.balance));
    receivers.sort_by(|a, b| b.balance.total_cmp(&a.balance));

    let (mut p, mut r) = (0, 0);
    while p < payers.len() && r < receivers.len() {
        let payer = &mut payers[p];
        let receiver = &mut receivers[r];
        let amount = (-payer.balance).min(receiver.balance);
        if !is_material(amount) {
            break;
        }
        merge_into(
            exchanges,
            Debt::new(&payer.id, &receiver.id, amount, currency),
        );
        payer.balance += amount;
        receiver.balance -= amount;
        if payer.balance.abs() <= EPSILON {
            p += 1;
        }
        if receiver.balance.abs() <= EPSILON {
            r += 1;
        }
    }
}

pub fn simplify_per_currency(debts: &[Debt]) -> Vec<Debt> {
    let mut exchanges = Vec::new();
    for (currency, balance) in balances_per_currency(debts) {
        settle_balance(balance, &currency, &mut exchanges);
    }
    debug!(input = debts.len(), output = exchanges.len(), "simplified per currency");
    exchanges
}

// Nothing is netted unless every conversion succeeded
pub async fn simplify_to_currency<C>(
    debts: &[Debt],
    target: &Currency,
    converter: &C,
) -> Result<Vec<Debt>, ConversionError>
where
    C: CurrencyConverter + ?Sized,
{
    let material: Vec<&Debt> = debts.iter().filter(|debt| is_material(debt.amount)).collect();
    let converted = try_join_all(
        material
            .iter()
            .map(|debt| converter.convert(debt.amount, &debt.currency, target)),
    )
    .await?;

    let mut balance = Balance::new();
    for (debt, amount) in material.iter().zip(converted) {
        if !amount.is_finite() {
            return Err(ConversionError::NonFinite {
                from: debt.currency.clone(),
                to: target.clone(),
            });
        }
        record(&mut balance, &debt.from_name, &debt.to_name, amount);
    }

    let mut exchanges = Vec::new();
    settle_balance(balance, target, &mut exchanges);
    debug!(
        input = debts.len(),
        output = exchanges.len(),
        %target,
        "simplified to single currency"
    );
    Ok(exchanges)
}
