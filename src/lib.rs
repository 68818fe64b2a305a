//! Settle up a group trip: turn who-owes-whom debts, possibly in several
//! currencies, into a short list of payments.

pub mod balance;
pub mod conversion;
pub mod error;
pub mod exchange;
pub mod routes;
pub mod schemas;
pub mod settings;
pub mod view;

pub use balance::EPSILON;
pub use conversion::{CurrencyConverter, RateTable};
pub use error::{ConversionError, CurrencyError};
pub use exchange::{aggregate_debts, simplify_per_currency, simplify_to_currency};
pub use schemas::{Currency, Debt, Expense, MemberName, Payment, Trip};
pub use view::{group_by_debtor, settlement_view, SettlementMode, SettlementView};
