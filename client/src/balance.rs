//! Daily balance aggregation.
//!
//! Folds dated transactions into per-day balance records, threading each
//! day's final balance into the next day's previous balance. Both entry
//! points are pure functions over their inputs; the caller owns the
//! transaction data and gets fresh values back.

use chrono::{NaiveDate, Utc};
use shared::{date_part, DailyBalance, Transaction, TransactionType};
use tracing::debug;

/// Compute the balance record for a single day.
///
/// `transactions` is expected to contain only that day's transactions;
/// filtering by date is the caller's job (see [`compute_range`]). Empty
/// input is an ordinary zero-credit, zero-debit day, never an error, and a
/// negative final balance is preserved as-is.
pub fn compute_daily_balance(
    date: &str,
    previous_balance: f64,
    transactions: &[Transaction],
) -> DailyBalance {
    let total_credits: f64 = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Credit)
        .map(|t| t.amount)
        .sum();
    let total_debits: f64 = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Debit)
        .map(|t| t.amount)
        .sum();
    let final_balance = previous_balance + total_credits - total_debits;

    let now = Utc::now();
    DailyBalance {
        id: now.timestamp_millis().max(0) as u64,
        balance_date: date.to_string(),
        previous_balance,
        total_credits,
        total_debits,
        final_balance,
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    }
}

/// Compute one balance record per calendar day from `start_date` to
/// `end_date` inclusive, in ascending order.
///
/// Day stepping is calendar arithmetic on the date component only, so the
/// result is identical in every timezone and across DST transitions.
/// Transactions are matched to a day by the date portion of their
/// `transaction_date`; the time-of-day and any offset are ignored.
///
/// An inverted range (`start_date > end_date`), like an unparseable bound,
/// yields an empty Vec rather than an error.
pub fn compute_range(
    start_date: &str,
    end_date: &str,
    initial_balance: f64,
    transactions: &[Transaction],
) -> Vec<DailyBalance> {
    let (Some(start), Some(end)) = (parse_day(start_date), parse_day(end_date)) else {
        debug!(start_date, end_date, "unparseable range bounds, returning no balances");
        return Vec::new();
    };

    let mut balances = Vec::new();
    let mut previous_balance = initial_balance;
    let mut day = start;

    while day <= end {
        let day_str = day.format("%Y-%m-%d").to_string();
        let on_day: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.date_part() == day_str)
            .cloned()
            .collect();

        let balance = compute_daily_balance(&day_str, previous_balance, &on_day);
        previous_balance = balance.final_balance;
        balances.push(balance);

        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }

    debug!(
        start_date,
        end_date,
        days = balances.len(),
        "computed daily balance range"
    );
    balances
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_part(value), "%Y-%m-%d").ok()
}
