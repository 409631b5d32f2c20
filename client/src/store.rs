//! In-memory mock of the transaction backend.
//!
//! The store is an explicitly constructed, caller-owned value: every test
//! or mock-mode client instantiates its own, so there is no ambient global
//! list to leak state between call sites. It owns identity assignment and
//! simulates the aggregation a real backend would run server-side.

use chrono::{Days, Utc};
use shared::{date_part, DailyBalance, PaginatedResult, Transaction, TransactionInput, TransactionType};
use tracing::info;

use crate::balance::{compute_daily_balance, compute_range};
use crate::pagination::page_count;

/// Opening balance the mock backend assumes before the first recorded day.
pub const OPENING_BALANCE: f64 = 3000.0;

#[derive(Debug, Clone, Default)]
pub struct MockTransactionStore {
    transactions: Vec<Transaction>,
}

impl MockTransactionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// A store pre-loaded with the development fixture data.
    pub fn seeded() -> Self {
        Self::with_transactions(seed_transactions())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Insert a new transaction, assigning the next free id and defaulting
    /// the transaction date to now when the input omits it.
    pub fn create(&mut self, input: TransactionInput) -> Transaction {
        let id = self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let now = Utc::now().to_rfc3339();
        let transaction = Transaction {
            id,
            description: input.description,
            amount: input.amount,
            transaction_type: input.transaction_type,
            origin: input.origin,
            transaction_date: input.transaction_date.unwrap_or_else(|| now.clone()),
            created_at: now,
        };
        info!(id, "created mock transaction");
        self.transactions.push(transaction.clone());
        transaction
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Transactions whose date portion equals that of `date`.
    pub fn transactions_on(&self, date: &str) -> Vec<Transaction> {
        let day = date_part(date);
        self.transactions
            .iter()
            .filter(|t| t.date_part() == day)
            .cloned()
            .collect()
    }

    /// Transactions whose date portion falls within the inclusive range.
    /// YYYY-MM-DD dates order lexicographically, so plain string comparison
    /// on the date parts is exact.
    pub fn transactions_in_range(&self, start_date: &str, end_date: &str) -> Vec<Transaction> {
        let start = date_part(start_date);
        let end = date_part(end_date);
        self.transactions
            .iter()
            .filter(|t| {
                let day = t.date_part();
                day >= start && day <= end
            })
            .cloned()
            .collect()
    }

    /// The balance report for one day, as the backend would compute it.
    pub fn daily_balance(&self, date: &str) -> DailyBalance {
        compute_daily_balance(date, OPENING_BALANCE, &self.transactions_on(date))
    }

    /// Balance reports for every day in the range, threading the balance
    /// forward from the opening balance.
    pub fn daily_balance_period(&self, start_date: &str, end_date: &str) -> Vec<DailyBalance> {
        compute_range(start_date, end_date, OPENING_BALANCE, &self.transactions)
    }

    /// Slice-based page of transactions (1-based page numbers).
    pub fn page(&self, page: u32, page_size: u32) -> PaginatedResult<Transaction> {
        let total_items = self.transactions.len() as u64;
        let offset = (page.max(1) - 1) as usize * page_size as usize;
        let items: Vec<Transaction> = self
            .transactions
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        PaginatedResult {
            items,
            page,
            page_size,
            total_items,
            total_pages: page_count(total_items, page_size),
        }
    }

    /// Page of daily balances counting back from today, newest first,
    /// mirroring what the reporting endpoint returns.
    pub fn daily_balances_page(&self, page: u32, page_size: u32) -> PaginatedResult<DailyBalance> {
        let today = Utc::now().date_naive();
        let first_offset = (page.max(1) - 1) as u64 * page_size as u64;

        let items: Vec<DailyBalance> = (0..page_size as u64)
            .filter_map(|i| today.checked_sub_days(Days::new(first_offset + i)))
            .map(|day| self.daily_balance(&day.format("%Y-%m-%d").to_string()))
            .collect();

        let total_items = items.len() as u64;
        PaginatedResult {
            items,
            page,
            page_size,
            total_items,
            total_pages: page_count(total_items, page_size),
        }
    }
}

/// The five-transaction development fixture.
pub fn seed_transactions() -> Vec<Transaction> {
    fn seed(
        id: u64,
        description: &str,
        amount: f64,
        transaction_type: TransactionType,
        origin: &str,
        transaction_date: &str,
        created_at: &str,
    ) -> Transaction {
        Transaction {
            id,
            description: Some(description.to_string()),
            amount,
            transaction_type,
            origin: Some(origin.to_string()),
            transaction_date: transaction_date.to_string(),
            created_at: created_at.to_string(),
        }
    }

    vec![
        seed(
            1,
            "Salary",
            5000.0,
            TransactionType::Credit,
            "Employer",
            "2025-05-10T00:00:00",
            "2025-05-10T10:30:00",
        ),
        seed(
            2,
            "Rent",
            1200.0,
            TransactionType::Debit,
            "Landlord",
            "2025-05-05T00:00:00",
            "2025-05-05T14:45:00",
        ),
        seed(
            3,
            "Groceries",
            350.75,
            TransactionType::Debit,
            "ABC Market",
            "2025-05-08T00:00:00",
            "2025-05-08T18:20:00",
        ),
        seed(
            4,
            "Freelance",
            1500.0,
            TransactionType::Credit,
            "Client XYZ",
            "2025-05-12T00:00:00",
            "2025-05-12T09:15:00",
        ),
        seed(
            5,
            "Electric bill",
            120.30,
            TransactionType::Debit,
            "Power company",
            "2025-05-15T00:00:00",
            "2025-05-15T16:00:00",
        ),
    ]
}
