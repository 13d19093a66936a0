// 💰 Ledger - balance and movement history
// Owns the "balance" and "transactions" keys. Movements are kept
// newest-first; every mutation persists both keys before returning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{Result, WalletError};
use crate::store::KvStore;

/// Key holding the current balance.
pub const BALANCE_KEY: &str = "balance";

/// Key holding the movement list.
pub const TRANSACTIONS_KEY: &str = "transactions";

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Money added to the balance
    Deposit,
    /// Money sent out of the balance
    Transfer,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Transfer => "transfer",
        }
    }
}

/// A single recorded movement. Immutable once created; never updated or
/// removed by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable identity (UUID) - never changes
    pub id: String,

    pub kind: TxKind,

    /// Always positive; the kind carries the direction
    pub amount: f64,

    /// Free text supplied by the caller
    pub detail: String,

    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    fn new(kind: TxKind, amount: f64, detail: &str) -> Self {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            amount,
            detail: detail.to_string(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// LEDGER STORE
// ============================================================================

/// Balance plus movement history over a key-value handle.
pub struct LedgerStore {
    kv: KvStore,
}

impl LedgerStore {
    pub fn new(kv: KvStore) -> Self {
        LedgerStore { kv }
    }

    /// Current balance. A never-written balance reads as 0.
    pub fn balance(&self) -> Result<f64> {
        self.kv.load(BALANCE_KEY, 0.0)
    }

    /// Add `amount` to the balance and record a deposit movement.
    /// Returns the new balance.
    pub fn deposit(&self, amount: f64, detail: &str) -> Result<f64> {
        check_amount(amount)?;

        let new_balance = self.balance()? + amount;
        self.push_transaction(Transaction::new(TxKind::Deposit, amount, detail))?;
        self.kv.save(BALANCE_KEY, &new_balance)?;

        tracing::debug!(amount, new_balance, "deposit recorded");
        Ok(new_balance)
    }

    /// Remove `amount` from the balance and record a transfer movement.
    /// An amount above the balance is rejected, never clamped.
    /// Returns the new balance.
    pub fn withdraw(&self, amount: f64, detail: &str) -> Result<f64> {
        check_amount(amount)?;

        let balance = self.balance()?;
        if amount > balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }

        let new_balance = balance - amount;
        self.push_transaction(Transaction::new(TxKind::Transfer, amount, detail))?;
        self.kv.save(BALANCE_KEY, &new_balance)?;

        tracing::debug!(amount, new_balance, "transfer recorded");
        Ok(new_balance)
    }

    /// Movements, newest first. `limit` truncates the list; `None` returns
    /// everything. An empty ledger yields an empty list, not an error.
    pub fn transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self.kv.load(TRANSACTIONS_KEY, Vec::new())?;
        if let Some(max) = limit {
            transactions.truncate(max);
        }
        Ok(transactions)
    }

    /// Write every movement as CSV, newest first. Returns the row count.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let transactions = self.transactions(None)?;

        let mut out = csv::Writer::from_writer(writer);
        for tx in &transactions {
            out.serialize(tx)?;
        }
        out.flush()?;

        Ok(transactions.len())
    }

    // Newest entry goes to the front
    fn push_transaction(&self, tx: Transaction) -> Result<()> {
        let mut transactions: Vec<Transaction> = self.kv.load(TRANSACTIONS_KEY, Vec::new())?;
        transactions.insert(0, tx);
        self.kv.save(TRANSACTIONS_KEY, &transactions)
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(WalletError::InvalidAmount { amount });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
