// Error taxonomy for wallet operations
// Every rejection a store can produce, as a typed result for the caller.

use thiserror::Error;

/// Errors surfaced by the wallet stores.
///
/// Decode failures while reading persisted values are deliberately NOT in
/// this list: `KvStore::load` degrades those to the caller-supplied default
/// so corrupted data never takes the wallet down.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Amount is not a positive finite number.
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// Withdrawal larger than the available balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    /// A required field was empty after trimming.
    #[error("invalid input: {0} must not be empty")]
    InvalidInput(&'static str),

    /// A contact with this account already exists.
    #[error("duplicate account: {0}")]
    DuplicateAccount(String),

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Value could not be serialized for storage.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Ledger export failed.
    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;
