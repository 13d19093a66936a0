// Alke Wallet - Core Library
// Local ledger, contacts and session persisted in a SQLite key-value store.
// Exposes all modules for use in the CLI and tests; no rendering here.

pub mod contacts;
pub mod error;
pub mod ledger;
pub mod session;
pub mod store;
pub mod wallet;

// Re-export commonly used types
pub use contacts::{Contact, ContactStore, CONTACTS_KEY};
pub use error::{Result, WalletError};
pub use ledger::{LedgerStore, Transaction, TxKind, BALANCE_KEY, TRANSACTIONS_KEY};
pub use session::{CredentialVerifier, Session, SessionStore, SESSION_KEY};
pub use store::KvStore;
pub use wallet::{Wallet, DEPOSIT_DETAIL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
