// 🏦 Wallet - composed app state
// One database, one key-value handle per store. First run seeds the four
// keys; existing data is never overwritten.

use std::path::Path;

use crate::contacts::{Contact, ContactStore, CONTACTS_KEY};
use crate::error::Result;
use crate::ledger::{LedgerStore, Transaction, BALANCE_KEY, TRANSACTIONS_KEY};
use crate::session::{CredentialVerifier, Session, SessionStore, SESSION_KEY};
use crate::store::KvStore;

/// Detail text recorded for balance top-ups.
pub const DEPOSIT_DETAIL: &str = "Ingreso a saldo";

/// Sample contacts seeded on first run.
const SEED_CONTACTS: [(&str, &str); 3] = [
    ("Mamá", "111-1"),
    ("Hermano", "222-2"),
    ("Amigo", "333-3"),
];

/// Composed wallet state: ledger, contacts and session over one database.
///
/// The stores are plain fields rather than hidden globals; anything that
/// needs one takes it by reference.
pub struct Wallet {
    kv: KvStore,
    pub ledger: LedgerStore,
    pub contacts: ContactStore,
    pub session: SessionStore,
}

impl Wallet {
    /// Open (or create) a file-backed wallet and seed defaults.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_store(KvStore::open(path)?)
    }

    /// Open a throwaway in-memory wallet and seed defaults.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_store(KvStore::open_in_memory()?)
    }

    fn from_store(kv: KvStore) -> Result<Self> {
        let wallet = Wallet {
            ledger: LedgerStore::new(kv.clone()),
            contacts: ContactStore::new(kv.clone()),
            session: SessionStore::new(kv.clone()),
            kv,
        };
        wallet.ensure_initialized()?;
        Ok(wallet)
    }

    /// Seed defaults for every key that has never been written: zero
    /// balance, empty ledger, three sample contacts, no session.
    /// Idempotent; safe to call on every startup.
    pub fn ensure_initialized(&self) -> Result<()> {
        let balance: Option<f64> = self.kv.load(BALANCE_KEY, None)?;
        if balance.is_none() {
            self.kv.save(BALANCE_KEY, &0.0)?;
        }

        let transactions: Option<Vec<Transaction>> = self.kv.load(TRANSACTIONS_KEY, None)?;
        if transactions.is_none() {
            self.kv.save(TRANSACTIONS_KEY, &Vec::<Transaction>::new())?;
        }

        let contacts: Option<Vec<Contact>> = self.kv.load(CONTACTS_KEY, None)?;
        if contacts.is_none() {
            let seed: Vec<Contact> = SEED_CONTACTS
                .iter()
                .map(|(name, account)| Contact {
                    name: name.to_string(),
                    account: account.to_string(),
                })
                .collect();
            self.kv.save(CONTACTS_KEY, &seed)?;
        }

        let session: Option<Session> = self.kv.load(SESSION_KEY, None)?;
        if session.is_none() {
            self.kv.save(SESSION_KEY, &None::<Session>)?;
        }

        tracing::debug!("wallet initialized");
        Ok(())
    }

    /// Top up the balance with the standard deposit detail.
    /// Returns the new balance.
    pub fn deposit(&self, amount: f64) -> Result<f64> {
        self.ledger.deposit(amount, DEPOSIT_DETAIL)
    }

    /// Send money to an account, recording the destination in the detail.
    /// Returns the new balance.
    pub fn transfer_to(&self, amount: f64, account: &str) -> Result<f64> {
        self.ledger
            .withdraw(amount, &format!("Transferencia a {}", account))
    }

    /// Run the external credential check and open a session on accept.
    /// A rejected credential is `Ok(None)`, not an error.
    pub fn sign_in<V: CredentialVerifier>(
        &self,
        verifier: &V,
        email: &str,
        password: &str,
    ) -> Result<Option<Session>> {
        if !verifier.verify(email, password) {
            return Ok(None);
        }
        Ok(Some(self.session.login(email)?))
    }

    /// Close the current session, if any.
    pub fn sign_out(&self) -> Result<()> {
        self.session.logout()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;
    use crate::ledger::TxKind;

    struct FixedCredentials;

    impl CredentialVerifier for FixedCredentials {
        fn verify(&self, email: &str, password: &str) -> bool {
            email == "user@alke.cl" && password == "1234"
        }
    }

    #[test]
    fn test_first_run_seeds_defaults() {
        let wallet = Wallet::open_in_memory().unwrap();

        assert_eq!(wallet.ledger.balance().unwrap(), 0.0);
        assert!(wallet.ledger.transactions(None).unwrap().is_empty());
        assert!(!wallet.session.is_active().unwrap());

        let contacts = wallet.contacts.list_all().unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].name, "Mamá");
        assert_eq!(contacts[0].account, "111-1");
        assert_eq!(contacts[2].account, "333-3");
    }

    #[test]
    fn test_ensure_initialized_never_overwrites() {
        let wallet = Wallet::open_in_memory().unwrap();

        wallet.deposit(500.0).unwrap();
        wallet.contacts.add("Ana", "444-4").unwrap();
        wallet.session.login("user@alke.cl").unwrap();

        wallet.ensure_initialized().unwrap();

        assert_eq!(wallet.ledger.balance().unwrap(), 500.0);
        assert_eq!(wallet.ledger.transactions(None).unwrap().len(), 1);
        assert_eq!(wallet.contacts.list_all().unwrap().len(), 4);
        assert!(wallet.session.is_active().unwrap());
    }

    #[test]
    fn test_wallet_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.db");

        {
            let wallet = Wallet::open(&path).unwrap();
            wallet.deposit(750.0).unwrap();
        }

        let wallet = Wallet::open(&path).unwrap();
        assert_eq!(wallet.ledger.balance().unwrap(), 750.0);
        assert_eq!(wallet.ledger.transactions(None).unwrap().len(), 1);
        // Reopening must not reseed anything
        assert_eq!(wallet.contacts.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_deposit_uses_standard_detail() {
        let wallet = Wallet::open_in_memory().unwrap();
        wallet.deposit(100.0).unwrap();

        let transactions = wallet.ledger.transactions(None).unwrap();
        assert_eq!(transactions[0].detail, DEPOSIT_DETAIL);
        assert_eq!(transactions[0].kind, TxKind::Deposit);
    }

    #[test]
    fn test_transfer_to_records_destination() {
        let wallet = Wallet::open_in_memory().unwrap();
        wallet.deposit(100.0).unwrap();

        wallet.transfer_to(40.0, "111-1").unwrap();

        let transactions = wallet.ledger.transactions(None).unwrap();
        assert_eq!(transactions[0].kind, TxKind::Transfer);
        assert_eq!(transactions[0].detail, "Transferencia a 111-1");
        assert_eq!(wallet.ledger.balance().unwrap(), 60.0);
    }

    #[test]
    fn test_duplicate_contact_on_seeded_list() {
        let wallet = Wallet::open_in_memory().unwrap();

        wallet.contacts.add("Ana", "444-4").unwrap();
        assert_eq!(wallet.contacts.list_all().unwrap().len(), 4);

        let err = wallet.contacts.add("Beto", "444-4").unwrap_err();
        assert!(matches!(err, WalletError::DuplicateAccount(_)));
        assert_eq!(wallet.contacts.list_all().unwrap().len(), 4);
    }

    #[test]
    fn test_search_over_seeded_contacts() {
        let wallet = Wallet::open_in_memory().unwrap();
        wallet.contacts.add("Ana", "444-4").unwrap();

        let matches = wallet.contacts.search("444").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Ana");

        assert_eq!(wallet.contacts.search("").unwrap().len(), 4);
        assert!(wallet.contacts.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_sign_in_accepts_and_rejects() {
        let wallet = Wallet::open_in_memory().unwrap();

        let rejected = wallet
            .sign_in(&FixedCredentials, "user@alke.cl", "wrong")
            .unwrap();
        assert!(rejected.is_none());
        assert!(!wallet.session.is_active().unwrap());

        let accepted = wallet
            .sign_in(&FixedCredentials, "user@alke.cl", "1234")
            .unwrap();
        assert_eq!(accepted.unwrap().email, "user@alke.cl");
        assert!(wallet.session.is_active().unwrap());

        wallet.sign_out().unwrap();
        assert!(!wallet.session.is_active().unwrap());
    }
}
