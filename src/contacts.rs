// 👥 Contacts - named transfer destinations
// Owns the "contacts" key. Insertion order is preserved and the account
// value is unique (exact string match).

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};
use crate::store::KvStore;

/// Key holding the contact list.
pub const CONTACTS_KEY: &str = "contacts";

/// A named account reference usable as a transfer destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub account: String,
}

/// Contact list over a key-value handle.
pub struct ContactStore {
    kv: KvStore,
}

impl ContactStore {
    pub fn new(kv: KvStore) -> Self {
        ContactStore { kv }
    }

    /// All contacts in storage order.
    pub fn list_all(&self) -> Result<Vec<Contact>> {
        self.kv.load(CONTACTS_KEY, Vec::new())
    }

    /// Add a contact at the end of the list. Both fields are trimmed;
    /// empty fields and duplicate accounts are rejected.
    pub fn add(&self, name: &str, account: &str) -> Result<Contact> {
        let name = name.trim();
        let account = account.trim();

        if name.is_empty() {
            return Err(WalletError::InvalidInput("name"));
        }
        if account.is_empty() {
            return Err(WalletError::InvalidInput("account"));
        }

        let mut contacts = self.list_all()?;
        if contacts.iter().any(|c| c.account == account) {
            return Err(WalletError::DuplicateAccount(account.to_string()));
        }

        let contact = Contact {
            name: name.to_string(),
            account: account.to_string(),
        };
        contacts.push(contact.clone());
        self.kv.save(CONTACTS_KEY, &contacts)?;

        tracing::debug!(account, "contact added");
        Ok(contact)
    }

    /// Look up a contact by exact account value.
    pub fn find_by_account(&self, account: &str) -> Result<Option<Contact>> {
        Ok(self.list_all()?.into_iter().find(|c| c.account == account))
    }

    /// Case-insensitive substring search over name and account together,
    /// in storage order. An empty query returns the full list; a query
    /// nothing matches returns an empty list.
    pub fn search(&self, query: &str) -> Result<Vec<Contact>> {
        let contacts = self.list_all()?;
        if query.is_empty() {
            return Ok(contacts);
        }

        let needle = query.to_lowercase();
        Ok(contacts
            .into_iter()
            .filter(|c| {
                format!("{}{}", c.name, c.account)
                    .to_lowercase()
                    .contains(&needle)
            })
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
