// 🔐 Session - login marker
// Owns the "session" key. Present means "logged in"; no token validation
// happens here. Credential checks live behind CredentialVerifier.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::KvStore;

/// Key holding the session marker.
pub const SESSION_KEY: &str = "session";

/// Marker of a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

/// External credential collaborator. The wallet itself never stores or
/// compares secrets; a presentation layer supplies the implementation.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Session marker over a key-value handle.
pub struct SessionStore {
    kv: KvStore,
}

impl SessionStore {
    pub fn new(kv: KvStore) -> Self {
        SessionStore { kv }
    }

    /// Mark the user as logged in.
    pub fn login(&self, email: &str) -> Result<Session> {
        let session = Session {
            email: email.to_string(),
        };
        self.kv.save(SESSION_KEY, &Some(session.clone()))?;

        tracing::debug!(email, "session opened");
        Ok(session)
    }

    /// Clear the session marker.
    pub fn logout(&self) -> Result<()> {
        self.kv.save(SESSION_KEY, &None::<Session>)?;

        tracing::debug!("session closed");
        Ok(())
    }

    /// Current session, if any.
    pub fn current(&self) -> Result<Option<Session>> {
        self.kv.load(SESSION_KEY, None)
    }

    /// Whether a session is present.
    pub fn is_active(&self) -> Result<bool> {
        Ok(self.current()?.is_some())
    }
}

// ============================================================================
// TESTS
// ============================================================================
