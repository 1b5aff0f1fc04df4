//! Process-local credential store

use dayon_core::CredentialStore;
use dayon_domain::Result;
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// Keeps the token pair in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: RwLock<Slots>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn non_empty(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| token.to_string())
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.slots.read().access.clone())
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.slots.read().refresh.clone())
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.slots.write().access = non_empty(token);
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.slots.write().refresh = non_empty(token);
        Ok(())
    }

    fn clear_access_token(&self) -> Result<()> {
        self.slots.write().access = None;
        Ok(())
    }

    fn clear_refresh_token(&self) -> Result<()> {
        self.slots.write().refresh = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dayon_domain::TokenPair;

    use super::*;

    #[test]
    fn tokens_require_both_halves() {
        let store = MemoryCredentialStore::new();
        store.set_access_token("access").unwrap();
        assert_eq!(store.tokens().unwrap(), None);

        store.set_refresh_token("refresh").unwrap();
        assert_eq!(store.tokens().unwrap(), Some(TokenPair::new("access", "refresh")));
    }

    #[test]
    fn empty_value_counts_as_absent() {
        let store = MemoryCredentialStore::new();
        store.store(&TokenPair::new("access", "refresh")).unwrap();
        store.set_access_token("").unwrap();

        assert_eq!(store.access_token().unwrap(), None);
        assert_eq!(store.refresh_token().unwrap().as_deref(), Some("refresh"));
    }

    #[test]
    fn clear_removes_both() {
        let store = MemoryCredentialStore::new();
        store.store(&TokenPair::new("access", "refresh")).unwrap();
        store.clear().unwrap();

        assert_eq!(store.access_token().unwrap(), None);
        assert_eq!(store.refresh_token().unwrap(), None);
    }
}
