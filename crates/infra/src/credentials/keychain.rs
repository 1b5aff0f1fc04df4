//! Credential store backed by the platform keychain
//!
//! Each token is its own keychain entry under one service name, the way a
//! browser keeps the two cookies independently.

use dayon_core::CredentialStore;
use dayon_domain::constants::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use dayon_domain::{DayOnError, Result};
use keyring::{Entry, Error as KeyringError};
use tracing::debug;

use crate::errors::InfraError;

/// Persists the token pair in the OS keychain.
///
/// Both entries are opened once; every read and write goes through the same
/// handle.
pub struct KeychainCredentialStore {
    service: String,
    access: Entry,
    refresh: Entry,
}

impl KeychainCredentialStore {
    /// Open the two entries under `service`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the platform rejects the entry names.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        let service = service.into();
        let access = Entry::new(&service, ACCESS_TOKEN_COOKIE).map_err(keyring_error)?;
        let refresh = Entry::new(&service, REFRESH_TOKEN_COOKIE).map_err(keyring_error)?;
        Ok(Self { service, access, refresh })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn read(entry: &Entry) -> Result<Option<String>> {
        match entry.get_password() {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(err) => Err(keyring_error(err)),
        }
    }

    fn write(&self, entry: &Entry, name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Self::delete(entry);
        }
        entry.set_password(value).map_err(keyring_error)?;
        debug!(service = %self.service, entry = name, "Stored credential");
        Ok(())
    }

    fn delete(entry: &Entry) -> Result<()> {
        match entry.delete_credential() {
            Ok(()) | Err(KeyringError::NoEntry) => Ok(()),
            Err(err) => Err(keyring_error(err)),
        }
    }
}

fn keyring_error(err: KeyringError) -> DayOnError {
    InfraError::from(err).into()
}

impl CredentialStore for KeychainCredentialStore {
    fn access_token(&self) -> Result<Option<String>> {
        Self::read(&self.access)
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        Self::read(&self.refresh)
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.write(&self.access, ACCESS_TOKEN_COOKIE, token)
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.write(&self.refresh, REFRESH_TOKEN_COOKIE, token)
    }

    fn clear_access_token(&self) -> Result<()> {
        Self::delete(&self.access)
    }

    fn clear_refresh_token(&self) -> Result<()> {
        Self::delete(&self.refresh)
    }
}
