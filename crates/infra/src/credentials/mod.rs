//! Credential stores for the access/refresh token pair

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use dayon_core::CredentialStore;
use dayon_domain::{CredentialBackend, CredentialConfig, Result};
use tracing::info;

pub use file::FileCredentialStore;
pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;

/// Store selected by configuration.
///
/// # Errors
///
/// Returns `Config` when the file backend has no path and the platform has no
/// data directory, or `Internal` when the keychain entries cannot be opened.
pub fn build_credential_store(config: &CredentialConfig) -> Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.backend {
        CredentialBackend::Memory => Arc::new(MemoryCredentialStore::new()),
        CredentialBackend::File => {
            let path = match &config.file_path {
                Some(path) => path.clone(),
                None => FileCredentialStore::default_path()?,
            };
            info!(path = %path.display(), "Using credential file");
            Arc::new(FileCredentialStore::new(path))
        }
        CredentialBackend::Keychain => {
            Arc::new(KeychainCredentialStore::new(config.keychain_service.clone())?)
        }
    };
    info!(backend = ?config.backend, "Using credential store");
    Ok(store)
}
