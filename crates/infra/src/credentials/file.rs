//! Credential store backed by a JSON file
//!
//! The CLI's default: the token pair survives between invocations the way
//! browser cookies survive between page loads.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dayon_core::CredentialStore;
use dayon_domain::{DayOnError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

const APP_DIR: &str = "dayon";
const FILE_NAME: &str = "credentials.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Keeps the token pair in a JSON file.
///
/// Every operation re-reads the file, so separate processes see each other's
/// writes.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// `<data dir>/dayon/credentials.json`
    ///
    /// # Errors
    ///
    /// Returns `Config` when the platform has no data directory.
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
            .ok_or_else(|| DayOnError::Config("no data directory for the credential file".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoredTokens> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StoredTokens::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                DayOnError::Data(format!("{}: invalid credential file: {e}", self.path.display()))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoredTokens::default()),
            Err(err) => Err(io_error(&self.path, &err)),
        }
    }

    fn save(&self, tokens: &StoredTokens) -> Result<()> {
        if tokens.access_token.is_none() && tokens.refresh_token.is_none() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != ErrorKind::NotFound => Err(io_error(&self.path, &err)),
                _ => Ok(()),
            };
        }

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, &e))?;
        }
        let body = serde_json::to_vec_pretty(tokens)
            .map_err(|e| DayOnError::Internal(format!("Failed to encode credentials: {e}")))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).map_err(|e| io_error(&staging, &e))?;
        restrict_permissions(&staging)?;
        fs::rename(&staging, &self.path).map_err(|e| io_error(&self.path, &e))?;
        debug!(path = %self.path.display(), "Credential file written");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut StoredTokens)) -> Result<()> {
        let _guard = self.lock.lock();
        let mut tokens = self.load()?;
        apply(&mut tokens);
        self.save(&tokens)
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> DayOnError {
    DayOnError::Internal(format!("{}: {err}", path.display()))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| io_error(path, &e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

fn non_empty(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| token.to_string())
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.access_token.filter(|token| !token.is_empty()))
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.refresh_token.filter(|token| !token.is_empty()))
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.update(|tokens| tokens.access_token = non_empty(token))
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.update(|tokens| tokens.refresh_token = non_empty(token))
    }

    fn clear_access_token(&self) -> Result<()> {
        self.update(|tokens| tokens.access_token = None)
    }

    fn clear_refresh_token(&self) -> Result<()> {
        self.update(|tokens| tokens.refresh_token = None)
    }
}
