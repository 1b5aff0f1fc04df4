//! Configuration loading
//!
//! Reads [`dayon_domain::Config`] from files and `DAYON_*` environment
//! variables.

pub mod loader;

pub use loader::{apply_env_overrides, load, load_from_env, load_from_file, probe_config_paths};
