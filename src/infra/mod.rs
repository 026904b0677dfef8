//! Infrastructure layer: filesystem key storage and the SSH transport.
//!
//! This module contains all I/O-performing code. Imports from
//! `crate::domain` and `crate::application::ports` are allowed. Imports
//! from the rest of `crate::application` are forbidden.

pub mod keystore;
pub mod paths;
pub mod ssh;

#[allow(unused_imports)]
pub use keystore::{IdentityDecryptor, KEY_EXTENSION, KeyStore};
#[allow(unused_imports)]
pub use paths::{
    STORAGE_ROOT_DIRNAME, STORAGE_ROOT_ENV, ensure_user_directory, storage_root, user_directory,
};
#[allow(unused_imports)]
pub use ssh::{SshSession, SshTransport};
