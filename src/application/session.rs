//! Provider session state and keyname derivation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::{Credentials, KeyDecryptor};
use crate::domain::credentials::{KeyMaterial, ProviderParams};
use crate::domain::error::{KeyStoreError, ValidationError, XdockerError};
use crate::domain::fingerprint::credential_fingerprint;
use crate::domain::keyname::{derive_keyname, validate_key_label, validate_username};
use crate::infra::keystore::KeyStore;

/// Base state every concrete provider composes: the user's identity and the
/// keyname derived from their credentials.
///
/// Construction validates the identity fields and derives the keyname exactly
/// once; both are immutable for the session's lifetime. Construction touches
/// neither the network nor the provider backend, and a session is never
/// persisted. Identical parameters and credentials always reproduce the same
/// keyname.
#[derive(Debug)]
pub struct ProviderSession {
    username: String,
    keyname: String,
    store: KeyStore,
}

impl ProviderSession {
    /// Build a session storing keys under the user's directory,
    /// `$XDOCKER_HOME/<username>` or `~/.xdocker/<username>`.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a bad username or keyname override;
    /// `KeyStoreError::NoStorageRoot` when no storage root exists.
    pub fn new(
        params: &ProviderParams,
        creds: &dyn Credentials,
        decryptor: Arc<dyn KeyDecryptor>,
    ) -> Result<Self, XdockerError> {
        let store = KeyStore::for_user(&params.username, decryptor)?;
        Ok(Self::with_store(params, creds, store)?)
    }

    /// Build a session over an explicit store. Lets tests and embedders point
    /// the session at any directory.
    ///
    /// # Errors
    ///
    /// `ValidationError` for a bad username or keyname override.
    pub fn with_store(
        params: &ProviderParams,
        creds: &dyn Credentials,
        store: KeyStore,
    ) -> Result<Self, ValidationError> {
        validate_username(&params.username)?;
        if let Some(label) = params.keyname.as_deref() {
            validate_key_label(label)?;
        }
        let fingerprint = credential_fingerprint(creds.fingerprint_values());
        let keyname = derive_keyname(&params.username, params.keyname.as_deref(), &fingerprint);
        debug!(username = %params.username, keyname = %keyname, "derived session keyname");
        Ok(Self {
            username: params.username.clone(),
            keyname,
            store,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The derived keyname, `<fingerprint>_<base>`.
    #[must_use]
    pub fn keyname(&self) -> &str {
        &self.keyname
    }

    #[must_use]
    pub fn store(&self) -> &KeyStore {
        &self.store
    }

    /// Path where this identity's key lives. Pure computation, no I/O.
    #[must_use]
    pub fn key_path(&self) -> PathBuf {
        self.store.key_path(&self.keyname)
    }

    /// Load this identity's private key. Always reads the backing store.
    ///
    /// # Errors
    ///
    /// `KeyStoreError::KeyNotFound` until a key has been saved;
    /// `KeyStoreError::Io` on filesystem failure.
    pub fn key(&self) -> Result<KeyMaterial, KeyStoreError> {
        self.store.load(&self.keyname)
    }

    /// Persist this identity's private key, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `KeyStoreError::Io` on filesystem failure, including a missing user
    /// directory.
    pub fn save_key(&self, material: &KeyMaterial) -> Result<(), KeyStoreError> {
        self.store.save(&self.keyname, material)
    }

    /// Decrypt externally supplied key material under this user's key.
    ///
    /// # Errors
    ///
    /// `KeyStoreError::Decryption` when the collaborator rejects the
    /// ciphertext.
    pub fn decrypt_key(&self, ciphertext: &[u8]) -> Result<KeyMaterial, KeyStoreError> {
        self.store.decrypt(ciphertext, &self.username)
    }
}
