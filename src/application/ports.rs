//! Port trait definitions for the application layer.
//!
//! Ports are the contracts that provider backends, decryption schemes, and
//! remote transports must fulfill. This file imports only from
//! `crate::domain` and sibling application modules, never from
//! `crate::infra`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::handle::InstanceHandle;
use crate::application::session::ProviderSession;
use crate::domain::credentials::KeyMaterial;
use crate::domain::error::{KeyStoreError, ProviderError, TransportError};
use crate::domain::instance::{Endpoint, InstanceId};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Ceiling on connection attempts when opening a remote session.
///
/// The transport must give up with `TransportError::ConnectionExhausted`
/// once this many attempts have failed. The only retry the core performs.
pub const MAX_CONNECT_ATTEMPTS: u32 = 10;

/// SSH port baked into every `ConnectionSpec` this crate assembles.
pub const DEFAULT_SSH_PORT: u16 = 22;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Launch parameters for creating a new instance.
///
/// All fields are optional hints; a backend rejects what it cannot honor via
/// `ProviderError`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Machine image identifier, e.g. an AMI id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Instance size or flavor, e.g. `"t3.micro"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Placement region or zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Backend-specific extras passed through uninterpreted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Parameters for opening a remote session against a resolved instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSpec {
    /// Private key file authenticating the session.
    pub keyfile: PathBuf,
    /// Hostname or address from the resolved endpoint.
    pub host: String,
    /// Remote login user.
    pub user: String,
    pub port: u16,
    /// Attempt ceiling handed to the transport, normally
    /// [`MAX_CONNECT_ATTEMPTS`].
    pub connection_attempts: u32,
}

/// Captured result of one remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RemoteOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

// ── Credential Port ───────────────────────────────────────────────────────────

/// Processed, validated credentials for one provider account.
///
/// Concrete types are built from `ProviderParams` by the provider's own
/// constructor, which fails with `ValidationError` on absent or malformed
/// fields. The session consumes them once, at construction, to derive the
/// keyname.
pub trait Credentials {
    /// Ordered values fed to the credential fingerprint.
    ///
    /// The order must be fixed for a given provider and stable across calls;
    /// reordering changes every derived keyname.
    fn fingerprint_values(&self) -> Vec<&str>;
}

// ── Key Decryption Port ───────────────────────────────────────────────────────

/// Decrypts stored key material under a per-user key.
///
/// How the user key is derived is entirely the implementation's business.
pub trait KeyDecryptor: Send + Sync {
    /// Decrypt `ciphertext` for `username`.
    ///
    /// # Errors
    ///
    /// Any error is surfaced to callers as `KeyStoreError::Decryption`.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        username: &str,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;
}

// ── Provider Ports ────────────────────────────────────────────────────────────

/// Instance-level operations against the backend's remote reference.
///
/// Precondition checks (may this instance start right now?) belong to the
/// backend; implementations report refusals through `ProviderError`.
pub trait Instance {
    /// Fetch the connection endpoint from the backend.
    fn resolve(&mut self) -> Result<Endpoint, ProviderError>;
    /// Start the instance.
    fn start(&mut self) -> Result<(), ProviderError>;
    /// Stop the instance.
    fn stop(&mut self) -> Result<(), ProviderError>;
    /// Permanently terminate the instance.
    fn terminate(&mut self) -> Result<(), ProviderError>;
}

/// Account-level operations performed by a concrete cloud backend.
pub trait Provider {
    /// Short provider name, also the registry key (e.g. `"ec2"`).
    fn name(&self) -> &str;

    /// The session holding this provider's identity and derived keyname.
    fn session(&self) -> &ProviderSession;

    /// Create a new instance, returning its backend identifier.
    ///
    /// # Errors
    ///
    /// Whatever the backend SDK reports, passed through uninterpreted.
    fn create_instance(&self, spec: &InstanceSpec) -> Result<InstanceId, ProviderError>;

    /// Look up the backend reference for an existing instance.
    fn get_instance(&self, id: &InstanceId) -> Result<Box<dyn Instance>, ProviderError>;

    /// Load this identity's private key from the session's store.
    ///
    /// # Errors
    ///
    /// `KeyStoreError::KeyNotFound` until a key has been saved.
    fn key(&self) -> Result<KeyMaterial, KeyStoreError> {
        self.session().key()
    }

    /// Persist this identity's private key through the session's store.
    fn save_key(&self, material: &KeyMaterial) -> Result<(), KeyStoreError> {
        self.session().save_key(material)
    }

    /// Build a lifecycle handle for an existing instance.
    ///
    /// The handle borrows this provider's session, so it cannot outlive the
    /// provider.
    fn handle(&self, id: InstanceId) -> Result<InstanceHandle<'_>, ProviderError> {
        let remote = self.get_instance(&id)?;
        Ok(InstanceHandle::new(self.session(), id, remote))
    }
}

// ── Remote Transport Ports ────────────────────────────────────────────────────

/// Scoped remote-execution session bound to one instance.
///
/// Dropping the session releases the underlying transport. Implementations
/// must close on every exit path, including unwinds.
pub trait RemoteSession {
    /// Run a shell command on the remote host and capture its output.
    ///
    /// A non-zero remote exit code is a successful `run`; only transport
    /// failures are errors.
    fn run(&mut self, command: &str) -> Result<RemoteOutput, TransportError>;
}

/// Opens authenticated sessions against resolved instances.
pub trait RemoteTransport {
    /// Connect and authenticate using the spec's key file.
    ///
    /// # Errors
    ///
    /// `TransportError::ConnectionExhausted` once `spec.connection_attempts`
    /// attempts have failed; `TransportError::Authentication` when the key
    /// is rejected.
    fn connect(&self, spec: &ConnectionSpec) -> Result<Box<dyn RemoteSession>, TransportError>;
}
