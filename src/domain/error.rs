//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `std::fs`, or `std::net`. All error types implement `thiserror::Error`
//! and propagate to the immediate caller unmodified via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Errors raised while processing credential parameters.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required credential field '{0}'.")]
    MissingField(String),

    #[error("Invalid value for credential field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid username '{username}': {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("Invalid keyname '{0}': must match ^[A-Za-z0-9][A-Za-z0-9_.-]*$")]
    InvalidKeyname(String),

    #[error("Malformed provider parameters: {0}")]
    Payload(String),
}

// ── Key store errors ──────────────────────────────────────────────────────────

/// Errors related to persisted key material.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// Expected on first use, before any key has been saved for this
    /// identity. Callers treat it as a bootstrap signal, not a fault.
    #[error("Key '{keyname}' does not exist under {}", .dir.display())]
    KeyNotFound { keyname: String, dir: PathBuf },

    #[error("Key store I/O failure at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decrypt key material for user '{username}'")]
    Decryption {
        username: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No key storage root: $XDOCKER_HOME is unset and no home directory was found")]
    NoStorageRoot,
}

// ── Provider errors ───────────────────────────────────────────────────────────

/// Opaque failure reported by a provider backend.
///
/// The core never interprets these. They carry whatever the backend SDK
/// reported, plus the provider name for context.
#[derive(Debug, Error)]
#[error("Provider '{provider}' failed: {message}")]
pub struct ProviderError {
    pub provider: String,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        provider: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// ── Transport errors ──────────────────────────────────────────────────────────

/// Errors raised while reaching or driving a remote instance.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection to {host}:{port} failed after {attempts} attempt(s)")]
    ConnectionExhausted {
        host: String,
        port: u16,
        attempts: u32,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Authentication as '{user}' on {host} failed with key {}", .keyfile.display())]
    Authentication {
        user: String,
        host: String,
        keyfile: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Remote command execution failed on {host}")]
    Command {
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// ── Top-level error ───────────────────────────────────────────────────────────

/// Umbrella error for wiring and mixed-domain call sites.
///
/// Leaf operations return their own error type; only constructors and the
/// registry, where several error domains meet, return this.
#[derive(Debug, Error)]
pub enum XdockerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unknown provider: {name}\n\nRegistered providers: {known}")]
    UnknownProvider { name: String, known: String },
}
