//! Provider-agnostic instance lifecycle control with deterministic
//! per-credential SSH key identities.
//!
//! A [`ProviderSession`] derives one stable keyname from a username and a
//! fingerprint of the active credentials, a [`KeyStore`] persists the
//! matching key material, and [`InstanceHandle`](application::InstanceHandle)
//! drives a provider-backed instance through its lifecycle over the port
//! traits in [`application::ports`].

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;

pub use application::{ProviderRegistry, ProviderSession};
pub use domain::{ProviderParams, XdockerError};
pub use infra::KeyStore;
