//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `std::fs`, or `std::net`. All functions are synchronous and take data in,
//! returning data out.

pub mod credentials;
pub mod error;
pub mod fingerprint;
pub mod instance;
pub mod keyname;

#[allow(unused_imports)]
pub use credentials::{KeyMaterial, ProviderParams};
#[allow(unused_imports)]
pub use error::{KeyStoreError, ProviderError, TransportError, ValidationError, XdockerError};
#[allow(unused_imports)]
pub use fingerprint::{FINGERPRINT_LEN, credential_fingerprint, hex_encode};
#[allow(unused_imports)]
pub use instance::{Endpoint, InstanceId, InstanceState};
#[allow(unused_imports)]
pub use keyname::{
    DEFAULT_KEY_LABEL, KEYNAME_PREFIX, derive_keyname, validate_key_label, validate_username,
};
