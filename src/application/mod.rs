//! Application layer: session state, lifecycle orchestration, and port
//! contracts.
//!
//! Depends on `crate::domain` for types and rules, and composes the key
//! store adapter from `crate::infra::keystore`. The remote transport and
//! every provider backend stay behind the port traits in [`ports`].

pub mod handle;
pub mod ports;
pub mod registry;
pub mod session;

#[allow(unused_imports)]
pub use handle::InstanceHandle;
#[allow(unused_imports)]
pub use ports::{
    ConnectionSpec, Credentials, DEFAULT_SSH_PORT, Instance, InstanceSpec, KeyDecryptor,
    MAX_CONNECT_ATTEMPTS, Provider, RemoteOutput, RemoteSession, RemoteTransport,
};
#[allow(unused_imports)]
pub use registry::{ProviderFactory, ProviderRegistry};
#[allow(unused_imports)]
pub use session::ProviderSession;
