//! Instance handle: lifecycle operations and remote-session access.
//!
//! Imports only from `crate::domain` and sibling application modules.

use std::fmt;

use tracing::{debug, info};

use crate::application::ports::{
    ConnectionSpec, DEFAULT_SSH_PORT, Instance, MAX_CONNECT_ATTEMPTS, RemoteSession,
    RemoteTransport,
};
use crate::application::session::ProviderSession;
use crate::domain::error::{ProviderError, XdockerError};
use crate::domain::instance::{Endpoint, InstanceId, InstanceState};

/// Lifecycle handle for one remote instance.
///
/// Wraps the backend's instance reference together with the session holding
/// the authenticating key. The session outlives the handle; the borrow
/// enforces it. The state field is an observed snapshot taken when a
/// lifecycle call succeeds; the handle never polls the backend and never
/// refuses a call locally based on it.
pub struct InstanceHandle<'p> {
    session: &'p ProviderSession,
    id: InstanceId,
    remote: Box<dyn Instance>,
    endpoint: Option<Endpoint>,
    state: InstanceState,
}

impl<'p> InstanceHandle<'p> {
    /// Wrap an existing backend reference. The handle starts `Unresolved`.
    #[must_use]
    pub fn new(session: &'p ProviderSession, id: InstanceId, remote: Box<dyn Instance>) -> Self {
        Self {
            session,
            id,
            remote,
            endpoint: None,
            state: InstanceState::Unresolved,
        }
    }

    #[must_use]
    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    #[must_use]
    pub fn state(&self) -> InstanceState {
        self.state
    }

    #[must_use]
    pub fn session(&self) -> &ProviderSession {
        self.session
    }

    /// Connection endpoint, fetched from the backend on first use and cached
    /// for the life of the handle.
    ///
    /// # Errors
    ///
    /// Backend failures pass through as `ProviderError`.
    pub fn endpoint(&mut self) -> Result<Endpoint, ProviderError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let resolved = self.remote.resolve()?;
        if self.state == InstanceState::Unresolved {
            self.state = InstanceState::Resolved;
        }
        self.endpoint = Some(resolved.clone());
        Ok(resolved)
    }

    /// Start the instance. On success the observed state becomes `Running`.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports, passed through uninterpreted.
    pub fn start(&mut self) -> Result<(), ProviderError> {
        debug!(instance = %self.id, "starting instance");
        self.remote.start()?;
        self.state = InstanceState::Running;
        Ok(())
    }

    /// Stop the instance. On success the observed state becomes `Stopped`.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports, passed through uninterpreted.
    pub fn stop(&mut self) -> Result<(), ProviderError> {
        debug!(instance = %self.id, "stopping instance");
        self.remote.stop()?;
        self.state = InstanceState::Stopped;
        Ok(())
    }

    /// Permanently terminate the instance. On success the observed state
    /// becomes `Terminated` and the handle no longer maps to anything on the
    /// backend.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports, passed through uninterpreted.
    pub fn terminate(&mut self) -> Result<(), ProviderError> {
        info!(instance = %self.id, "terminating instance");
        self.remote.terminate()?;
        self.state = InstanceState::Terminated;
        Ok(())
    }

    /// Stop, then start, strictly in that order.
    ///
    /// Fail-fast: a stop failure propagates immediately and start is never
    /// attempted. No polling happens between the two calls; a backend that
    /// rejects start-while-stopping reports it through `ProviderError`.
    ///
    /// # Errors
    ///
    /// The first failing step's error, unmodified.
    pub fn restart(&mut self) -> Result<(), ProviderError> {
        info!(instance = %self, "restarting instance");
        self.stop()?;
        self.start()
    }

    /// Assemble the connection parameters for this instance: the session's
    /// key file plus the resolved endpoint, with the fixed attempt ceiling.
    ///
    /// # Errors
    ///
    /// Endpoint resolution failures pass through as `ProviderError`.
    pub fn connection(&mut self) -> Result<ConnectionSpec, ProviderError> {
        let endpoint = self.endpoint()?;
        Ok(ConnectionSpec {
            keyfile: self.session.key_path(),
            host: endpoint.host,
            user: endpoint.user,
            port: DEFAULT_SSH_PORT,
            connection_attempts: MAX_CONNECT_ATTEMPTS,
        })
    }

    /// Open a scoped remote-execution session for this instance.
    ///
    /// Resolves the endpoint if needed, then authenticates with the
    /// session's key file. The returned guard releases the transport when
    /// dropped.
    ///
    /// # Errors
    ///
    /// `ProviderError` from endpoint resolution, `TransportError` from the
    /// transport.
    pub fn open_remote_session(
        &mut self,
        transport: &dyn RemoteTransport,
    ) -> Result<Box<dyn RemoteSession>, XdockerError> {
        let spec = self.connection()?;
        debug!(instance = %self.id, host = %spec.host, "opening remote session");
        Ok(transport.connect(&spec)?)
    }
}

impl fmt::Display for InstanceHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance: {}", self.id)
    }
}

impl fmt::Debug for InstanceHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHandle")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
