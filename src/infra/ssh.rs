//! Blocking SSH transport over `ssh2`.

use std::io::Read;
use std::net::TcpStream;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::{ConnectionSpec, RemoteOutput, RemoteSession, RemoteTransport};
use crate::domain::error::TransportError;

/// Delay between connection attempts.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Blocking SSH transport authenticating with the spec's key file.
///
/// Connection establishment (TCP connect plus SSH handshake) is retried up
/// to the spec's attempt ceiling. Authentication is attempted once; a
/// rejected key is not a condition retries can fix.
pub struct SshTransport {
    retry_delay: Duration,
}

impl SshTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Transport with a custom delay between attempts. Tests use zero.
    #[must_use]
    pub fn with_retry_delay(retry_delay: Duration) -> Self {
        Self { retry_delay }
    }

    fn establish(
        spec: &ConnectionSpec,
    ) -> Result<ssh2::Session, Box<dyn std::error::Error + Send + Sync>> {
        let tcp = TcpStream::connect((spec.host.as_str(), spec.port))?;
        let mut session = ssh2::Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        Ok(session)
    }
}

impl Default for SshTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteTransport for SshTransport {
    fn connect(&self, spec: &ConnectionSpec) -> Result<Box<dyn RemoteSession>, TransportError> {
        let attempts = spec.connection_attempts.max(1);
        let mut last_failure = None;
        for attempt in 1..=attempts {
            match Self::establish(spec) {
                Ok(session) => {
                    debug!(host = %spec.host, attempt, "connection established");
                    return authenticate(session, spec);
                }
                Err(e) => {
                    warn!(
                        host = %spec.host,
                        attempt,
                        max = attempts,
                        error = %e,
                        "connection attempt failed"
                    );
                    last_failure = Some(e);
                    if attempt < attempts {
                        std::thread::sleep(self.retry_delay);
                    }
                }
            }
        }
        Err(TransportError::ConnectionExhausted {
            host: spec.host.clone(),
            port: spec.port,
            attempts,
            source: last_failure,
        })
    }
}

fn authenticate(
    session: ssh2::Session,
    spec: &ConnectionSpec,
) -> Result<Box<dyn RemoteSession>, TransportError> {
    let rejection = |source: Box<dyn std::error::Error + Send + Sync>| {
        TransportError::Authentication {
            user: spec.user.clone(),
            host: spec.host.clone(),
            keyfile: spec.keyfile.clone(),
            source,
        }
    };
    session
        .userauth_pubkey_file(&spec.user, None, &spec.keyfile, None)
        .map_err(|e| rejection(Box::new(e)))?;
    if !session.authenticated() {
        return Err(rejection("server rejected public key".into()));
    }
    debug!(host = %spec.host, user = %spec.user, "ssh session established");
    Ok(Box::new(SshSession {
        session,
        host: spec.host.clone(),
    }))
}

fn command_error(
    host: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> TransportError {
    TransportError::Command {
        host: host.to_string(),
        source: source.into(),
    }
}

/// Authenticated SSH session scoped to one instance.
///
/// Disconnects when dropped, on every exit path.
pub struct SshSession {
    session: ssh2::Session,
    host: String,
}

impl RemoteSession for SshSession {
    fn run(&mut self, command: &str) -> Result<RemoteOutput, TransportError> {
        let mut channel = self
            .session
            .channel_session()
            .map_err(|e| command_error(&self.host, e))?;
        channel
            .exec(command)
            .map_err(|e| command_error(&self.host, e))?;

        let mut stdout = String::new();
        channel
            .read_to_string(&mut stdout)
            .map_err(|e| command_error(&self.host, e))?;
        let mut stderr = String::new();
        channel
            .stderr()
            .read_to_string(&mut stderr)
            .map_err(|e| command_error(&self.host, e))?;

        channel
            .wait_close()
            .map_err(|e| command_error(&self.host, e))?;
        let exit_code = channel
            .exit_status()
            .map_err(|e| command_error(&self.host, e))?;
        Ok(RemoteOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        // Best effort; the TCP stream closes with the session regardless.
        let _ = self.session.disconnect(None, "session closed", None);
        debug!(host = %self.host, "ssh session closed");
    }
}
