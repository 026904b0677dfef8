//! Shared test helpers: scripted port implementations and session constructors.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use xdocker::application::ports::{
    ConnectionSpec, Credentials, Instance, InstanceSpec, KeyDecryptor, Provider, RemoteOutput,
    RemoteSession, RemoteTransport,
};
use xdocker::application::registry::ProviderFactory;
use xdocker::application::session::ProviderSession;
use xdocker::domain::credentials::ProviderParams;
use xdocker::domain::error::{ProviderError, TransportError, XdockerError};
use xdocker::domain::instance::{Endpoint, InstanceId};
use xdocker::infra::keystore::{IdentityDecryptor, KeyStore};

// ── Credentials ───────────────────────────────────────────────────────────────

/// Fixed two-field credentials, access key first.
pub struct PairCreds {
    pub access: String,
    pub secret: String,
}

impl PairCreds {
    pub fn new(access: &str, secret: &str) -> Self {
        Self {
            access: access.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl Credentials for PairCreds {
    fn fingerprint_values(&self) -> Vec<&str> {
        vec![self.access.as_str(), self.secret.as_str()]
    }
}

// ── Session constructors ──────────────────────────────────────────────────────

/// Session over an explicit store directory and the default credential pair.
pub fn session_at(dir: &Path, username: &str) -> ProviderSession {
    session_with(dir, &ProviderParams::new(username), &PairCreds::new("AKID", "SECRET"))
}

pub fn session_with(
    dir: &Path,
    params: &ProviderParams,
    creds: &dyn Credentials,
) -> ProviderSession {
    let store = KeyStore::new(dir.to_path_buf(), Arc::new(IdentityDecryptor));
    ProviderSession::with_store(params, creds, store).expect("valid session params")
}

// ── Decryptors ────────────────────────────────────────────────────────────────

/// Rejects every ciphertext.
pub struct RefusingDecryptor;

impl KeyDecryptor for RefusingDecryptor {
    fn decrypt(
        &self,
        _ciphertext: &[u8],
        _username: &str,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        Err("wrong passphrase".into())
    }
}

// ── Instance scripting ────────────────────────────────────────────────────────

/// Shared script for instance spies: an ordered call log plus failure
/// switches. Cloning shares the underlying cells.
#[derive(Clone, Default)]
pub struct InstanceScript {
    calls: Rc<RefCell<Vec<&'static str>>>,
    pub fail_start: Rc<Cell<bool>>,
    pub fail_stop: Rc<Cell<bool>>,
}

impl InstanceScript {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

/// Instance whose lifecycle calls are recorded and optionally scripted to
/// fail. Resolves to a fixed documentation-range endpoint.
pub struct ScriptedInstance {
    script: InstanceScript,
    endpoint: Endpoint,
}

impl ScriptedInstance {
    pub fn new(script: InstanceScript) -> Self {
        Self {
            script,
            endpoint: Endpoint {
                host: "198.51.100.4".to_string(),
                user: "admin".to_string(),
            },
        }
    }
}

impl Instance for ScriptedInstance {
    fn resolve(&mut self) -> Result<Endpoint, ProviderError> {
        self.script.record("resolve");
        Ok(self.endpoint.clone())
    }

    fn start(&mut self) -> Result<(), ProviderError> {
        self.script.record("start");
        if self.script.fail_start.get() {
            return Err(ProviderError::new("fake", "start refused"));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ProviderError> {
        self.script.record("stop");
        if self.script.fail_stop.get() {
            return Err(ProviderError::new("fake", "stop refused"));
        }
        Ok(())
    }

    fn terminate(&mut self) -> Result<(), ProviderError> {
        self.script.record("terminate");
        Ok(())
    }
}

// ── Remote transport ──────────────────────────────────────────────────────────

/// Hands out canned sessions and records the spec of the last connect.
pub struct TransportSpy {
    pub last_spec: RefCell<Option<ConnectionSpec>>,
    pub session_dropped: Rc<Cell<bool>>,
    pub exit_code: Cell<i32>,
}

impl Default for TransportSpy {
    fn default() -> Self {
        Self {
            last_spec: RefCell::new(None),
            session_dropped: Rc::default(),
            exit_code: Cell::new(0),
        }
    }
}

impl RemoteTransport for TransportSpy {
    fn connect(&self, spec: &ConnectionSpec) -> Result<Box<dyn RemoteSession>, TransportError> {
        *self.last_spec.borrow_mut() = Some(spec.clone());
        Ok(Box::new(ScriptedSession {
            output: RemoteOutput {
                exit_code: self.exit_code.get(),
                stdout: "ok\n".to_string(),
                stderr: String::new(),
            },
            dropped: Rc::clone(&self.session_dropped),
        }))
    }
}

/// Canned remote session; flips its drop flag on release.
pub struct ScriptedSession {
    output: RemoteOutput,
    dropped: Rc<Cell<bool>>,
}

impl RemoteSession for ScriptedSession {
    fn run(&mut self, _command: &str) -> Result<RemoteOutput, TransportError> {
        Ok(self.output.clone())
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

// ── Provider fake ─────────────────────────────────────────────────────────────

/// Provider whose instances are scripted spies and whose created ids are
/// sequential.
pub struct FakeProvider {
    session: ProviderSession,
    script: InstanceScript,
    created: Cell<u32>,
}

impl FakeProvider {
    pub fn new(session: ProviderSession) -> Self {
        Self {
            session,
            script: InstanceScript::default(),
            created: Cell::new(0),
        }
    }

    pub fn script(&self) -> InstanceScript {
        self.script.clone()
    }
}

impl Provider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn session(&self) -> &ProviderSession {
        &self.session
    }

    fn create_instance(&self, _spec: &InstanceSpec) -> Result<InstanceId, ProviderError> {
        let n = self.created.get() + 1;
        self.created.set(n);
        Ok(InstanceId::from(format!("fake-{n}")))
    }

    fn get_instance(&self, _id: &InstanceId) -> Result<Box<dyn Instance>, ProviderError> {
        Ok(Box::new(ScriptedInstance::new(self.script.clone())))
    }
}

/// Builds a [`FakeProvider`] with keys stored under a caller-supplied
/// directory.
pub struct FakeFactory {
    pub dir: PathBuf,
}

impl ProviderFactory for FakeFactory {
    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn create(&self, params: ProviderParams) -> Result<Box<dyn Provider>, XdockerError> {
        let creds = PairCreds::new("AKID", "SECRET");
        let store = KeyStore::new(self.dir.clone(), Arc::new(IdentityDecryptor));
        let session = ProviderSession::with_store(&params, &creds, store)?;
        Ok(Box::new(FakeProvider::new(session)))
    }
}
