//! Unit tests for provider registration and construction.

#![allow(clippy::expect_used)]

use xdocker::application::ports::InstanceSpec;
use xdocker::application::registry::ProviderRegistry;
use xdocker::domain::credentials::{KeyMaterial, ProviderParams};
use xdocker::domain::error::XdockerError;
use xdocker::domain::instance::InstanceState;

use crate::helpers::FakeFactory;

fn registry_at(dir: &std::path::Path) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(FakeFactory {
        dir: dir.to_path_buf(),
    }));
    registry
}

#[test]
fn create_dispatches_to_the_registered_factory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = registry_at(dir.path());
    let provider = registry
        .create("fake", ProviderParams::new("alice"))
        .expect("create");
    assert_eq!(provider.name(), "fake");
    assert_eq!(provider.session().username(), "alice");
}

#[test]
fn create_with_unknown_name_reports_the_known_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = registry_at(dir.path());
    let err = registry
        .create("gce", ProviderParams::new("alice"))
        .err()
        .expect("unknown name must fail");
    match err {
        XdockerError::UnknownProvider { name, known } => {
            assert_eq!(name, "gce");
            assert_eq!(known, "fake");
        }
        other => panic!("expected UnknownProvider, got: {other}"),
    }
}

#[test]
fn factory_validation_failures_pass_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = registry_at(dir.path());
    let err = registry
        .create("fake", ProviderParams::new("bad/user"))
        .err()
        .expect("separator in username must fail");
    assert!(matches!(err, XdockerError::Validation(_)), "got: {err}");
}

#[test]
fn provider_keys_go_through_the_session_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = registry_at(dir.path());
    let provider = registry
        .create("fake", ProviderParams::new("alice"))
        .expect("create");
    assert!(provider.key().is_err(), "nothing saved yet");
    provider
        .save_key(&KeyMaterial::from("secret-bytes"))
        .expect("save");
    let material = provider.key().expect("load");
    assert_eq!(material.expose(), b"secret-bytes");
}

#[test]
fn provider_handle_wraps_a_created_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = registry_at(dir.path());
    let provider = registry
        .create("fake", ProviderParams::new("alice"))
        .expect("create");
    let id = provider
        .create_instance(&InstanceSpec::default())
        .expect("create instance");
    let mut handle = provider.handle(id.clone()).expect("handle");
    assert_eq!(handle.id(), &id);
    assert_eq!(handle.state(), InstanceState::Unresolved);
    handle.start().expect("start");
    assert_eq!(handle.state(), InstanceState::Running);
}
