//! Explicit provider registration.
//!
//! The registry is built once during process wiring and passed where
//! needed; there is no ambient global table.

use std::collections::BTreeMap;

use crate::application::ports::Provider;
use crate::domain::credentials::ProviderParams;
use crate::domain::error::XdockerError;

/// Builds a concrete provider from raw parameters.
///
/// One factory per backend, registered by name in a [`ProviderRegistry`].
pub trait ProviderFactory: Send + Sync {
    /// Registry key, e.g. `"ec2"`.
    fn provider_name(&self) -> &'static str;

    /// Validate the parameters and construct the provider.
    ///
    /// # Errors
    ///
    /// `ValidationError` for absent or malformed credential fields, wrapped
    /// in [`XdockerError`]; anything else the backend needs to report.
    fn create(&self, params: ProviderParams) -> Result<Box<dyn Provider>, XdockerError>;
}

/// Table of known provider backends.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<&'static str, Box<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a factory under its own name, replacing any previous entry
    /// with that name.
    pub fn register(&mut self, factory: Box<dyn ProviderFactory>) {
        self.factories.insert(factory.provider_name(), factory);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered provider names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a provider by name.
    ///
    /// # Errors
    ///
    /// `XdockerError::UnknownProvider` listing the registered names when
    /// `name` is not in the table; factory errors pass through.
    pub fn create(
        &self,
        name: &str,
        params: ProviderParams,
    ) -> Result<Box<dyn Provider>, XdockerError> {
        match self.factories.get(name) {
            Some(factory) => factory.create(params),
            None => Err(XdockerError::UnknownProvider {
                name: name.to_string(),
                known: if self.factories.is_empty() {
                    "(none)".to_string()
                } else {
                    self.names().join(", ")
                },
            }),
        }
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
