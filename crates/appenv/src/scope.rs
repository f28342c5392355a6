//! Identifier-bound views over an `EnvResolver`.
//!
//! The running application's identifier normally comes from the hosting
//! platform. `AppIdentity` is the seam for such sources; `EnvScope` binds a
//! resolver to one identifier so call sites do not repeat it.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvError;
use crate::resolver::EnvResolver;

/// A source of the current application identifier.
pub trait AppIdentity {
    /// The opaque identifier used as the lookup key into `mappings`.
    fn app_id(&self) -> &str;
}

impl AppIdentity for str {
    fn app_id(&self) -> &str {
        self
    }
}

impl AppIdentity for String {
    fn app_id(&self) -> &str {
        self.as_str()
    }
}

impl<T: AppIdentity + ?Sized> AppIdentity for &T {
    fn app_id(&self) -> &str {
        (**self).app_id()
    }
}

/// An `EnvResolver` bound to a single application identifier.
#[derive(Debug, Clone, Copy)]
pub struct EnvScope<'a> {
    resolver: &'a EnvResolver,
    app_id: &'a str,
}

impl<'a> EnvScope<'a> {
    pub(crate) fn new(resolver: &'a EnvResolver, app_id: &'a str) -> Self {
        Self { resolver, app_id }
    }

    pub fn app_id(&self) -> &'a str {
        self.app_id
    }

    pub fn get(&self, key: &str) -> Result<Value, EnvError> {
        self.resolver.get(self.app_id, key)
    }

    pub fn get_ok(&self, key: &str) -> Option<Value> {
        self.resolver.get_ok(self.app_id, key)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, EnvError> {
        self.resolver.get_as(self.app_id, key)
    }

    /// See [`EnvResolver::name`] for how errors are reported.
    pub fn name(&self) -> String {
        self.resolver.name(self.app_id)
    }

    pub fn is(&self, name: &str) -> bool {
        self.resolver.is(self.app_id, name)
    }
}

impl AppIdentity for EnvScope<'_> {
    fn app_id(&self) -> &str {
        self.app_id
    }
}
