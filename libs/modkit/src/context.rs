use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use modkit_db::DbHandle;
use serde::de::DeserializeOwned;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// The `modules:` bag of the app config is already keyed by module name.
impl ConfigProvider for HashMap<String, serde_json::Value> {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.get(module_name)
    }
}

#[derive(Clone, Default)]
pub struct ModuleCtx {
    db: Option<DbHandle>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
    module_name: Option<Arc<str>>,
}

#[derive(Default)]
pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl ModuleCtxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, db: DbHandle) -> Self {
        self.inner.db = Some(db);
        self
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name.
    pub fn for_module(mut self, name: &str) -> Self {
        self.module_name = Some(Arc::<str>::from(name));
        self
    }

    pub fn db(&self) -> Option<&DbHandle> {
        self.db.as_ref()
    }

    pub fn db_required(&self) -> anyhow::Result<&DbHandle> {
        self.db
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("database is not configured"))
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Deserialize the module's config section into `T`.
    ///
    /// A missing section yields `T::default()`; a present but invalid one is an error.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> anyhow::Result<T> {
        let raw = match (&self.module_name, &self.config_provider) {
            (Some(name), Some(p)) => p.get_module_config(name),
            _ => None,
        };
        match raw {
            Some(v) => serde_json::from_value(v.clone()).with_context(|| {
                format!(
                    "invalid config for module '{}'",
                    self.current_module().unwrap_or_default()
                )
            }),
            None => Ok(T::default()),
        }
    }
}
