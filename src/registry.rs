//! Per-process descriptor cache
//!
//! One [`Registry`] holds at most one [`TableInfo`] per record type,
//! built lazily on first request and shared for the life of the process.
//! The registry is an explicit object: construct it once, pass it to
//! whatever assembles statements. It also carries the dialect's
//! parameter-prefix character, applied to every descriptor it builds.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use crate::error::Result;
use crate::info::TableInfo;
use crate::record::SqlRecord;

pub const DEFAULT_PARAM_PREFIX: char = '@';

/// Read-through cache of validated descriptors, keyed by record type.
#[derive(Debug)]
pub struct Registry {
    param_prefix: char,
    infos:        RwLock<HashMap<TypeId, Arc<TableInfo>>>,
}

impl Registry {
    /// Registry using the default `'@'` parameter prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PARAM_PREFIX)
    }

    /// Registry for a dialect with a different prefix, e.g. `':'`.
    pub fn with_prefix(param_prefix: char) -> Self {
        Self { param_prefix, infos: RwLock::new(HashMap::new()) }
    }

    pub fn param_prefix(&self) -> char {
        self.param_prefix
    }

    /// Descriptor for `R`, building and caching it on first request.
    ///
    /// Concurrent first requests may each run the (pure) build, but exactly
    /// one result is stored and every caller ends up with the same `Arc`.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from `R::mapping()` validation.
    /// Failed builds are not cached.
    pub fn info<R: SqlRecord>(&self) -> Result<Arc<TableInfo>> {
        let key = TypeId::of::<R>();

        if let Some(info) = self.infos.read().expect("registry lock poisoned").get(&key) {
            return Ok(Arc::clone(info));
        }

        let built = Arc::new(TableInfo::build(R::mapping(), self.param_prefix)?);

        let mut infos = self.infos.write().expect("registry lock poisoned");
        let info = infos.entry(key).or_insert(built);
        Ok(Arc::clone(info))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
