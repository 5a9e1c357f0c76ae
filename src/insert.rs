//! Insert helper
//!
//! A thin pass-through over the descriptor: it checks the auto-increment
//! precondition, renders the insert statement from the cached column and
//! parameter lists, and hands the SQL plus the record's bound values to an
//! [`Execute`] collaborator. Everything behind that trait (connections,
//! transactions, the actual driver) is out of scope here.

use async_trait::async_trait;

use crate::error::Error;
use crate::error::Result;
use crate::info::TableInfo;
use crate::record::SqlRecord;
use crate::registry::Registry;
use crate::value::Value;

/// Statement-executing collaborator.
///
/// Implementations take a rendered SQL string and the named parameter
/// values bound from the record, and return the number of affected rows.
/// Data-access failures surface as [`Error::Database`] and pass through
/// this crate untouched.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn execute(&self, sql: &str, params: Vec<(String, Value)>) -> Result<u64>;
}

/// Insert statement for one record.
#[derive(Clone, Debug)]
pub struct Insert<'a, R: SqlRecord> {
    record: &'a R,
    ignore: bool,
}

impl<'a, R: SqlRecord> Insert<'a, R> {
    pub fn new(record: &'a R) -> Self {
        Self { record, ignore: false }
    }

    /// Render the `insert or ignore` form (skip conflicting rows).
    pub fn or_ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Render the insert statement for this record.
    ///
    /// # Errors
    ///
    /// Fails when any auto-increment field no longer holds its default
    /// value; such records have already been inserted or were filled in by
    /// the caller.
    pub fn sql(&self, info: &TableInfo) -> Result<String> {
        if !info.auto_increment_defaults(self.record) {
            return Err(Error::AutoIncrementNotDefault(info.type_name()));
        }
        let ignore = if self.ignore { " or ignore" } else { "" };
        Ok(format!(
            "insert{} into {} ({}) values ({});",
            ignore,
            info.table_name(),
            info.column_list(),
            info.param_list()
        ))
    }

    /// Resolve the descriptor, render, and execute.
    ///
    /// # Errors
    ///
    /// Propagates descriptor build failures, the auto-increment
    /// precondition, and any executor error.
    pub async fn exec<E: Execute>(self, conn: &E, registry: &Registry) -> Result<u64> {
        let info = registry.info::<R>()?;
        let sql = self.sql(&info)?;
        let params: Vec<(String, Value)> =
            self.record.values().into_iter().map(|(name, value)| (name.to_string(), value)).collect();
        tracing::debug!("Insert SQL: {}", sql);
        tracing::debug!("Insert Params: {:?}", params);
        conn.execute(&sql, params).await
    }
}
