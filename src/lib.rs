#![deny(warnings)]

//! # sqlcrud
//!
//! Per-type SQL metadata descriptors and CRUD fragment rendering.
//!
//! `sqlcrud` builds, once per record type, an immutable descriptor mapping
//! the struct's fields to table columns, and renders SQL string fragments
//! from it: select projections, column and parameter lists, where clauses,
//! and update-set clauses. The fragments are meant to be assembled into
//! statements by an outer data-access layer; the only executing surface in
//! this crate is the thin [`Insert`] helper, which delegates to an
//! [`Execute`] collaborator you provide.
//!
//! ## Features
//!
//! - Derive macro for declaring mappings on plain structs
//! - One validated, cached descriptor per type ([`Registry`])
//! - Typed field tokens (a generated enum per record) or plain strings
//! - Configurable parameter prefix per dialect (`@` by default, e.g. `:`)
//! - Auto-increment precondition check before insert generation
//!
//! ## Quick Start
//!
//! ```ignore
//! use sqlcrud::prelude::*;
//!
//! #[derive(Clone, Debug, Default, SqlRecord)]
//! #[sqlcrud(table_name = "orders", updatable)]
//! pub struct Order {
//!     #[sqlcrud(column_name = "order_id", auto_increment)]
//!     pub id:    i64,
//!     #[sqlcrud(updatable)]
//!     pub name:  String,
//!     #[sqlcrud(updatable)]
//!     pub total: f64,
//! }
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::new();
//!     let info = registry.info::<Order>()?;
//!
//!     // "orders.order_id AS id, orders.name AS name, orders.total AS total"
//!     let projection = info.select_list();
//!
//!     // "orders.order_id=@id"
//!     let by_id = info.where_clause(&[OrderField::Id])?;
//!
//!     // "orders.name=@name, orders.total=@total"
//!     let sets = info.update_set_all_except(&[OrderField::Id])?;
//!
//!     let select = format!("select {} from {} where {}", projection, info.table_name(), by_id);
//!     let update = format!("update {} set {} where {}", info.table_name(), sets, by_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Inserting
//!
//! ```ignore
//! // Executor errors and affected-row counts pass straight through.
//! let order = Order { name: "widgets".into(), total: 9.5, ..Default::default() };
//! let affected = Insert::new(&order).exec(&conn, &registry).await?;
//!
//! // Skip conflicting rows:
//! Insert::new(&order).or_ignore().exec(&conn, &registry).await?;
//! ```
//!
//! ## Mapping Attributes
//!
//! The `#[sqlcrud(...)]` attribute supports:
//!
//! - `table_name = "..."` - Set the table name (default: the struct name)
//! - `updatable` - On the struct: permit update fragments for this type.
//!   On a field: include it in update-set clauses
//! - `column_name = "..."` - Set a custom column name (default: field name)
//! - `auto_increment` - Mark a field as database-assigned on insert; the
//!   field must have a value-kind type and must hold its default value
//!   whenever an insert is generated
//!
//! Mappings can also be declared by hand with [`TableMapping`] /
//! [`FieldMapping`] and validated through [`TableInfo::build`]; the derive
//! is only a shorthand for the same declaration.

pub mod error;
pub mod info;
pub mod insert;
pub mod mapping;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod value;
// Re-export main types at crate root
pub use error::Error;
pub use error::Result;
pub use info::FieldInfo;
pub use info::TableInfo;
pub use insert::Execute;
pub use insert::Insert;
pub use mapping::FieldMapping;
pub use mapping::TableMapping;
pub use record::FieldKey;
pub use record::SqlRecord;
pub use registry::DEFAULT_PARAM_PREFIX;
pub use registry::Registry;
// Re-export the derive macro
pub use sqlcrud_macros::SqlRecord;
pub use value::FieldType;
pub use value::IntoValue;
pub use value::Value;
