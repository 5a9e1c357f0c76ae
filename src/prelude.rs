//! Prelude module for sqlcrud
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use sqlcrud::prelude::*;
//! ```

// Re-export the derive macro
pub use sqlcrud_macros::SqlRecord;

pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::info::FieldInfo;
pub use crate::info::TableInfo;
pub use crate::insert::Execute;
pub use crate::insert::Insert;
pub use crate::mapping::FieldMapping;
pub use crate::mapping::TableMapping;
pub use crate::record::FieldKey;
pub use crate::record::SqlRecord;
pub use crate::registry::Registry;
pub use crate::value::FieldType;
pub use crate::value::IntoValue;
pub use crate::value::Value;
