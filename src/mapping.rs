//! Declarative registration records for table mappings
//!
//! A [`TableMapping`] describes how one struct maps onto one table: the
//! table name, the type-level updatable flag, and one [`FieldMapping`] per
//! field in declaration order. Mappings are plain data; nothing is
//! validated until [`TableInfo::build`](crate::info::TableInfo::build)
//! turns them into a descriptor.
//!
//! Mappings are usually produced by `#[derive(SqlRecord)]`, but can be
//! written by hand:
//!
//! ```ignore
//! let mapping = TableMapping::new("Order")
//!     .table_name("orders")
//!     .updatable()
//!     .field(FieldMapping::new("id", FieldType::Integer)
//!         .column_name("order_id")
//!         .auto_increment())
//!     .field(FieldMapping::new("name", FieldType::Text).updatable());
//! ```

use crate::value::FieldType;

/// Mapping declaration for a single field.
#[derive(Clone, Debug)]
pub struct FieldMapping {
    pub(crate) name:           String,
    pub(crate) column_name:    Option<String>,
    pub(crate) updatable:      bool,
    pub(crate) auto_increment: bool,
    pub(crate) field_type:     FieldType,
}

impl FieldMapping {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self { name: name.into(), column_name: None, updatable: false, auto_increment: false, field_type }
    }

    /// Override the target column name (defaults to the field name).
    pub fn column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Mark the field as participating in update-set clauses.
    pub fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    /// Mark the field as database-assigned on insert.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// Mapping declaration for a whole type.
#[derive(Clone, Debug)]
pub struct TableMapping {
    pub(crate) type_name:  &'static str,
    pub(crate) table_name: Option<String>,
    pub(crate) updatable:  bool,
    pub(crate) fields:     Vec<FieldMapping>,
}

impl TableMapping {
    pub fn new(type_name: &'static str) -> Self {
        Self { type_name, table_name: None, updatable: false, fields: Vec::new() }
    }

    /// Override the table name (defaults to the bare type name).
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Allow update fragments for this type.
    pub fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    /// Append a field mapping (order of calls = declaration order).
    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mapping_defaults() {
        let field = FieldMapping::new("id", FieldType::Integer);
        assert_eq!(field.name, "id");
        assert_eq!(field.column_name, None);
        assert!(!field.updatable);
        assert!(!field.auto_increment);
        assert_eq!(field.field_type, FieldType::Integer);
    }

    #[test]
    fn test_field_mapping_builder() {
        let field = FieldMapping::new("id", FieldType::Integer).column_name("order_id").auto_increment();
        assert_eq!(field.column_name.as_deref(), Some("order_id"));
        assert!(field.auto_increment);
        assert!(!field.updatable);
    }

    #[test]
    fn test_table_mapping_defaults() {
        let mapping = TableMapping::new("Order");
        assert_eq!(mapping.type_name(), "Order");
        assert_eq!(mapping.table_name, None);
        assert!(!mapping.updatable);
        assert!(mapping.fields.is_empty());
    }

    #[test]
    fn test_table_mapping_field_order() {
        let mapping = TableMapping::new("Order")
            .table_name("orders")
            .updatable()
            .field(FieldMapping::new("id", FieldType::Integer))
            .field(FieldMapping::new("name", FieldType::Text))
            .field(FieldMapping::new("total", FieldType::Float));

        assert_eq!(mapping.table_name.as_deref(), Some("orders"));
        assert!(mapping.updatable);
        let names: Vec<_> = mapping.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "total"]);
    }
}
