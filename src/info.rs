//! Validated per-type descriptors and SQL fragment rendering
//!
//! [`TableInfo`] is the immutable product of validating a
//! [`TableMapping`](crate::mapping::TableMapping): table name, type-level
//! updatable flag, and one [`FieldInfo`] per field in declaration order.
//! All fragment operations hang off it. The three whole-table lists
//! (select projection, column list, parameter list) are memoized on first
//! use; everything else is computed per call from the descriptor and the
//! request arguments.

use std::sync::OnceLock;

use crate::error::Error;
use crate::error::Result;
use crate::mapping::TableMapping;
use crate::record::FieldKey;
use crate::record::SqlRecord;
use crate::value::FieldType;

/// Validated metadata for one mapped field.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name:           String,
    column_name:    String,
    updatable:      bool,
    auto_increment: bool,
    field_type:     FieldType,
}

impl FieldInfo {
    /// Source-field identifier, also used as the parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target column identifier
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn updatable(&self) -> bool {
        self.updatable
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// Immutable per-type descriptor, built once and cached by the
/// [`Registry`](crate::registry::Registry).
#[derive(Debug)]
pub struct TableInfo {
    type_name:    &'static str,
    table_name:   String,
    updatable:    bool,
    param_prefix: char,
    fields:       Vec<FieldInfo>,

    select_list: OnceLock<String>,
    column_list: OnceLock<String>,
    param_list:  OnceLock<String>,
}

impl TableInfo {
    /// Validate a mapping into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the mapping has no fields, two
    /// fields share a name, a field is auto-increment with a reference-kind
    /// field type, or a field is both auto-increment and updatable.
    pub fn build(mapping: TableMapping, param_prefix: char) -> Result<Self> {
        let TableMapping { type_name, table_name, updatable, fields } = mapping;

        if fields.is_empty() {
            return Err(Error::NoFields(type_name));
        }

        let mut infos: Vec<FieldInfo> = Vec::with_capacity(fields.len());
        for field in fields {
            if infos.iter().any(|seen| seen.name == field.name) {
                return Err(Error::DuplicateField { type_name, field: field.name });
            }
            if field.auto_increment && field.field_type.default_value().is_none() {
                return Err(Error::AutoIncrementType {
                    type_name,
                    field: field.name,
                    field_type: field.field_type,
                });
            }
            if field.auto_increment && field.updatable {
                return Err(Error::AutoIncrementUpdatable { type_name, field: field.name });
            }
            infos.push(FieldInfo {
                column_name:    field.column_name.unwrap_or_else(|| field.name.clone()),
                name:           field.name,
                updatable:      field.updatable,
                auto_increment: field.auto_increment,
                field_type:     field.field_type,
            });
        }

        Ok(Self {
            type_name,
            table_name: table_name.unwrap_or_else(|| type_name.to_string()),
            updatable,
            param_prefix,
            fields: infos,
            select_list: OnceLock::new(),
            column_list: OnceLock::new(),
            param_list: OnceLock::new(),
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Type-level updatable flag. Advisory only: update fragments are still
    /// rendered when it is false, with a warning.
    pub fn updatable(&self) -> bool {
        self.updatable
    }

    pub fn param_prefix(&self) -> char {
        self.param_prefix
    }

    /// Mapped fields in declaration order (never empty)
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Name of the first declared field
    pub fn first_field_name(&self) -> &str {
        &self.fields[0].name
    }

    /// `table.column AS name` for every field, joined by `", "`
    pub fn select_list(&self) -> &str {
        self.select_list.get_or_init(|| {
            self.fields
                .iter()
                .map(|f| format!("{}.{} AS {}", self.table_name, f.column_name, f.name))
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    /// `column1,column2,...` in declaration order, no table qualifier
    pub fn column_list(&self) -> &str {
        self.column_list
            .get_or_init(|| self.fields.iter().map(|f| f.column_name.as_str()).collect::<Vec<_>>().join(","))
    }

    /// `@name1,@name2,...` in declaration order, using the configured prefix
    pub fn param_list(&self) -> &str {
        self.param_list.get_or_init(|| {
            self.fields
                .iter()
                .map(|f| format!("{}{}", self.param_prefix, f.name))
                .collect::<Vec<_>>()
                .join(",")
        })
    }

    /// `table.column=@name` for each requested field, joined by `" AND "`,
    /// in request order.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty request, a duplicated name, or a name
    /// not present in the descriptor.
    pub fn where_clause<K: FieldKey>(&self, fields: &[K]) -> Result<String> {
        let resolved = self.resolve(fields)?;
        Ok(resolved.iter().map(|f| self.assignment(f)).collect::<Vec<_>>().join(" AND "))
    }

    /// `table.column=@name` pairs joined by `", "`, in request order.
    ///
    /// Requesting fields that are not marked updatable (or a type with no
    /// type-level updatable flag) logs a warning but still renders the
    /// clause.
    ///
    /// # Errors
    ///
    /// Same request validation as [`where_clause`](Self::where_clause).
    pub fn update_set<K: FieldKey>(&self, fields: &[K]) -> Result<String> {
        let resolved = self.resolve(fields)?;
        self.warn_type_not_updatable();
        let frozen: Vec<&str> = resolved.iter().filter(|f| !f.updatable).map(|f| f.name.as_str()).collect();
        if !frozen.is_empty() {
            tracing::warn!("Not updatable fields {:?} in update set for type {}", frozen, self.type_name);
        }
        Ok(resolved.iter().map(|f| self.assignment(f)).collect::<Vec<_>>().join(", "))
    }

    /// Update-set clause over every updatable field not named in `except`,
    /// in declaration order.
    ///
    /// # Errors
    ///
    /// `except` is validated like a [`where_clause`](Self::where_clause)
    /// request; additionally errors when no updatable field remains.
    pub fn update_set_all_except<K: FieldKey>(&self, except: &[K]) -> Result<String> {
        let excluded = self.resolve(except)?;
        self.warn_type_not_updatable();
        let parts: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.updatable && !excluded.iter().any(|e| e.name == f.name))
            .map(|f| self.assignment(f))
            .collect();
        if parts.is_empty() {
            return Err(Error::NoUpdatableFields(self.type_name));
        }
        Ok(parts.join(", "))
    }

    /// `table.column` for a single field.
    pub fn column_with_table<K: FieldKey>(&self, field: K) -> Result<String> {
        let f = self.field(field.key())?;
        Ok(format!("{}.{}", self.table_name, f.column_name))
    }

    /// Bare `column` for a single field.
    pub fn column<K: FieldKey>(&self, field: K) -> Result<&str> {
        Ok(self.field(field.key())?.column_name.as_str())
    }

    /// True iff every auto-increment field of `record` still holds its
    /// field type's default value. Gate this before generating an insert.
    pub fn auto_increment_defaults<R: SqlRecord>(&self, record: &R) -> bool {
        self.fields.iter().filter(|f| f.auto_increment).all(|f| {
            match (f.field_type.default_value(), record.field_value(&f.name)) {
                (Some(default), Some(value)) => value == default,
                _ => false,
            }
        })
    }

    fn field(&self, name: &str) -> Result<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name).ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    fn resolve<K: FieldKey>(&self, keys: &[K]) -> Result<Vec<&FieldInfo>> {
        if keys.is_empty() {
            return Err(Error::EmptyFieldList);
        }
        let mut resolved: Vec<&FieldInfo> = Vec::with_capacity(keys.len());
        for key in keys {
            let name = key.key();
            if resolved.iter().any(|f| f.name == name) {
                return Err(Error::DuplicateArgument(name.to_string()));
            }
            resolved.push(self.field(name)?);
        }
        Ok(resolved)
    }

    fn assignment(&self, field: &FieldInfo) -> String {
        format!("{}.{}={}{}", self.table_name, field.column_name, self.param_prefix, field.name)
    }

    fn warn_type_not_updatable(&self) {
        if !self.updatable {
            tracing::warn!("Update set requested for type {} which is not marked updatable", self.type_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldMapping;
    use crate::value::IntoValue;
    use crate::value::Value;

    fn order_mapping() -> TableMapping {
        TableMapping::new("Order")
            .table_name("orders")
            .updatable()
            .field(FieldMapping::new("Id", FieldType::Integer).column_name("order_id").auto_increment())
            .field(FieldMapping::new("Name", FieldType::Text).updatable())
            .field(FieldMapping::new("Total", FieldType::Float).updatable())
    }

    fn order_info() -> TableInfo {
        TableInfo::build(order_mapping(), '@').unwrap()
    }

    #[derive(Clone, Debug, Default)]
    struct Order {
        id:    i64,
        name:  String,
        total: f64,
    }

    impl SqlRecord for Order {
        type Field = &'static str;

        fn mapping() -> TableMapping {
            order_mapping()
        }

        fn field_value(&self, field: &str) -> Option<Value> {
            match field {
                "Id" => Some(self.id.into_value()),
                "Name" => Some(self.name.clone().into_value()),
                "Total" => Some(self.total.into_value()),
                _ => None,
            }
        }

        fn values(&self) -> Vec<(&'static str, Value)> {
            vec![
                ("Id", self.id.into_value()),
                ("Name", self.name.clone().into_value()),
                ("Total", self.total.into_value()),
            ]
        }
    }

    #[test]
    fn test_build_preserves_declaration_order() {
        let info = order_info();
        assert_eq!(info.fields().len(), 3);
        let names: Vec<_> = info.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Id", "Name", "Total"]);
        assert_eq!(info.first_field_name(), "Id");
    }

    #[test]
    fn test_build_table_name_override() {
        let info = order_info();
        assert_eq!(info.table_name(), "orders");
        assert!(info.updatable());
    }

    #[test]
    fn test_build_defaults_to_type_name() {
        let mapping = TableMapping::new("Customer").field(FieldMapping::new("id", FieldType::Integer));
        let info = TableInfo::build(mapping, '@').unwrap();
        assert_eq!(info.table_name(), "Customer");
        assert!(!info.updatable());
    }

    #[test]
    fn test_build_column_name_defaults_to_field_name() {
        let info = order_info();
        assert_eq!(info.fields()[0].column_name(), "order_id");
        assert_eq!(info.fields()[1].column_name(), "Name");
    }

    #[test]
    fn test_build_rejects_empty_mapping() {
        let result = TableInfo::build(TableMapping::new("Empty"), '@');
        assert!(matches!(result, Err(Error::NoFields("Empty"))));
    }

    #[test]
    fn test_build_rejects_duplicate_field() {
        let mapping = TableMapping::new("Order")
            .field(FieldMapping::new("id", FieldType::Integer))
            .field(FieldMapping::new("id", FieldType::Text));
        let result = TableInfo::build(mapping, '@');
        assert!(matches!(result, Err(Error::DuplicateField { .. })));
    }

    #[test]
    fn test_build_rejects_auto_increment_reference_type() {
        let mapping =
            TableMapping::new("Order").field(FieldMapping::new("id", FieldType::Text).auto_increment());
        let err = TableInfo::build(mapping, '@').unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, Error::AutoIncrementType { .. }));
    }

    #[test]
    fn test_build_rejects_auto_increment_updatable() {
        let mapping = TableMapping::new("Order")
            .field(FieldMapping::new("id", FieldType::Integer).auto_increment().updatable());
        let result = TableInfo::build(mapping, '@');
        assert!(matches!(result, Err(Error::AutoIncrementUpdatable { .. })));
    }

    #[test]
    fn test_select_list() {
        let info = order_info();
        assert_eq!(
            info.select_list(),
            "orders.order_id AS Id, orders.Name AS Name, orders.Total AS Total"
        );
    }

    #[test]
    fn test_column_list() {
        let info = order_info();
        assert_eq!(info.column_list(), "order_id,Name,Total");
    }

    #[test]
    fn test_param_list() {
        let info = order_info();
        assert_eq!(info.param_list(), "@Id,@Name,@Total");
    }

    #[test]
    fn test_param_list_custom_prefix() {
        let info = TableInfo::build(order_mapping(), ':').unwrap();
        assert_eq!(info.param_list(), ":Id,:Name,:Total");
        assert_eq!(info.where_clause(&["Id"]).unwrap(), "orders.order_id=:Id");
    }

    #[test]
    fn test_cached_lists_are_idempotent() {
        let info = order_info();
        let first = info.column_list();
        let second = info.column_list();
        assert_eq!(first, second);
        assert_eq!(first.as_ptr(), second.as_ptr());
        assert_eq!(info.param_list(), info.param_list());
        assert_eq!(info.select_list(), info.select_list());
    }

    #[test]
    fn test_where_clause_single() {
        let info = order_info();
        assert_eq!(info.where_clause(&["Id"]).unwrap(), "orders.order_id=@Id");
    }

    #[test]
    fn test_where_clause_follows_request_order() {
        let info = order_info();
        assert_eq!(
            info.where_clause(&["Total", "Id"]).unwrap(),
            "orders.Total=@Total AND orders.order_id=@Id"
        );
    }

    #[test]
    fn test_where_clause_rejects_empty() {
        let info = order_info();
        assert!(matches!(info.where_clause::<&str>(&[]), Err(Error::EmptyFieldList)));
    }

    #[test]
    fn test_where_clause_rejects_duplicates() {
        let info = order_info();
        assert!(matches!(info.where_clause(&["Id", "Id"]), Err(Error::DuplicateArgument(_))));
    }

    #[test]
    fn test_where_clause_rejects_unknown_field() {
        let info = order_info();
        assert!(matches!(info.where_clause(&["Nope"]), Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_where_clause_deterministic() {
        let info = order_info();
        let a = info.where_clause(&["Name", "Total"]).unwrap();
        let b = info.where_clause(&["Name", "Total"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_update_set() {
        let info = order_info();
        assert_eq!(
            info.update_set(&["Name", "Total"]).unwrap(),
            "orders.Name=@Name, orders.Total=@Total"
        );
    }

    #[test]
    fn test_update_set_non_updatable_field_still_renders() {
        let info = order_info();
        assert_eq!(info.update_set(&["Id"]).unwrap(), "orders.order_id=@Id");
    }

    #[test]
    fn test_update_set_rejects_unknown_field() {
        let info = order_info();
        assert!(matches!(info.update_set(&["Nope"]), Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_update_set_all_except() {
        let info = order_info();
        assert_eq!(
            info.update_set_all_except(&["Id"]).unwrap(),
            "orders.Name=@Name, orders.Total=@Total"
        );
    }

    #[test]
    fn test_update_set_all_except_skips_excluded_updatable() {
        let info = order_info();
        assert_eq!(info.update_set_all_except(&["Name"]).unwrap(), "orders.Total=@Total");
    }

    #[test]
    fn test_update_set_all_except_nothing_left() {
        let info = order_info();
        let result = info.update_set_all_except(&["Name", "Total"]);
        assert!(matches!(result, Err(Error::NoUpdatableFields("Order"))));
    }

    #[test]
    fn test_update_set_all_except_rejects_empty_exclusions() {
        let info = order_info();
        assert!(matches!(info.update_set_all_except::<&str>(&[]), Err(Error::EmptyFieldList)));
    }

    #[test]
    fn test_column_lookups() {
        let info = order_info();
        assert_eq!(info.column_with_table("Id").unwrap(), "orders.order_id");
        assert_eq!(info.column("Id").unwrap(), "order_id");
        assert_eq!(info.column("Name").unwrap(), "Name");
        assert!(matches!(info.column("Nope"), Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_auto_increment_defaults_fresh_record() {
        let info = order_info();
        let order = Order { id: 0, name: "widgets".to_string(), total: 9.5 };
        assert!(info.auto_increment_defaults(&order));
    }

    #[test]
    fn test_auto_increment_defaults_assigned_id() {
        let info = order_info();
        let order = Order { id: 7, name: "widgets".to_string(), total: 9.5 };
        assert!(!info.auto_increment_defaults(&order));
    }

    #[test]
    fn test_auto_increment_defaults_no_auto_fields() {
        let mapping = TableMapping::new("Order")
            .table_name("orders")
            .field(FieldMapping::new("Name", FieldType::Text).updatable())
            .field(FieldMapping::new("Total", FieldType::Float).updatable());
        let info = TableInfo::build(mapping, '@').unwrap();
        let order = Order { id: 7, name: "widgets".to_string(), total: 9.5 };
        assert!(info.auto_increment_defaults(&order));
    }
}
