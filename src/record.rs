//! Record and field-key traits
//!
//! These traits are the seam between mapped structs and the descriptor
//! machinery. They are typically implemented by the `#[derive(SqlRecord)]`
//! macro, which also generates a field enum (one variant per field) so
//! fragment requests can name fields with typed tokens instead of loose
//! strings.

use crate::mapping::TableMapping;
use crate::value::Value;

/// A resolvable field name in a fragment request.
///
/// Implemented for `&str` and `String` so ad-hoc requests work, and for
/// every derive-generated field enum so requests can be typo-proof:
///
/// ```ignore
/// info.where_clause(&[OrderField::Id])?;
/// info.where_clause(&["id"])?;
/// ```
pub trait FieldKey {
    /// The field name this key resolves to.
    fn key(&self) -> &str;
}

impl FieldKey for &str {
    fn key(&self) -> &str {
        self
    }
}

impl FieldKey for String {
    fn key(&self) -> &str {
        self.as_str()
    }
}

impl<K: FieldKey> FieldKey for &K {
    fn key(&self) -> &str {
        (*self).key()
    }
}

/// A struct mapped to a table.
///
/// Provides the declarative [`TableMapping`] consumed at registration time
/// and value access for parameter binding and the auto-increment default
/// check. Implemented via `#[derive(SqlRecord)]`:
///
/// ```ignore
/// #[derive(Clone, Debug, Default, SqlRecord)]
/// #[sqlcrud(table_name = "orders", updatable)]
/// pub struct Order {
///     #[sqlcrud(column_name = "order_id", auto_increment)]
///     pub id:    i64,
///     #[sqlcrud(updatable)]
///     pub name:  String,
///     #[sqlcrud(updatable)]
///     pub total: f64,
/// }
/// ```
pub trait SqlRecord: 'static {
    /// The generated field enum for this record
    type Field: FieldKey + Copy + Clone + std::fmt::Debug + 'static;

    /// The declarative mapping for this type, validated once at registration
    fn mapping() -> TableMapping;

    /// Current value of the named field, or `None` for an unknown name
    fn field_value(&self, field: &str) -> Option<Value>;

    /// All field values in declaration order, for parameter binding
    fn values(&self) -> Vec<(&'static str, Value)>;
}
