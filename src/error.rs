use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building descriptors or rendering fragments.
///
/// Build-time variants (`NoFields`, `DuplicateField`, `AutoIncrementType`,
/// `AutoIncrementUpdatable`) indicate a broken mapping definition and are not
/// retryable. The remaining variants are raised per call for malformed
/// fragment requests, or passed through from the executing collaborator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no fields mapped for type {0}")]
    NoFields(&'static str),

    #[error("duplicate field `{field}` in mapping for type {type_name}")]
    DuplicateField { type_name: &'static str, field: String },

    #[error("auto-increment field `{field}` of type {type_name} has no default value ({field_type:?} is not a value kind)")]
    AutoIncrementType { type_name: &'static str, field: String, field_type: crate::value::FieldType },

    #[error("field `{field}` of type {type_name} is marked both auto-increment and updatable")]
    AutoIncrementUpdatable { type_name: &'static str, field: String },

    #[error("empty field list")]
    EmptyFieldList,

    #[error("duplicate field name in request: {0}")]
    DuplicateArgument(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("no updatable fields left to render for type {0}")]
    NoUpdatableFields(&'static str),

    #[error("auto-increment fields of type {0} must hold their default values before insert")]
    AutoIncrementNotDefault(&'static str),

    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// True for errors raised while validating a mapping at registration time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NoFields(_)
                | Error::DuplicateField { .. }
                | Error::AutoIncrementType { .. }
                | Error::AutoIncrementUpdatable { .. }
        )
    }
}
