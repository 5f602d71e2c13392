use thiserror::Error;

/// Errors raised while constructing a [`crate::Schema`].
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema identifier must not be empty")]
    EmptyIdentifier,

    #[error("schema '{0}' must declare at least one column")]
    EmptyColumns(String),

    #[error("schema '{table}' declares duplicate column '{column}'")]
    DuplicateColumn { table: String, column: String },
}

/// Errors raised while building or validating a [`crate::Request`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("column '{0}' is not part of schema '{1}'")]
    UnknownColumn(String, String),

    #[error("request for schema '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },
}
