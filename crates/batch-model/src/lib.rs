pub mod command;
pub mod error;
pub mod request;
pub mod row;
pub mod schema;
pub mod value;

pub use command::{BatchCommand, CommandMetadata, CommandType};
pub use error::{RequestError, SchemaError};
pub use request::Request;
pub use row::Row;
pub use schema::{ConflictStrategy, Schema};
pub use value::Value;
