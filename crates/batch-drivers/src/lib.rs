pub mod error;
pub mod mysql;
pub mod postgres;
pub mod redis_kv;
pub mod sqlite;

pub use error::DriverError;
pub use mysql::{MySqlOperations, MySqlProcessor};
pub use postgres::{PostgresOperations, PostgresProcessor};
pub use redis_kv::{RedisOperations, RedisProcessor};
pub use sqlite::{SqliteOperations, SqliteProcessor};
