pub mod books;
pub mod categories;
pub mod connection;
pub mod models;
pub mod ratings;
pub mod setup;
pub mod users;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use models::*;
