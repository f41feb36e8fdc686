pub mod manager;
pub mod memory;
pub mod mysql;
pub mod query_builder;
pub mod store;

pub use manager::{connect_store, DatabaseError};
pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use store::{InsertOutcome, Record, Store};
