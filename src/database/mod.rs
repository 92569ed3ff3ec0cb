pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryContactStore;
pub use postgres::PgContactStore;
pub use store::ContactStore;
pub use users::{MemoryUserDirectory, PgUserDirectory, UserDirectory};
