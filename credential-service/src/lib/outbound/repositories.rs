pub mod memory;
pub mod user;

pub use memory::InMemoryUserRegistry;
pub use user::PostgresUserRegistry;
