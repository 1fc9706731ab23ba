//! Database layer - resource persistence backends

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::MemoryResourceStore;
pub use store::PostgresResourceStore;
pub use traits::ResourceStore;

/// Embedded sqlx migrations, run once at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
