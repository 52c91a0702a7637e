pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryHabitStore;
pub use pool::create_pool;
pub use postgres::PgHabitStore;
pub use store::HabitStore;
