pub mod connection;
pub mod schema;
pub mod threats;
pub mod unit_of_work;

pub use connection::Database;
pub use threats::EntityCounts;
pub use unit_of_work::{CommitStats, UnitOfWork, UnitOfWorkState};
