pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;
pub use traits::{EngagementStore, NotificationStore, ProfileStore, RelationshipStore};
