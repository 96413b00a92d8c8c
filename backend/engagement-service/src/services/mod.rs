pub mod engagement;
pub mod notifications;
pub mod relationship;

pub use engagement::EngagementService;
pub use notifications::NotificationDispatcher;
pub use relationship::RelationshipService;
