pub mod catalog;

pub use catalog::{ActivityCategory, ActivityType, RoomBoost};
