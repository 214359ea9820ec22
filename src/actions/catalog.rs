//! Activity definitions and catalog
//!
//! Every per-activity lookup (room boost, reward difficulty, working
//! monologue key) is an exhaustive `match`, so adding an activity without
//! filling in its tables fails to compile.

use serde::{Deserialize, Serialize};

/// Kind of work a task performs once the agent arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    Cleaning,
    Vacuuming,
    Dishes,
    Laundry,
    Organizing,
    Cooking,
    BedMaking,
    Scrubbing,
    Sweeping,
    GroceryList,
    General,
    Seasonal,
    Mowing,
    Watering,
    LeafBlowing,
    Weeding,
    FeedingFish,
    FeedingHamster,
    Visiting,
}

/// Gauge increments applied to a room when an activity completes there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBoost {
    pub cleanliness: f32,
    pub tidiness: f32,
    pub routine: f32,
}

impl RoomBoost {
    pub const fn new(cleanliness: f32, tidiness: f32, routine: f32) -> Self {
        Self { cleanliness, tidiness, routine }
    }

    /// Flat boost for activities without a dedicated entry
    pub const DEFAULT: RoomBoost = RoomBoost::new(8.0, 8.0, 8.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Housework,
    Yardwork,
    Care,
    Leisure,
}

impl ActivityType {
    pub const ALL: [ActivityType; 19] = [
        ActivityType::Cleaning,
        ActivityType::Vacuuming,
        ActivityType::Dishes,
        ActivityType::Laundry,
        ActivityType::Organizing,
        ActivityType::Cooking,
        ActivityType::BedMaking,
        ActivityType::Scrubbing,
        ActivityType::Sweeping,
        ActivityType::GroceryList,
        ActivityType::General,
        ActivityType::Seasonal,
        ActivityType::Mowing,
        ActivityType::Watering,
        ActivityType::LeafBlowing,
        ActivityType::Weeding,
        ActivityType::FeedingFish,
        ActivityType::FeedingHamster,
        ActivityType::Visiting,
    ];

    /// Parse a kebab-case tag; anything unrecognized is `General`
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.tag() == normalized)
            .unwrap_or(ActivityType::General)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ActivityType::Cleaning => "cleaning",
            ActivityType::Vacuuming => "vacuuming",
            ActivityType::Dishes => "dishes",
            ActivityType::Laundry => "laundry",
            ActivityType::Organizing => "organizing",
            ActivityType::Cooking => "cooking",
            ActivityType::BedMaking => "bed-making",
            ActivityType::Scrubbing => "scrubbing",
            ActivityType::Sweeping => "sweeping",
            ActivityType::GroceryList => "grocery-list",
            ActivityType::General => "general",
            ActivityType::Seasonal => "seasonal",
            ActivityType::Mowing => "mowing",
            ActivityType::Watering => "watering",
            ActivityType::LeafBlowing => "leaf-blowing",
            ActivityType::Weeding => "weeding",
            ActivityType::FeedingFish => "feeding-fish",
            ActivityType::FeedingHamster => "feeding-hamster",
            ActivityType::Visiting => "visiting",
        }
    }

    pub fn category(&self) -> ActivityCategory {
        match self {
            ActivityType::Cleaning
            | ActivityType::Vacuuming
            | ActivityType::Dishes
            | ActivityType::Laundry
            | ActivityType::Organizing
            | ActivityType::Cooking
            | ActivityType::BedMaking
            | ActivityType::Scrubbing
            | ActivityType::Sweeping
            | ActivityType::GroceryList
            | ActivityType::Seasonal => ActivityCategory::Housework,
            ActivityType::Mowing
            | ActivityType::Watering
            | ActivityType::LeafBlowing
            | ActivityType::Weeding => ActivityCategory::Yardwork,
            ActivityType::FeedingFish | ActivityType::FeedingHamster => ActivityCategory::Care,
            ActivityType::General | ActivityType::Visiting => ActivityCategory::Leisure,
        }
    }

    /// Room gauge increments on completion
    pub fn room_boost(&self) -> RoomBoost {
        match self {
            ActivityType::Cleaning => RoomBoost::new(24.0, 20.0, 14.0),
            ActivityType::Vacuuming => RoomBoost::new(20.0, 12.0, 12.0),
            ActivityType::Dishes => RoomBoost::new(26.0, 18.0, 16.0),
            ActivityType::Laundry => RoomBoost::new(10.0, 28.0, 20.0),
            ActivityType::Organizing => RoomBoost::new(9.0, 26.0, 18.0),
            ActivityType::Cooking => RoomBoost::new(8.0, 12.0, 16.0),
            ActivityType::BedMaking => RoomBoost::new(8.0, 24.0, 22.0),
            ActivityType::Scrubbing => RoomBoost::new(30.0, 16.0, 14.0),
            ActivityType::Sweeping => RoomBoost::new(22.0, 14.0, 14.0),
            ActivityType::GroceryList => RoomBoost::new(2.0, 8.0, 12.0),
            ActivityType::Seasonal => RoomBoost::new(12.0, 14.0, 18.0),
            ActivityType::Mowing => RoomBoost::new(22.0, 24.0, 18.0),
            ActivityType::Watering => RoomBoost::new(14.0, 18.0, 20.0),
            ActivityType::LeafBlowing => RoomBoost::new(26.0, 20.0, 16.0),
            ActivityType::Weeding => RoomBoost::new(18.0, 22.0, 18.0),
            ActivityType::General
            | ActivityType::FeedingFish
            | ActivityType::FeedingHamster
            | ActivityType::Visiting => RoomBoost::DEFAULT,
        }
    }

    /// Reward multiplier: harder work pays more
    pub fn difficulty(&self) -> f32 {
        match self {
            ActivityType::BedMaking
            | ActivityType::FeedingFish
            | ActivityType::FeedingHamster
            | ActivityType::General => 1.0,
            ActivityType::Sweeping => 1.2,
            ActivityType::Dishes | ActivityType::Watering => 1.3,
            ActivityType::GroceryList => 1.4,
            ActivityType::Cleaning
            | ActivityType::Vacuuming
            | ActivityType::LeafBlowing
            | ActivityType::Visiting => 1.5,
            ActivityType::Organizing => 1.6,
            ActivityType::Laundry | ActivityType::Weeding => 1.8,
            ActivityType::Scrubbing | ActivityType::Mowing => 2.0,
            ActivityType::Cooking => 2.2,
            ActivityType::Seasonal => 2.5,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_from_tag() {
        for activity in ActivityType::ALL {
            assert_eq!(ActivityType::from_tag(activity.tag()), activity);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_general() {
        assert_eq!(ActivityType::from_tag("juggling"), ActivityType::General);
        assert_eq!(ActivityType::from_tag("  Bed-Making "), ActivityType::BedMaking);
    }

    #[test]
    fn test_boost_table_entries() {
        assert_eq!(ActivityType::Scrubbing.room_boost(), RoomBoost::new(30.0, 16.0, 14.0));
        assert_eq!(ActivityType::Laundry.room_boost(), RoomBoost::new(10.0, 28.0, 20.0));
        assert_eq!(ActivityType::Visiting.room_boost(), RoomBoost::DEFAULT);
    }

    #[test]
    fn test_serde_uses_kebab_tags() {
        let json = serde_json::to_string(&ActivityType::LeafBlowing).unwrap();
        assert_eq!(json, "\"leaf-blowing\"");
    }

    #[test]
    fn test_difficulty_examples() {
        assert_eq!(ActivityType::Scrubbing.difficulty(), 2.0);
        assert_eq!(ActivityType::BedMaking.difficulty(), 1.0);
        assert_eq!(ActivityType::Cooking.difficulty(), 2.2);
    }
}
