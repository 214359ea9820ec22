//! Task presets per (room, period) and free-text command resolution

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::catalog::{ActivityCategory, ActivityType};
use crate::core::calendar::TimePeriod;
use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::spatial::obstacles::ObstacleMap;
use crate::world::layout::{FloorPlan, RoomId};

/// What an autonomous clean looks like for a room at a time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPreset {
    pub activity: ActivityType,
    /// Sim-minutes of work
    pub work_duration: f32,
    pub description: String,
    pub thought: String,
}

impl TaskPreset {
    fn new(activity: ActivityType, work_duration: f32, description: &str, thought: &str) -> Self {
        Self {
            activity,
            work_duration,
            description: description.to_string(),
            thought: thought.to_string(),
        }
    }

    /// Fallback when nothing in a command is recognized
    pub fn looking_around() -> Self {
        Self::new(
            ActivityType::General,
            10.0,
            "Looking around for something to do",
            "Let me see what needs doing.",
        )
    }
}

pub fn pick_preset(room: RoomId, period: TimePeriod) -> TaskPreset {
    use ActivityType as A;
    use TimePeriod as P;

    match (room, period) {
        (RoomId::Kitchen, P::Morning) => TaskPreset::new(
            A::Dishes, 24.0, "Resetting kitchen dishes and counters.", "Hmm, kitchen looks messy...",
        ),
        (RoomId::Kitchen, P::Evening) => TaskPreset::new(
            A::Sweeping, 22.0, "Sweeping the high-traffic kitchen floor.", "Evening cleanup in the kitchen first.",
        ),
        (RoomId::Kitchen, _) => TaskPreset::new(
            A::Cleaning, 22.0, "Wiping down kitchen surfaces.", "Kitchen needs a quick cleanup pass.",
        ),
        (RoomId::LivingRoom, P::Afternoon) => TaskPreset::new(
            A::Vacuuming, 28.0, "Vacuuming the living room floor and rug.", "Living room traffic is building dust.",
        ),
        (RoomId::LivingRoom, _) => TaskPreset::new(
            A::Cleaning, 24.0, "Tidying the living room.", "I should tidy up the living room.",
        ),
        (RoomId::Bedroom, P::Morning) => TaskPreset::new(
            A::BedMaking, 18.0, "Making and tidying the bed.", "Morning routine says make the bed.",
        ),
        (RoomId::Bedroom, P::Afternoon) => TaskPreset::new(
            A::Organizing, 22.0, "Organizing the bedroom desk and surfaces.", "Desk area needs organizing.",
        ),
        (RoomId::Bedroom, _) => TaskPreset::new(
            A::Cleaning, 20.0, "Evening reset for the bedroom.", "I should prep the bedroom for wind-down.",
        ),
        (RoomId::Bathroom, P::Evening) => TaskPreset::new(
            A::Scrubbing, 30.0, "Deep scrubbing bathroom fixtures.", "Bathroom would benefit from a scrub.",
        ),
        (RoomId::Bathroom, _) => TaskPreset::new(
            A::Cleaning, 22.0, "Refreshing bathroom surfaces.", "Bathroom touch-up is due.",
        ),
        (RoomId::Laundry, _) => TaskPreset::new(
            A::Laundry, 26.0, "Folding and sorting laundry.", "Laundry closet could use a pass.",
        ),
        (RoomId::Yard, P::Morning) => TaskPreset::new(
            A::Watering, 25.0, "Watering the garden plants.", "Morning is the best time to water.",
        ),
        (RoomId::Yard, P::Afternoon) => TaskPreset::new(
            A::Mowing, 35.0, "Mowing the lawn.", "The grass is getting tall out there.",
        ),
        (RoomId::Yard, P::Evening) => TaskPreset::new(
            A::Weeding, 30.0, "Pulling weeds from the garden beds.", "Weeds are creeping in again.",
        ),
        (RoomId::Yard, P::Night) => TaskPreset::new(
            A::LeafBlowing, 28.0, "Clearing leaves from the yard.", "Leaves are scattered everywhere.",
        ),
        (RoomId::Hallway, _) => TaskPreset::new(
            A::Sweeping, 18.0, "Sweeping and resetting the hallway.", "I should keep the hallway tidy.",
        ),
    }
}

/// Typical work time for an activity requested outside the preset table
pub fn default_duration(activity: ActivityType) -> f32 {
    match activity {
        ActivityType::BedMaking | ActivityType::Sweeping => 18.0,
        ActivityType::FeedingFish | ActivityType::FeedingHamster => 6.0,
        ActivityType::General | ActivityType::GroceryList => 10.0,
        ActivityType::Cleaning | ActivityType::Organizing => 22.0,
        ActivityType::Dishes => 24.0,
        ActivityType::Watering => 25.0,
        ActivityType::Laundry => 26.0,
        ActivityType::Vacuuming | ActivityType::LeafBlowing => 28.0,
        ActivityType::Scrubbing | ActivityType::Cooking | ActivityType::Weeding => 30.0,
        ActivityType::Mowing | ActivityType::Seasonal => 35.0,
        ActivityType::Visiting => 15.0,
    }
}

/// Room where an activity naturally happens, if it has one
pub fn home_room(activity: ActivityType) -> Option<RoomId> {
    match activity {
        ActivityType::Cooking | ActivityType::Dishes | ActivityType::GroceryList => Some(RoomId::Kitchen),
        ActivityType::Laundry => Some(RoomId::Laundry),
        ActivityType::BedMaking => Some(RoomId::Bedroom),
        ActivityType::Scrubbing => Some(RoomId::Bathroom),
        ActivityType::Vacuuming => Some(RoomId::LivingRoom),
        ActivityType::Sweeping => Some(RoomId::Hallway),
        _ if activity.category() == ActivityCategory::Yardwork => Some(RoomId::Yard),
        _ => None,
    }
}

const ROOM_KEYWORDS: &[(&str, RoomId)] = &[
    ("living room", RoomId::LivingRoom),
    ("lounge", RoomId::LivingRoom),
    ("kitchen", RoomId::Kitchen),
    ("hallway", RoomId::Hallway),
    ("corridor", RoomId::Hallway),
    ("hall", RoomId::Hallway),
    ("laundry", RoomId::Laundry),
    ("bedroom", RoomId::Bedroom),
    ("bathroom", RoomId::Bathroom),
    ("bath", RoomId::Bathroom),
    ("yard", RoomId::Yard),
    ("garden", RoomId::Yard),
    ("lawn", RoomId::Yard),
    ("outside", RoomId::Yard),
];

/// Checked in order; more specific phrases come first
const ACTIVITY_KEYWORDS: &[(&str, ActivityType)] = &[
    ("make the bed", ActivityType::BedMaking),
    ("make bed", ActivityType::BedMaking),
    ("bed-making", ActivityType::BedMaking),
    ("vacuum", ActivityType::Vacuuming),
    ("sweep", ActivityType::Sweeping),
    ("mop", ActivityType::Sweeping),
    ("scrub", ActivityType::Scrubbing),
    ("dishes", ActivityType::Dishes),
    ("wash", ActivityType::Dishes),
    ("cook", ActivityType::Cooking),
    ("grocery", ActivityType::GroceryList),
    ("laundry", ActivityType::Laundry),
    ("organize", ActivityType::Organizing),
    ("tidy", ActivityType::Organizing),
    ("mow", ActivityType::Mowing),
    ("water", ActivityType::Watering),
    ("weed", ActivityType::Weeding),
    ("rake", ActivityType::LeafBlowing),
    ("leaf", ActivityType::LeafBlowing),
    ("leaves", ActivityType::LeafBlowing),
    ("clean", ActivityType::Cleaning),
];

/// Outcome of interpreting a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCommand {
    pub room: RoomId,
    pub preset: TaskPreset,
}

/// Lowercase words joined by single spaces, with a leading space
fn word_text(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .fold(String::new(), |mut acc, word| {
            acc.push(' ');
            acc.push_str(word);
            acc
        })
}

/// Keywords match at the start of a word, so "mow" finds "mowing" but "water" misses "dishwater"
fn find_keyword<T: Copy>(words: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(kw, _)| words.contains(&word_text(kw)))
        .map(|(_, v)| *v)
}

/// Interpret free text; unmatched pieces fall back to defaults, never fail
pub fn resolve_command(text: &str, period: TimePeriod) -> ResolvedCommand {
    let words = word_text(text);
    let room = find_keyword(&words, ROOM_KEYWORDS);
    let activity = find_keyword(&words, ACTIVITY_KEYWORDS);

    match (room, activity) {
        (None, None) => ResolvedCommand {
            room: RoomId::LivingRoom,
            preset: TaskPreset::looking_around(),
        },
        (Some(room), None) => ResolvedCommand {
            room,
            preset: pick_preset(room, period),
        },
        (room, Some(activity)) => {
            let room = room
                .or_else(|| home_room(activity))
                .unwrap_or(RoomId::LivingRoom);
            let preset = pick_preset(room, period);
            let preset = if preset.activity == activity {
                preset
            } else {
                TaskPreset {
                    activity,
                    work_duration: default_duration(activity),
                    description: format!("{} in the {}.", capitalize(activity.tag()), room.label()),
                    thought: format!("On my way to the {}.", room.label()),
                }
            };
            ResolvedCommand { room, preset }
        }
    }
}

fn capitalize(tag: &str) -> String {
    let words = tag.replace('-', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A random anchor in the room, nudged clear of furniture
pub fn anchor_point<R: Rng + ?Sized>(
    plan: &FloorPlan,
    obstacles: &ObstacleMap<'_>,
    room: RoomId,
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec2 {
    let anchors = plan.task_anchors(room);
    let raw = anchors.choose(rng).copied().unwrap_or(Vec2::new(0.0, -1.0));
    obstacles.find_clear_point(raw, config.anchor_margin)
}

/// Preset plus a cleared target position for an autonomous clean
#[derive(Debug, Clone, PartialEq)]
pub struct AutonomousTask {
    pub preset: TaskPreset,
    pub position: Vec2,
}

pub fn build_autonomous_task<R: Rng + ?Sized>(
    plan: &FloorPlan,
    obstacles: &ObstacleMap<'_>,
    room: RoomId,
    period: TimePeriod,
    config: &SimulationConfig,
    rng: &mut R,
) -> AutonomousTask {
    AutonomousTask {
        preset: pick_preset(room, period),
        position: anchor_point(plan, obstacles, room, config, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::furniture::FurniturePlacement;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_preset_table_examples() {
        assert_eq!(pick_preset(RoomId::Kitchen, TimePeriod::Morning).activity, ActivityType::Dishes);
        assert_eq!(pick_preset(RoomId::Bathroom, TimePeriod::Evening).activity, ActivityType::Scrubbing);
        assert_eq!(pick_preset(RoomId::Yard, TimePeriod::Afternoon).work_duration, 35.0);
        assert_eq!(pick_preset(RoomId::Hallway, TimePeriod::Night).activity, ActivityType::Sweeping);
    }

    #[test]
    fn test_resolve_room_and_activity() {
        let resolved = resolve_command("Please vacuum the bedroom", TimePeriod::Morning);
        assert_eq!(resolved.room, RoomId::Bedroom);
        assert_eq!(resolved.preset.activity, ActivityType::Vacuuming);
        assert_eq!(resolved.preset.work_duration, 28.0);
    }

    #[test]
    fn test_resolve_infers_room_from_activity() {
        let resolved = resolve_command("cook something nice", TimePeriod::Evening);
        assert_eq!(resolved.room, RoomId::Kitchen);
        assert_eq!(resolved.preset.activity, ActivityType::Cooking);

        let resolved = resolve_command("mow please", TimePeriod::Morning);
        assert_eq!(resolved.room, RoomId::Yard);
    }

    #[test]
    fn test_resolve_room_only_uses_preset() {
        let resolved = resolve_command("kitchen", TimePeriod::Morning);
        assert_eq!(resolved.preset, pick_preset(RoomId::Kitchen, TimePeriod::Morning));
    }

    #[test]
    fn test_resolve_matching_activity_keeps_preset_text() {
        let resolved = resolve_command("scrub the bathroom", TimePeriod::Evening);
        assert_eq!(resolved.preset, pick_preset(RoomId::Bathroom, TimePeriod::Evening));
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        let resolved = resolve_command("sing me a song", TimePeriod::Night);
        assert_eq!(resolved.room, RoomId::LivingRoom);
        assert_eq!(resolved.preset, TaskPreset::looking_around());
    }

    #[test]
    fn test_bedroom_does_not_trigger_bed_making() {
        let resolved = resolve_command("clean the bedroom", TimePeriod::Afternoon);
        assert_eq!(resolved.room, RoomId::Bedroom);
        assert_eq!(resolved.preset.activity, ActivityType::Cleaning);
    }

    #[test]
    fn test_keywords_match_word_starts_only() {
        let resolved = resolve_command("Shall we empty the dishwater?", TimePeriod::Morning);
        assert_eq!(resolved.room, RoomId::LivingRoom);
        assert_eq!(resolved.preset, TaskPreset::looking_around());

        let resolved = resolve_command("Mowing, out in the GARDEN!", TimePeriod::Afternoon);
        assert_eq!(resolved.room, RoomId::Yard);
        assert_eq!(resolved.preset.activity, ActivityType::Mowing);

        let resolved = resolve_command("do some bed-making", TimePeriod::Morning);
        assert_eq!(resolved.preset.activity, ActivityType::BedMaking);
    }

    #[test]
    fn test_autonomous_anchor_is_clear() {
        let config = SimulationConfig::default();
        let plan = FloorPlan::household();
        let furniture = FurniturePlacement::household();
        let obstacles = ObstacleMap::new(&furniture, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for room in RoomId::ALL {
            let task = build_autonomous_task(&plan, &obstacles, room, TimePeriod::Morning, &config, &mut rng);
            assert!(obstacles.is_clear(task.position, config.anchor_margin), "{}", room);
        }
    }
}
