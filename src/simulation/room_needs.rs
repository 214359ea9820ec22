//! Room need model
//!
//! Each room carries three gauges that decay with simulated time and jump
//! back up when a task completes there. Decay and boost are pure transforms;
//! the world swaps in the returned state.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActivityType;
use crate::core::config::SimulationConfig;
use crate::core::types::clamp_percent;
use crate::world::layout::{Room, RoomId};

/// Per-minute (cleanliness, tidiness) decay for a room
pub fn baseline_decay(room: RoomId) -> (f32, f32) {
    match room {
        RoomId::LivingRoom => (0.10, 0.12),
        RoomId::Kitchen => (0.16, 0.14),
        RoomId::Hallway => (0.08, 0.09),
        RoomId::Laundry => (0.09, 0.10),
        RoomId::Bedroom => (0.07, 0.10),
        RoomId::Bathroom => (0.14, 0.11),
        RoomId::Yard => (0.12, 0.14),
    }
}

/// Display label derived from cleanliness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomCondition {
    Clean,
    NeedsAttention,
    Dirty,
}

impl std::fmt::Display for RoomCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RoomCondition::Clean => "Clean",
            RoomCondition::NeedsAttention => "Needs Attention",
            RoomCondition::Dirty => "Dirty",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomNeedState {
    pub cleanliness: f32,
    pub tidiness: f32,
    pub routine: f32,
    pub decay_cleanliness: f32,
    pub decay_tidiness: f32,
    /// Sim-minute of the last completed task in this room
    pub last_serviced_at: f64,
}

impl RoomNeedState {
    pub fn new(cleanliness: f32, tidiness: f32, routine: f32, decay: (f32, f32)) -> Self {
        Self {
            cleanliness: clamp_percent(cleanliness),
            tidiness: clamp_percent(tidiness),
            routine: clamp_percent(routine),
            decay_cleanliness: decay.0.max(0.0),
            decay_tidiness: decay.1.max(0.0),
            last_serviced_at: 0.0,
        }
    }

    pub fn condition(&self) -> RoomCondition {
        if self.cleanliness >= 74.0 {
            RoomCondition::Clean
        } else if self.cleanliness >= 45.0 {
            RoomCondition::NeedsAttention
        } else {
            RoomCondition::Dirty
        }
    }

    /// Gauges after `elapsed` sim-minutes; identity for `elapsed <= 0`
    pub fn decayed(&self, elapsed: f64, routine_rate: f32) -> Self {
        if elapsed <= 0.0 {
            return *self;
        }
        let minutes = elapsed as f32;
        Self {
            cleanliness: clamp_percent(self.cleanliness - self.decay_cleanliness * minutes),
            tidiness: clamp_percent(self.tidiness - self.decay_tidiness * minutes),
            routine: clamp_percent(self.routine - routine_rate.max(0.0) * minutes),
            ..*self
        }
    }
}

/// Gauges raised by the activity's fixed boost, capped at 100
pub fn boost_after_task(state: &RoomNeedState, activity: ActivityType) -> RoomNeedState {
    let boost = activity.room_boost();
    RoomNeedState {
        cleanliness: clamp_percent(state.cleanliness + boost.cleanliness),
        tidiness: clamp_percent(state.tidiness + boost.tidiness),
        routine: clamp_percent(state.routine + boost.routine),
        ..*state
    }
}

/// Need state of every room in the home
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomNeeds {
    rooms: AHashMap<RoomId, RoomNeedState>,
}

impl RoomNeeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every room with randomized gauges and its baseline decay
    pub fn create_initial<R: Rng + ?Sized>(
        rooms: &[Room],
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let mut needs = Self::new();
        for room in rooms {
            let state = RoomNeedState::new(
                config.initial_cleanliness.sample(rng) as f32,
                config.initial_tidiness.sample(rng) as f32,
                config.initial_routine.sample(rng) as f32,
                baseline_decay(room.id),
            );
            needs.rooms.insert(room.id, state);
        }
        needs
    }

    pub fn insert(&mut self, room: RoomId, state: RoomNeedState) {
        self.rooms.insert(room, state);
    }

    pub fn get(&self, room: RoomId) -> Option<&RoomNeedState> {
        self.rooms.get(&room)
    }

    pub fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms decayed by `elapsed` sim-minutes; identity for `elapsed <= 0`
    pub fn decay(&self, elapsed: f64, config: &SimulationConfig) -> Self {
        if elapsed <= 0.0 {
            return self.clone();
        }
        Self {
            rooms: self
                .rooms
                .iter()
                .map(|(id, state)| (*id, state.decayed(elapsed, config.routine_decay_rate)))
                .collect(),
        }
    }

    /// Apply a completed activity to one room; other rooms are untouched
    pub fn boost(&self, room: RoomId, activity: ActivityType, now: f64) -> Self {
        let mut next = self.clone();
        if let Some(state) = next.rooms.get_mut(&room) {
            *state = boost_after_task(state, activity);
            state.last_serviced_at = now;
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &RoomNeedState)> {
        self.rooms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::layout::FloorPlan;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn initial() -> RoomNeeds {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        RoomNeeds::create_initial(FloorPlan::household().rooms(), &SimulationConfig::default(), &mut rng)
    }

    #[test]
    fn test_initial_state_in_range() {
        let needs = initial();
        assert_eq!(needs.len(), RoomId::ALL.len());
        for (id, state) in needs.iter() {
            assert!((70.0..=96.0).contains(&state.cleanliness), "{} cleanliness", id);
            assert!((70.0..=96.0).contains(&state.tidiness), "{} tidiness", id);
            assert!((70.0..=96.0).contains(&state.routine), "{} routine", id);
            assert_eq!((state.decay_cleanliness, state.decay_tidiness), baseline_decay(*id));
        }
    }

    #[test]
    fn test_decay_zero_is_identity() {
        let needs = initial();
        let config = SimulationConfig::default();
        assert_eq!(needs.decay(0.0, &config), needs);
        assert_eq!(needs.decay(-5.0, &config), needs);
    }

    #[test]
    fn test_kitchen_decay_over_ten_minutes() {
        let mut needs = RoomNeeds::new();
        needs.insert(RoomId::Kitchen, RoomNeedState::new(80.0, 80.0, 80.0, baseline_decay(RoomId::Kitchen)));
        let after = needs.decay(10.0, &SimulationConfig::default());
        let kitchen = after.get(RoomId::Kitchen).unwrap();
        assert!((kitchen.cleanliness - 78.4).abs() < 1e-4);
        assert!((kitchen.tidiness - 78.6).abs() < 1e-4);
        assert!((kitchen.routine - 79.65).abs() < 1e-4);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let state = RoomNeedState::new(1.0, 1.0, 1.0, (0.5, 0.5));
        let after = state.decayed(1000.0, 0.035);
        assert_eq!(after.cleanliness, 0.0);
        assert_eq!(after.tidiness, 0.0);
        assert_eq!(after.routine, 0.0);
    }

    #[test]
    fn test_scrubbing_boost_only_touches_target_room() {
        let needs = initial();
        let before_kitchen = *needs.get(RoomId::Kitchen).unwrap();
        let before_bath = *needs.get(RoomId::Bathroom).unwrap();
        let after = needs.boost(RoomId::Bathroom, ActivityType::Scrubbing, 12.0);

        let bath = after.get(RoomId::Bathroom).unwrap();
        assert_eq!(bath.cleanliness, (before_bath.cleanliness + 30.0).min(100.0));
        assert_eq!(bath.last_serviced_at, 12.0);
        assert_eq!(*after.get(RoomId::Kitchen).unwrap(), before_kitchen);
    }

    #[test]
    fn test_boost_caps_at_hundred() {
        let state = RoomNeedState::new(95.0, 50.0, 50.0, (0.1, 0.1));
        let boosted = boost_after_task(&state, ActivityType::Scrubbing);
        assert_eq!(boosted.cleanliness, 100.0);
        assert_eq!(boosted.tidiness, 66.0);
        assert_eq!(boosted.routine, 64.0);
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(RoomNeedState::new(74.0, 0.0, 0.0, (0.0, 0.0)).condition(), RoomCondition::Clean);
        assert_eq!(RoomNeedState::new(45.0, 0.0, 0.0, (0.0, 0.0)).condition(), RoomCondition::NeedsAttention);
        assert_eq!(RoomNeedState::new(44.9, 0.0, 0.0, (0.0, 0.0)).condition(), RoomCondition::Dirty);
    }
}
