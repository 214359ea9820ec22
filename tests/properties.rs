//! Property tests for gauges, scoring, rewards and obstacle queries

use proptest::prelude::*;

use simbot::actions::catalog::ActivityType;
use simbot::core::calendar::TimePeriod;
use simbot::core::config::SimulationConfig;
use simbot::core::types::Vec2;
use simbot::entity::agent::MotionState;
use simbot::entity::needs::Needs;
use simbot::simulation::attention::score_room;
use simbot::simulation::economy::{reward, MAX_REWARD, MIN_REWARD};
use simbot::simulation::presets::resolve_command;
use simbot::simulation::room_needs::{boost_after_task, RoomNeedState};
use simbot::spatial::obstacles::ObstacleMap;
use simbot::world::{FloorPlan, FurniturePlacement, RoomId};

fn gauge() -> impl Strategy<Value = f32> {
    0.0f32..=100.0
}

fn activity() -> impl Strategy<Value = ActivityType> {
    prop::sample::select(ActivityType::ALL.to_vec())
}

fn room() -> impl Strategy<Value = RoomId> {
    prop::sample::select(RoomId::ALL.to_vec())
}

fn period() -> impl Strategy<Value = TimePeriod> {
    prop::sample::select(vec![
        TimePeriod::Morning,
        TimePeriod::Afternoon,
        TimePeriod::Evening,
        TimePeriod::Night,
    ])
}

fn floor_point() -> impl Strategy<Value = Vec2> {
    (-9.0f32..9.0, -10.0f32..17.0).prop_map(|(x, z)| Vec2::new(x, z))
}

proptest! {
    #[test]
    fn decay_stays_in_range_and_never_rises(
        c in gauge(), t in gauge(), r in gauge(),
        dc in 0.0f32..1.0, dt in 0.0f32..1.0,
        elapsed in -10.0f64..5000.0,
    ) {
        let state = RoomNeedState::new(c, t, r, (dc, dt));
        let later = state.decayed(elapsed, 0.035);
        for (before, after) in [
            (state.cleanliness, later.cleanliness),
            (state.tidiness, later.tidiness),
            (state.routine, later.routine),
        ] {
            prop_assert!((0.0..=100.0).contains(&after));
            prop_assert!(after <= before);
        }
    }

    #[test]
    fn boost_stays_in_range(c in gauge(), t in gauge(), r in gauge(), act in activity()) {
        let boosted = boost_after_task(&RoomNeedState::new(c, t, r, (0.1, 0.1)), act);
        prop_assert!(boosted.cleanliness <= 100.0 && boosted.cleanliness >= c);
        prop_assert!(boosted.tidiness <= 100.0 && boosted.tidiness >= t);
        prop_assert!(boosted.routine <= 100.0 && boosted.routine >= r);
    }

    #[test]
    fn dirtier_rooms_score_strictly_higher(
        c in gauge(), drop in 0.5f32..50.0, t in gauge(), r in gauge(),
        id in room(), p in period(), pos in floor_point(),
    ) {
        prop_assume!(c - drop >= 0.0);
        let plan = FloorPlan::household();
        let room = plan.room(id).unwrap();
        let config = SimulationConfig::default();
        let cleaner = RoomNeedState::new(c, t, r, (0.1, 0.1));
        let dirtier = RoomNeedState::new(c - drop, t, r, (0.1, 0.1));
        let a = score_room(room, &cleaner, p, Some(pos), &config);
        let b = score_room(room, &dirtier, p, Some(pos), &config);
        prop_assert!(b > a, "{} !> {}", b, a);
    }

    #[test]
    fn messier_rooms_score_strictly_higher(
        c in gauge(), t in gauge(), drop in 0.5f32..50.0, r in gauge(),
        id in room(), p in period(), pos in floor_point(),
    ) {
        prop_assume!(t - drop >= 0.0);
        let plan = FloorPlan::household();
        let room = plan.room(id).unwrap();
        let config = SimulationConfig::default();
        let tidier = RoomNeedState::new(c, t, r, (0.1, 0.1));
        let messier = RoomNeedState::new(c, t - drop, r, (0.1, 0.1));
        let a = score_room(room, &tidier, p, Some(pos), &config);
        let b = score_room(room, &messier, p, Some(pos), &config);
        prop_assert!(b > a, "{} !> {}", b, a);
    }

    #[test]
    fn reward_is_bounded(duration in -100.0f32..10_000.0, act in activity()) {
        let coins = reward(duration, act);
        prop_assert!((MIN_REWARD..=MAX_REWARD).contains(&coins));
    }

    #[test]
    fn avoidance_is_clamped(pos in floor_point(), dx in -1.0f32..1.0, dz in -1.0f32..1.0) {
        let furniture = FurniturePlacement::household();
        let config = SimulationConfig::default();
        let map = ObstacleMap::new(&furniture, &config);
        let desired = Vec2::new(dx, dz).normalize();
        let force = map.avoidance_vector(pos, desired, config.avoidance_look_ahead);
        prop_assert!(force.length() <= config.avoidance_max_force + 1e-3);
    }

    #[test]
    fn clear_point_is_clear_or_unchanged(pos in floor_point(), margin in 0.0f32..1.5) {
        let furniture = FurniturePlacement::household();
        let config = SimulationConfig::default();
        let map = ObstacleMap::new(&furniture, &config);
        let found = map.find_clear_point(pos, margin);
        prop_assert!(map.is_clear(found, margin) || found == pos);
        if map.is_clear(pos, margin) {
            prop_assert_eq!(found, pos);
        }
    }

    #[test]
    fn needs_drift_stays_in_range(
        e in gauge(), h in gauge(), s in gauge(), b in gauge(),
        minutes in 0.0f32..2000.0,
        motion in prop::sample::select(vec![MotionState::Idle, MotionState::Walking, MotionState::Working]),
        charging in any::<bool>(),
    ) {
        let mut needs = Needs::new(e, h, s, b);
        needs.drift(minutes, motion, charging, &SimulationConfig::default());
        for gauge in [needs.energy, needs.happiness, needs.social, needs.boredom] {
            prop_assert!((0.0..=100.0).contains(&gauge));
        }
    }

    #[test]
    fn any_command_resolves_to_a_known_room(text in ".{0,60}", p in period()) {
        let resolved = resolve_command(&text, p);
        prop_assert!(RoomId::ALL.contains(&resolved.room));
        prop_assert!(resolved.preset.work_duration > 0.0);
    }
}
