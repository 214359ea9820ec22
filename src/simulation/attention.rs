//! Attention scoring: how urgently a room wants service
//!
//! Pure and deterministic. Callers filter out rooms without need state.

use crate::core::calendar::TimePeriod;
use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::simulation::room_needs::RoomNeedState;
use crate::world::layout::{Room, RoomId};

const DIRTINESS_WEIGHT: f32 = 0.48;
const CLUTTER_WEIGHT: f32 = 0.32;
const ROUTINE_WEIGHT: f32 = 0.20;

/// Extra urgency from the household's daily rhythm
pub fn period_bias(period: TimePeriod, room: RoomId) -> f32 {
    match (period, room) {
        (TimePeriod::Morning, RoomId::Kitchen) => 14.0,
        (TimePeriod::Morning, RoomId::Bedroom) => 8.0,
        (TimePeriod::Morning, RoomId::Yard) => 8.0,
        (TimePeriod::Morning, RoomId::LivingRoom) => 6.0,
        (TimePeriod::Afternoon, RoomId::Laundry) => 14.0,
        (TimePeriod::Afternoon, RoomId::Yard) => 12.0,
        (TimePeriod::Afternoon, RoomId::LivingRoom) => 10.0,
        (TimePeriod::Afternoon, RoomId::Hallway) => 6.0,
        (TimePeriod::Evening, RoomId::Kitchen) => 10.0,
        (TimePeriod::Evening, RoomId::Bathroom) => 10.0,
        (TimePeriod::Evening, RoomId::Bedroom) => 8.0,
        (TimePeriod::Night, RoomId::Hallway) => 4.0,
        _ => 0.0,
    }
}

/// Urgency of a room given its gauges, the period, and optionally where the agent stands
pub fn score_room(
    room: &Room,
    state: &RoomNeedState,
    period: TimePeriod,
    agent_position: Option<Vec2>,
    config: &SimulationConfig,
) -> f32 {
    let dirtiness = 100.0 - state.cleanliness;
    let clutter = 100.0 - state.tidiness;
    let routine_need = 100.0 - state.routine;

    let mut score = dirtiness * DIRTINESS_WEIGHT
        + clutter * CLUTTER_WEIGHT
        + routine_need * ROUTINE_WEIGHT
        + period_bias(period, room.id);

    if let Some(position) = agent_position {
        let distance = position.distance(&room.center);
        score += (config.proximity_bonus - distance * config.proximity_falloff).max(0.0);
    }

    score
}
