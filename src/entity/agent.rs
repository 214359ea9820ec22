//! Household robots and their static profiles

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActivityType;
use crate::core::types::{clamp_percent, AgentId, Vec2, Vec3};
use crate::entity::needs::{Mood, Needs};
use crate::world::layout::RoomId;

/// What the movement layer reports the agent is physically doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionState {
    #[default]
    Idle,
    Walking,
    Working,
}

/// Which flavor lines a robot uses when narrating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Voice {
    Steady,
    Chef,
    Sparkle,
}

/// Static personality of a robot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub favorite_room: RoomId,
    pub preferred_rooms: Vec<RoomId>,
    /// Probability of taking a patrol when one is due
    pub curiosity: f64,
    pub start_position: Vec2,
    pub voice: Voice,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, favorite_room: RoomId, start_position: Vec2) -> Self {
        Self {
            name: name.into(),
            favorite_room,
            preferred_rooms: vec![favorite_room],
            curiosity: 0.5,
            start_position,
            voice: Voice::Steady,
        }
    }

    pub fn with_preferred(mut self, rooms: &[RoomId]) -> Self {
        self.preferred_rooms = rooms.to_vec();
        self
    }

    pub fn with_curiosity(mut self, curiosity: f64) -> Self {
        self.curiosity = curiosity.clamp(0.0, 1.0);
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn prefers(&self, room: RoomId) -> bool {
        self.preferred_rooms.contains(&room)
    }
}

/// The three robots of the default household
pub fn default_roster() -> Vec<AgentProfile> {
    vec![
        AgentProfile::new("Sim", RoomId::LivingRoom, Vec2::new(0.0, -2.0))
            .with_preferred(&[RoomId::LivingRoom, RoomId::Hallway, RoomId::Kitchen])
            .with_curiosity(0.8),
        AgentProfile::new("Chef", RoomId::Kitchen, Vec2::new(4.0, -4.5))
            .with_preferred(&[RoomId::Kitchen, RoomId::LivingRoom])
            .with_curiosity(0.5)
            .with_voice(Voice::Chef),
        AgentProfile::new("Sparkle", RoomId::Bathroom, Vec2::new(4.0, 2.5))
            .with_preferred(&[RoomId::Bathroom, RoomId::Bedroom, RoomId::Laundry])
            .with_curiosity(0.6)
            .with_voice(Voice::Sparkle),
    ]
}

/// A robot's live state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub position: Vec3,
    /// Rotation about the vertical axis, radians
    pub heading: f32,
    pub battery: f32,
    pub charging: bool,
    pub motion: MotionState,
    pub activity: Option<ActivityType>,
    pub mood: Mood,
    pub thought: String,
    pub needs: Needs,
}

impl Agent {
    pub fn new(id: AgentId, profile: &AgentProfile) -> Self {
        Self {
            id,
            name: profile.name.clone(),
            position: profile.start_position.to_world(),
            heading: 0.0,
            battery: 100.0,
            charging: false,
            motion: MotionState::Idle,
            activity: None,
            mood: Mood::Content,
            thought: format!("{} online. Scanning home.", profile.name),
            needs: Needs::default(),
        }
    }

    pub fn ground_position(&self) -> Vec2 {
        self.position.ground()
    }

    pub fn is_idle(&self) -> bool {
        self.motion == MotionState::Idle
    }

    pub fn set_battery(&mut self, value: f32) {
        self.battery = clamp_percent(value);
    }

    /// Place the agent on the floor and turn it to face along `facing`
    pub fn place(&mut self, position: Vec2, facing: Vec2) {
        self.position = position.to_world();
        if facing.length() > 0.0001 {
            self.heading = facing.x.atan2(facing.z);
        }
    }

    pub fn say(&mut self, thought: impl Into<String>) {
        self.thought = thought.into();
    }
}
