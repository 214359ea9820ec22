//! Household floor plan: rooms, task anchors and points of interest
//!
//! All positions are world units on the floor plane, roughly 1 unit = 1 meter.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Vec2;

/// Fixed room identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomId {
    LivingRoom,
    Kitchen,
    Hallway,
    Laundry,
    Bedroom,
    Bathroom,
    Yard,
}

impl RoomId {
    pub const ALL: [RoomId; 7] = [
        RoomId::LivingRoom,
        RoomId::Kitchen,
        RoomId::Hallway,
        RoomId::Laundry,
        RoomId::Bedroom,
        RoomId::Bathroom,
        RoomId::Yard,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            RoomId::LivingRoom => "living-room",
            RoomId::Kitchen => "kitchen",
            RoomId::Hallway => "hallway",
            RoomId::Laundry => "laundry",
            RoomId::Bedroom => "bedroom",
            RoomId::Bathroom => "bathroom",
            RoomId::Yard => "yard",
        }
    }

    /// Lowercase name for narration
    pub fn label(&self) -> &'static str {
        match self {
            RoomId::LivingRoom => "living room",
            RoomId::Kitchen => "kitchen",
            RoomId::Hallway => "hallway",
            RoomId::Laundry => "laundry room",
            RoomId::Bedroom => "bedroom",
            RoomId::Bathroom => "bathroom",
            RoomId::Yard => "yard",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.tag() == tag)
            .ok_or_else(|| SimError::UnknownRoom(tag.to_string()))
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A room's fixed geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub center: Vec2,
    /// Footprint (width along x, depth along z)
    pub size: (f32, f32),
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, center: Vec2, size: (f32, f32)) -> Self {
        Self {
            id,
            name: name.into(),
            center,
            size,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.size.0 / 2.0
            && (point.z - self.center.z).abs() <= self.size.1 / 2.0
    }
}

/// Static description of the home
#[derive(Debug, Clone)]
pub struct FloorPlan {
    rooms: Vec<Room>,
    task_anchors: AHashMap<RoomId, Vec<Vec2>>,
    window_spots: Vec<Vec2>,
    tv_anchor: Vec2,
    charger: Vec2,
}

impl FloorPlan {
    pub fn new(rooms: Vec<Room>, tv_anchor: Vec2, charger: Vec2) -> Self {
        Self {
            rooms,
            task_anchors: AHashMap::new(),
            window_spots: Vec::new(),
            tv_anchor,
            charger,
        }
    }

    pub fn with_anchors(mut self, room: RoomId, anchors: Vec<Vec2>) -> Self {
        self.task_anchors.insert(room, anchors);
        self
    }

    pub fn with_window_spots(mut self, spots: Vec<Vec2>) -> Self {
        self.window_spots = spots;
        self
    }

    /// Ranch-style single floor used by the default household
    pub fn household() -> Self {
        let rooms = vec![
            Room::new(RoomId::LivingRoom, "Living Room", Vec2::new(-4.0, -6.0), (8.0, 7.0)),
            Room::new(RoomId::Kitchen, "Kitchen", Vec2::new(4.0, -6.5), (8.0, 7.0)),
            Room::new(RoomId::Hallway, "Hallway", Vec2::new(-4.0, -1.0), (8.0, 3.0)),
            Room::new(RoomId::Laundry, "Laundry", Vec2::new(5.0, -1.5), (6.0, 3.0)),
            Room::new(RoomId::Bedroom, "Master Bedroom", Vec2::new(-4.0, 4.5), (8.0, 7.0)),
            Room::new(RoomId::Bathroom, "Bathroom", Vec2::new(4.0, 4.0), (8.0, 8.0)),
            Room::new(RoomId::Yard, "Yard", Vec2::new(0.0, 13.0), (16.0, 8.0)),
        ];

        FloorPlan::new(rooms, Vec2::new(-4.0, -5.0), Vec2::new(-6.0, -2.0))
            .with_anchors(
                RoomId::LivingRoom,
                vec![Vec2::new(-6.0, -5.0), Vec2::new(-4.0, -7.0), Vec2::new(-2.0, -5.5)],
            )
            .with_anchors(
                RoomId::Kitchen,
                vec![Vec2::new(4.0, -8.5), Vec2::new(2.0, -7.0), Vec2::new(6.0, -4.0)],
            )
            .with_anchors(RoomId::Hallway, vec![Vec2::new(-5.5, -1.0), Vec2::new(-2.0, -1.2)])
            .with_anchors(RoomId::Laundry, vec![Vec2::new(5.0, -0.6), Vec2::new(3.5, -1.5)])
            .with_anchors(
                RoomId::Bedroom,
                vec![Vec2::new(-4.0, 4.0), Vec2::new(-1.5, 2.0), Vec2::new(-6.5, 3.5)],
            )
            .with_anchors(
                RoomId::Bathroom,
                vec![Vec2::new(3.5, 1.5), Vec2::new(4.0, 6.0), Vec2::new(2.0, 4.5)],
            )
            .with_anchors(
                RoomId::Yard,
                vec![Vec2::new(-4.0, 12.0), Vec2::new(3.0, 14.0), Vec2::new(0.0, 11.0)],
            )
            .with_window_spots(vec![
                Vec2::new(-7.5, -6.0),
                Vec2::new(7.5, -2.5),
                Vec2::new(-7.5, 5.0),
                Vec2::new(0.0, 8.3),
            ])
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Room whose footprint contains the point, if any
    pub fn room_at(&self, point: Vec2) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(point))
    }

    /// Anchors for a room, falling back to its center
    pub fn task_anchors(&self, id: RoomId) -> Vec<Vec2> {
        match self.task_anchors.get(&id) {
            Some(anchors) if !anchors.is_empty() => anchors.clone(),
            _ => self.room(id).map(|r| vec![r.center]).unwrap_or_default(),
        }
    }

    pub fn window_spots(&self) -> &[Vec2] {
        &self.window_spots
    }

    pub fn tv_anchor(&self) -> Vec2 {
        self.tv_anchor
    }

    pub fn charger(&self) -> Vec2 {
        self.charger
    }
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::household()
    }
}
