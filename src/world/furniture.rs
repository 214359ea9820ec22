//! Furniture placement registry
//!
//! The obstacle map reads furniture through [`FurnitureRegistry`] every time
//! it is queried, so moving a piece of furniture takes effect immediately.
//! Placements can be loaded from a JSON file:
//!
//! ```json
//! { "version": 1, "placements": [ { "id": "sofa", "position": [-7.0, -6.0], "radius": 0.7 } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Vec2;

/// One placed piece of furniture, approximated by a circle on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: String,
    /// Floor position [x, z]
    pub position: [f32; 2],
    /// Avoidance radius including padding
    pub radius: f32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FurnitureItem {
    pub fn new(id: impl Into<String>, x: f32, z: f32, radius: f32) -> Self {
        Self {
            id: id.into(),
            position: [x, z],
            radius,
            tags: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position[0], self.position[1])
    }
}

/// Read-only source of furniture placement
pub trait FurnitureRegistry {
    fn items(&self) -> &[FurnitureItem];
}

/// Root structure for placement JSON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FurniturePlacement {
    /// Schema version (currently 1)
    pub version: u32,
    pub placements: Vec<FurnitureItem>,
}

impl FurniturePlacement {
    pub fn new(placements: Vec<FurnitureItem>) -> Self {
        Self {
            version: 1,
            placements,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let placement: FurniturePlacement = serde_json::from_str(content)?;
        if placement.version != 1 {
            return Err(SimError::Config(format!(
                "unsupported placement version {}",
                placement.version
            )));
        }
        if let Some(bad) = placement.placements.iter().find(|p| p.radius < 0.0) {
            return Err(SimError::Config(format!("furniture '{}' has a negative radius", bad.id)));
        }
        Ok(placement)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Move an item; returns false if no item has that id
    pub fn move_item(&mut self, id: &str, to: Vec2) -> bool {
        match self.placements.iter_mut().find(|p| p.id == id) {
            Some(item) => {
                item.position = [to.x, to.z];
                true
            }
            None => false,
        }
    }

    /// Furnishing of the default household
    pub fn household() -> Self {
        let item = FurnitureItem::new;
        Self::new(vec![
            // Living room
            item("sofa", -7.0, -6.0, 0.7),
            item("coffee-table", -5.0, -6.0, 0.5),
            item("lounge-chair", -5.0, -4.0, 0.5),
            item("tv-stand", -3.0, -6.0, 0.5),
            item("floor-lamp", -7.3, -9.3, 0.3),
            item("bookcase", -6.0, -9.3, 0.6),
            item("side-table", -7.0, -8.0, 0.3),
            item("ottoman", -5.0, -7.5, 0.4),
            item("speaker-left", -3.0, -4.5, 0.25),
            item("speaker-right", -3.0, -7.5, 0.25),
            item("living-plant-west", -7.5, -3.0, 0.3),
            item("living-plant-north", -0.5, -9.3, 0.3),
            // Kitchen
            item("counter-1", 1.5, -9.5, 0.4),
            item("counter-2", 2.5, -9.5, 0.4),
            item("counter-3", 3.5, -9.5, 0.4),
            item("stove", 4.5, -9.5, 0.4),
            item("counter-4", 5.5, -9.5, 0.4),
            item("counter-5", 6.5, -9.5, 0.4),
            item("fridge", 7.3, -9.5, 0.5),
            item("cabinet-1", 7.5, -8.0, 0.4),
            item("cabinet-2", 7.5, -7.0, 0.4),
            item("island-west", 3.0, -6.0, 0.5),
            item("island-mid", 4.0, -6.0, 0.5),
            item("island-east", 5.0, -6.0, 0.5),
            item("stool-1", 3.0, -5.0, 0.3),
            item("stool-2", 4.0, -5.0, 0.3),
            item("stool-3", 5.0, -5.0, 0.3),
            item("dining-table", 1.5, -4.5, 0.6),
            item("kitchen-trash", 7.3, -5.0, 0.25),
            // Laundry
            item("washer", 4.5, -1.5, 0.4),
            item("dryer", 5.5, -1.5, 0.4),
            // Bedroom
            item("bed", -4.0, 6.5, 1.2),
            item("nightstand-west", -6.0, 6.5, 0.35),
            item("nightstand-east", -2.0, 6.5, 0.35),
            item("desk", -1.5, 1.0, 0.5),
            item("desk-chair", -2.5, 1.0, 0.4),
            item("dresser", -7.3, 3.5, 0.5),
            item("bed-bench", -4.0, 5.0, 0.5),
            item("bedroom-plant-west", -7.3, 7.3, 0.3),
            item("bedroom-plant-east", -0.5, 7.3, 0.3),
            // Bathroom
            item("vanity-1", 2.0, 0.5, 0.4),
            item("vanity-2", 3.0, 0.5, 0.4),
            item("vanity-3", 4.5, 0.5, 0.4),
            item("vanity-4", 5.5, 0.5, 0.4),
            item("bathtub", 5.5, 7.0, 0.8),
            item("shower", 7.0, 3.5, 0.7),
            item("toilet", 1.0, 7.0, 0.4),
            item("bathroom-trash", 1.0, 3.5, 0.25),
            // Hallway
            item("hall-bench", -4.0, -1.0, 0.5),
            item("hall-plant", -7.0, -1.0, 0.3),
        ])
    }
}

impl Default for FurniturePlacement {
    fn default() -> Self {
        Self::household()
    }
}

impl FurnitureRegistry for FurniturePlacement {
    fn items(&self) -> &[FurnitureItem] {
        &self.placements
    }
}
