//! Obstacle map over static furniture
//!
//! Obstacles are circles derived from the furniture registry on every query.
//! The map supports point clearance, an expanding-ring search for the nearest
//! clear point, and a local repulsion vector for steering. It is not a path
//! planner.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::world::furniture::FurnitureRegistry;

/// Exclusion circle on the floor plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

/// Distances below this are treated as this when normalizing push directions
const MIN_PUSH_DISTANCE: f32 = 0.01;

pub struct ObstacleMap<'a> {
    furniture: &'a dyn FurnitureRegistry,
    config: &'a SimulationConfig,
}

impl<'a> ObstacleMap<'a> {
    pub fn new(furniture: &'a dyn FurnitureRegistry, config: &'a SimulationConfig) -> Self {
        Self { furniture, config }
    }

    /// Snapshot of the current obstacle circles
    pub fn obstacles(&self) -> Vec<Obstacle> {
        self.iter_obstacles().collect()
    }

    fn iter_obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.furniture.items().iter().map(|item| Obstacle {
            center: item.center(),
            radius: item.radius.max(0.0),
        })
    }

    /// True iff the point is outside every obstacle's radius + margin
    pub fn is_clear(&self, point: Vec2, margin: f32) -> bool {
        self.iter_obstacles()
            .all(|o| point.distance(&o.center) >= o.radius + margin)
    }

    /// Nearest clear point by expanding rings; the input point if the search is exhausted
    pub fn find_clear_point(&self, point: Vec2, margin: f32) -> Vec2 {
        if self.is_clear(point, margin) {
            return point;
        }

        let cfg = self.config;
        let angle_step = TAU / cfg.clear_search_angle_divisions.max(1) as f32;
        let rings = ((cfg.clear_search_max_radius - cfg.clear_search_min_radius)
            / cfg.clear_search_radius_step)
            .floor()
            .max(0.0) as u32;

        for ring in 0..=rings {
            let radius = cfg.clear_search_min_radius + ring as f32 * cfg.clear_search_radius_step;
            for step in 0..cfg.clear_search_angle_divisions {
                let angle = step as f32 * angle_step;
                let candidate = Vec2::new(
                    point.x + angle.cos() * radius,
                    point.z + angle.sin() * radius,
                );
                if self.is_clear(candidate, margin) {
                    return candidate;
                }
            }
        }

        tracing::warn!(x = point.x, z = point.z, margin, "No clear point found, keeping blocked target");
        point
    }

    /// Repulsion from obstacles near and ahead of an agent, clamped in magnitude
    pub fn avoidance_vector(&self, position: Vec2, desired: Vec2, look_ahead: f32) -> Vec2 {
        let cfg = self.config;
        let mut force = Vec2::ZERO;

        for obstacle in self.iter_obstacles() {
            let away = position - obstacle.center;
            let distance = away.length();
            let min_distance = obstacle.radius + cfg.agent_radius;

            if distance >= min_distance + look_ahead {
                continue;
            }

            let overlapping = distance < min_distance;
            let ahead = desired.dot(&(obstacle.center - position)) > 0.0;
            if !(ahead || overlapping) {
                continue;
            }

            let strength = if overlapping {
                cfg.avoidance_overlap_force
            } else {
                cfg.avoidance_force_scale / (distance - min_distance).max(cfg.avoidance_min_gap)
            };
            force = force + away * (strength / distance.max(MIN_PUSH_DISTANCE));
        }

        force.clamp_length(cfg.avoidance_max_force)
    }

    /// Heading for this frame: desired direction blended with avoidance
    pub fn steer(&self, position: Vec2, desired: Vec2) -> Vec2 {
        let avoidance = self.avoidance_vector(position, desired, self.config.avoidance_look_ahead);
        (desired + avoidance * self.config.avoidance_blend).normalize()
    }
}
