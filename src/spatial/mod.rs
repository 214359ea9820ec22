//! Spatial queries over the floor plane

pub mod obstacles;

pub use obstacles::{Obstacle, ObstacleMap};
