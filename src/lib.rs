//! Simbot - autonomous household robot simulation

pub mod actions;
pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
