pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{SimClock, TimePeriod, Weather};
pub use config::{SimulationConfig, Span};
pub use error::{Result, SimError};
