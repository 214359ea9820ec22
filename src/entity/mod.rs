pub mod agent;
pub mod needs;
pub mod tasks;
pub mod thoughts;

pub use agent::{default_roster, Agent, AgentProfile, MotionState, Voice};
pub use needs::{mood_from_needs, Mood, NeedType, Needs};
pub use tasks::{Task, TaskQueue, TaskSource, TaskStatus};
pub use thoughts::ThoughtTopic;
