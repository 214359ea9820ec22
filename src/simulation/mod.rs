pub mod attention;
pub mod battery;
pub mod brain;
pub mod economy;
pub mod events;
pub mod presets;
pub mod room_needs;
pub mod runner;
pub mod tick;

pub use attention::score_room;
pub use brain::{decide_behavior, Behavior, DecisionInput, PlannerState};
pub use economy::{reward, BudgetSummary, Ledger};
pub use events::{DeferredEvent, EventQueue};
pub use presets::{resolve_command, TaskPreset};
pub use room_needs::{RoomCondition, RoomNeedState, RoomNeeds};
pub use runner::TaskRunner;
pub use tick::{run_simulation_tick, SimulationEvent};
