//! Tick system - orchestrates simulation updates
//!
//! One tick advances the clock by a real frame delta and then runs, in order:
//! room decay -> agent need drift -> battery -> deferred events ->
//! mood and thoughts -> planning.
//!
//! Agents are visited in roster order so a seeded run replays identically.

use serde::Serialize;

use crate::actions::catalog::ActivityType;
use crate::core::types::{AgentId, TaskId};
use crate::entity::needs::{Mood, NeedType};
use crate::entity::tasks::TaskStatus;
use crate::entity::thoughts::{pick_topic, ThoughtTopic};
use crate::simulation::battery::update_battery;
use crate::simulation::brain::{plan_agent, update_mood_and_thoughts, Behavior};
use crate::simulation::events::DeferredEvent;
use crate::world::layout::RoomId;
use crate::world::World;

/// Events generated during a simulation tick
///
/// These are returned by `run_simulation_tick` (and `TaskRunner::step`) for
/// the embedding application to display or log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SimulationEvent {
    /// The planner picked a behavior for an agent
    BehaviorChosen {
        agent: AgentId,
        behavior: Behavior,
        sim_minutes: f64,
    },
    TaskEnqueued {
        agent: AgentId,
        task: TaskId,
        description: String,
    },
    /// An agent set off toward a task
    TaskStarted { agent: AgentId, task: TaskId },
    TaskArrived {
        agent: AgentId,
        task: TaskId,
        room: RoomId,
    },
    TaskCompleted {
        agent: AgentId,
        task: TaskId,
        room: RoomId,
        activity: ActivityType,
        /// Coins credited; zero for errands
        reward: u32,
    },
    ThoughtChanged { agent: AgentId, thought: String },
    MoodChanged { agent: AgentId, mood: Mood },
    LowBattery { agent: AgentId, battery: f32 },
    ChargingStarted { agent: AgentId },
    ChargingFinished { agent: AgentId },
    TelevisionSwitched { on: bool, by: Option<AgentId> },
}

impl SimulationEvent {
    pub fn agent(&self) -> Option<AgentId> {
        match self {
            SimulationEvent::BehaviorChosen { agent, .. }
            | SimulationEvent::TaskEnqueued { agent, .. }
            | SimulationEvent::TaskStarted { agent, .. }
            | SimulationEvent::TaskArrived { agent, .. }
            | SimulationEvent::TaskCompleted { agent, .. }
            | SimulationEvent::ThoughtChanged { agent, .. }
            | SimulationEvent::MoodChanged { agent, .. }
            | SimulationEvent::LowBattery { agent, .. }
            | SimulationEvent::ChargingStarted { agent }
            | SimulationEvent::ChargingFinished { agent } => Some(*agent),
            SimulationEvent::TelevisionSwitched { by, .. } => *by,
        }
    }
}

/// Run a single simulation tick
///
/// Order of operations:
/// 1. Advance the clock (a paused clock or zero delta ends the tick here)
/// 2. Decay every room's gauges
/// 3. Drift agent needs, plus discomfort when the thermostat is off
/// 4. Drain or charge batteries, routing low robots to the charger
/// 5. Fire deferred events that have come due
/// 6. Refresh moods and narrated thoughts
/// 7. Give each agent its replanning opportunity
///
/// Returns the events that occurred during this tick.
pub fn run_simulation_tick(world: &mut World, real_seconds: f32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    if world.clock.is_paused() {
        return events;
    }
    let elapsed = world.clock.advance(real_seconds);
    if elapsed <= 0.0 {
        return events;
    }

    world.room_needs = world.room_needs.decay(elapsed, &world.config);
    update_needs(world, elapsed as f32);

    for idx in 0..world.agents.len() {
        update_battery(world, idx, elapsed as f32, &mut events);
    }

    process_deferred_events(world, &mut events);

    for idx in 0..world.agents.len() {
        update_mood_and_thoughts(world, idx, &mut events);
    }

    for idx in 0..world.agents.len() {
        plan_agent(world, idx, &mut events);
    }

    events
}

/// Update all agent needs based on time passage
fn update_needs(world: &mut World, minutes: f32) {
    let uncomfortable = !world.devices.is_comfortable();
    for agent in world.agents.iter_mut() {
        agent
            .needs
            .drift(minutes, agent.motion, agent.charging, &world.config);
        if uncomfortable {
            agent
                .needs
                .adjust(NeedType::Happiness, -world.config.discomfort_happiness_drain * minutes);
        }
    }
}

/// Fire every deferred event due by now
fn process_deferred_events(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let now = world.clock.now();
    for event in world.events.drain_due(now) {
        match event {
            DeferredEvent::AfterTaskThought { agent } => {
                let Ok(idx) = world.index_of(agent) else {
                    tracing::warn!(agent = agent.0, "After-task thought for unknown agent dropped");
                    continue;
                };
                if world.agents[idx].is_idle() {
                    let line = pick_topic(&mut world.rng, ThoughtTopic::AfterTask);
                    world.say(idx, line, events);
                } else {
                    tracing::debug!(agent = agent.0, "Agent busy, after-task thought dropped");
                }
            }

            DeferredEvent::TelevisionAutoOff { agent } => {
                if !world.devices.tv_on {
                    continue;
                }
                if world.devices.tv_owner != Some(agent) {
                    tracing::warn!(agent = agent.0, owner = ?world.devices.tv_owner, "TV changed hands, auto-off dropped");
                    continue;
                }
                let busy = world.agent(agent).map(|a| !a.is_idle()).unwrap_or(false);
                if busy {
                    let recheck = now + world.config.busy_recheck.min;
                    world.events.schedule(recheck, event);
                } else {
                    world.devices.switch_tv_off();
                    tracing::debug!(agent = agent.0, "TV switched off");
                    events.push(SimulationEvent::TelevisionSwitched { on: false, by: Some(agent) });
                }
            }

            DeferredEvent::PurgeTask { task } => {
                if world.tasks.get(task).map(|t| t.status) == Some(TaskStatus::Completed) {
                    world.tasks.remove(task);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::agent::MotionState;
    use crate::entity::tasks::TaskSource;

    fn world() -> World {
        World::household(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_paused_tick_changes_nothing() {
        let mut world = world();
        world.clock.set_speed(0.0);
        let before = world.room_needs.clone();
        let now = world.now();
        assert!(run_simulation_tick(&mut world, 5.0).is_empty());
        assert_eq!(world.now(), now);
        assert_eq!(world.room_needs, before);
    }

    #[test]
    fn test_tick_decays_rooms() {
        let mut world = world();
        let before = *world.room_needs.get(RoomId::Kitchen).unwrap();
        run_simulation_tick(&mut world, 10.0);
        let after = *world.room_needs.get(RoomId::Kitchen).unwrap();
        assert!(after.cleanliness < before.cleanliness);
        assert!(after.routine < before.routine);
    }

    #[test]
    fn test_first_ticks_schedule_then_plan() {
        let mut world = world();
        run_simulation_tick(&mut world, 0.5);
        assert!(world.planners.iter().all(|p| p.next_decision_at.is_some()));

        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(run_simulation_tick(&mut world, 1.0));
        }
        let chosen = events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::BehaviorChosen { .. }))
            .count();
        assert_eq!(chosen, 3);
    }

    #[test]
    fn test_user_task_blocks_planning() {
        let mut world = world();
        world.submit_command(AgentId(0), "vacuum the living room", TaskSource::User).unwrap();
        let mut events = Vec::new();
        for _ in 0..20 {
            events.extend(run_simulation_tick(&mut world, 1.0));
        }
        assert!(!events
            .iter()
            .any(|e| matches!(e, SimulationEvent::BehaviorChosen { agent: AgentId(0), .. })));
    }

    #[test]
    fn test_tv_auto_off_waits_for_idle_owner() {
        let mut world = world();
        world.devices.switch_tv_on(AgentId(0));
        world.agents[0].motion = MotionState::Working;
        world.events.schedule(world.now(), DeferredEvent::TelevisionAutoOff { agent: AgentId(0) });

        let mut events = Vec::new();
        process_deferred_events(&mut world, &mut events);
        assert!(world.devices.tv_on);
        assert_eq!(world.events.len(), 1);

        world.agents[0].motion = MotionState::Idle;
        world.clock.advance_minutes(10.0);
        process_deferred_events(&mut world, &mut events);
        assert!(!world.devices.tv_on);
        assert!(events.contains(&SimulationEvent::TelevisionSwitched { on: false, by: Some(AgentId(0)) }));
    }

    #[test]
    fn test_tv_auto_off_ignores_new_owner() {
        let mut world = world();
        world.devices.switch_tv_on(AgentId(1));
        world.events.schedule(world.now(), DeferredEvent::TelevisionAutoOff { agent: AgentId(0) });
        let mut events = Vec::new();
        process_deferred_events(&mut world, &mut events);
        assert!(world.devices.tv_on);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_completed_tasks_are_purged() {
        let mut world = world();
        let id = world.submit_command(AgentId(1), "cook", TaskSource::User).unwrap();
        world.complete_task(id).unwrap();
        assert!(world.tasks.get(id).is_some());

        world.clock.advance_minutes(world.config.completed_task_linger_minutes);
        let mut events = Vec::new();
        process_deferred_events(&mut world, &mut events);
        assert!(world.tasks.get(id).is_none());
    }

    #[test]
    fn test_uncomfortable_thermostat_drains_happiness() {
        let mut cold = world();
        let mut mild = world();
        cold.devices.thermostat = 60.0;
        run_simulation_tick(&mut cold, 30.0);
        run_simulation_tick(&mut mild, 30.0);
        assert!(cold.agents[0].needs.happiness < mild.agents[0].needs.happiness);
    }
}
