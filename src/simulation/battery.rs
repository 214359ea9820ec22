//! Battery drain, docking, and low-battery routing

use crate::actions::catalog::ActivityType;
use crate::core::types::TaskId;
use crate::entity::agent::MotionState;
use crate::entity::tasks::{Task, TaskSource};
use crate::entity::thoughts::{pick_topic, ThoughtTopic};
use crate::simulation::tick::SimulationEvent;
use crate::world::layout::RoomId;
use crate::world::World;

/// Description carried by charger errands
pub const CHARGER_ERRAND: &str = "Heading to charging station";

/// Drain or charge one agent's battery over `minutes` and react to thresholds
pub fn update_battery(world: &mut World, idx: usize, minutes: f32, out: &mut Vec<SimulationEvent>) {
    let cfg = &world.config;
    let charger = world.floor_plan.charger();
    let agent = &mut world.agents[idx];
    let id = agent.id;

    let near_charger = agent.ground_position().distance(&charger) <= cfg.charging_range;
    let mut docked = false;

    if agent.charging {
        if agent.motion != MotionState::Idle || !near_charger {
            agent.charging = false;
            tracing::debug!(agent = id.0, battery = agent.battery, "Left the charger");
        } else {
            agent.set_battery(agent.battery + cfg.battery_charge_rate * minutes);
            if agent.battery >= cfg.full_charge_threshold {
                agent.charging = false;
                tracing::info!(agent = id.0, battery = agent.battery, "Charging finished");
                out.push(SimulationEvent::ChargingFinished { agent: id });
            }
        }
    } else if agent.is_idle() && near_charger && agent.battery < cfg.full_charge_threshold {
        agent.charging = true;
        docked = true;
        tracing::info!(agent = id.0, battery = agent.battery, "Charging started");
        out.push(SimulationEvent::ChargingStarted { agent: id });
    }

    if !agent.charging {
        let drain = match agent.motion {
            MotionState::Idle => cfg.battery_drain_idle,
            MotionState::Walking => cfg.battery_drain_walking,
            MotionState::Working => cfg.battery_drain_working,
        };
        agent.set_battery(agent.battery - drain * minutes);
    }

    let battery = agent.battery;
    let charging = agent.charging;
    let low = cfg.low_battery_threshold;
    let recovered = low + cfg.low_battery_hysteresis;

    if docked {
        let line = pick_topic(&mut world.rng, ThoughtTopic::Charging);
        world.say(idx, line, out);
    }

    if battery <= 0.0 {
        let dropped = world.tasks.clear_agent(id);
        let agent = &mut world.agents[idx];
        if dropped > 0 || agent.motion != MotionState::Idle {
            tracing::warn!(agent = id.0, dropped, "Battery depleted, robot stopped");
            agent.motion = MotionState::Idle;
            agent.activity = None;
        }
        return;
    }

    let planner = &mut world.planners[idx];
    if battery >= recovered {
        planner.low_battery_routed = false;
    } else if battery < low && !charging && !planner.low_battery_routed {
        // User and schedule work finishes first; the route is retried every tick
        if let Some(task) = world.tasks.active_external_task_for(id) {
            tracing::debug!(agent = id.0, battery, task = %task.id, "Low battery, charger trip deferred");
            return;
        }
        planner.low_battery_routed = true;
        route_to_charger(world, idx, out);
    }
}

/// Drop AI work and send the agent to the charger
///
/// Only called when the agent holds no user or schedule task, so the errand
/// is its single active task.
fn route_to_charger(world: &mut World, idx: usize, out: &mut Vec<SimulationEvent>) {
    let id = world.agents[idx].id;
    let now = world.clock.now();

    let mut dropped = world.tasks.clear_queued_ai(id);
    if world.tasks.cancel_active_ai(id).is_some() {
        dropped += 1;
        let agent = &mut world.agents[idx];
        agent.motion = MotionState::Idle;
        agent.activity = None;
    }

    let target = world
        .obstacle_map()
        .find_clear_point(world.floor_plan.charger(), world.config.agent_radius * 2.0);
    let errand = Task::new(TaskId::from_rng(&mut world.rng), id, RoomId::Hallway, target.to_world(), now)
        .with_command(CHARGER_ERRAND)
        .with_description(CHARGER_ERRAND)
        .with_activity(ActivityType::General, 0.0)
        .with_source(TaskSource::Ai);
    let task = world.tasks.enqueue(errand);

    let battery = world.agents[idx].battery;
    tracing::warn!(agent = id.0, battery, dropped, task = %task, "Low battery, routing to charger");
    out.push(SimulationEvent::LowBattery { agent: id, battery });
    out.push(SimulationEvent::TaskEnqueued {
        agent: id,
        task,
        description: CHARGER_ERRAND.to_string(),
    });

    let line = pick_topic(&mut world.rng, ThoughtTopic::LowBattery);
    world.say(idx, line, out);
}
