//! Reference movement layer
//!
//! The decision engine only queues tasks; something has to walk the robots
//! to their targets and report progress. An embedding application normally
//! does this with its own animation system. `TaskRunner` is the headless
//! stand-in used by the CLI and the integration tests: straight-line walking
//! steered around furniture, then linear work progress.

use crate::core::error::Result;
use crate::core::types::TaskId;
use crate::entity::agent::MotionState;
use crate::entity::tasks::TaskStatus;
use crate::simulation::tick::SimulationEvent;
use crate::world::World;

/// Below this distance the agent walks straight at the target, ignoring avoidance
const FINAL_APPROACH: f32 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct TaskRunner;

impl TaskRunner {
    pub fn new() -> Self {
        Self
    }

    /// Move every agent along its current task by `minutes` of sim time
    pub fn step(&mut self, world: &mut World, minutes: f64) -> Vec<SimulationEvent> {
        let mut out = Vec::new();
        if minutes <= 0.0 {
            return out;
        }
        for idx in 0..world.agents.len() {
            if let Err(err) = self.step_agent(world, idx, minutes as f32, &mut out) {
                tracing::warn!(agent = idx, %err, "Task runner step failed");
            }
        }
        out
    }

    fn step_agent(&mut self, world: &mut World, idx: usize, minutes: f32, out: &mut Vec<SimulationEvent>) -> Result<()> {
        let agent_id = world.agents[idx].id;
        if world.agents[idx].battery <= 0.0 {
            return Ok(());
        }

        let task_id = match world.tasks.in_progress_for(agent_id) {
            Some(task) => task.id,
            None => {
                let Some(next) = world.tasks.next_queued_for(agent_id) else {
                    return Ok(());
                };
                let id = next.id;
                world.tasks.advance(id, TaskStatus::Walking)?;
                let agent = &mut world.agents[idx];
                agent.motion = MotionState::Walking;
                agent.charging = false;
                out.push(SimulationEvent::TaskStarted { agent: agent_id, task: id });
                id
            }
        };

        let Some(task) = world.tasks.get(task_id).cloned() else {
            return Ok(());
        };

        match task.status {
            TaskStatus::Walking => {
                let position = world.agents[idx].ground_position();
                let target = task.target_position.ground();
                let to_target = target - position;
                let remaining = to_target.length();

                if remaining <= world.config.arrival_distance {
                    world.tasks.advance(task_id, TaskStatus::Working)?;
                    let agent = &mut world.agents[idx];
                    agent.motion = MotionState::Working;
                    agent.activity = Some(task.activity);
                    out.push(SimulationEvent::TaskArrived {
                        agent: agent_id,
                        task: task_id,
                        room: task.target_room,
                    });
                    if task.work_duration <= 0.0 {
                        self.finish(world, task_id, out)?;
                    }
                    return Ok(());
                }

                let desired = to_target.normalize();
                let mut heading = world.obstacle_map().steer(position, desired);
                if remaining < FINAL_APPROACH || heading.dot(&desired) < 0.0 {
                    heading = desired;
                }
                let travel = (world.config.walk_speed * minutes).min(remaining);
                world.agents[idx].place(position + heading * travel, heading);
            }
            TaskStatus::Working => {
                if task.work_duration <= 0.0 {
                    return self.finish(world, task_id, out);
                }
                let progress = task.progress + minutes / task.work_duration * 100.0;
                world.tasks.set_progress(task_id, progress)?;
                if progress >= 100.0 {
                    self.finish(world, task_id, out)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(&mut self, world: &mut World, task: TaskId, out: &mut Vec<SimulationEvent>) -> Result<()> {
        if let Some(done) = world.complete_task(task)? {
            out.push(SimulationEvent::TaskCompleted {
                agent: done.task.agent,
                task,
                room: done.task.target_room,
                activity: done.task.activity,
                reward: done.reward,
            });
        }
        Ok(())
    }
}
