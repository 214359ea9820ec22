//! The simulation context
//!
//! `World` owns every piece of mutable simulation state: the clock, the
//! seeded random source, agents and their planner records, the task queue,
//! room needs, device flags, the ledger and the deferred-event queue. Every
//! operation takes the world explicitly; nothing reaches into shared state.

pub mod devices;
pub mod furniture;
pub mod layout;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::SimClock;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{AgentId, TaskId, Vec2};
use crate::entity::agent::{default_roster, Agent, AgentProfile, MotionState};
use crate::entity::needs::{Mood, NeedType};
use crate::entity::tasks::{Task, TaskQueue, TaskSource};
use crate::simulation::brain::PlannerState;
use crate::simulation::economy::Ledger;
use crate::simulation::events::{DeferredEvent, EventQueue};
use crate::simulation::presets::{anchor_point, resolve_command};
use crate::simulation::room_needs::RoomNeeds;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::obstacles::ObstacleMap;

pub use devices::DeviceFlags;
pub use furniture::{FurnitureItem, FurniturePlacement, FurnitureRegistry};
pub use layout::{FloorPlan, Room, RoomId};

/// Side effects of finishing a task
#[derive(Debug, Clone)]
pub struct TaskCompletion {
    pub task: Task,
    /// Coins credited; zero for errands
    pub reward: u32,
}

pub struct World {
    pub clock: SimClock,
    pub config: SimulationConfig,
    pub rng: ChaCha8Rng,
    pub floor_plan: FloorPlan,
    pub furniture: FurniturePlacement,
    pub agents: Vec<Agent>,
    pub profiles: Vec<AgentProfile>,
    pub planners: Vec<PlannerState>,
    pub tasks: TaskQueue,
    pub room_needs: RoomNeeds,
    pub devices: DeviceFlags,
    pub ledger: Ledger,
    pub events: EventQueue,
}

impl World {
    /// Compose a world; configuration problems surface here, never mid-run
    pub fn new(
        config: SimulationConfig,
        floor_plan: FloorPlan,
        furniture: FurniturePlacement,
        profiles: Vec<AgentProfile>,
    ) -> Result<Self> {
        config.validate()?;

        if floor_plan.rooms().is_empty() {
            return Err(SimError::Config("floor plan has no rooms".into()));
        }
        for profile in &profiles {
            if !(0.0..=1.0).contains(&profile.curiosity) {
                return Err(SimError::Config(format!(
                    "{} has curiosity {}, expected 0..=1",
                    profile.name, profile.curiosity
                )));
            }
            let rooms = std::iter::once(&profile.favorite_room).chain(profile.preferred_rooms.iter());
            for room in rooms {
                if floor_plan.room(*room).is_none() {
                    return Err(SimError::UnknownRoom(room.tag().to_string()));
                }
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let room_needs = RoomNeeds::create_initial(floor_plan.rooms(), &config, &mut rng);
        let clock = SimClock::new(config.start_minutes, config.sim_minutes_per_second);

        let agents: Vec<Agent> = profiles
            .iter()
            .enumerate()
            .map(|(i, profile)| Agent::new(AgentId(i as u32), profile))
            .collect();
        let planners = agents.iter().map(|a| PlannerState::new(a.needs.social)).collect();

        tracing::info!(
            seed = config.seed,
            agents = agents.len(),
            rooms = floor_plan.rooms().len(),
            "World created"
        );

        Ok(Self {
            clock,
            config,
            rng,
            floor_plan,
            furniture,
            agents,
            profiles,
            planners,
            tasks: TaskQueue::new(),
            room_needs,
            devices: DeviceFlags::default(),
            ledger: Ledger::new(),
            events: EventQueue::new(),
        })
    }

    /// Default home with the standard three robots
    pub fn household(config: SimulationConfig) -> Result<Self> {
        Self::new(
            config,
            FloorPlan::household(),
            FurniturePlacement::household(),
            default_roster(),
        )
    }

    /// Swap in externally supplied room needs; every room must be covered
    pub fn replace_room_needs(&mut self, needs: RoomNeeds) -> Result<()> {
        if let Some(missing) = self.floor_plan.rooms().iter().find(|r| !needs.contains(r.id)) {
            return Err(SimError::UnknownRoom(missing.id.tag().to_string()));
        }
        self.room_needs = needs;
        Ok(())
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn index_of(&self, agent: AgentId) -> Result<usize> {
        let idx = agent.0 as usize;
        if idx < self.agents.len() {
            Ok(idx)
        } else {
            Err(SimError::UnknownAgent(agent))
        }
    }

    pub fn agent(&self, agent: AgentId) -> Result<&Agent> {
        let idx = self.index_of(agent)?;
        Ok(&self.agents[idx])
    }

    pub fn agent_mut(&mut self, agent: AgentId) -> Result<&mut Agent> {
        let idx = self.index_of(agent)?;
        Ok(&mut self.agents[idx])
    }

    pub fn planner(&self, agent: AgentId) -> Result<&PlannerState> {
        let idx = self.index_of(agent)?;
        Ok(&self.planners[idx])
    }

    pub fn obstacle_map(&self) -> ObstacleMap<'_> {
        ObstacleMap::new(&self.furniture, &self.config)
    }

    pub(crate) fn say(&mut self, idx: usize, thought: impl Into<String>, out: &mut Vec<SimulationEvent>) {
        let agent = &mut self.agents[idx];
        agent.say(thought);
        out.push(SimulationEvent::ThoughtChanged {
            agent: agent.id,
            thought: agent.thought.clone(),
        });
    }

    pub(crate) fn set_mood(&mut self, idx: usize, mood: Mood, out: &mut Vec<SimulationEvent>) {
        let agent = &mut self.agents[idx];
        if agent.mood != mood {
            agent.mood = mood;
            out.push(SimulationEvent::MoodChanged { agent: agent.id, mood });
        }
    }

    /// Hand a user or schedule command to an agent; it supersedes whatever the agent was doing
    pub fn submit_command(&mut self, agent: AgentId, text: &str, source: TaskSource) -> Result<TaskId> {
        let idx = self.index_of(agent)?;
        let now = self.clock.now();
        let resolved = resolve_command(text, self.clock.period());

        let position = {
            let obstacles = ObstacleMap::new(&self.furniture, &self.config);
            anchor_point(&self.floor_plan, &obstacles, resolved.room, &self.config, &mut self.rng)
        };

        let superseded = self.tasks.clear_agent(agent);
        if superseded > 0 {
            tracing::debug!(agent = agent.0, superseded, "Command superseded active tasks");
            self.agents[idx].motion = MotionState::Idle;
            self.agents[idx].activity = None;
            // A dropped charger trip is routed again once this command is done
            self.planners[idx].low_battery_routed = false;
        }

        let task = Task::new(TaskId::from_rng(&mut self.rng), agent, resolved.room, position.to_world(), now)
            .with_command(text)
            .with_source(source)
            .with_description(resolved.preset.description.clone())
            .with_activity(resolved.preset.activity, resolved.preset.work_duration);
        let id = self.tasks.enqueue(task);

        let robot = &mut self.agents[idx];
        robot.say(resolved.preset.thought);
        if source == TaskSource::User {
            robot
                .needs
                .adjust(NeedType::Social, self.config.user_command_social_boost);
        }

        tracing::debug!(
            agent = agent.0,
            task = %id,
            room = %resolved.room,
            activity = %resolved.preset.activity,
            ?source,
            "Command accepted"
        );
        Ok(id)
    }

    /// Doorbell-style interrupt: drop the agent's AI work and stand it idle
    pub fn interrupt_ai_work(&mut self, agent: AgentId) -> Result<usize> {
        let idx = self.index_of(agent)?;
        let mut dropped = self.tasks.clear_queued_ai(agent);
        if self.tasks.cancel_active_ai(agent).is_some() {
            dropped += 1;
            self.agents[idx].motion = MotionState::Idle;
            self.agents[idx].activity = None;
        }
        if dropped > 0 {
            tracing::debug!(agent = agent.0, dropped, "AI work interrupted");
        }
        Ok(dropped)
    }

    pub fn interrupt_all_ai_work(&mut self) -> usize {
        let ids: Vec<AgentId> = self.agents.iter().map(|a| a.id).collect();
        ids.into_iter()
            .filter_map(|id| self.interrupt_ai_work(id).ok())
            .sum()
    }

    /// Cancel a task outright regardless of status
    pub fn remove_task(&mut self, task: TaskId) -> Result<Task> {
        let removed = self.tasks.remove(task).ok_or(SimError::UnknownTask(task))?;
        if let Ok(idx) = self.index_of(removed.agent) {
            if self.tasks.active_task_for(removed.agent).is_none() {
                self.agents[idx].motion = MotionState::Idle;
                self.agents[idx].activity = None;
            }
        }
        Ok(removed)
    }

    /// Finish a task: boost its room and credit the reward, exactly once
    ///
    /// Errands (zero work duration, e.g. a charger trip) neither boost nor pay.
    pub fn complete_task(&mut self, task: TaskId) -> Result<Option<TaskCompletion>> {
        let Some(done) = self.tasks.complete(task)? else {
            return Ok(None);
        };
        let now = self.clock.now();

        let reward = if done.work_duration > 0.0 {
            self.room_needs = self.room_needs.boost(done.target_room, done.activity, now);
            self.ledger
                .credit_task(&done.description, done.work_duration, done.activity, now)
        } else {
            0
        };

        if let Ok(idx) = self.index_of(done.agent) {
            let agent = &mut self.agents[idx];
            agent.motion = MotionState::Idle;
            agent.activity = None;
        }

        self.events.schedule(
            now + self.config.completed_task_linger_minutes,
            DeferredEvent::PurgeTask { task },
        );

        tracing::debug!(
            agent = done.agent.0,
            task = %task,
            room = %done.target_room,
            activity = %done.activity,
            reward,
            "Task completed"
        );
        Ok(Some(TaskCompletion { task: done, reward }))
    }

    /// Put an agent somewhere on the floor, as the movement layer would report
    pub fn report_position(&mut self, agent: AgentId, position: Vec2, facing: Vec2) -> Result<()> {
        self.agent_mut(agent)?.place(position, facing);
        Ok(())
    }

    pub fn report_motion(&mut self, agent: AgentId, motion: MotionState) -> Result<()> {
        self.agent_mut(agent)?.motion = motion;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::catalog::ActivityType;
    use crate::entity::tasks::TaskStatus;

    fn world() -> World {
        World::household(SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_household_composition() {
        let world = world();
        assert_eq!(world.agents.len(), 3);
        assert_eq!(world.planners.len(), 3);
        assert_eq!(world.room_needs.len(), RoomId::ALL.len());
        assert!(world.agent(AgentId(3)).is_err());
    }

    #[test]
    fn test_profile_with_unknown_room_rejected() {
        let plan = FloorPlan::new(
            vec![Room::new(RoomId::Kitchen, "Kitchen", Vec2::ZERO, (4.0, 4.0))],
            Vec2::ZERO,
            Vec2::ZERO,
        );
        let profiles = vec![AgentProfile::new("Solo", RoomId::Yard, Vec2::ZERO)];
        let result = World::new(SimulationConfig::default(), plan, FurniturePlacement::empty(), profiles);
        assert!(matches!(result, Err(SimError::UnknownRoom(_))));
    }

    #[test]
    fn test_profile_with_bad_curiosity_rejected() {
        for curiosity in [f64::NAN, -0.1, 1.5] {
            let mut profiles = default_roster();
            profiles[1].curiosity = curiosity;
            let result = World::new(
                SimulationConfig::default(),
                FloorPlan::household(),
                FurniturePlacement::household(),
                profiles,
            );
            assert!(matches!(result, Err(SimError::Config(_))), "curiosity {} accepted", curiosity);
        }
    }

    #[test]
    fn test_command_drops_charger_trip_and_rearms_routing() {
        let mut world = world();
        world.planners[0].low_battery_routed = true;
        let errand = Task::new(TaskId::new(), AgentId(0), RoomId::Hallway, Vec2::ZERO.to_world(), 0.0);
        world.tasks.enqueue(errand);

        world.submit_command(AgentId(0), "dust the bedroom", TaskSource::User).unwrap();
        assert!(!world.planners[0].low_battery_routed);
        assert_eq!(world.tasks.iter().filter(|t| t.agent == AgentId(0)).count(), 1);
    }

    #[test]
    fn test_replace_room_needs_requires_every_room() {
        let mut world = world();
        assert!(matches!(world.replace_room_needs(RoomNeeds::new()), Err(SimError::UnknownRoom(_))));
    }

    #[test]
    fn test_same_seed_same_initial_state() {
        let a = world();
        let b = world();
        assert_eq!(a.room_needs, b.room_needs);
    }

    #[test]
    fn test_submit_command_creates_user_task() {
        let mut world = world();
        let before_social = world.agents[1].needs.social;
        let id = world
            .submit_command(AgentId(1), "cook dinner", TaskSource::User)
            .unwrap();
        let task = world.tasks.get(id).unwrap();
        assert_eq!(task.source, TaskSource::User);
        assert_eq!(task.target_room, RoomId::Kitchen);
        assert_eq!(task.activity, ActivityType::Cooking);
        assert!(world.agents[1].needs.social > before_social);
        assert!(world
            .obstacle_map()
            .is_clear(task.target_position.ground(), world.config.anchor_margin));
    }

    #[test]
    fn test_submit_command_unknown_agent() {
        let mut world = world();
        let result = world.submit_command(AgentId(9), "clean", TaskSource::User);
        assert!(matches!(result, Err(SimError::UnknownAgent(_))));
    }

    #[test]
    fn test_completion_boosts_and_pays_once() {
        let mut world = world();
        let id = world
            .submit_command(AgentId(2), "scrub the bathroom", TaskSource::User)
            .unwrap();
        let before = *world.room_needs.get(RoomId::Bathroom).unwrap();

        let done = world.complete_task(id).unwrap().unwrap();
        assert!(done.reward >= 3);
        let after = *world.room_needs.get(RoomId::Bathroom).unwrap();
        assert_eq!(after.cleanliness, (before.cleanliness + 30.0).min(100.0));
        let coins = world.ledger.coins();

        assert!(world.complete_task(id).unwrap().is_none());
        assert_eq!(world.ledger.coins(), coins);
        assert_eq!(*world.room_needs.get(RoomId::Bathroom).unwrap(), after);
    }

    #[test]
    fn test_interrupt_keeps_user_tasks() {
        let mut world = world();
        let user = world.submit_command(AgentId(0), "sweep the hallway", TaskSource::User).unwrap();
        let ai = Task::new(TaskId::new(), AgentId(0), RoomId::Kitchen, Vec2::ZERO.to_world(), 0.0);
        let ai_id = world.tasks.enqueue(ai);

        assert_eq!(world.interrupt_ai_work(AgentId(0)).unwrap(), 1);
        assert!(world.tasks.get(ai_id).is_none());
        assert_eq!(world.tasks.get(user).unwrap().status, TaskStatus::Queued);
    }

    #[test]
    fn test_interrupt_resets_motion_of_working_agent() {
        let mut world = world();
        let ai = Task::new(TaskId::new(), AgentId(1), RoomId::Kitchen, Vec2::ZERO.to_world(), 0.0);
        let id = world.tasks.enqueue(ai);
        world.tasks.advance(id, TaskStatus::Working).unwrap();
        world.agents[1].motion = MotionState::Working;

        assert_eq!(world.interrupt_all_ai_work(), 1);
        assert!(world.agents[1].is_idle());
        assert!(world.tasks.is_empty());
    }
}
