//! Agent decision engine
//!
//! Every tick each agent gets a chance to replan, but it only does so when
//! its cooldown has elapsed, it holds no user or schedule task, and it is
//! standing idle with nothing queued. Behavior selection is an ordered
//! policy where the first matching rule wins:
//!
//! 1. Low battery or exhausted: rest
//! 2. Cleaning streak at the limit: patrol (or rest if tired)
//! 3. Most urgent room above threshold: clean it
//! 4. Bored: watch TV or wander
//! 5. Patrol due and curiosity roll succeeds: patrol
//! 6. Tired: rest
//! 7. Otherwise: idle look
//!
//! Mood and narrated thoughts are updated alongside but never feed back
//! into the policy.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActivityType;
use crate::core::calendar::{TimePeriod, Weather};
use crate::core::config::{SimulationConfig, Span};
use crate::core::types::{TaskId, Vec2};
use crate::entity::agent::{AgentProfile, MotionState, Voice};
use crate::entity::needs::{mood_from_needs, Mood, NeedType, Needs};
use crate::entity::tasks::{Task, TaskSource};
use crate::entity::thoughts::{pick, pick_topic, voice_lines, working_lines, ThoughtTopic};
use crate::simulation::attention::score_room;
use crate::simulation::events::DeferredEvent;
use crate::simulation::presets::build_autonomous_task;
use crate::simulation::room_needs::RoomNeeds;
use crate::simulation::tick::SimulationEvent;
use crate::spatial::obstacles::ObstacleMap;
use crate::world::layout::{Room, RoomId};
use crate::world::World;

/// Fraction of the room footprint a wander target may stray from its center
const WANDER_SPREAD: f32 = 0.5;

// Spontaneous idle narration odds
const RAIN_THOUGHT_CHANCE: f64 = 0.4;
const SNOW_THOUGHT_CHANCE: f64 = 0.5;
const VOICE_IDLE_CHANCE: f64 = 0.4;
const VOICE_WORKING_CHANCE: f64 = 0.35;
const LOW_SOCIAL_THOUGHT: f32 = 20.0;
const LOW_ENERGY_THOUGHT: f32 = 20.0;
const HIGH_BOREDOM_THOUGHT: f32 = 70.0;
const HIGH_HAPPINESS_THOUGHT: f32 = 70.0;

/// Rise in social that counts as a user showing affection
const USER_LOVE_SOCIAL_RISE: f32 = 10.0;
const USER_LOVE_MIN_GAP: f64 = 5.0;

/// Morning greeting window, minutes since midnight
const GREETING_START: f64 = 7.0 * 60.0;
const GREETING_END: f64 = 8.0 * 60.0;

/// One discrete choice per planning cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Behavior {
    Rest,
    Clean { room: RoomId },
    Patrol,
    Wander,
    WatchTv,
    IdleLook,
}

impl Behavior {
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Rest => "rest",
            Behavior::Clean { .. } => "clean",
            Behavior::Patrol => "patrol",
            Behavior::Wander => "wander",
            Behavior::WatchTv => "watch-tv",
            Behavior::IdleLook => "idle-look",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Clean { room } => write!(f, "clean {}", room),
            other => f.write_str(other.name()),
        }
    }
}

/// Per-agent replanning record owned by the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    /// None until the first tick schedules the first decision
    pub next_decision_at: Option<f64>,
    pub consecutive_cleans: u32,
    pub last_cleaned: Option<RoomId>,
    pub last_patrol_at: Option<f64>,
    pub wander_cooldown_until: f64,
    pub last_tv_at: Option<f64>,

    // Narration bookkeeping
    pub last_thought_at: f64,
    pub greeted_day: Option<u32>,
    pub philosophy_count: u32,
    /// Lowest social seen since the last user-love thought
    pub social_baseline: f32,

    /// Set once a charger trip has been issued, cleared after recovery
    pub low_battery_routed: bool,
}

impl PlannerState {
    pub fn new(initial_social: f32) -> Self {
        Self {
            next_decision_at: None,
            consecutive_cleans: 0,
            last_cleaned: None,
            last_patrol_at: None,
            wander_cooldown_until: 0.0,
            last_tv_at: None,
            last_thought_at: 0.0,
            greeted_day: None,
            philosophy_count: 0,
            social_baseline: initial_social,
            low_battery_routed: false,
        }
    }

    fn schedule_next<R: Rng + ?Sized>(&mut self, now: f64, cooldown: Span, rng: &mut R) {
        self.next_decision_at = Some(now + cooldown.sample(rng));
    }
}

/// Read-only snapshot the policy decides from
pub struct DecisionInput<'a> {
    pub now: f64,
    pub period: TimePeriod,
    pub needs: &'a Needs,
    pub battery: f32,
    pub position: Vec2,
    pub profile: &'a AgentProfile,
    pub rooms: &'a [Room],
    pub room_needs: &'a RoomNeeds,
    pub config: &'a SimulationConfig,
}

/// Rooms ranked most urgent first, with the agent's personal bias applied
pub fn rank_rooms(input: &DecisionInput<'_>, last_cleaned: Option<RoomId>) -> Vec<(RoomId, f32)> {
    let cfg = input.config;
    let mut ranked: Vec<(RoomId, f32)> = input
        .rooms
        .iter()
        .filter_map(|room| {
            let state = input.room_needs.get(room.id)?;
            let mut score = score_room(room, state, input.period, Some(input.position), cfg);
            if last_cleaned == Some(room.id) {
                score -= cfg.last_cleaned_penalty;
            }
            if input.profile.favorite_room == room.id {
                score += cfg.favorite_room_bonus;
            }
            if input.profile.prefers(room.id) {
                score += cfg.preferred_room_bonus;
            } else {
                score -= cfg.non_preferred_penalty;
            }
            Some((room.id, score))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Pick the next behavior; may reset the cleaning streak
pub fn decide_behavior<R: Rng + ?Sized>(
    input: &DecisionInput<'_>,
    planner: &mut PlannerState,
    rng: &mut R,
) -> Behavior {
    let cfg = input.config;
    let needs = input.needs;

    if input.battery < cfg.rest_battery_threshold || needs.energy < cfg.rest_energy_threshold {
        return Behavior::Rest;
    }

    if planner.consecutive_cleans >= cfg.consecutive_clean_limit {
        planner.consecutive_cleans = 0;
        return if needs.energy < cfg.streak_rest_energy {
            Behavior::Rest
        } else {
            Behavior::Patrol
        };
    }

    let ranked = rank_rooms(input, planner.last_cleaned);
    if let Some(&(room, score)) = ranked.first() {
        if score >= cfg.clean_score_threshold && needs.energy >= cfg.clean_energy_min {
            return Behavior::Clean { room };
        }
    }

    if needs.boredom > cfg.wander_boredom_threshold && input.now > planner.wander_cooldown_until {
        let tv_due = planner
            .last_tv_at
            .map_or(true, |t| input.now - t >= cfg.tv_min_gap_minutes);
        if needs.boredom > cfg.tv_boredom_threshold && tv_due && rng.gen_bool(cfg.tv_chance) {
            return Behavior::WatchTv;
        }
        return Behavior::Wander;
    }

    let patrol_due = planner
        .last_patrol_at
        .map_or(true, |t| input.now - t > cfg.patrol_min_gap_minutes);
    if patrol_due && rng.gen_bool(input.profile.curiosity.clamp(0.0, 1.0)) {
        return Behavior::Patrol;
    }

    if needs.energy < cfg.idle_rest_energy {
        return Behavior::Rest;
    }

    Behavior::IdleLook
}

/// Give one agent its replanning opportunity for this tick
pub fn plan_agent(world: &mut World, idx: usize, out: &mut Vec<SimulationEvent>) {
    let now = world.clock.now();
    let agent_id = world.agents[idx].id;
    let cfg = &world.config;
    let planner = &mut world.planners[idx];

    let Some(next) = planner.next_decision_at else {
        planner.schedule_next(now, cfg.first_decision_delay, &mut world.rng);
        return;
    };
    if now < next {
        return;
    }

    if world.tasks.active_external_task_for(agent_id).is_some() {
        planner.schedule_next(now, cfg.external_task_recheck, &mut world.rng);
        return;
    }

    let agent = &world.agents[idx];
    let charging_up = agent.charging && agent.battery < cfg.full_charge_threshold;
    if world.tasks.active_task_for(agent_id).is_some() || !agent.is_idle() || charging_up {
        planner.schedule_next(now, cfg.busy_recheck, &mut world.rng);
        return;
    }

    let input = DecisionInput {
        now,
        period: world.clock.period(),
        needs: &agent.needs,
        battery: agent.battery,
        position: agent.ground_position(),
        profile: &world.profiles[idx],
        rooms: world.floor_plan.rooms(),
        room_needs: &world.room_needs,
        config: cfg,
    };
    let behavior = decide_behavior(&input, planner, &mut world.rng);

    tracing::debug!(agent = agent_id.0, %behavior, minute = now, "Behavior chosen");
    out.push(SimulationEvent::BehaviorChosen {
        agent: agent_id,
        behavior,
        sim_minutes: now,
    });
    apply_behavior(world, idx, behavior, out);
}

fn enqueue_ai_task(world: &mut World, task: Task, out: &mut Vec<SimulationEvent>) -> TaskId {
    let agent = task.agent;
    let description = task.description.clone();
    let id = world.tasks.enqueue(task.with_source(TaskSource::Ai));
    tracing::debug!(agent = agent.0, task = %id, %description, "Task enqueued");
    out.push(SimulationEvent::TaskEnqueued {
        agent,
        task: id,
        description,
    });
    id
}

/// Carry out a chosen behavior: tasks, mood, thoughts, needs, cooldown
pub fn apply_behavior(world: &mut World, idx: usize, behavior: Behavior, out: &mut Vec<SimulationEvent>) {
    let now = world.clock.now();
    let period = world.clock.period();
    let agent_id = world.agents[idx].id;

    match behavior {
        Behavior::Rest => {
            let thought = pick_topic(&mut world.rng, ThoughtTopic::Resting);
            world.say(idx, thought, out);
            world.set_mood(idx, Mood::Tired, out);
            let planner = &mut world.planners[idx];
            planner.consecutive_cleans = 0;
            planner.schedule_next(now, world.config.rest_cooldown, &mut world.rng);
        }

        Behavior::Clean { room } => {
            let plan = {
                let obstacles = ObstacleMap::new(&world.furniture, &world.config);
                build_autonomous_task(&world.floor_plan, &obstacles, room, period, &world.config, &mut world.rng)
            };
            let room_name = world
                .floor_plan
                .room(room)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| room.tag().to_string());

            let thought = if world.planners[idx].consecutive_cleans == 0 {
                pick_topic(&mut world.rng, ThoughtTopic::Discovery).to_string()
            } else {
                plan.preset.thought.clone()
            };

            let task = Task::new(TaskId::from_rng(&mut world.rng), agent_id, room, plan.position.to_world(), now)
                .with_command(room_name)
                .with_description(plan.preset.description.clone())
                .with_activity(plan.preset.activity, plan.preset.work_duration);
            enqueue_ai_task(world, task, out);

            world.say(idx, thought, out);
            world.set_mood(idx, Mood::Focused, out);
            let needs = &mut world.agents[idx].needs;
            needs.adjust(NeedType::Happiness, world.config.clean_happiness_gain);
            needs.adjust(NeedType::Boredom, -world.config.clean_boredom_relief);

            world.events.schedule(
                now + plan.preset.work_duration as f64 + world.config.after_task_thought_delay_minutes,
                DeferredEvent::AfterTaskThought { agent: agent_id },
            );

            let planner = &mut world.planners[idx];
            planner.last_cleaned = Some(room);
            planner.consecutive_cleans += 1;
            planner.schedule_next(now, world.config.clean_cooldown, &mut world.rng);
        }

        Behavior::Patrol => {
            let spot = {
                let raw = world
                    .floor_plan
                    .window_spots()
                    .choose(&mut world.rng)
                    .copied()
                    .unwrap_or(Vec2::new(0.0, -1.0));
                let obstacles = ObstacleMap::new(&world.furniture, &world.config);
                obstacles.find_clear_point(raw, world.config.anchor_margin)
            };
            let room = world
                .floor_plan
                .room_at(spot)
                .map(|r| r.id)
                .unwrap_or(RoomId::Hallway);

            let task = Task::new(TaskId::from_rng(&mut world.rng), agent_id, room, spot.to_world(), now)
                .with_command("Window gazing")
                .with_description("Looking outside.")
                .with_activity(ActivityType::General, world.config.patrol_work_minutes);
            enqueue_ai_task(world, task, out);

            let thought = pick_topic(&mut world.rng, ThoughtTopic::WindowGazing);
            world.say(idx, thought, out);
            world.set_mood(idx, Mood::Curious, out);

            let planner = &mut world.planners[idx];
            planner.last_patrol_at = Some(now);
            planner.consecutive_cleans = 0;
            planner.schedule_next(now, world.config.patrol_cooldown, &mut world.rng);
        }

        Behavior::Wander => {
            let profile = &world.profiles[idx];
            let rooms = world.floor_plan.rooms();
            let preferred: Vec<&Room> = rooms.iter().filter(|r| profile.prefers(r.id)).collect();
            let all: Vec<&Room> = rooms.iter().collect();
            let pool = if world.rng.gen_bool(world.config.wander_preferred_chance) && !preferred.is_empty() {
                preferred
            } else {
                all
            };
            let Some(room) = pool.choose(&mut world.rng).map(|r| (*r).clone()) else {
                return;
            };

            let target = {
                let raw = Vec2::new(
                    room.center.x + (world.rng.gen::<f32>() - 0.5) * room.size.0 * WANDER_SPREAD,
                    room.center.z + (world.rng.gen::<f32>() - 0.5) * room.size.1 * WANDER_SPREAD,
                );
                let obstacles = ObstacleMap::new(&world.furniture, &world.config);
                obstacles.find_clear_point(raw, world.config.anchor_margin)
            };

            let task = Task::new(TaskId::from_rng(&mut world.rng), agent_id, room.id, target.to_world(), now)
                .with_command(format!("Exploring {}", room.name))
                .with_description("Wandering.")
                .with_activity(ActivityType::General, world.config.wander_work_minutes);
            enqueue_ai_task(world, task, out);

            let thought = pick_topic(&mut world.rng, ThoughtTopic::Exploring);
            world.say(idx, thought, out);
            world.set_mood(idx, Mood::Curious, out);
            world.agents[idx]
                .needs
                .adjust(NeedType::Boredom, -world.config.wander_boredom_relief);

            let planner = &mut world.planners[idx];
            planner.wander_cooldown_until = now + world.config.wander_gap_minutes;
            planner.schedule_next(now, world.config.wander_cooldown, &mut world.rng);
        }

        Behavior::WatchTv => {
            let spot = world
                .obstacle_map()
                .find_clear_point(world.floor_plan.tv_anchor(), world.config.anchor_margin);
            let room = world
                .floor_plan
                .room_at(spot)
                .map(|r| r.id)
                .unwrap_or(RoomId::LivingRoom);

            let task = Task::new(TaskId::from_rng(&mut world.rng), agent_id, room, spot.to_world(), now)
                .with_command("Watching TV")
                .with_description("Relaxing in front of the TV.")
                .with_activity(ActivityType::General, world.config.tv_work_minutes);
            enqueue_ai_task(world, task, out);

            let was_on = world.devices.tv_on;
            world.devices.switch_tv_on(agent_id);
            if !was_on {
                out.push(SimulationEvent::TelevisionSwitched { on: true, by: Some(agent_id) });
            }
            world.events.schedule(
                now + world.config.tv_auto_off_delay_minutes,
                DeferredEvent::TelevisionAutoOff { agent: agent_id },
            );

            let thought = pick_topic(&mut world.rng, ThoughtTopic::Television);
            world.say(idx, thought, out);
            world.set_mood(idx, Mood::Curious, out);
            let needs = &mut world.agents[idx].needs;
            needs.adjust(NeedType::Boredom, -world.config.tv_boredom_relief);
            needs.adjust(NeedType::Happiness, world.config.tv_happiness_gain);

            let planner = &mut world.planners[idx];
            planner.last_tv_at = Some(now);
            planner.wander_cooldown_until = now + world.config.wander_gap_minutes;
            planner.schedule_next(now, world.config.watch_tv_cooldown, &mut world.rng);
        }

        Behavior::IdleLook => {
            let topic = match period {
                TimePeriod::Morning => ThoughtTopic::Morning,
                TimePeriod::Night => ThoughtTopic::Night,
                _ => ThoughtTopic::Happy,
            };
            let thought = pick_topic(&mut world.rng, topic);
            world.say(idx, thought, out);
            world.planners[idx].schedule_next(now, world.config.idle_look_cooldown, &mut world.rng);
        }
    }
}

/// Resting mood from needs, nudged by the weather
pub fn ambient_mood(needs: &Needs, weather: Weather) -> Mood {
    match mood_from_needs(needs) {
        Mood::Content if weather == Weather::Snowy => Mood::Happy,
        mood => mood,
    }
}

/// Per-tick mood refresh and narrated thoughts
pub fn update_mood_and_thoughts(world: &mut World, idx: usize, out: &mut Vec<SimulationEvent>) {
    let now = world.clock.now();
    let weather = world.clock.weather();
    let period = world.clock.period();
    let night_gap = world.config.night_thought_gap;
    let (spontaneous_gap, spontaneous_chance) =
        (world.config.spontaneous_thought_gap, world.config.spontaneous_thought_chance);
    let (working_gap, working_chance) = (world.config.working_thought_gap, world.config.working_thought_chance);

    let (needs, motion, activity, voice) = {
        let agent = &world.agents[idx];
        (agent.needs, agent.motion, agent.activity, world.profiles[idx].voice)
    };
    let idle = world.agents[idx].is_idle();

    let mood = ambient_mood(&needs, weather);
    if idle {
        world.set_mood(idx, mood, out);
    }

    // Morning greeting, once per day
    let day = world.clock.day();
    let minute = world.clock.minute_of_day();
    if world.planners[idx].greeted_day != Some(day) && minute > GREETING_START && minute < GREETING_END {
        world.planners[idx].greeted_day = Some(day);
        let line = pick_topic(&mut world.rng, ThoughtTopic::WakeUp);
        world.say(idx, line, out);
    }

    let since_thought = now - world.planners[idx].last_thought_at;

    if period == TimePeriod::Night && idle && since_thought > night_gap {
        world.planners[idx].last_thought_at = now;
        let line = pick_topic(&mut world.rng, ThoughtTopic::Night);
        world.say(idx, line, out);
    } else if idle
        && since_thought > spontaneous_gap
        && world.rng.gen_bool(spontaneous_chance)
    {
        world.planners[idx].last_thought_at = now;
        let line = spontaneous_line(world, idx, &needs, weather, period, voice);
        world.say(idx, line, out);
    } else if motion == MotionState::Working
        && since_thought > working_gap
        && world.rng.gen_bool(working_chance)
    {
        world.planners[idx].last_thought_at = now;
        let line = if world.rng.gen_bool(VOICE_WORKING_CHANCE) {
            pick(&mut world.rng, voice_lines(voice, true))
        } else {
            pick(&mut world.rng, working_lines(activity.unwrap_or(ActivityType::General)))
        };
        world.say(idx, line, out);
    }

    // A jump in social means someone paid attention
    let planner = &mut world.planners[idx];
    planner.social_baseline = planner.social_baseline.min(needs.social);
    if needs.social > planner.social_baseline + USER_LOVE_SOCIAL_RISE
        && now - planner.last_thought_at > USER_LOVE_MIN_GAP
    {
        planner.social_baseline = needs.social;
        planner.last_thought_at = now;
        let line = pick_topic(&mut world.rng, ThoughtTopic::UserLove);
        world.say(idx, line, out);
        world.set_mood(idx, Mood::Happy, out);
    }
}

fn spontaneous_line(
    world: &mut World,
    idx: usize,
    needs: &Needs,
    weather: Weather,
    period: TimePeriod,
    voice: Voice,
) -> &'static str {
    let rng = &mut world.rng;
    let planner = &mut world.planners[idx];

    if rng.gen_bool(world.config.philosophy_chance) && planner.philosophy_count < world.config.philosophy_limit {
        planner.philosophy_count += 1;
        return pick_topic(rng, ThoughtTopic::Philosophy);
    }

    let topic = if needs.social < LOW_SOCIAL_THOUGHT {
        Some(ThoughtTopic::Lonely)
    } else if needs.energy < LOW_ENERGY_THOUGHT {
        Some(ThoughtTopic::Tired)
    } else if needs.boredom > HIGH_BOREDOM_THOUGHT {
        Some(ThoughtTopic::Bored)
    } else if needs.happiness > HIGH_HAPPINESS_THOUGHT {
        Some(ThoughtTopic::Happy)
    } else if weather == Weather::Rainy && rng.gen_bool(RAIN_THOUGHT_CHANCE) {
        Some(ThoughtTopic::WeatherRain)
    } else if weather == Weather::Snowy && rng.gen_bool(SNOW_THOUGHT_CHANCE) {
        Some(ThoughtTopic::WeatherSnow)
    } else {
        None
    };

    match topic {
        Some(topic) => pick_topic(rng, topic),
        None if rng.gen_bool(VOICE_IDLE_CHANCE) => pick(rng, voice_lines(voice, false)),
        None if period == TimePeriod::Morning => pick_topic(rng, ThoughtTopic::Morning),
        None => pick_topic(rng, ThoughtTopic::Exploring),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::agent::default_roster;
    use crate::simulation::room_needs::{baseline_decay, RoomNeedState};
    use crate::world::layout::FloorPlan;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pristine(plan: &FloorPlan) -> RoomNeeds {
        let mut needs = RoomNeeds::new();
        for room in plan.rooms() {
            needs.insert(room.id, RoomNeedState::new(100.0, 100.0, 100.0, baseline_decay(room.id)));
        }
        needs
    }

    fn filthy(plan: &FloorPlan) -> RoomNeeds {
        let mut needs = RoomNeeds::new();
        for room in plan.rooms() {
            needs.insert(room.id, RoomNeedState::new(5.0, 5.0, 5.0, baseline_decay(room.id)));
        }
        needs
    }

    struct Fixture {
        plan: FloorPlan,
        profile: AgentProfile,
        config: SimulationConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                plan: FloorPlan::household(),
                profile: default_roster().remove(1),
                config: SimulationConfig::default(),
            }
        }

        fn input<'a>(&'a self, needs: &'a Needs, battery: f32, room_needs: &'a RoomNeeds) -> DecisionInput<'a> {
            DecisionInput {
                now: 600.0,
                period: TimePeriod::Morning,
                needs,
                battery,
                position: Vec2::new(4.0, -6.5),
                profile: &self.profile,
                rooms: self.plan.rooms(),
                room_needs,
                config: &self.config,
            }
        }

        /// Night, far from the favorite room, so clean rooms never win
        fn calm<'a>(&'a self, needs: &'a Needs, room_needs: &'a RoomNeeds) -> DecisionInput<'a> {
            DecisionInput {
                period: TimePeriod::Night,
                position: Vec2::new(-6.0, 8.0),
                ..self.input(needs, 90.0, room_needs)
            }
        }
    }

    #[test]
    fn test_low_battery_always_rests() {
        let fx = Fixture::new();
        let dirty = filthy(&fx.plan);
        let needs = Needs::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let mut planner = PlannerState::new(50.0);
            let behavior = decide_behavior(&fx.input(&needs, 15.0, &dirty), &mut planner, &mut rng);
            assert_eq!(behavior, Behavior::Rest);
        }
    }

    #[test]
    fn test_exhausted_rests() {
        let fx = Fixture::new();
        let dirty = filthy(&fx.plan);
        let needs = Needs::new(10.0, 70.0, 50.0, 10.0);
        let mut planner = PlannerState::new(50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(decide_behavior(&fx.input(&needs, 90.0, &dirty), &mut planner, &mut rng), Behavior::Rest);
    }

    #[test]
    fn test_dirty_room_gets_cleaned() {
        let fx = Fixture::new();
        let dirty = filthy(&fx.plan);
        let needs = Needs::default();
        let mut planner = PlannerState::new(50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let behavior = decide_behavior(&fx.input(&needs, 90.0, &dirty), &mut planner, &mut rng);
        // Chef favors the kitchen and stands in it
        assert_eq!(behavior, Behavior::Clean { room: RoomId::Kitchen });
    }

    #[test]
    fn test_streak_forces_patrol_or_rest() {
        let fx = Fixture::new();
        let dirty = filthy(&fx.plan);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut planner = PlannerState::new(50.0);
        planner.consecutive_cleans = 3;
        let fresh = Needs::default();
        assert_eq!(decide_behavior(&fx.input(&fresh, 90.0, &dirty), &mut planner, &mut rng), Behavior::Patrol);
        assert_eq!(planner.consecutive_cleans, 0);

        let mut planner = PlannerState::new(50.0);
        planner.consecutive_cleans = 3;
        let weary = Needs::new(30.0, 70.0, 50.0, 10.0);
        assert_eq!(decide_behavior(&fx.input(&weary, 90.0, &dirty), &mut planner, &mut rng), Behavior::Rest);
    }

    #[test]
    fn test_last_cleaned_room_penalized() {
        let fx = Fixture::new();
        let dirty = filthy(&fx.plan);
        let needs = Needs::default();
        let input = fx.input(&needs, 90.0, &dirty);
        let fresh = rank_rooms(&input, None);
        let after = rank_rooms(&input, Some(RoomId::Kitchen));
        let score = |list: &[(RoomId, f32)]| list.iter().find(|(r, _)| *r == RoomId::Kitchen).unwrap().1;
        assert!((score(&fresh) - score(&after) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_bored_agent_wanders_or_watches_tv() {
        let fx = Fixture::new();
        let clean = pristine(&fx.plan);
        let needs = Needs::new(80.0, 50.0, 50.0, 90.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut saw_tv = false;
        let mut saw_wander = false;
        for _ in 0..100 {
            let mut planner = PlannerState::new(50.0);
            match decide_behavior(&fx.calm(&needs, &clean), &mut planner, &mut rng) {
                Behavior::WatchTv => saw_tv = true,
                Behavior::Wander => saw_wander = true,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(saw_tv && saw_wander);
    }

    #[test]
    fn test_recent_tv_means_wander() {
        let fx = Fixture::new();
        let clean = pristine(&fx.plan);
        let needs = Needs::new(80.0, 50.0, 50.0, 90.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let mut planner = PlannerState::new(50.0);
            planner.last_tv_at = Some(590.0);
            assert_eq!(decide_behavior(&fx.calm(&needs, &clean), &mut planner, &mut rng), Behavior::Wander);
        }
    }

    #[test]
    fn test_calm_agent_patrols_or_idles() {
        let fx = Fixture::new();
        let clean = pristine(&fx.plan);
        let needs = Needs::new(80.0, 50.0, 50.0, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut planner = PlannerState::new(50.0);
        planner.last_patrol_at = Some(595.0);
        assert_eq!(decide_behavior(&fx.calm(&needs, &clean), &mut planner, &mut rng), Behavior::IdleLook);

        let tired = Needs::new(30.0, 50.0, 50.0, 10.0);
        assert_eq!(decide_behavior(&fx.calm(&tired, &clean), &mut planner, &mut rng), Behavior::Rest);
    }

    #[test]
    fn test_snow_lifts_content_mood() {
        let needs = Needs::new(60.0, 50.0, 50.0, 10.0);
        assert_eq!(ambient_mood(&needs, Weather::Sunny), Mood::Content);
        assert_eq!(ambient_mood(&needs, Weather::Snowy), Mood::Happy);
        let tired = Needs::new(10.0, 50.0, 50.0, 10.0);
        assert_eq!(ambient_mood(&tired, Weather::Snowy), Mood::Tired);
    }

    #[test]
    fn test_working_thought_respects_gap() {
        let config = SimulationConfig {
            working_thought_chance: 1.0,
            ..SimulationConfig::default()
        };
        let mut world = World::household(config).unwrap();
        world.agents[0].motion = MotionState::Working;
        world.agents[0].activity = Some(ActivityType::Dishes);
        world.planners[0].last_thought_at = world.now() - 100.0;

        let mut out = Vec::new();
        update_mood_and_thoughts(&mut world, 0, &mut out);
        assert!(out.iter().any(|e| matches!(e, SimulationEvent::ThoughtChanged { .. })));
        assert_eq!(world.planners[0].last_thought_at, world.now());

        let mut again = Vec::new();
        update_mood_and_thoughts(&mut world, 0, &mut again);
        assert!(again.is_empty());
    }
}
