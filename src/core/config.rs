//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. The defaults reproduce the tuned
//! household; a TOML file may override any subset of fields.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Inclusive-exclusive span sampled uniformly, mostly sim-minute cooldowns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Configuration for the simulation systems
///
/// These values have been tuned to produce varied, believable robot
/// routines. Changing them will affect pacing and feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === TIME & RANDOMNESS ===
    /// Seed for the world's random source; equal seeds replay identically
    pub seed: u64,

    /// Sim-minute at which the world starts (07:00 on day 1)
    pub start_minutes: f64,

    /// Sim-minutes that pass per real second at speed 1.0
    pub sim_minutes_per_second: f32,

    // === ROOM NEEDS ===
    /// Routine gauge decay per sim-minute, shared by all rooms
    pub routine_decay_rate: f32,

    /// Initial cleanliness is drawn from this span for every room
    pub initial_cleanliness: Span,
    pub initial_tidiness: Span,
    pub initial_routine: Span,

    // === ATTENTION SCORING ===
    /// Bonus for a room the agent is standing in
    ///
    /// Fades linearly: `max(0, proximity_bonus - distance * proximity_falloff)`,
    /// so with 6.0 / 0.6 the bonus is gone at 10 units.
    pub proximity_bonus: f32,
    pub proximity_falloff: f32,

    // === DECISION POLICY ===
    /// Battery below this forces a rest
    pub rest_battery_threshold: f32,

    /// Energy below this forces a rest
    pub rest_energy_threshold: f32,

    /// Consecutive cleans before a forced patrol or rest
    pub consecutive_clean_limit: u32,

    /// After a cleaning streak, energy below this rests instead of patrolling
    pub streak_rest_energy: f32,

    /// Top room must score at least this to be cleaned
    pub clean_score_threshold: f32,

    /// Minimum energy needed to start cleaning
    pub clean_energy_min: f32,

    /// Boredom above this makes the agent wander (or watch TV)
    pub wander_boredom_threshold: f32,

    /// Boredom above this makes TV an option
    pub tv_boredom_threshold: f32,

    /// Chance of choosing TV when it is an option
    pub tv_chance: f64,

    /// Sim-minutes required between two TV sessions
    pub tv_min_gap_minutes: f64,

    /// Sim-minutes required between two patrols
    pub patrol_min_gap_minutes: f64,

    /// Energy below this rests instead of idling
    pub idle_rest_energy: f32,

    /// Room ranking adjustments per agent profile
    pub last_cleaned_penalty: f32,
    pub favorite_room_bonus: f32,
    pub preferred_room_bonus: f32,
    pub non_preferred_penalty: f32,

    // === COOLDOWNS (sim-minutes) ===
    pub first_decision_delay: Span,
    pub rest_cooldown: Span,
    pub clean_cooldown: Span,
    pub watch_tv_cooldown: Span,
    pub wander_cooldown: Span,
    pub patrol_cooldown: Span,
    pub idle_look_cooldown: Span,
    /// Re-check delay while a user or schedule task is active
    pub external_task_recheck: Span,
    /// Re-check delay while the agent is already busy
    pub busy_recheck: Span,
    /// Minimum time between two wander trips
    pub wander_gap_minutes: f64,

    // === BEHAVIOR EFFECTS ===
    pub clean_happiness_gain: f32,
    pub clean_boredom_relief: f32,
    pub wander_boredom_relief: f32,
    pub tv_boredom_relief: f32,
    pub tv_happiness_gain: f32,
    /// Chance a wander stays within the agent's preferred rooms
    pub wander_preferred_chance: f64,
    pub patrol_work_minutes: f32,
    pub wander_work_minutes: f32,
    pub tv_work_minutes: f32,

    // === DEFERRED EFFECTS ===
    /// TV switches itself off this long after a session started
    pub tv_auto_off_delay_minutes: f64,
    /// Follow-up thought lands this long after the work duration elapsed
    pub after_task_thought_delay_minutes: f64,
    /// Completed task records linger this long before being purged
    pub completed_task_linger_minutes: f64,

    // === OBSTACLES ===
    /// Robot body radius used for avoidance
    pub agent_radius: f32,
    /// Clearance margin required around task anchors
    pub anchor_margin: f32,
    /// Expanding-ring search: first radius, last radius, radius step
    pub clear_search_min_radius: f32,
    pub clear_search_max_radius: f32,
    pub clear_search_radius_step: f32,
    /// Samples per ring (20 = steps of PI/10)
    pub clear_search_angle_divisions: u32,
    /// Repulsion when already overlapping an obstacle
    pub avoidance_overlap_force: f32,
    /// Repulsion numerator for obstacles ahead: `scale / max(gap, min_gap)`
    pub avoidance_force_scale: f32,
    pub avoidance_min_gap: f32,
    /// Total repulsion is clamped to this magnitude
    pub avoidance_max_force: f32,

    // === AGENT NEED DRIFT (per sim-minute) ===
    pub energy_recovery_idle: f32,
    pub energy_drain_walking: f32,
    pub energy_drain_working: f32,
    pub energy_recovery_charging: f32,
    pub boredom_gain_idle: f32,
    pub boredom_relief_working: f32,
    pub social_decay: f32,
    /// Happiness eases toward 50 at this rate
    pub happiness_settle_rate: f32,
    /// Happiness lost per sim-minute while the thermostat is uncomfortable
    pub discomfort_happiness_drain: f32,
    /// Social lift when a user hands a robot a command
    pub user_command_social_boost: f32,

    // === BATTERY ===
    pub battery_drain_idle: f32,
    pub battery_drain_walking: f32,
    pub battery_drain_working: f32,
    pub battery_charge_rate: f32,
    pub charging_range: f32,
    pub full_charge_threshold: f32,
    pub low_battery_threshold: f32,
    /// Battery must recover this far above the low threshold before re-routing
    pub low_battery_hysteresis: f32,

    // === TASK RUNNER ===
    /// Walking speed in world units per sim-minute
    pub walk_speed: f32,
    pub arrival_distance: f32,
    /// Weight of the avoidance vector when blended with the desired heading
    pub avoidance_blend: f32,
    pub avoidance_look_ahead: f32,

    // === NARRATED THOUGHTS ===
    pub spontaneous_thought_gap: f64,
    pub spontaneous_thought_chance: f64,
    pub working_thought_gap: f64,
    pub working_thought_chance: f64,
    pub night_thought_gap: f64,
    pub philosophy_chance: f64,
    pub philosophy_limit: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_minutes: 7.0 * 60.0,
            sim_minutes_per_second: 1.0,

            routine_decay_rate: 0.035,
            initial_cleanliness: Span::new(78.0, 93.0),
            initial_tidiness: Span::new(76.0, 92.0),
            initial_routine: Span::new(70.0, 88.0),

            proximity_bonus: 6.0,
            proximity_falloff: 0.6,

            rest_battery_threshold: 20.0,
            rest_energy_threshold: 15.0,
            consecutive_clean_limit: 3,
            streak_rest_energy: 40.0,
            clean_score_threshold: 18.0,
            clean_energy_min: 25.0,
            wander_boredom_threshold: 55.0,
            tv_boredom_threshold: 65.0,
            tv_chance: 0.4,
            tv_min_gap_minutes: 60.0,
            patrol_min_gap_minutes: 40.0,
            idle_rest_energy: 35.0,
            last_cleaned_penalty: 10.0,
            favorite_room_bonus: 8.0,
            preferred_room_bonus: 5.0,
            non_preferred_penalty: 8.0,

            first_decision_delay: Span::new(2.0, 5.0),
            rest_cooldown: Span::new(25.0, 50.0),
            clean_cooldown: Span::new(10.0, 18.0),
            watch_tv_cooldown: Span::new(20.0, 30.0),
            wander_cooldown: Span::new(10.0, 18.0),
            patrol_cooldown: Span::new(15.0, 25.0),
            idle_look_cooldown: Span::new(20.0, 35.0),
            external_task_recheck: Span::new(8.0, 14.0),
            busy_recheck: Span::new(5.0, 10.0),
            wander_gap_minutes: 25.0,

            clean_happiness_gain: 3.0,
            clean_boredom_relief: 12.0,
            wander_boredom_relief: 8.0,
            tv_boredom_relief: 20.0,
            tv_happiness_gain: 5.0,
            wander_preferred_chance: 0.7,
            patrol_work_minutes: 10.0,
            wander_work_minutes: 4.0,
            tv_work_minutes: 20.0,

            tv_auto_off_delay_minutes: 30.0,
            after_task_thought_delay_minutes: 2.0,
            completed_task_linger_minutes: 2.0,

            agent_radius: 0.25,
            anchor_margin: 0.8,
            clear_search_min_radius: 0.5,
            clear_search_max_radius: 8.0,
            clear_search_radius_step: 0.4,
            clear_search_angle_divisions: 20,
            avoidance_overlap_force: 3.5,
            avoidance_force_scale: 1.5,
            avoidance_min_gap: 0.1,
            avoidance_max_force: 3.5,

            energy_recovery_idle: 0.04,
            energy_drain_walking: 0.06,
            energy_drain_working: 0.1,
            energy_recovery_charging: 0.4,
            boredom_gain_idle: 0.08,
            boredom_relief_working: 0.1,
            social_decay: 0.02,
            happiness_settle_rate: 0.01,
            discomfort_happiness_drain: 0.01,
            user_command_social_boost: 12.0,

            battery_drain_idle: 0.02,
            battery_drain_walking: 0.08,
            battery_drain_working: 0.12,
            battery_charge_rate: 1.5,
            charging_range: 2.0,
            full_charge_threshold: 95.0,
            low_battery_threshold: 15.0,
            low_battery_hysteresis: 10.0,

            walk_speed: 1.5,
            arrival_distance: 0.5,
            avoidance_blend: 0.5,
            avoidance_look_ahead: 1.0,

            spontaneous_thought_gap: 15.0,
            spontaneous_thought_chance: 0.008,
            working_thought_gap: 12.0,
            working_thought_chance: 0.01,
            night_thought_gap: 40.0,
            philosophy_chance: 0.05,
            philosophy_limit: 3,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let spans = [
            ("initial_cleanliness", self.initial_cleanliness),
            ("initial_tidiness", self.initial_tidiness),
            ("initial_routine", self.initial_routine),
            ("first_decision_delay", self.first_decision_delay),
            ("rest_cooldown", self.rest_cooldown),
            ("clean_cooldown", self.clean_cooldown),
            ("watch_tv_cooldown", self.watch_tv_cooldown),
            ("wander_cooldown", self.wander_cooldown),
            ("patrol_cooldown", self.patrol_cooldown),
            ("idle_look_cooldown", self.idle_look_cooldown),
            ("external_task_recheck", self.external_task_recheck),
            ("busy_recheck", self.busy_recheck),
        ];
        for (name, span) in spans {
            if !span.is_ordered() {
                return Err(SimError::Config(format!(
                    "{} has min ({}) > max ({})",
                    name, span.min, span.max
                )));
            }
            if span.min < 0.0 {
                return Err(SimError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.rest_energy_threshold >= self.idle_rest_energy {
            return Err(SimError::Config(format!(
                "rest_energy_threshold ({}) should be < idle_rest_energy ({})",
                self.rest_energy_threshold, self.idle_rest_energy
            )));
        }

        if self.wander_boredom_threshold > self.tv_boredom_threshold {
            return Err(SimError::Config(format!(
                "wander_boredom_threshold ({}) should be <= tv_boredom_threshold ({})",
                self.wander_boredom_threshold, self.tv_boredom_threshold
            )));
        }

        if self.consecutive_clean_limit == 0 {
            return Err(SimError::Config("consecutive_clean_limit must be at least 1".into()));
        }

        if self.routine_decay_rate < 0.0 {
            return Err(SimError::Config("routine_decay_rate must not be negative".into()));
        }

        if self.clear_search_radius_step <= 0.0
            || self.clear_search_angle_divisions == 0
            || self.clear_search_min_radius > self.clear_search_max_radius
        {
            return Err(SimError::Config("clear-point search bounds are degenerate".into()));
        }

        if self.avoidance_min_gap <= 0.0 || self.avoidance_max_force <= 0.0 {
            return Err(SimError::Config("avoidance limits must be positive".into()));
        }

        if self.walk_speed <= 0.0 {
            return Err(SimError::Config("walk_speed must be positive".into()));
        }

        if self.low_battery_threshold >= self.full_charge_threshold {
            return Err(SimError::Config(format!(
                "low_battery_threshold ({}) should be < full_charge_threshold ({})",
                self.low_battery_threshold, self.full_charge_threshold
            )));
        }

        for (name, p) in [
            ("tv_chance", self.tv_chance),
            ("wander_preferred_chance", self.wander_preferred_chance),
            ("spontaneous_thought_chance", self.spontaneous_thought_chance),
            ("working_thought_chance", self.working_thought_chance),
            ("philosophy_chance", self.philosophy_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::Config(format!("{} must be a probability, got {}", name, p)));
            }
        }

        Ok(())
    }
}
