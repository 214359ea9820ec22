//! Internal needs that drive robot behavior and mood

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::clamp_percent;
use crate::entity::agent::MotionState;

/// Per-agent needs, each a gauge in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    /// 100 = fully energized, 0 = exhausted
    pub energy: f32,
    /// 100 = delighted, 0 = miserable
    pub happiness: f32,
    /// 100 = socially fulfilled, 0 = lonely
    pub social: f32,
    /// 0 = engaged, 100 = bored stiff
    pub boredom: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            energy: 85.0,
            happiness: 70.0,
            social: 50.0,
            boredom: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Energy,
    Happiness,
    Social,
    Boredom,
}

impl Needs {
    pub fn new(energy: f32, happiness: f32, social: f32, boredom: f32) -> Self {
        Self {
            energy: clamp_percent(energy),
            happiness: clamp_percent(happiness),
            social: clamp_percent(social),
            boredom: clamp_percent(boredom),
        }
    }

    pub fn get(&self, need: NeedType) -> f32 {
        match need {
            NeedType::Energy => self.energy,
            NeedType::Happiness => self.happiness,
            NeedType::Social => self.social,
            NeedType::Boredom => self.boredom,
        }
    }

    /// Set a gauge, clamped
    pub fn set(&mut self, need: NeedType, value: f32) {
        let value = clamp_percent(value);
        match need {
            NeedType::Energy => self.energy = value,
            NeedType::Happiness => self.happiness = value,
            NeedType::Social => self.social = value,
            NeedType::Boredom => self.boredom = value,
        }
    }

    /// Add a (possibly negative) delta to a gauge, clamped
    pub fn adjust(&mut self, need: NeedType, delta: f32) {
        self.set(need, self.get(need) + delta);
    }

    /// Drift needs over elapsed sim-minutes according to what the agent is doing
    pub fn drift(&mut self, minutes: f32, motion: MotionState, charging: bool, config: &SimulationConfig) {
        if minutes <= 0.0 {
            return;
        }

        let energy_rate = if charging {
            config.energy_recovery_charging
        } else {
            match motion {
                MotionState::Idle => config.energy_recovery_idle,
                MotionState::Walking => -config.energy_drain_walking,
                MotionState::Working => -config.energy_drain_working,
            }
        };
        self.adjust(NeedType::Energy, energy_rate * minutes);

        let boredom_rate = match motion {
            MotionState::Idle => config.boredom_gain_idle,
            MotionState::Walking => 0.0,
            MotionState::Working => -config.boredom_relief_working,
        };
        self.adjust(NeedType::Boredom, boredom_rate * minutes);

        self.adjust(NeedType::Social, -config.social_decay * minutes);

        // Happiness settles toward neutral without overshooting
        let gap = 50.0 - self.happiness;
        let step = (config.happiness_settle_rate * minutes).min(gap.abs());
        self.adjust(NeedType::Happiness, step.copysign(gap));
    }
}

/// Displayed emotional state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Content,
    Happy,
    Tired,
    Lonely,
    Bored,
    Focused,
    Curious,
}

/// Resting mood derived purely from needs
pub fn mood_from_needs(needs: &Needs) -> Mood {
    if needs.energy < 20.0 {
        return Mood::Tired;
    }
    if needs.social < 15.0 {
        return Mood::Lonely;
    }
    if needs.boredom > 75.0 {
        return Mood::Bored;
    }
    if needs.happiness > 70.0 && needs.energy > 50.0 {
        return Mood::Happy;
    }
    Mood::Content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_thresholds() {
        assert_eq!(mood_from_needs(&Needs::new(10.0, 90.0, 90.0, 0.0)), Mood::Tired);
        assert_eq!(mood_from_needs(&Needs::new(60.0, 90.0, 10.0, 0.0)), Mood::Lonely);
        assert_eq!(mood_from_needs(&Needs::new(60.0, 50.0, 50.0, 80.0)), Mood::Bored);
        assert_eq!(mood_from_needs(&Needs::new(60.0, 80.0, 50.0, 10.0)), Mood::Happy);
        assert_eq!(mood_from_needs(&Needs::new(40.0, 80.0, 50.0, 10.0)), Mood::Content);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut needs = Needs::default();
        needs.adjust(NeedType::Energy, 500.0);
        assert_eq!(needs.energy, 100.0);
        needs.adjust(NeedType::Boredom, -500.0);
        assert_eq!(needs.boredom, 0.0);
    }

    #[test]
    fn test_drift_working_tires_and_engages() {
        let config = SimulationConfig::default();
        let mut needs = Needs::default();
        let before = needs;
        needs.drift(60.0, MotionState::Working, false, &config);
        assert!(needs.energy < before.energy);
        assert!(needs.boredom < before.boredom);
        assert!(needs.social < before.social);
    }

    #[test]
    fn test_drift_idle_gets_bored() {
        let config = SimulationConfig::default();
        let mut needs = Needs::default();
        needs.drift(100.0, MotionState::Idle, false, &config);
        assert!(needs.boredom > Needs::default().boredom);
    }

    #[test]
    fn test_happiness_settles_without_overshoot() {
        let config = SimulationConfig::default();
        let mut needs = Needs::new(80.0, 50.5, 50.0, 10.0);
        needs.drift(1000.0, MotionState::Idle, false, &config);
        assert_eq!(needs.happiness, 50.0);
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let config = SimulationConfig::default();
        let mut needs = Needs::default();
        needs.drift(0.0, MotionState::Working, false, &config);
        assert_eq!(needs, Needs::default());
    }
}
