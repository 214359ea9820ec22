//! Household device flags shared with the outer application

use serde::{Deserialize, Serialize};

use crate::core::types::AgentId;

/// Devices the simulation reads and toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceFlags {
    pub tv_on: bool,
    /// Agent that switched the television on, if it is on because of one
    pub tv_owner: Option<AgentId>,
    pub lights_on: bool,
    /// Thermostat target in degrees Fahrenheit
    pub thermostat: f32,
}

impl Default for DeviceFlags {
    fn default() -> Self {
        Self {
            tv_on: false,
            tv_owner: None,
            lights_on: true,
            thermostat: 72.0,
        }
    }
}

impl DeviceFlags {
    pub fn switch_tv_on(&mut self, agent: AgentId) {
        self.tv_on = true;
        self.tv_owner = Some(agent);
    }

    pub fn switch_tv_off(&mut self) {
        self.tv_on = false;
        self.tv_owner = None;
    }

    /// Lights on and the thermostat within the comfortable band
    pub fn is_comfortable(&self) -> bool {
        self.lights_on && (68.0..=76.0).contains(&self.thermostat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tv_toggle_tracks_owner() {
        let mut devices = DeviceFlags::default();
        devices.switch_tv_on(AgentId(2));
        assert!(devices.tv_on);
        assert_eq!(devices.tv_owner, Some(AgentId(2)));
        devices.switch_tv_off();
        assert!(!devices.tv_on);
        assert_eq!(devices.tv_owner, None);
    }

    #[test]
    fn test_comfort_band() {
        let mut devices = DeviceFlags::default();
        assert!(devices.is_comfortable());
        devices.thermostat = 60.0;
        assert!(!devices.is_comfortable());
    }

    #[test]
    fn test_dark_house_is_uncomfortable() {
        let mut devices = DeviceFlags::default();
        devices.lights_on = false;
        assert!(!devices.is_comfortable());
    }
}
