//! Wok burners
//!
//! Standalone state machine for one burner. Temperature is advanced with
//! explicit elapsed time so the same code runs under a real-time loop or a
//! test harness.

use super::config::SimConfig;
use super::types::{CookingAction, InstanceId};

/// Burner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WokState {
    Idle,
    Cooking,
    /// Too hot; the decoration zone shows an alert but the food is still fine
    Overheating,
    /// Food ruined; must be washed before reuse
    Burned,
}

/// Transitions reported by [`Burner::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WokTransition {
    StartedOverheating,
    CooledDown,
    Burned,
    ActionFinished(CookingAction),
}

/// A cooking action currently running on the burner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveAction {
    pub action: CookingAction,
    pub remaining_secs: f32,
}

/// A burner with its wok
#[derive(Debug, Clone)]
pub struct Burner {
    pub burner_number: u32,
    pub state: WokState,
    pub temperature: f32,
    /// Instance cooking on this burner
    pub instance: Option<InstanceId>,
    /// Menu name of the assigned instance
    pub current_menu: Option<String>,
    pub active_action: Option<ActiveAction>,
    /// Seconds spent above the overheat threshold
    overheat_secs: f32,
}

impl Burner {
    pub fn new(burner_number: u32, ambient_temperature: f32) -> Self {
        Self {
            burner_number,
            state: WokState::Idle,
            temperature: ambient_temperature,
            instance: None,
            current_menu: None,
            active_action: None,
            overheat_secs: 0.0,
        }
    }

    pub fn is_free(&self) -> bool {
        self.instance.is_none() && self.state != WokState::Burned
    }

    /// Put an instance on the burner and start cooking
    pub(crate) fn assign(&mut self, instance: InstanceId, menu_name: &str) {
        self.instance = Some(instance);
        self.current_menu = Some(menu_name.to_string());
        self.state = WokState::Cooking;
        self.overheat_secs = 0.0;
    }

    /// Take the instance off; the wok keeps its heat and cools while idle
    pub(crate) fn release(&mut self) -> Option<InstanceId> {
        let instance = self.instance.take();
        self.current_menu = None;
        self.active_action = None;
        if self.state != WokState::Burned {
            self.state = WokState::Idle;
        }
        self.overheat_secs = 0.0;
        instance
    }

    /// Clear a burned wok back to a cold idle burner
    pub(crate) fn wash(&mut self, ambient_temperature: f32) -> Option<InstanceId> {
        let instance = self.instance.take();
        self.current_menu = None;
        self.active_action = None;
        self.state = WokState::Idle;
        self.temperature = ambient_temperature;
        self.overheat_secs = 0.0;
        instance
    }

    pub(crate) fn start_action(&mut self, action: CookingAction, secs: u32, config: &SimConfig) {
        if action == CookingAction::AddWater {
            self.temperature = (self.temperature - config.water_cooling).max(config.ambient_temperature);
        }
        self.active_action = Some(ActiveAction {
            action,
            remaining_secs: secs as f32,
        });
    }

    /// Advance the burner by `delta_secs`
    ///
    /// Applies at most one state transition per call.
    pub fn advance(&mut self, delta_secs: f32, config: &SimConfig) -> Option<WokTransition> {
        match self.state {
            WokState::Idle => {
                self.temperature =
                    (self.temperature - config.wok_cool_rate * delta_secs).max(config.ambient_temperature);
                None
            }
            WokState::Burned => None,
            WokState::Cooking | WokState::Overheating => {
                self.temperature += config.wok_heat_rate * delta_secs;

                if let Some(active) = &mut self.active_action {
                    active.remaining_secs -= delta_secs;
                    if active.remaining_secs <= 0.0 {
                        let finished = active.action;
                        self.active_action = None;
                        return Some(WokTransition::ActionFinished(finished));
                    }
                }

                let over = self.temperature >= config.overheat_threshold;
                match (self.state, over) {
                    (WokState::Cooking, true) => {
                        self.state = WokState::Overheating;
                        self.overheat_secs = 0.0;
                        Some(WokTransition::StartedOverheating)
                    }
                    (WokState::Overheating, false) => {
                        self.state = WokState::Cooking;
                        self.overheat_secs = 0.0;
                        Some(WokTransition::CooledDown)
                    }
                    (WokState::Overheating, true) => {
                        self.overheat_secs += delta_secs;
                        if self.overheat_secs >= config.burn_after_overheat_secs {
                            self.state = WokState::Burned;
                            self.active_action = None;
                            Some(WokTransition::Burned)
                        } else {
                            None
                        }
                    }
                    _ => None,
                }
            }
        }
    }
}
