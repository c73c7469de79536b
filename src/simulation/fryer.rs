//! Fryer baskets
//!
//! A basket is tied to at most one order. Ingredients can only go in while
//! the basket is assigned and out of the oil; once submerged, a countdown
//! runs and the basket burns if left in too long after it finishes.

use super::config::{clamp_fry_timer, SimConfig, FRY_TIMER_DEFAULT, FRY_TIMER_STEP};
use super::error::{IntakeError, KitchenError};
use super::types::{InstanceId, OrderId};

/// Basket status; `Empty` means no order is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasketStatus {
    Empty,
    Assigned,
    Burned,
}

/// Transitions reported by [`FryerBasket::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FryerTransition {
    /// Timer reached zero; the basket can be lifted
    Done,
    /// Left in the oil past the grace period
    Burned,
}

/// One fryer basket
#[derive(Debug, Clone)]
pub struct FryerBasket {
    pub basket_number: u32,
    pub order_id: Option<OrderId>,
    pub status: BasketStatus,
    pub is_submerged: bool,
    pub menu_name: Option<String>,
    pub instance: Option<InstanceId>,
    /// Countdown length in seconds
    pub timer_secs: u32,
    /// Seconds spent in the oil; lifting does not reset it
    pub fried_secs: f32,
    pub is_done: bool,
}

impl FryerBasket {
    pub fn new(basket_number: u32) -> Self {
        Self {
            basket_number,
            order_id: None,
            status: BasketStatus::Empty,
            is_submerged: false,
            menu_name: None,
            instance: None,
            timer_secs: FRY_TIMER_DEFAULT,
            fried_secs: 0.0,
            is_done: false,
        }
    }

    /// Whether ingredients may be added right now
    pub fn is_selectable(&self) -> bool {
        self.order_id.is_some() && self.status == BasketStatus::Assigned && !self.is_submerged
    }

    /// Same check as [`is_selectable`](Self::is_selectable) with the reason it fails
    pub fn check_intake(&self) -> Result<(), IntakeError> {
        if self.order_id.is_none() {
            return Err(IntakeError::NoOrder(self.basket_number));
        }
        if self.status != BasketStatus::Assigned {
            return Err(IntakeError::NotAssigned(self.basket_number));
        }
        if self.is_submerged {
            return Err(IntakeError::Submerged(self.basket_number));
        }
        Ok(())
    }

    pub fn seconds_left(&self) -> f32 {
        (self.timer_secs as f32 - self.fried_secs).max(0.0)
    }

    pub(crate) fn assign(&mut self, instance: InstanceId, order_id: OrderId, menu_name: &str, timer_secs: Option<u32>) {
        self.instance = Some(instance);
        self.order_id = Some(order_id);
        self.menu_name = Some(menu_name.to_string());
        self.status = BasketStatus::Assigned;
        self.is_submerged = false;
        self.timer_secs = clamp_fry_timer(timer_secs.unwrap_or(FRY_TIMER_DEFAULT));
        self.fried_secs = 0.0;
        self.is_done = false;
    }

    /// Detach the order and return to an empty basket
    pub(crate) fn release(&mut self) -> Option<InstanceId> {
        let instance = self.instance.take();
        *self = Self::new(self.basket_number);
        instance
    }

    pub(crate) fn set_timer(&mut self, secs: u32) {
        self.timer_secs = clamp_fry_timer(secs);
    }

    /// Move the timer by whole adjuster steps
    pub(crate) fn adjust_timer(&mut self, steps: i32) {
        let delta = i64::from(steps) * i64::from(FRY_TIMER_STEP);
        let secs = (i64::from(self.timer_secs) + delta).clamp(0, i64::from(u32::MAX));
        self.set_timer(secs as u32);
    }

    pub(crate) fn submerge(&mut self) -> Result<(), KitchenError> {
        match self.status {
            BasketStatus::Empty => Err(KitchenError::BasketEmpty(self.basket_number)),
            BasketStatus::Burned => Err(KitchenError::BasketBurned(self.basket_number)),
            BasketStatus::Assigned if self.is_submerged => {
                Err(KitchenError::AlreadySubmerged(self.basket_number))
            }
            BasketStatus::Assigned => {
                self.is_submerged = true;
                Ok(())
            }
        }
    }

    pub(crate) fn lift(&mut self) -> Result<(), KitchenError> {
        if !self.is_submerged {
            return Err(KitchenError::NotSubmerged(self.basket_number));
        }
        self.is_submerged = false;
        Ok(())
    }

    /// Advance the countdown by `delta_secs`
    ///
    /// Applies at most one transition per call.
    pub fn advance(&mut self, delta_secs: f32, config: &SimConfig) -> Option<FryerTransition> {
        if !self.is_submerged || self.status != BasketStatus::Assigned {
            return None;
        }
        self.fried_secs += delta_secs;

        let timer = self.timer_secs as f32;
        if !self.is_done {
            if self.fried_secs >= timer {
                self.is_done = true;
                return Some(FryerTransition::Done);
            }
        } else if self.fried_secs >= timer + config.fryer_grace_secs {
            self.status = BasketStatus::Burned;
            return Some(FryerTransition::Burned);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::{FRY_TIMER_MAX, FRY_TIMER_MIN};
    use crate::simulation::types::SimId;

    fn assigned_basket(timer: u32) -> FryerBasket {
        let mut basket = FryerBasket::new(1);
        basket.assign(InstanceId(SimId(4)), OrderId(SimId(2)), "돈까스", Some(timer));
        basket
    }

    #[test]
    fn empty_basket_is_not_selectable() {
        let basket = FryerBasket::new(1);
        assert!(!basket.is_selectable());
        assert_eq!(basket.check_intake(), Err(IntakeError::NoOrder(1)));
    }

    #[test]
    fn submerged_basket_rejects_intake() {
        let mut basket = assigned_basket(30);
        assert!(basket.is_selectable());
        basket.submerge().unwrap();
        assert!(!basket.is_selectable());
        assert_eq!(basket.check_intake(), Err(IntakeError::Submerged(1)));
    }

    #[test]
    fn timer_finishes_then_burns_after_grace() {
        let config = SimConfig::default();
        let mut basket = assigned_basket(30);
        basket.submerge().unwrap();

        let mut transitions = Vec::new();
        for _ in 0..70 {
            if let Some(t) = basket.advance(1.0, &config) {
                transitions.push(t);
            }
        }
        assert_eq!(transitions, vec![FryerTransition::Done, FryerTransition::Burned]);
        assert_eq!(basket.status, BasketStatus::Burned);
    }

    #[test]
    fn lifting_keeps_accrued_time() {
        let config = SimConfig::default();
        let mut basket = assigned_basket(60);
        basket.submerge().unwrap();
        basket.advance(20.0, &config);
        basket.lift().unwrap();
        assert_eq!(basket.advance(20.0, &config), None);
        assert_eq!(basket.fried_secs, 20.0);
        assert_eq!(basket.seconds_left(), 40.0);
    }

    #[test]
    fn timer_adjustments_stay_in_range() {
        let mut basket = assigned_basket(180);
        basket.adjust_timer(2);
        assert_eq!(basket.timer_secs, 210);
        basket.adjust_timer(-100);
        assert_eq!(basket.timer_secs, FRY_TIMER_MIN);
        basket.adjust_timer(100);
        assert_eq!(basket.timer_secs, FRY_TIMER_MAX);
    }
}
