//! Setting (staging) area
//!
//! Ingredient quantities pulled out of storage and not yet used up. Each
//! addition is its own item; repeated pulls of one ingredient do not merge.

use serde::{Deserialize, Serialize};

use super::error::KitchenError;
use super::types::{IngredientId, SettingItemId, AMOUNT_EPSILON};

/// Input for [`SettingArea::add`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSettingItem {
    pub ingredient_name: String,
    pub ingredient_master_id: IngredientId,
    pub inventory_id: IngredientId,
    pub amount: f64,
    pub unit: String,
}

/// A staged ingredient quantity
#[derive(Debug, Clone, PartialEq)]
pub struct SettingItem {
    pub id: SettingItemId,
    pub ingredient_name: String,
    pub ingredient_master_id: IngredientId,
    pub inventory_id: IngredientId,
    pub unit: String,
    /// Amount originally pulled out
    pub amount: f64,
    /// What is left; stays within `0..=amount`
    available_amount: f64,
}

impl SettingItem {
    pub fn available_amount(&self) -> f64 {
        self.available_amount
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingArea {
    items: Vec<SettingItem>,
}

impl SettingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, id: SettingItemId, item: NewSettingItem) -> Result<SettingItemId, KitchenError> {
        if item.amount.is_nan() || item.amount <= 0.0 {
            return Err(KitchenError::InvalidAmount(item.amount));
        }
        self.items.push(SettingItem {
            id,
            ingredient_name: item.ingredient_name,
            ingredient_master_id: item.ingredient_master_id,
            inventory_id: item.inventory_id,
            unit: item.unit,
            amount: item.amount,
            available_amount: item.amount,
        });
        Ok(id)
    }

    pub fn get(&self, id: SettingItemId) -> Option<&SettingItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[SettingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take `amount` from an item. The item stays (possibly at zero) until
    /// it is discarded.
    pub(crate) fn consume(&mut self, id: SettingItemId, amount: f64) -> Result<f64, KitchenError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(KitchenError::InvalidAmount(amount));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(KitchenError::UnknownSettingItem(id))?;
        if amount > item.available_amount + AMOUNT_EPSILON {
            return Err(KitchenError::InsufficientAmount {
                available: item.available_amount,
                requested: amount,
            });
        }
        item.available_amount = (item.available_amount - amount).max(0.0);
        Ok(item.available_amount)
    }

    /// Remove an item entirely
    pub(crate) fn discard(&mut self, id: SettingItemId) -> Option<SettingItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }
}
