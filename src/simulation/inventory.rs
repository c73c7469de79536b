//! Ingredient master data and per-location stock

use serde::{Deserialize, Serialize};

use super::error::KitchenError;
use super::setting::NewSettingItem;
use super::types::{IngredientId, AMOUNT_EPSILON};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMaster {
    pub id: IngredientId,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub color: String,
}

/// Stock of one ingredient at one storage location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub inventory_id: IngredientId,
    pub ingredient_id: IngredientId,
    pub location: String,
    pub stock: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub masters: Vec<IngredientMaster>,
    #[serde(default)]
    pub stock: Vec<StockRecord>,
}

impl Inventory {
    pub fn master(&self, id: IngredientId) -> Option<&IngredientMaster> {
        self.masters.iter().find(|m| m.id == id)
    }

    pub fn record(&self, inventory_id: IngredientId) -> Option<&StockRecord> {
        self.stock.iter().find(|s| s.inventory_id == inventory_id)
    }

    /// Records kept at `location`
    pub fn at_location<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a StockRecord> + 'a {
        self.stock.iter().filter(move |s| s.location == location)
    }

    /// Take `amount` out of stock and describe it as a setting item
    pub(crate) fn take(&mut self, inventory_id: IngredientId, amount: f64) -> Result<NewSettingItem, KitchenError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(KitchenError::InvalidAmount(amount));
        }
        let index = self
            .stock
            .iter()
            .position(|s| s.inventory_id == inventory_id)
            .ok_or(KitchenError::UnknownInventory(inventory_id))?;
        let record = &self.stock[index];
        if amount > record.stock + AMOUNT_EPSILON {
            return Err(KitchenError::InsufficientAmount {
                available: record.stock,
                requested: amount,
            });
        }
        let (name, unit) = match self.master(record.ingredient_id) {
            Some(master) => (master.name.clone(), master.unit.clone()),
            None => (format!("ingredient {}", record.ingredient_id.0), String::new()),
        };
        let ingredient_id = record.ingredient_id;

        let record = &mut self.stock[index];
        record.stock = (record.stock - amount).max(0.0);

        Ok(NewSettingItem {
            ingredient_name: name,
            ingredient_master_id: ingredient_id,
            inventory_id,
            amount,
            unit,
        })
    }
}
