//! Kitchen layout records
//!
//! Produced by the layout editor; the simulation only reads the equipment
//! list to decide how many burners and fryer baskets exist.

use serde::{Deserialize, Serialize};

/// Default number of baskets a fryer has when its config does not say
pub const DEFAULT_BASKETS_PER_FRYER: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentKind {
    Burner,
    Fryer,
    DecoZone,
    Storage,
    Microwave,
    Sink,
}

/// Per-kind settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(default)]
    pub burner_count: Option<u32>,
    #[serde(default)]
    pub basket_count: Option<u32>,
}

fn one() -> u32 {
    1
}

/// One piece of equipment placed on the layout grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub kind: EquipmentKind,
    pub x: u32,
    pub y: u32,
    #[serde(default = "one")]
    pub width: u32,
    #[serde(default = "one")]
    pub height: u32,
    #[serde(default)]
    pub config: EquipmentConfig,
    /// Storage locations reachable from this equipment
    #[serde(default)]
    pub storage_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenLayout {
    pub grid_width: u32,
    pub grid_height: u32,
    #[serde(default)]
    pub equipment: Vec<EquipmentSpec>,
}

impl KitchenLayout {
    /// Total burners across all burner equipment
    pub fn burner_count(&self) -> u32 {
        self.equipment
            .iter()
            .filter(|e| e.kind == EquipmentKind::Burner)
            .map(|e| e.config.burner_count.unwrap_or(1))
            .sum()
    }

    /// Total baskets across all fryers
    pub fn basket_count(&self) -> u32 {
        self.equipment
            .iter()
            .filter(|e| e.kind == EquipmentKind::Fryer)
            .map(|e| e.config.basket_count.unwrap_or(DEFAULT_BASKETS_PER_FRYER))
            .sum()
    }

    /// Equipment that does not fit inside the grid
    pub fn out_of_bounds(&self) -> Vec<&EquipmentSpec> {
        self.equipment
            .iter()
            .filter(|e| e.x + e.width > self.grid_width || e.y + e.height > self.grid_height)
            .collect()
    }
}
