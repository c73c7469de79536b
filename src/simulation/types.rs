//! Core types for the kitchen simulation
//!
//! Identifiers, enums and small value types shared by every other module.
//! Nothing in here depends on a rendering layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for runtime simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimId(pub usize);

/// A wrapper type for bundle instance IDs (also used as the plate ID once plated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub SimId);

/// A wrapper type for order IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub SimId);

/// A wrapper type for staged setting item IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingItemId(pub SimId);

/// Recipe ID as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

/// Recipe-level bundle template ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(pub u64);

/// Decoration step ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecoStepId(pub u64);

/// Ingredient ID: deco ingredient id, inventory id, or ingredient master id
/// depending on where it appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 .0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order-{}", self.0 .0)
    }
}

/// Menu category of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuType {
    Hot,
    Cold,
    Mixed,
    Frying,
}

/// How a bundle is prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingType {
    Hot,
    Cold,
    Microwave,
    Frying,
}

/// Named cooking actions an ACTION step can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingAction {
    StirFry,
    AddWater,
    Boil,
    DeepFry,
    Microwave,
    Flip,
}

/// Where a decoration step takes its ingredient from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecoSourceType {
    DecoItem,
    SettingItem,
    Bundle,
}

/// Difficulty tier chosen by the trainee at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "intermediate" | "normal" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Plate shape used when a bundle is plated (e.g. "A", "BOWL")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateType(pub String);

impl PlateType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Default for PlateType {
    fn default() -> Self {
        Self("DEFAULT".to_string())
    }
}

/// A cell on the 3x3 plating grid, numbered 1..=9 row by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridPosition(u8);

impl GridPosition {
    /// Center cell, used for merges into steps without a fixed cell
    pub const CENTER: GridPosition = GridPosition(5);

    pub fn new(cell: u8) -> Option<Self> {
        (1..=GRID_CELLS as u8).contains(&cell).then_some(Self(cell))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into a plate's cell array
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for GridPosition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GridPosition::new(value).ok_or_else(|| format!("grid position {value} is outside 1..=9"))
    }
}

impl From<GridPosition> for u8 {
    fn from(value: GridPosition) -> Self {
        value.0
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of cells on a plate
pub const GRID_CELLS: usize = 9;

/// Amount comparisons tolerate float noise from repeated partial merges
pub const AMOUNT_EPSILON: f64 = 1e-9;
