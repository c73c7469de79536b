//! Rejection reasons for kitchen actions
//!
//! Every variant is recoverable: the action made no change and the trainee
//! can retry or pick another target. The `Display` text is what the UI shows.

use super::game_state::MistakeKind;
use super::types::{GridPosition, InstanceId, IngredientId, RecipeId, SettingItemId};

/// General action failures (orders, equipment, staging)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KitchenError {
    #[error("recipe {0:?} does not exist")]
    UnknownRecipe(RecipeId),

    #[error("no recipes are loaded")]
    NoRecipes,

    #[error("bundle {0} does not exist")]
    UnknownInstance(InstanceId),

    #[error("{0} is on a burner, in a basket or plated")]
    NotOnCounter(InstanceId),

    #[error("{0} is burned and cannot be plated")]
    InstanceBurned(InstanceId),

    #[error("burner {0} does not exist")]
    UnknownBurner(u32),

    #[error("fryer basket {0} does not exist")]
    UnknownBasket(u32),

    #[error("burner {0} is already cooking something")]
    BurnerOccupied(u32),

    #[error("burner {0} is burned and must be washed first")]
    BurnerBurned(u32),

    #[error("burner {0} has nothing on it")]
    BurnerEmpty(u32),

    #[error("burner {0} is not burned")]
    BurnerNotBurned(u32),

    #[error("fryer basket {0} already holds an order")]
    BasketOccupied(u32),

    #[error("fryer basket {0} is burned and must be cleared first")]
    BasketBurned(u32),

    #[error("fryer basket {0} is not burned")]
    BasketNotBurned(u32),

    #[error("fryer basket {0} is already in the oil")]
    AlreadySubmerged(u32),

    #[error("fryer basket {0} is not in the oil")]
    NotSubmerged(u32),

    #[error("fryer basket {0} has no order")]
    BasketEmpty(u32),

    #[error("setting item {0:?} does not exist")]
    UnknownSettingItem(SettingItemId),

    #[error("inventory record {0:?} does not exist")]
    UnknownInventory(IngredientId),

    #[error("only {available} left, cannot take {requested}")]
    InsufficientAmount { available: f64, requested: f64 },

    #[error("amount must be positive, got {0}")]
    InvalidAmount(f64),
}

/// Why an ingredient could not be put into a fryer basket
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("fryer basket {0} does not exist")]
    UnknownBasket(u32),

    #[error("fryer basket {0} has no order assigned")]
    NoOrder(u32),

    #[error("fryer basket {0} is not accepting ingredients")]
    NotAssigned(u32),

    #[error("fryer basket {0} is in the oil; lift it before adding ingredients")]
    Submerged(u32),

    #[error(transparent)]
    Kitchen(#[from] KitchenError),
}

/// Why a decoration placement was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecoError {
    #[error("plate {0} does not exist")]
    PlateNotFound(InstanceId),

    #[error("{0} is not on a plate yet")]
    NotPlated(InstanceId),

    #[error("plate {0} is not a main dish")]
    NotMainDish(InstanceId),

    #[error("no ingredient is selected")]
    NoSelection,

    #[error("ingredient {0:?} is not available")]
    UnknownIngredient(IngredientId),

    #[error("setting item {0:?} does not exist")]
    UnknownSettingItem(SettingItemId),

    #[error("{name} is not used to decorate this dish")]
    NoMatchingStep { name: String },

    #[error("{name} belongs in cell {expected}, not cell {actual}")]
    PositionMismatch {
        name: String,
        expected: GridPosition,
        actual: GridPosition,
    },

    #[error("{pending} has to go on before {name}")]
    OutOfOrder { name: String, pending: String },

    #[error("{name} is already complete")]
    StepAlreadyComplete { name: String },

    #[error("{name} only needs {remaining} more, not {requested}")]
    ExceedsRemaining {
        name: String,
        remaining: f64,
        requested: f64,
    },

    #[error("only {available} left, cannot place {requested}")]
    InsufficientSource { available: f64, requested: f64 },

    #[error("amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl DecoError {
    pub fn is_position_error(&self) -> bool {
        matches!(self, DecoError::PositionMismatch { .. })
    }

    pub fn is_order_error(&self) -> bool {
        matches!(self, DecoError::OutOfOrder { .. })
    }

    /// Mistake class this rejection counts as, if any
    pub fn mistake_kind(&self) -> Option<MistakeKind> {
        match self {
            DecoError::NoMatchingStep { .. } => Some(MistakeKind::UnmatchedIngredient),
            DecoError::PositionMismatch { .. } => Some(MistakeKind::WrongPosition),
            DecoError::OutOfOrder { .. } => Some(MistakeKind::OutOfOrder),
            _ => None,
        }
    }
}

/// Why a bundle could not be merged onto a main plate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("plate {0} does not exist")]
    TargetNotFound(InstanceId),

    #[error("bundle {0} does not exist")]
    SourceNotFound(InstanceId),

    #[error("a plate cannot be merged into itself")]
    SelfMerge,

    #[error("{0} is not on a plate yet")]
    TargetNotPlated(InstanceId),

    #[error("plate {0} is not a main dish")]
    TargetNotMainDish(InstanceId),

    #[error("{0} is a main dish and cannot be merged")]
    SourceIsMainDish(InstanceId),

    #[error("{0} is still on the equipment; stage or plate it first")]
    SourceNotOffHeat(InstanceId),

    #[error("{source_menu} does not belong on {target_menu}")]
    RecipeMismatch {
        source_menu: String,
        target_menu: String,
    },

    #[error("{name} is not part of this dish's decoration")]
    NoMatchingStep { name: String },

    #[error("{name} is already complete")]
    AlreadyComplete { name: String },

    #[error("only {available} left, cannot merge {requested}")]
    InsufficientAmount { available: f64, requested: f64 },

    #[error("{name} only needs {remaining} more, not {requested}")]
    ExceedsRemaining {
        name: String,
        remaining: f64,
        requested: f64,
    },

    #[error("amount must be positive, got {0}")]
    InvalidAmount(f64),
}
