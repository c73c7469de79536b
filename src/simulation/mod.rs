//! Standalone kitchen simulation module
//!
//! This module contains the core of the kitchen training simulator: bundle
//! instances, wok and fryer state machines, the plating rule engine and the
//! setting area. It runs without any UI and can be driven from tests or the
//! headless binary.

mod backend;
mod bundle;
mod config;
mod decorate;
mod error;
mod fryer;
mod game_state;
mod inventory;
mod layout;
mod plating;
mod recipe;
mod setting;
mod types;
mod wok;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use backend::{JsonBackend, KitchenBackend, Store, StoreData, User};
#[allow(unused_imports)]
pub use bundle::{AddedIngredient, BundleInstance, Destination, Location};
#[allow(unused_imports)]
pub use config::{
    clamp_fry_timer, SimConfig, FRY_TIMER_DEFAULT, FRY_TIMER_MAX, FRY_TIMER_MIN, FRY_TIMER_STEP,
};
#[allow(unused_imports)]
pub use decorate::{DecoApplied, DecoIngredientRef, MergeOutcome, QuantityPrompt};
#[allow(unused_imports)]
pub use error::{DecoError, IntakeError, KitchenError, MergeError};
#[allow(unused_imports)]
pub use fryer::{BasketStatus, FryerBasket, FryerTransition};
#[allow(unused_imports)]
pub use game_state::{DefaultPenaltyPolicy, GameState, MistakeKind, PenaltyPolicy, ScoreRecord};
#[allow(unused_imports)]
pub use inventory::{IngredientMaster, Inventory, StockRecord};
#[allow(unused_imports)]
pub use layout::{EquipmentConfig, EquipmentKind, EquipmentSpec, KitchenLayout, DEFAULT_BASKETS_PER_FRYER};
#[allow(unused_imports)]
pub use plating::{AppliedDeco, Cell, Layer, Plating};
#[allow(unused_imports)]
pub use recipe::{
    BundleTemplate, DecoIngredient, DecoSource, DecoStep, IngredientRequirement, Recipe, RecipeBook,
    Step,
};
#[allow(unused_imports)]
pub use setting::{NewSettingItem, SettingArea, SettingItem};
#[allow(unused_imports)]
pub use types::{
    BundleId, CookingAction, CookingType, DecoSourceType, DecoStepId, Difficulty, GridPosition,
    IngredientId, InstanceId, MenuType, OrderId, PlateType, RecipeId, SettingItemId, SimId,
    AMOUNT_EPSILON, GRID_CELLS,
};
#[allow(unused_imports)]
pub use wok::{ActiveAction, Burner, WokState, WokTransition};
pub use world::{
    DecoSelection, IngredientSource, KitchenEvent, KitchenWorld, SelectedDecoIngredient, Selection,
};
