//! Recipe reference data
//!
//! Recipes, their bundles and steps, and the decoration rules for each
//! recipe. Loaded once per store and never mutated during a session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{
    BundleId, CookingAction, CookingType, DecoSourceType, DecoStepId, GridPosition, IngredientId,
    MenuType, PlateType, RecipeId,
};

/// One ingredient an INGREDIENT step asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequirement {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

/// A single preparation step of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Ingredient {
        ingredients: Vec<IngredientRequirement>,
    },
    Action {
        action: CookingAction,
        #[serde(default)]
        required_duration: Option<u32>,
    },
}

/// A recipe-level sub-preparation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleTemplate {
    pub id: BundleId,
    pub name: String,
    pub cooking_type: CookingType,
    #[serde(default)]
    pub is_main_dish: bool,
    #[serde(default)]
    pub plate_type: Option<PlateType>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl BundleTemplate {
    /// Required duration of the DEEP_FRY action, if the bundle has one
    pub fn fry_duration(&self) -> Option<u32> {
        self.action_duration(CookingAction::DeepFry)
    }

    pub fn action_duration(&self, wanted: CookingAction) -> Option<u32> {
        self.steps.iter().find_map(|step| match step {
            Step::Action {
                action,
                required_duration,
            } if *action == wanted => *required_duration,
            _ => None,
        })
    }
}

/// Reference to whatever a decoration step consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoSource {
    /// An always-available garnish, by deco ingredient id
    DecoItem(IngredientId),
    /// A staged ingredient, by inventory id
    SettingItem(IngredientId),
    /// A sibling bundle merged onto the plate
    Bundle(BundleId),
}

impl DecoSource {
    pub fn source_type(&self) -> DecoSourceType {
        match self {
            DecoSource::DecoItem(_) => DecoSourceType::DecoItem,
            DecoSource::SettingItem(_) => DecoSourceType::SettingItem,
            DecoSource::Bundle(_) => DecoSourceType::Bundle,
        }
    }
}

fn default_min_amount() -> f64 {
    1.0
}

/// One placement rule for decorating a main-dish plate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoStep {
    pub id: DecoStepId,
    pub source_type: DecoSourceType,
    #[serde(default)]
    pub deco_ingredient_id: Option<IngredientId>,
    #[serde(default)]
    pub inventory_id: Option<IngredientId>,
    #[serde(default)]
    pub source_bundle_id: Option<BundleId>,
    pub ingredient_name: String,
    /// Single required cell, or `None` when any cell is accepted
    #[serde(default)]
    pub grid_position: Option<GridPosition>,
    #[serde(default)]
    pub required_amount: Option<f64>,
    #[serde(default)]
    pub required_unit: Option<String>,
    #[serde(default = "default_min_amount")]
    pub min_amount: f64,
    #[serde(default)]
    pub layer_order: i32,
    #[serde(default)]
    pub display_color: String,
}

impl DecoStep {
    /// The source this step matches on, if its reference field is filled in
    pub fn source(&self) -> Option<DecoSource> {
        match self.source_type {
            DecoSourceType::DecoItem => self.deco_ingredient_id.map(DecoSource::DecoItem),
            DecoSourceType::SettingItem => self.inventory_id.map(DecoSource::SettingItem),
            DecoSourceType::Bundle => self.source_bundle_id.map(DecoSource::Bundle),
        }
    }

    /// Cumulative amount that completes the step
    pub fn target_amount(&self) -> f64 {
        self.required_amount.unwrap_or(self.min_amount)
    }

    /// Fixed steps are applied in one click with no quantity prompt
    pub fn is_fixed_amount(&self) -> bool {
        match self.required_amount {
            None => true,
            Some(required) => (required - self.min_amount).abs() < f64::EPSILON,
        }
    }
}

/// A menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub menu_type: MenuType,
    #[serde(default)]
    pub bundles: Vec<BundleTemplate>,
    #[serde(default)]
    pub deco_steps: Vec<DecoStep>,
}

impl Recipe {
    pub fn main_bundle(&self) -> Option<&BundleTemplate> {
        self.bundles.iter().find(|b| b.is_main_dish)
    }
}

/// A garnish that is always on hand in the decoration zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoIngredient {
    pub id: IngredientId,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// All recipes for one store, indexed for lookup
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    deco_ingredients: Vec<DecoIngredient>,
    recipe_index: HashMap<RecipeId, usize>,
    bundle_index: HashMap<BundleId, (usize, usize)>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>, deco_ingredients: Vec<DecoIngredient>) -> Self {
        let mut recipe_index = HashMap::new();
        let mut bundle_index = HashMap::new();
        for (ri, recipe) in recipes.iter().enumerate() {
            recipe_index.insert(recipe.id, ri);
            for (bi, bundle) in recipe.bundles.iter().enumerate() {
                bundle_index.insert(bundle.id, (ri, bi));
            }
        }
        Self {
            recipes,
            deco_ingredients,
            recipe_index,
            bundle_index,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipe_index.get(&id).map(|&i| &self.recipes[i])
    }

    pub fn bundle(&self, id: BundleId) -> Option<&BundleTemplate> {
        self.bundle_index
            .get(&id)
            .map(|&(ri, bi)| &self.recipes[ri].bundles[bi])
    }

    pub fn deco_steps(&self, recipe_id: RecipeId) -> &[DecoStep] {
        self.recipe(recipe_id)
            .map(|r| r.deco_steps.as_slice())
            .unwrap_or(&[])
    }

    /// Find the decoration rule in `recipe_id` that consumes `source`
    pub fn deco_step_for_ingredient(
        &self,
        recipe_id: RecipeId,
        source: DecoSource,
    ) -> Option<&DecoStep> {
        self.deco_steps(recipe_id)
            .iter()
            .find(|step| step.source() == Some(source))
    }

    pub fn deco_step(&self, recipe_id: RecipeId, step_id: DecoStepId) -> Option<&DecoStep> {
        self.deco_steps(recipe_id).iter().find(|s| s.id == step_id)
    }

    pub fn deco_ingredients(&self) -> &[DecoIngredient] {
        &self.deco_ingredients
    }

    pub fn deco_ingredient(&self, id: IngredientId) -> Option<&DecoIngredient> {
        self.deco_ingredients.iter().find(|d| d.id == id)
    }

    /// Fry timer default for a bundle: its DEEP_FRY duration if present
    pub fn fry_duration(&self, bundle_id: BundleId) -> Option<u32> {
        self.bundle(bundle_id).and_then(BundleTemplate::fry_duration)
    }
}
