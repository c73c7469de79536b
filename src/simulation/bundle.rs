//! Runtime bundle instances
//!
//! A [`BundleInstance`] is one serving being produced for one order. Its
//! position in the kitchen is a single [`Location`] value, so an instance can
//! never be in two places at once.

use super::plating::Plating;
use super::types::{
    BundleId, CookingAction, IngredientId, InstanceId, OrderId, RecipeId, AMOUNT_EPSILON,
};

/// Where a bundle instance currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    NotAssigned,
    Burner(u32),
    FryerBasket(u32),
    Staged,
    Plated,
}

/// Destinations accepted by `move_bundle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    NotAssigned,
    Burner(u32),
    FryerBasket(u32),
    Staged,
}

impl From<Destination> for Location {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::NotAssigned => Location::NotAssigned,
            Destination::Burner(n) => Location::Burner(n),
            Destination::FryerBasket(n) => Location::FryerBasket(n),
            Destination::Staged => Location::Staged,
        }
    }
}

/// An ingredient actually put into the bundle
#[derive(Debug, Clone, PartialEq)]
pub struct AddedIngredient {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// A bundle being cooked for a specific order
#[derive(Debug, Clone)]
pub struct BundleInstance {
    pub id: InstanceId,
    pub order_id: OrderId,
    pub recipe_id: RecipeId,
    pub bundle_id: BundleId,
    pub menu_name: String,
    pub bundle_name: String,
    pub is_main_dish: bool,
    pub location: Location,
    pub ingredients: Vec<AddedIngredient>,
    /// Cooking actions performed so far, in order
    pub actions: Vec<CookingAction>,
    /// Set when the food was ruined on a wok or in the fryer
    pub is_burned: bool,
    /// Present once the bundle has been put on a plate
    pub plating: Option<Plating>,
    /// Portion already merged onto other plates
    merged_out: f64,
}

impl BundleInstance {
    pub fn new(
        id: InstanceId,
        order_id: OrderId,
        recipe_id: RecipeId,
        bundle_id: BundleId,
        menu_name: String,
        bundle_name: String,
        is_main_dish: bool,
    ) -> Self {
        Self {
            id,
            order_id,
            recipe_id,
            bundle_id,
            menu_name,
            bundle_name,
            is_main_dish,
            location: Location::NotAssigned,
            ingredients: Vec::new(),
            actions: Vec::new(),
            is_burned: false,
            plating: None,
            merged_out: 0.0,
        }
    }

    /// Total portion this bundle represents: the sum of its ingredients,
    /// or a single serving when nothing was measured in
    pub fn total_amount(&self) -> f64 {
        let sum: f64 = self.ingredients.iter().map(|i| i.amount).sum();
        if sum > 0.0 {
            sum
        } else {
            1.0
        }
    }

    /// Portion still available for merging, never negative
    pub fn available_amount(&self) -> f64 {
        (self.total_amount() - self.merged_out).max(0.0)
    }

    /// Take `amount` out for a merge
    /// Returns true when the bundle is now used up
    pub(crate) fn consume(&mut self, amount: f64) -> bool {
        self.merged_out = (self.merged_out + amount).min(self.total_amount());
        self.available_amount() <= AMOUNT_EPSILON
    }

    pub fn add_ingredient(&mut self, ingredient: AddedIngredient) {
        self.ingredients.push(ingredient);
    }

    /// Drop everything that was put in (ruined food)
    pub(crate) fn discard_contents(&mut self) {
        self.ingredients.clear();
        self.actions.clear();
        self.is_burned = false;
        self.merged_out = 0.0;
    }

    pub fn is_plated(&self) -> bool {
        self.location == Location::Plated
    }

    pub fn is_main_plate(&self) -> bool {
        self.is_main_dish && self.is_plated()
    }

    /// Off the equipment and ready to be portioned onto a main plate
    pub fn is_off_heat(&self) -> bool {
        matches!(self.location, Location::Staged | Location::Plated)
    }
}
