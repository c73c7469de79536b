//! Main simulation world that ties everything together
//!
//! [`KitchenWorld`] owns every piece of session state: equipment, bundle
//! instances, the setting area, selections and scoring. All mutation goes
//! through its methods; each method either completes or leaves the world
//! unchanged.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

use super::backend::KitchenBackend;
use super::bundle::{AddedIngredient, BundleInstance, Destination, Location};
use super::config::SimConfig;
use super::error::{IntakeError, KitchenError};
use super::fryer::{BasketStatus, FryerBasket, FryerTransition};
use super::game_state::{DefaultPenaltyPolicy, GameState, MistakeKind, PenaltyPolicy};
use super::inventory::Inventory;
use super::layout::KitchenLayout;
use super::plating::Plating;
use super::recipe::{DecoSource, DecoStep, RecipeBook};
use super::setting::{NewSettingItem, SettingArea};
use super::types::{
    CookingAction, Difficulty, IngredientId, InstanceId, OrderId, PlateType, RecipeId,
    SettingItemId, SimId,
};
use super::wok::{Burner, WokState, WokTransition};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitchenEvent {
    Wok(u32, WokTransition),
    Fryer(u32, FryerTransition),
}

/// Where an ingredient for a wok or basket comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientSource {
    /// A staged setting item
    Setting(SettingItemId),
    /// Straight out of storage, by inventory id
    Inventory(IngredientId),
}

/// What the trainee is holding in the decoration zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoSelection {
    DecoItem(IngredientId),
    SettingItem(SettingItemId),
    /// A staged or side-plated bundle to merge
    Bundle(InstanceId),
}

/// The currently held decoration ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedDecoIngredient {
    pub source: DecoSelection,
    /// `None` means unlimited (always-available garnish)
    pub remaining_amount: Option<f64>,
}

/// Transient UI selections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub deco_ingredient: Option<SelectedDecoIngredient>,
    /// Side plate chosen as merge source while in merge mode
    pub merge_source: Option<InstanceId>,
    pub burner: Option<u32>,
    pub basket: Option<u32>,
}

/// The main simulation world
pub struct KitchenWorld {
    /// Recipe reference data for the store
    pub recipes: RecipeBook,

    pub config: SimConfig,

    /// Burners by number
    pub(crate) burners: BTreeMap<u32, Burner>,

    /// Fryer baskets by number
    pub(crate) baskets: BTreeMap<u32, FryerBasket>,

    /// Every active bundle instance
    pub(crate) instances: HashMap<InstanceId, BundleInstance>,

    /// Staged ingredients
    pub(crate) setting: SettingArea,

    /// Storage stock
    pub(crate) inventory: Inventory,

    pub selection: Selection,

    pub game_state: GameState,

    penalty_policy: Box<dyn PenaltyPolicy>,

    /// Next ID to assign
    next_id: usize,

    /// Simulation time
    pub time: f32,

    /// Optional seeded RNG for reproducible order streams
    rng: Option<StdRng>,
}

impl KitchenWorld {
    pub fn new(recipes: RecipeBook, layout: &KitchenLayout, config: SimConfig) -> Self {
        let burners = (1..=layout.burner_count())
            .map(|n| (n, Burner::new(n, config.ambient_temperature)))
            .collect();
        let baskets = (1..=layout.basket_count())
            .map(|n| (n, FryerBasket::new(n)))
            .collect();

        for spec in layout.out_of_bounds() {
            warn!("{:?} at ({}, {}) does not fit the layout grid", spec.kind, spec.x, spec.y);
        }

        Self {
            recipes,
            config,
            burners,
            baskets,
            instances: HashMap::new(),
            setting: SettingArea::new(),
            inventory: Inventory::default(),
            selection: Selection::default(),
            game_state: GameState::default(),
            penalty_policy: Box::new(DefaultPenaltyPolicy),
            next_id: 0,
            time: 0.0,
            rng: None,
        }
    }

    /// Use a seeded RNG so `accept_random_order` is reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.game_state.difficulty = difficulty;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_penalty_policy(mut self, policy: Box<dyn PenaltyPolicy>) -> Self {
        self.penalty_policy = policy;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.game_state.session_id = session_id.into();
        self
    }

    /// Build a world from everything the backend holds for `store_id`
    pub fn from_backend(backend: &dyn KitchenBackend, store_id: u64, config: SimConfig) -> Result<Self> {
        let recipes = backend
            .fetch_recipe_book(store_id)
            .context("Failed to fetch recipes")?;
        let layout = backend
            .fetch_layout(store_id)
            .context("Failed to fetch kitchen layout")?;
        let inventory = backend
            .fetch_inventory(store_id)
            .context("Failed to fetch inventory")?;
        Ok(Self::new(recipes, &layout, config).with_inventory(inventory))
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Charge a mistake through the penalty policy
    pub(crate) fn charge_mistake(&mut self, kind: MistakeKind) -> u32 {
        let penalty = self.game_state.record_mistake(
            kind,
            self.penalty_policy.as_ref(),
            self.config.score_per_mistake,
        );
        if penalty == 0 {
            info!("Warning recorded: {:?}", kind);
        } else {
            info!("Mistake recorded: {:?} (+{})", kind, penalty);
        }
        penalty
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Accept an order: one instance per bundle of the recipe, all unassigned
    pub fn accept_order(&mut self, recipe_id: RecipeId) -> Result<(OrderId, Vec<InstanceId>), KitchenError> {
        let recipe = self
            .recipes
            .recipe(recipe_id)
            .ok_or(KitchenError::UnknownRecipe(recipe_id))?;
        let templates: Vec<_> = recipe
            .bundles
            .iter()
            .map(|b| (b.id, b.name.clone(), b.is_main_dish))
            .collect();
        let menu_name = recipe.name.clone();

        let order_id = OrderId(self.next_sim_id());
        let mut created = Vec::with_capacity(templates.len());
        for (bundle_id, bundle_name, is_main_dish) in templates {
            let id = InstanceId(self.next_sim_id());
            let instance = BundleInstance::new(
                id,
                order_id,
                recipe_id,
                bundle_id,
                menu_name.clone(),
                bundle_name,
                is_main_dish,
            );
            self.instances.insert(id, instance);
            created.push(id);
        }
        info!("Accepted {} for {} ({} bundles)", order_id, menu_name, created.len());
        Ok((order_id, created))
    }

    /// Accept an order for a randomly chosen recipe
    pub fn accept_random_order(&mut self) -> Result<(OrderId, Vec<InstanceId>), KitchenError> {
        let ids: Vec<RecipeId> = self.recipes.recipes().iter().map(|r| r.id).collect();
        let chosen = match &mut self.rng {
            Some(rng) => ids.choose(rng).copied(),
            None => ids.choose(&mut rand::rng()).copied(),
        };
        let recipe_id = chosen.ok_or(KitchenError::NoRecipes)?;
        self.accept_order(recipe_id)
    }

    // ------------------------------------------------------------------
    // Moving instances
    // ------------------------------------------------------------------

    /// Relocate an instance to exactly one destination
    ///
    /// Unknown instances are ignored. Returns true when the instance ends up
    /// at `destination`; false when nothing changed.
    pub fn move_bundle(&mut self, instance_id: InstanceId, destination: Destination) -> bool {
        let Some(instance) = self.instances.get(&instance_id) else {
            debug!("move_bundle: {} does not exist, ignoring", instance_id);
            return false;
        };
        let current = instance.location;
        let target = Location::from(destination);
        if current == target {
            return true;
        }

        if let Location::FryerBasket(n) = current {
            if self.baskets.get(&n).is_some_and(|b| b.is_submerged) {
                debug!("move_bundle: basket {} is in the oil, lift it first", n);
                return false;
            }
        }
        if let Some(err) = self.burned_equipment(current) {
            debug!("move_bundle: {}", err);
            return false;
        }

        let available = match destination {
            Destination::Burner(n) => self.burners.get(&n).is_some_and(Burner::is_free),
            Destination::FryerBasket(n) => self
                .baskets
                .get(&n)
                .is_some_and(|b| b.status == BasketStatus::Empty && b.instance.is_none()),
            Destination::NotAssigned | Destination::Staged => true,
        };
        if !available {
            debug!("move_bundle: {:?} is not available for {}", destination, instance_id);
            return false;
        }

        self.detach(instance_id, current);
        self.attach(instance_id, target);
        debug!("Moved {} from {:?} to {:?}", instance_id, current, target);
        true
    }

    /// Send an instance to the setting area
    pub fn stage_bundle(&mut self, instance_id: InstanceId) -> bool {
        self.move_bundle(instance_id, Destination::Staged)
    }

    /// Burned equipment only gives its instance up through a wash or clear
    fn burned_equipment(&self, location: Location) -> Option<KitchenError> {
        match location {
            Location::Burner(n) if self.burners.get(&n).is_some_and(|b| b.state == WokState::Burned) => {
                Some(KitchenError::BurnerBurned(n))
            }
            Location::FryerBasket(n)
                if self.baskets.get(&n).is_some_and(|b| b.status == BasketStatus::Burned) =>
            {
                Some(KitchenError::BasketBurned(n))
            }
            _ => None,
        }
    }

    /// Clear any equipment reference held for the instance at `location`
    fn detach(&mut self, instance_id: InstanceId, location: Location) {
        match location {
            Location::Burner(n) => {
                if let Some(burner) = self.burners.get_mut(&n) {
                    if burner.instance == Some(instance_id) {
                        burner.release();
                    }
                }
            }
            Location::FryerBasket(n) => {
                if let Some(basket) = self.baskets.get_mut(&n) {
                    if basket.instance == Some(instance_id) {
                        basket.release();
                    }
                }
            }
            Location::NotAssigned | Location::Staged | Location::Plated => {}
        }
    }

    fn attach(&mut self, instance_id: InstanceId, location: Location) {
        let Some(instance) = self.instances.get_mut(&instance_id) else {
            return;
        };
        match location {
            Location::Burner(n) => {
                if let Some(burner) = self.burners.get_mut(&n) {
                    burner.assign(instance_id, &instance.menu_name);
                }
            }
            Location::FryerBasket(n) => {
                let timer = self.recipes.fry_duration(instance.bundle_id);
                if let Some(basket) = self.baskets.get_mut(&n) {
                    basket.assign(instance_id, instance.order_id, &instance.menu_name, timer);
                }
            }
            Location::NotAssigned | Location::Staged | Location::Plated => {}
        }
        instance.location = location;
    }

    /// Remove an instance from the world, freeing its equipment
    pub(crate) fn remove_instance(&mut self, instance_id: InstanceId) -> Option<BundleInstance> {
        let location = self.instances.get(&instance_id)?.location;
        self.detach(instance_id, location);
        if self.selection.merge_source == Some(instance_id) {
            self.selection.merge_source = None;
        }
        if let Some(selected) = self.selection.deco_ingredient {
            if selected.source == DecoSelection::Bundle(instance_id) {
                self.selection.deco_ingredient = None;
            }
        }
        self.instances.remove(&instance_id)
    }

    /// Put an instance on a plate with an empty grid
    ///
    /// The plate type defaults to the bundle template's. Plating an already
    /// plated instance keeps its existing grid.
    pub fn plate_bundle(&mut self, instance_id: InstanceId, plate_type: Option<PlateType>) -> Result<(), KitchenError> {
        let instance = self
            .instances
            .get(&instance_id)
            .ok_or(KitchenError::UnknownInstance(instance_id))?;
        let current = instance.location;
        if let Location::FryerBasket(n) = current {
            if self.baskets.get(&n).is_some_and(|b| b.is_submerged) {
                return Err(KitchenError::AlreadySubmerged(n));
            }
        }
        if let Some(err) = self.burned_equipment(current) {
            return Err(err);
        }
        if instance.is_burned {
            return Err(KitchenError::InstanceBurned(instance_id));
        }
        let plate_type = plate_type
            .or_else(|| self.recipes.bundle(instance.bundle_id).and_then(|b| b.plate_type.clone()))
            .unwrap_or_default();

        self.detach(instance_id, current);
        if let Some(instance) = self.instances.get_mut(&instance_id) {
            if instance.plating.is_none() {
                instance.plating = Some(Plating::new(plate_type));
            }
            instance.location = Location::Plated;
        }
        debug!("Plated {}", instance_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Setting area and inventory
    // ------------------------------------------------------------------

    /// Stage an ingredient quantity; every call creates a separate item
    pub fn add_setting_item(&mut self, item: NewSettingItem) -> Result<SettingItemId, KitchenError> {
        let id = SettingItemId(self.next_sim_id());
        self.setting.add(id, item)
    }

    /// Take stock out of storage into the setting area
    pub fn pull_from_inventory(&mut self, inventory_id: IngredientId, amount: f64) -> Result<SettingItemId, KitchenError> {
        let item = self.inventory.take(inventory_id, amount)?;
        self.add_setting_item(item)
    }

    /// Send a staged ingredient back to "not placed"
    pub fn discard_setting_item(&mut self, id: SettingItemId) -> bool {
        let removed = self.setting.discard(id).is_some();
        if removed {
            if let Some(selected) = self.selection.deco_ingredient {
                if selected.source == DecoSelection::SettingItem(id) {
                    self.selection.deco_ingredient = None;
                }
            }
        }
        removed
    }

    /// Resolve an ingredient source into what gets added to a bundle,
    /// taking it out of the setting area or storage
    fn take_ingredient(&mut self, source: IngredientSource, amount: f64) -> Result<AddedIngredient, KitchenError> {
        match source {
            IngredientSource::Setting(id) => {
                let item = self
                    .setting
                    .get(id)
                    .ok_or(KitchenError::UnknownSettingItem(id))?
                    .clone();
                self.setting.consume(id, amount)?;
                self.refresh_selection();
                Ok(AddedIngredient {
                    ingredient_id: item.ingredient_master_id,
                    name: item.ingredient_name,
                    amount,
                    unit: item.unit,
                })
            }
            IngredientSource::Inventory(inventory_id) => {
                let taken = self.inventory.take(inventory_id, amount)?;
                Ok(AddedIngredient {
                    ingredient_id: taken.ingredient_master_id,
                    name: taken.ingredient_name,
                    amount,
                    unit: taken.unit,
                })
            }
        }
    }

    /// Prepare a cold bundle on the counter
    ///
    /// Only instances that are unassigned or staged take ingredients this
    /// way; cooking instances go through their burner or basket.
    pub fn add_ingredient_to_bundle(
        &mut self,
        instance_id: InstanceId,
        source: IngredientSource,
        amount: f64,
    ) -> Result<(), KitchenError> {
        let instance = self
            .instances
            .get(&instance_id)
            .ok_or(KitchenError::UnknownInstance(instance_id))?;
        if !matches!(instance.location, Location::NotAssigned | Location::Staged) {
            return Err(KitchenError::NotOnCounter(instance_id));
        }
        let ingredient = self.take_ingredient(source, amount)?;
        debug!("{}: added {} {}", instance_id, ingredient.amount, ingredient.name);
        if let Some(instance) = self.instances.get_mut(&instance_id) {
            instance.add_ingredient(ingredient);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Woks
    // ------------------------------------------------------------------

    fn cooking_instance(&self, burner_number: u32) -> Result<InstanceId, KitchenError> {
        let burner = self
            .burners
            .get(&burner_number)
            .ok_or(KitchenError::UnknownBurner(burner_number))?;
        if burner.state == WokState::Burned {
            return Err(KitchenError::BurnerBurned(burner_number));
        }
        burner.instance.ok_or(KitchenError::BurnerEmpty(burner_number))
    }

    /// Put an ingredient into the wok on `burner_number`
    pub fn add_ingredient_to_burner(
        &mut self,
        burner_number: u32,
        source: IngredientSource,
        amount: f64,
    ) -> Result<(), KitchenError> {
        let instance_id = self.cooking_instance(burner_number)?;
        let ingredient = self.take_ingredient(source, amount)?;
        debug!("Burner {}: added {} {}", burner_number, ingredient.amount, ingredient.name);
        if let Some(instance) = self.instances.get_mut(&instance_id) {
            instance.add_ingredient(ingredient);
        }
        Ok(())
    }

    /// Start a cooking action on a burner
    /// Returns the action's duration in seconds
    pub fn perform_wok_action(&mut self, burner_number: u32, action: CookingAction) -> Result<u32, KitchenError> {
        let instance_id = self.cooking_instance(burner_number)?;
        let secs = self
            .instances
            .get(&instance_id)
            .and_then(|i| self.recipes.bundle(i.bundle_id))
            .and_then(|b| b.action_duration(action))
            .unwrap_or(self.config.default_action_secs);

        if let Some(burner) = self.burners.get_mut(&burner_number) {
            burner.start_action(action, secs, &self.config);
        }
        if let Some(instance) = self.instances.get_mut(&instance_id) {
            instance.actions.push(action);
        }
        debug!("Burner {}: {:?} for {}s", burner_number, action, secs);
        Ok(secs)
    }

    /// Clean a burned wok; the ruined food goes back to "not assigned" empty
    pub fn wash_wok(&mut self, burner_number: u32) -> Result<(), KitchenError> {
        let burner = self
            .burners
            .get_mut(&burner_number)
            .ok_or(KitchenError::UnknownBurner(burner_number))?;
        if burner.state != WokState::Burned {
            return Err(KitchenError::BurnerNotBurned(burner_number));
        }
        let ruined = burner.wash(self.config.ambient_temperature);
        if let Some(instance) = ruined.and_then(|id| self.instances.get_mut(&id)) {
            instance.discard_contents();
            instance.location = Location::NotAssigned;
        }
        info!("Burner {} washed", burner_number);
        Ok(())
    }

    /// Burners currently overheating (drives the decoration-zone alert)
    pub fn overheat_alert(&self) -> Vec<u32> {
        self.burners
            .values()
            .filter(|b| b.state == WokState::Overheating)
            .map(|b| b.burner_number)
            .collect()
    }

    // ------------------------------------------------------------------
    // Fryer
    // ------------------------------------------------------------------

    fn basket_mut(&mut self, basket_number: u32) -> Result<&mut FryerBasket, KitchenError> {
        self.baskets
            .get_mut(&basket_number)
            .ok_or(KitchenError::UnknownBasket(basket_number))
    }

    pub fn is_basket_selectable(&self, basket_number: u32) -> bool {
        self.baskets
            .get(&basket_number)
            .is_some_and(FryerBasket::is_selectable)
    }

    /// Baskets currently offered for ingredient intake
    pub fn selectable_baskets(&self) -> Vec<u32> {
        self.baskets
            .values()
            .filter(|b| b.is_selectable())
            .map(|b| b.basket_number)
            .collect()
    }

    /// Put an ingredient into a basket, optionally setting its timer
    ///
    /// Only allowed while the basket has an order, is assigned and is out of
    /// the oil. Rejections leave everything untouched.
    pub fn add_ingredient_to_basket(
        &mut self,
        basket_number: u32,
        source: IngredientSource,
        amount: f64,
        timer_secs: Option<u32>,
    ) -> Result<(), IntakeError> {
        let basket = self
            .baskets
            .get(&basket_number)
            .ok_or(IntakeError::UnknownBasket(basket_number))?;
        basket.check_intake()?;
        let instance_id = basket
            .instance
            .ok_or(IntakeError::NoOrder(basket_number))?;

        let ingredient = self.take_ingredient(source, amount)?;
        debug!("Basket {}: added {} {}", basket_number, ingredient.amount, ingredient.name);
        if let Some(instance) = self.instances.get_mut(&instance_id) {
            instance.add_ingredient(ingredient);
        }
        if let (Some(secs), Some(basket)) = (timer_secs, self.baskets.get_mut(&basket_number)) {
            basket.set_timer(secs);
        }
        Ok(())
    }

    pub fn set_basket_timer(&mut self, basket_number: u32, secs: u32) -> Result<u32, KitchenError> {
        let basket = self.basket_mut(basket_number)?;
        basket.set_timer(secs);
        Ok(basket.timer_secs)
    }

    /// Nudge the timer by whole 15-second steps
    pub fn adjust_basket_timer(&mut self, basket_number: u32, steps: i32) -> Result<u32, KitchenError> {
        let basket = self.basket_mut(basket_number)?;
        basket.adjust_timer(steps);
        Ok(basket.timer_secs)
    }

    pub fn submerge_basket(&mut self, basket_number: u32) -> Result<(), KitchenError> {
        self.basket_mut(basket_number)?.submerge()?;
        info!("Basket {} submerged", basket_number);
        Ok(())
    }

    pub fn lift_basket(&mut self, basket_number: u32) -> Result<(), KitchenError> {
        self.basket_mut(basket_number)?.lift()?;
        info!("Basket {} lifted", basket_number);
        Ok(())
    }

    /// Empty a burned basket; the ruined food goes back to "not assigned" empty
    pub fn clear_basket(&mut self, basket_number: u32) -> Result<(), KitchenError> {
        let basket = self.basket_mut(basket_number)?;
        if basket.status != BasketStatus::Burned {
            return Err(KitchenError::BasketNotBurned(basket_number));
        }
        let ruined = basket.release();
        if let Some(instance) = ruined.and_then(|id| self.instances.get_mut(&id)) {
            instance.discard_contents();
            instance.location = Location::NotAssigned;
        }
        info!("Basket {} cleared", basket_number);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Main simulation tick
    ///
    /// Each burner and basket advances independently and reports at most one
    /// transition.
    pub fn tick(&mut self, delta_secs: f32) -> Vec<KitchenEvent> {
        self.time += delta_secs;
        self.game_state.update(delta_secs);

        let mut events = Vec::new();
        for burner in self.burners.values_mut() {
            if let Some(transition) = burner.advance(delta_secs, &self.config) {
                events.push(KitchenEvent::Wok(burner.burner_number, transition));
            }
        }
        for basket in self.baskets.values_mut() {
            if let Some(transition) = basket.advance(delta_secs, &self.config) {
                events.push(KitchenEvent::Fryer(basket.basket_number, transition));
            }
        }

        for event in &events {
            match *event {
                KitchenEvent::Wok(n, WokTransition::StartedOverheating) => {
                    warn!("Burner {} is overheating", n);
                }
                KitchenEvent::Wok(n, WokTransition::CooledDown) => {
                    info!("Burner {} cooled down", n);
                }
                KitchenEvent::Wok(n, WokTransition::ActionFinished(action)) => {
                    debug!("Burner {} finished {:?}", n, action);
                }
                KitchenEvent::Wok(n, WokTransition::Burned) => {
                    warn!("Burner {} burned its food", n);
                    let instance = self.burners.get(&n).and_then(|b| b.instance);
                    self.mark_burned(instance);
                }
                KitchenEvent::Fryer(n, FryerTransition::Done) => {
                    info!("Basket {} is done frying", n);
                }
                KitchenEvent::Fryer(n, FryerTransition::Burned) => {
                    warn!("Basket {} burned its food", n);
                    let instance = self.baskets.get(&n).and_then(|b| b.instance);
                    self.mark_burned(instance);
                }
            }
        }
        events
    }

    fn mark_burned(&mut self, instance: Option<InstanceId>) {
        if let Some(instance) = instance.and_then(|id| self.instances.get_mut(&id)) {
            instance.is_burned = true;
        }
        self.charge_mistake(MistakeKind::Burned);
    }

    // ------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------

    pub fn instance(&self, id: InstanceId) -> Option<&BundleInstance> {
        self.instances.get(&id)
    }

    /// All active instances ordered by id
    pub fn instances(&self) -> Vec<&BundleInstance> {
        let mut all: Vec<&BundleInstance> = self.instances.values().collect();
        all.sort_by_key(|i| i.id);
        all
    }

    pub fn burner(&self, burner_number: u32) -> Option<&Burner> {
        self.burners.get(&burner_number)
    }

    pub fn burners(&self) -> impl Iterator<Item = &Burner> {
        self.burners.values()
    }

    pub fn basket(&self, basket_number: u32) -> Option<&FryerBasket> {
        self.baskets.get(&basket_number)
    }

    pub fn baskets(&self) -> impl Iterator<Item = &FryerBasket> {
        self.baskets.values()
    }

    pub fn setting(&self) -> &SettingArea {
        &self.setting
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Main-dish plates in the decoration zone
    pub fn deco_main_plates(&self) -> Vec<&BundleInstance> {
        self.instances()
            .into_iter()
            .filter(|i| i.is_main_plate())
            .collect()
    }

    /// Bundles waiting in the setting area
    pub fn setting_bundles(&self) -> Vec<&BundleInstance> {
        self.instances()
            .into_iter()
            .filter(|i| i.location == Location::Staged)
            .collect()
    }

    /// The bundle frying in `basket_number`, if any
    pub fn fryer_bundle(&self, basket_number: u32) -> Option<&BundleInstance> {
        self.baskets
            .get(&basket_number)
            .and_then(|b| b.instance)
            .and_then(|id| self.instances.get(&id))
    }

    pub fn deco_step_for_ingredient(&self, recipe_id: RecipeId, source: DecoSource) -> Option<&DecoStep> {
        self.recipes.deco_step_for_ingredient(recipe_id, source)
    }

    /// Instances whose location and equipment references disagree
    ///
    /// Empty in a consistent world: every instance is in exactly one place.
    pub fn ownership_violations(&self) -> Vec<InstanceId> {
        let mut holders: HashMap<InstanceId, Vec<Location>> = HashMap::new();
        for burner in self.burners.values() {
            if let Some(id) = burner.instance {
                holders.entry(id).or_default().push(Location::Burner(burner.burner_number));
            }
        }
        for basket in self.baskets.values() {
            if let Some(id) = basket.instance {
                holders.entry(id).or_default().push(Location::FryerBasket(basket.basket_number));
            }
        }

        let mut violations: Vec<InstanceId> = holders
            .keys()
            .filter(|id| !self.instances.contains_key(id))
            .copied()
            .collect();

        for instance in self.instances.values() {
            let held = holders.get(&instance.id).map(Vec::as_slice).unwrap_or(&[]);
            let consistent = match instance.location {
                Location::Burner(_) | Location::FryerBasket(_) => {
                    held.len() == 1 && held[0] == instance.location
                }
                Location::NotAssigned | Location::Staged | Location::Plated => held.is_empty(),
            };
            if !consistent {
                violations.push(instance.id);
            }
        }
        violations.sort();
        violations
    }

    /// Print a summary of the current kitchen state
    pub fn print_summary(&self) {
        println!("=== Kitchen Summary ===");
        println!("{}", self.game_state.summary());

        println!("--- Burners ---");
        for burner in self.burners.values() {
            println!(
                "  Burner {}: {:?}, {:.0}°, menu={}",
                burner.burner_number,
                burner.state,
                burner.temperature,
                burner.current_menu.as_deref().unwrap_or("-")
            );
        }

        println!("--- Fryer ---");
        for basket in self.baskets.values() {
            println!(
                "  Basket {}: {:?}{}, {:.0}s left, menu={}",
                basket.basket_number,
                basket.status,
                if basket.is_submerged { " (in oil)" } else { "" },
                basket.seconds_left(),
                basket.menu_name.as_deref().unwrap_or("-")
            );
        }

        println!("--- Setting ---");
        for item in self.setting.items() {
            println!(
                "  {}: {:.1}/{:.1}{}",
                item.ingredient_name,
                item.available_amount(),
                item.amount,
                item.unit
            );
        }

        let instances = self.instances();
        if !instances.is_empty() {
            println!("--- Bundles ---");
            for instance in instances {
                println!(
                    "  {} {} / {}: {:?}{}",
                    instance.id,
                    instance.menu_name,
                    instance.bundle_name,
                    instance.location,
                    if instance.is_burned { " (burned)" } else { "" }
                );
            }
        }
    }
}
