//! Decoration zone actions
//!
//! Placement, merging and serving on top of the pure plate rules in
//! `plating`. Position, unmatched-ingredient and order mistakes are charged
//! here, at the point of failure, through the world's penalty policy.

use log::{debug, info};

use super::bundle::Location;
use super::error::{DecoError, IntakeError, KitchenError, MergeError};
use super::game_state::ScoreRecord;
use super::recipe::{DecoSource, DecoStep};
use super::types::{DecoStepId, GridPosition, IngredientId, InstanceId, SettingItemId, AMOUNT_EPSILON};
use super::world::{DecoSelection, KitchenWorld, SelectedDecoIngredient};

/// Ingredient references accepted by [`KitchenWorld::apply_deco_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoIngredientRef {
    DecoItem(IngredientId),
    SettingItem(SettingItemId),
}

/// Result of a successful placement
#[derive(Debug, Clone, PartialEq)]
pub struct DecoApplied {
    pub deco_step_id: DecoStepId,
    pub position: GridPosition,
    pub amount: f64,
    /// The plate is now ready to serve
    pub plate_complete: bool,
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub deco_step_id: DecoStepId,
    pub position: GridPosition,
    pub merged_amount: f64,
    /// The source had nothing left and was removed
    pub source_consumed: bool,
    pub plate_complete: bool,
}

/// Quantity dialog bounds for a non-fixed step
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityPrompt {
    pub min: f64,
    pub max: f64,
    /// Suggested amount
    pub default: f64,
    pub unit: Option<String>,
}

impl KitchenWorld {
    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Hold an ingredient or bundle for decoration
    pub fn select_deco_ingredient(&mut self, source: DecoSelection) -> Result<SelectedDecoIngredient, DecoError> {
        let remaining_amount = match source {
            DecoSelection::DecoItem(id) => {
                self.recipes
                    .deco_ingredient(id)
                    .ok_or(DecoError::UnknownIngredient(id))?;
                None
            }
            DecoSelection::SettingItem(id) => Some(
                self.setting
                    .get(id)
                    .ok_or(DecoError::UnknownSettingItem(id))?
                    .available_amount(),
            ),
            DecoSelection::Bundle(id) => {
                let bundle = self.instances.get(&id).ok_or(MergeError::SourceNotFound(id))?;
                if !bundle.is_off_heat() {
                    return Err(MergeError::SourceNotOffHeat(id).into());
                }
                Some(bundle.available_amount())
            }
        };
        let selected = SelectedDecoIngredient {
            source,
            remaining_amount,
        };
        self.selection.deco_ingredient = Some(selected);
        Ok(selected)
    }

    pub fn clear_deco_selection(&mut self) {
        self.selection.deco_ingredient = None;
    }

    /// Recompute the held amount after a consumption; drops the selection
    /// once its source is gone or empty
    pub(crate) fn refresh_selection(&mut self) {
        let Some(selected) = self.selection.deco_ingredient else {
            return;
        };
        let remaining = match selected.source {
            DecoSelection::DecoItem(_) => return,
            DecoSelection::SettingItem(id) => self.setting.get(id).map(|i| i.available_amount()),
            DecoSelection::Bundle(id) => self.instances.get(&id).map(|i| i.available_amount()),
        };
        self.selection.deco_ingredient = match remaining {
            Some(amount) if amount > AMOUNT_EPSILON => Some(SelectedDecoIngredient {
                source: selected.source,
                remaining_amount: Some(amount),
            }),
            _ => None,
        };
    }

    /// Enter merge mode with `source` as the side plate, or leave it with `None`
    /// Returns false when the source cannot be merged
    pub fn set_merge_mode(&mut self, source: Option<InstanceId>) -> bool {
        match source {
            None => {
                self.selection.merge_source = None;
                true
            }
            Some(id) => match self.instances.get(&id) {
                Some(instance) if !instance.is_main_dish && instance.is_off_heat() => {
                    self.selection.merge_source = Some(id);
                    true
                }
                _ => false,
            },
        }
    }

    pub fn select_burner(&mut self, burner_number: u32) -> Result<(), KitchenError> {
        if !self.burners.contains_key(&burner_number) {
            return Err(KitchenError::UnknownBurner(burner_number));
        }
        self.selection.burner = Some(burner_number);
        Ok(())
    }

    /// Select a basket for ingredient intake; only selectable baskets are offered
    pub fn select_basket(&mut self, basket_number: u32) -> Result<(), IntakeError> {
        self.baskets
            .get(&basket_number)
            .ok_or(IntakeError::UnknownBasket(basket_number))?
            .check_intake()?;
        self.selection.basket = Some(basket_number);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Place an ingredient on a plate cell
    ///
    /// Looks up the plate recipe's decoration step for the ingredient, checks
    /// cell, order and amount, then pushes a layer. Unmatched ingredients,
    /// wrong cells and out-of-order placements are charged as mistakes.
    pub fn apply_deco_item(
        &mut self,
        plate_id: InstanceId,
        position: GridPosition,
        ingredient: DecoIngredientRef,
        amount: f64,
    ) -> Result<DecoApplied, DecoError> {
        let result = self.try_apply_deco_item(plate_id, position, ingredient, amount);
        if let Err(err) = &result {
            self.note_deco_failure(err);
        }
        result
    }

    fn note_deco_failure(&mut self, err: &DecoError) {
        debug!("Decoration rejected: {}", err);
        if let Some(kind) = err.mistake_kind() {
            self.charge_mistake(kind);
        }
    }

    /// Step on `plate_id` that `source` counts toward, given the plate's progress
    fn plate_step(
        &self,
        plate_id: InstanceId,
        source: DecoSource,
        position: Option<GridPosition>,
    ) -> Option<&DecoStep> {
        let plate = self.instances.get(&plate_id)?;
        let steps = self.recipes.deco_steps(plate.recipe_id);
        match &plate.plating {
            Some(plating) => plating.resolve_step(steps, source, position),
            None => self.recipes.deco_step_for_ingredient(plate.recipe_id, source),
        }
    }

    /// Plate-side checks shared by placements: returns the matched step
    fn resolve_deco_step(
        &self,
        plate_id: InstanceId,
        source: DecoSource,
        position: GridPosition,
        name: &str,
    ) -> Result<DecoStep, DecoError> {
        let plate = self
            .instances
            .get(&plate_id)
            .ok_or(DecoError::PlateNotFound(plate_id))?;
        if plate.plating.is_none() {
            return Err(DecoError::NotPlated(plate_id));
        }
        if !plate.is_main_dish {
            return Err(DecoError::NotMainDish(plate_id));
        }
        self.plate_step(plate_id, source, Some(position))
            .cloned()
            .ok_or_else(|| DecoError::NoMatchingStep {
                name: name.to_string(),
            })
    }

    fn try_apply_deco_item(
        &mut self,
        plate_id: InstanceId,
        position: GridPosition,
        ingredient: DecoIngredientRef,
        amount: f64,
    ) -> Result<DecoApplied, DecoError> {
        let (source, name, available) = match ingredient {
            DecoIngredientRef::DecoItem(id) => {
                let deco = self
                    .recipes
                    .deco_ingredient(id)
                    .ok_or(DecoError::UnknownIngredient(id))?;
                (DecoSource::DecoItem(id), deco.name.clone(), None)
            }
            DecoIngredientRef::SettingItem(id) => {
                let item = self
                    .setting
                    .get(id)
                    .ok_or(DecoError::UnknownSettingItem(id))?;
                (
                    DecoSource::SettingItem(item.inventory_id),
                    item.ingredient_name.clone(),
                    Some(item.available_amount()),
                )
            }
        };

        let step = self.resolve_deco_step(plate_id, source, position, &name)?;
        let recipe_id = self.instances[&plate_id].recipe_id;
        {
            let steps = self.recipes.deco_steps(recipe_id);
            let plating = self.instances[&plate_id]
                .plating
                .as_ref()
                .ok_or(DecoError::NotPlated(plate_id))?;
            plating.check_placement(steps, &step, position, amount)?;
        }
        if let Some(available) = available {
            if amount > available + AMOUNT_EPSILON {
                return Err(DecoError::InsufficientSource {
                    available,
                    requested: amount,
                });
            }
        }

        if let DecoIngredientRef::SettingItem(id) = ingredient {
            self.setting
                .consume(id, amount)
                .map_err(|_| DecoError::InsufficientSource {
                    available: available.unwrap_or(0.0),
                    requested: amount,
                })?;
        }

        let steps = self.recipes.deco_steps(recipe_id);
        let plating = self
            .instances
            .get_mut(&plate_id)
            .and_then(|p| p.plating.as_mut())
            .ok_or(DecoError::NotPlated(plate_id))?;
        plating.apply(&step, position, amount, None);
        let plate_complete = plating.is_complete(steps);

        self.refresh_selection();
        debug!("Placed {} x{} on {} cell {}", name, amount, plate_id, position);
        Ok(DecoApplied {
            deco_step_id: step.id,
            position,
            amount,
            plate_complete,
        })
    }

    /// Apply whatever is currently selected to `position` on `plate_id`
    ///
    /// `amount` defaults to the step's suggested quantity: the full remaining
    /// need for fixed steps, or the quantity prompt's default otherwise.
    pub fn place_selected(
        &mut self,
        plate_id: InstanceId,
        position: GridPosition,
        amount: Option<f64>,
    ) -> Result<DecoApplied, DecoError> {
        let selected = self
            .selection
            .deco_ingredient
            .ok_or(DecoError::NoSelection)?;

        let amount = match amount {
            Some(amount) => amount,
            None => self.suggested_amount(plate_id, selected.source),
        };

        match selected.source {
            DecoSelection::DecoItem(id) => {
                self.apply_deco_item(plate_id, position, DecoIngredientRef::DecoItem(id), amount)
            }
            DecoSelection::SettingItem(id) => {
                self.apply_deco_item(plate_id, position, DecoIngredientRef::SettingItem(id), amount)
            }
            DecoSelection::Bundle(source_id) => {
                let result = self.place_bundle(plate_id, position, source_id, amount);
                if let Err(err) = &result {
                    self.note_deco_failure(err);
                }
                result
            }
        }
    }

    fn place_bundle(
        &mut self,
        plate_id: InstanceId,
        position: GridPosition,
        source_id: InstanceId,
        amount: f64,
    ) -> Result<DecoApplied, DecoError> {
        let source = self
            .instances
            .get(&source_id)
            .ok_or(MergeError::SourceNotFound(source_id))?;
        let name = source.bundle_name.clone();
        let step = self.resolve_deco_step(plate_id, DecoSource::Bundle(source.bundle_id), position, &name)?;
        if let Some(expected) = step.grid_position {
            if expected != position {
                return Err(DecoError::PositionMismatch {
                    name,
                    expected,
                    actual: position,
                });
            }
        }
        let outcome = self.merge_into(plate_id, source_id, Some(amount), position)?;
        Ok(DecoApplied {
            deco_step_id: outcome.deco_step_id,
            position: outcome.position,
            amount: outcome.merged_amount,
            plate_complete: outcome.plate_complete,
        })
    }

    fn suggested_amount(&self, plate_id: InstanceId, source: DecoSelection) -> f64 {
        if let Some(prompt) = self.quantity_prompt(plate_id, source) {
            return prompt.default;
        }
        self.step_for_selection(plate_id, source)
            .map(|step| {
                let remaining = self
                    .instances
                    .get(&plate_id)
                    .and_then(|p| p.plating.as_ref())
                    .map(|p| p.remaining_for(step))
                    .unwrap_or(step.target_amount());
                if remaining > AMOUNT_EPSILON {
                    remaining
                } else {
                    step.target_amount()
                }
            })
            .unwrap_or(1.0)
    }

    fn step_for_selection(&self, plate_id: InstanceId, source: DecoSelection) -> Option<&DecoStep> {
        let key = match source {
            DecoSelection::DecoItem(id) => DecoSource::DecoItem(id),
            DecoSelection::SettingItem(id) => DecoSource::SettingItem(self.setting.get(id)?.inventory_id),
            DecoSelection::Bundle(id) => DecoSource::Bundle(self.instances.get(&id)?.bundle_id),
        };
        self.plate_step(plate_id, key, None)
    }

    /// Quantity dialog bounds, or `None` when the step is a fixed one-click
    /// placement (or nothing matches)
    ///
    /// The upper bound is the smaller of what the source still has and what
    /// the step still needs; the suggested amount is that upper bound.
    pub fn quantity_prompt(&self, plate_id: InstanceId, source: DecoSelection) -> Option<QuantityPrompt> {
        let step = self.step_for_selection(plate_id, source)?;
        if step.is_fixed_amount() {
            return None;
        }
        let plating = self.instances.get(&plate_id)?.plating.as_ref()?;
        let remaining = plating.remaining_for(step);
        let available = match source {
            DecoSelection::DecoItem(_) => None,
            DecoSelection::SettingItem(id) => Some(self.setting.get(id)?.available_amount()),
            DecoSelection::Bundle(id) => Some(self.instances.get(&id)?.available_amount()),
        };
        let max = available.map_or(remaining, |a| a.min(remaining));
        Some(QuantityPrompt {
            min: step.min_amount.min(max),
            max,
            default: max,
            unit: step.required_unit.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Merging
    // ------------------------------------------------------------------

    /// Whether `target` can receive a merge from `source`
    ///
    /// Matching is by recipe, not order: any main plate of the same recipe
    /// qualifies.
    pub fn is_valid_merge_target(&self, source: InstanceId, target: InstanceId) -> bool {
        if source == target {
            return false;
        }
        match (self.instances.get(&source), self.instances.get(&target)) {
            (Some(src), Some(tgt)) => {
                !src.is_main_dish
                    && src.is_off_heat()
                    && tgt.is_main_plate()
                    && src.recipe_id == tgt.recipe_id
            }
            _ => false,
        }
    }

    /// Main plates to highlight for the current merge source
    pub fn merge_targets(&self, source: InstanceId) -> Vec<InstanceId> {
        self.deco_main_plates()
            .into_iter()
            .map(|p| p.id)
            .filter(|&id| self.is_valid_merge_target(source, id))
            .collect()
    }

    /// Merge a side bundle (or part of a staged one) onto a main plate
    ///
    /// `amount` defaults to the smaller of what the source has left and what
    /// the step still needs. A source with nothing left is removed.
    pub fn merge_bundle(
        &mut self,
        target_plate_id: InstanceId,
        source_instance_id: InstanceId,
        amount: Option<f64>,
    ) -> Result<MergeOutcome, MergeError> {
        let position = self
            .instances
            .get(&source_instance_id)
            .and_then(|src| self.plate_step(target_plate_id, DecoSource::Bundle(src.bundle_id), None))
            .and_then(|step| step.grid_position)
            .unwrap_or(GridPosition::CENTER);
        let result = self.merge_into(target_plate_id, source_instance_id, amount, position);
        if let Err(err) = &result {
            debug!("Merge rejected: {}", err);
        }
        result
    }

    fn merge_into(
        &mut self,
        target_plate_id: InstanceId,
        source_instance_id: InstanceId,
        amount: Option<f64>,
        position: GridPosition,
    ) -> Result<MergeOutcome, MergeError> {
        if target_plate_id == source_instance_id {
            return Err(MergeError::SelfMerge);
        }
        let source = self
            .instances
            .get(&source_instance_id)
            .ok_or(MergeError::SourceNotFound(source_instance_id))?;
        let target = self
            .instances
            .get(&target_plate_id)
            .ok_or(MergeError::TargetNotFound(target_plate_id))?;

        let plating = match (&target.plating, target.location) {
            (Some(plating), Location::Plated) => plating,
            _ => return Err(MergeError::TargetNotPlated(target_plate_id)),
        };
        if !target.is_main_dish {
            return Err(MergeError::TargetNotMainDish(target_plate_id));
        }
        if source.is_main_dish {
            return Err(MergeError::SourceIsMainDish(source_instance_id));
        }
        if !source.is_off_heat() {
            return Err(MergeError::SourceNotOffHeat(source_instance_id));
        }
        if source.recipe_id != target.recipe_id {
            return Err(MergeError::RecipeMismatch {
                source_menu: source.menu_name.clone(),
                target_menu: target.menu_name.clone(),
            });
        }

        let step = self
            .plate_step(target_plate_id, DecoSource::Bundle(source.bundle_id), Some(position))
            .cloned()
            .ok_or_else(|| MergeError::NoMatchingStep {
                name: source.bundle_name.clone(),
            })?;

        let remaining = plating.remaining_for(&step);
        if remaining <= AMOUNT_EPSILON {
            return Err(MergeError::AlreadyComplete {
                name: step.ingredient_name.clone(),
            });
        }
        let available = source.available_amount();
        let amount = amount.unwrap_or_else(|| available.min(remaining));
        if amount.is_nan() || amount <= 0.0 {
            return Err(MergeError::InvalidAmount(amount));
        }
        if amount > available + AMOUNT_EPSILON {
            return Err(MergeError::InsufficientAmount {
                available,
                requested: amount,
            });
        }
        if amount > remaining + AMOUNT_EPSILON {
            return Err(MergeError::ExceedsRemaining {
                name: step.ingredient_name.clone(),
                remaining,
                requested: amount,
            });
        }
        let recipe_id = target.recipe_id;

        // All checks passed; mutate target then source.
        let steps = self.recipes.deco_steps(recipe_id);
        let plating = self
            .instances
            .get_mut(&target_plate_id)
            .and_then(|t| t.plating.as_mut())
            .ok_or(MergeError::TargetNotPlated(target_plate_id))?;
        plating.apply(&step, position, amount, Some(source_instance_id));
        let plate_complete = plating.is_complete(steps);

        let source_consumed = self
            .instances
            .get_mut(&source_instance_id)
            .is_some_and(|s| s.consume(amount));
        if source_consumed {
            self.remove_instance(source_instance_id);
        }
        self.refresh_selection();

        info!(
            "Merged {} of {} into {}{}",
            amount,
            step.ingredient_name,
            target_plate_id,
            if source_consumed { " (source used up)" } else { "" }
        );
        Ok(MergeOutcome {
            deco_step_id: step.id,
            position,
            merged_amount: amount,
            source_consumed,
            plate_complete,
        })
    }

    // ------------------------------------------------------------------
    // Completion and serving
    // ------------------------------------------------------------------

    /// True when every decoration step of the plate's recipe is satisfied
    pub fn check_deco_complete(&self, plate_id: InstanceId) -> bool {
        self.instances
            .get(&plate_id)
            .filter(|p| p.is_plated())
            .and_then(|p| {
                p.plating
                    .as_ref()
                    .map(|plating| plating.is_complete(self.recipes.deco_steps(p.recipe_id)))
            })
            .unwrap_or(false)
    }

    /// Serve a finished main plate
    ///
    /// Returns false and changes nothing unless the plate is an unburned
    /// main dish with complete decoration.
    pub fn serve_bundle(&mut self, plate_id: InstanceId) -> bool {
        let Some(plate) = self.instances.get(&plate_id) else {
            return false;
        };
        if plate.is_burned {
            debug!("Plate {} is burned and cannot be served", plate_id);
            return false;
        }
        if !plate.is_main_plate() || !self.check_deco_complete(plate_id) {
            debug!("Plate {} is not ready to serve", plate_id);
            return false;
        }

        let Some(plate) = self.remove_instance(plate_id) else {
            return false;
        };
        let points = self.config.score_per_serve;
        self.game_state
            .record_serve(plate.order_id, plate.recipe_id, &plate.menu_name, points);
        info!("Served {} for {}", plate.menu_name, plate.order_id);
        true
    }

    /// Drain score records produced by serves, for the backend
    pub fn take_score_records(&mut self) -> Vec<ScoreRecord> {
        self.game_state.take_score_records()
    }
}
