//! Plate grid and decoration rules
//!
//! A plate is a 3x3 grid. Each cell holds a stack of layers kept sorted by
//! the step's `layer_order`, with insertion order breaking ties. The checks in
//! here are pure; the world applies them and charges mistakes.

use ordered_float::OrderedFloat;
use sorted_vec::SortedVec;

use super::error::DecoError;
use super::recipe::{DecoSource, DecoStep};
use super::types::{DecoStepId, GridPosition, InstanceId, PlateType, AMOUNT_EPSILON, GRID_CELLS};

/// One ingredient drawn on a plate cell
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Layer {
    /// z-order from the decoration step
    pub layer_order: i32,
    sequence: u64,
    pub ingredient_name: String,
    pub image_color: String,
    pub amount: OrderedFloat<f64>,
    pub deco_step_id: DecoStepId,
}

/// A single grid cell and its layer stack
#[derive(Debug, Clone)]
pub struct Cell {
    layers: SortedVec<Layer>,
}

impl Cell {
    fn new() -> Self {
        Self {
            layers: SortedVec::new(),
        }
    }

    /// Layers from bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn top(&self) -> Option<&Layer> {
        self.layers.last()
    }
}

/// History entry for one successful placement or merge
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDeco {
    pub deco_step_id: DecoStepId,
    pub position: GridPosition,
    pub amount: f64,
    /// Set for bundle merges
    pub merged_amount: Option<f64>,
    pub source_instance: Option<InstanceId>,
}

/// Plating state of a bundle instance
#[derive(Debug, Clone)]
pub struct Plating {
    pub plate_type: PlateType,
    grid_cells: [Cell; GRID_CELLS],
    pub applied_decos: Vec<AppliedDeco>,
    pub merged_bundle_ids: Vec<InstanceId>,
    next_sequence: u64,
}

impl Plating {
    pub fn new(plate_type: PlateType) -> Self {
        Self {
            plate_type,
            grid_cells: std::array::from_fn(|_| Cell::new()),
            applied_decos: Vec::new(),
            merged_bundle_ids: Vec::new(),
            next_sequence: 0,
        }
    }

    pub fn cell(&self, position: GridPosition) -> &Cell {
        &self.grid_cells[position.index()]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.grid_cells
    }

    pub fn layer_count(&self) -> usize {
        self.grid_cells.iter().map(|c| c.layers.len()).sum()
    }

    /// Cumulative amount applied or merged for a step
    pub fn amount_for_step(&self, step_id: DecoStepId) -> f64 {
        self.applied_decos
            .iter()
            .filter(|d| d.deco_step_id == step_id)
            .map(|d| d.merged_amount.unwrap_or(d.amount))
            .sum()
    }

    /// How much more the step needs, never negative
    pub fn remaining_for(&self, step: &DecoStep) -> f64 {
        (step.target_amount() - self.amount_for_step(step.id)).max(0.0)
    }

    pub fn is_step_satisfied(&self, step: &DecoStep) -> bool {
        self.applied_decos.iter().any(|d| d.deco_step_id == step.id)
            && self.remaining_for(step) <= AMOUNT_EPSILON
    }

    /// True when every step has been satisfied
    pub fn is_complete(&self, steps: &[DecoStep]) -> bool {
        steps.iter().all(|step| self.is_step_satisfied(step))
    }

    /// First step before `step` in recipe order that is not yet satisfied
    pub fn pending_before<'a>(&self, steps: &'a [DecoStep], step: &DecoStep) -> Option<&'a DecoStep> {
        steps
            .iter()
            .take_while(|s| s.id != step.id)
            .find(|s| !self.is_step_satisfied(s))
    }

    /// Step that `source` placed at `position` counts toward
    ///
    /// A recipe can use one source for several steps. Open steps at
    /// `position` come first, then any open step, then the first match.
    pub fn resolve_step<'a>(
        &self,
        steps: &'a [DecoStep],
        source: DecoSource,
        position: Option<GridPosition>,
    ) -> Option<&'a DecoStep> {
        let mut first = None;
        let mut first_open = None;
        for step in steps.iter().filter(|s| s.source() == Some(source)) {
            first.get_or_insert(step);
            if self.is_step_satisfied(step) {
                continue;
            }
            if position.is_some_and(|pos| step.grid_position.map_or(true, |p| p == pos)) {
                return Some(step);
            }
            first_open.get_or_insert(step);
        }
        first_open.or(first)
    }

    /// Check a placement of `amount` at `position` against `step`
    ///
    /// Does not touch the plate. Position errors are reported before order
    /// errors so a wrong cell is always charged as a position mistake.
    pub fn check_placement(
        &self,
        steps: &[DecoStep],
        step: &DecoStep,
        position: GridPosition,
        amount: f64,
    ) -> Result<(), DecoError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(DecoError::InvalidAmount(amount));
        }

        if let Some(expected) = step.grid_position {
            if expected != position {
                return Err(DecoError::PositionMismatch {
                    name: step.ingredient_name.clone(),
                    expected,
                    actual: position,
                });
            }
        }

        if self.is_step_satisfied(step) {
            return Err(DecoError::StepAlreadyComplete {
                name: step.ingredient_name.clone(),
            });
        }

        if let Some(pending) = self.pending_before(steps, step) {
            return Err(DecoError::OutOfOrder {
                name: step.ingredient_name.clone(),
                pending: pending.ingredient_name.clone(),
            });
        }

        let remaining = self.remaining_for(step);
        if amount > remaining + AMOUNT_EPSILON {
            return Err(DecoError::ExceedsRemaining {
                name: step.ingredient_name.clone(),
                remaining,
                requested: amount,
            });
        }

        Ok(())
    }

    /// Push a layer for `step` and record it in the history
    pub(crate) fn apply(
        &mut self,
        step: &DecoStep,
        position: GridPosition,
        amount: f64,
        merge_source: Option<InstanceId>,
    ) {
        let layer = Layer {
            layer_order: step.layer_order,
            sequence: self.next_sequence,
            ingredient_name: step.ingredient_name.clone(),
            image_color: step.display_color.clone(),
            amount: OrderedFloat(amount),
            deco_step_id: step.id,
        };
        self.next_sequence += 1;
        self.grid_cells[position.index()].layers.insert(layer);

        self.applied_decos.push(AppliedDeco {
            deco_step_id: step.id,
            position,
            amount,
            merged_amount: merge_source.map(|_| amount),
            source_instance: merge_source,
        });
        if let Some(source) = merge_source {
            if !self.merged_bundle_ids.contains(&source) {
                self.merged_bundle_ids.push(source);
            }
        }
    }
}
