//! Property-based tests for the kitchen world.
//!
//! Uses proptest to generate random action sequences against the sample
//! kitchen, then verify structural invariants hold.

mod common;

use common::*;
use kitchen_sim::simulation::{
    DecoIngredientRef, DecoStepId, Destination, GridPosition, IngredientSource, InstanceId,
    KitchenWorld, Location, AMOUNT_EPSILON,
};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Kitchen actions; indices pick among live instances modulo their count.
#[derive(Debug, Clone)]
enum KitchenOp {
    Accept(usize),
    Move(usize, u8),
    Plate(usize),
    CounterPrep(usize),
    Submerge(u32),
    Lift(u32),
    Wash(u32),
    Clear(u32),
    Tick(u8),
}

fn arb_kitchen_ops(max_ops: usize) -> impl Strategy<Value = Vec<KitchenOp>> {
    proptest::collection::vec(
        prop_oneof![
            (0..3usize).prop_map(KitchenOp::Accept),
            (0..20usize, 0..6u8).prop_map(|(i, d)| KitchenOp::Move(i, d)),
            (0..20usize).prop_map(KitchenOp::Plate),
            (0..20usize).prop_map(KitchenOp::CounterPrep),
            (1..=2u32).prop_map(KitchenOp::Submerge),
            (1..=2u32).prop_map(KitchenOp::Lift),
            (1..=2u32).prop_map(KitchenOp::Wash),
            (1..=2u32).prop_map(KitchenOp::Clear),
            (1..60u8).prop_map(KitchenOp::Tick),
        ],
        1..=max_ops,
    )
}

/// Decoration attempts against a plated tonkatsu.
#[derive(Debug, Clone)]
enum DecoOp {
    MergeSalad(f64),
    Sauce(u8, f64),
    Sesame(u8),
    Parsley(u8),
}

fn arb_deco_ops(max_ops: usize) -> impl Strategy<Value = Vec<DecoOp>> {
    proptest::collection::vec(
        prop_oneof![
            (0.0..80.0f64).prop_map(DecoOp::MergeSalad),
            (1..=9u8, 0.0..40.0f64).prop_map(|(c, a)| DecoOp::Sauce(c, a)),
            (1..=9u8).prop_map(DecoOp::Sesame),
            (1..=9u8).prop_map(DecoOp::Parsley),
        ],
        1..=max_ops,
    )
}

fn pick(world: &KitchenWorld, index: usize) -> Option<InstanceId> {
    let ids: Vec<InstanceId> = world.instances().iter().map(|i| i.id).collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn destination(code: u8) -> Destination {
    match code {
        0 => Destination::NotAssigned,
        1 => Destination::Burner(1),
        2 => Destination::Burner(2),
        3 => Destination::FryerBasket(1),
        4 => Destination::FryerBasket(2),
        _ => Destination::Staged,
    }
}

fn apply_kitchen_op(world: &mut KitchenWorld, op: &KitchenOp) {
    let recipes = [KIMCHI_FRIED_RICE, TONKATSU, COLD_BUCKWHEAT];
    match *op {
        KitchenOp::Accept(r) => {
            world.accept_order(recipes[r]).unwrap();
        }
        KitchenOp::Move(i, d) => {
            if let Some(id) = pick(world, i) {
                world.move_bundle(id, destination(d));
            }
        }
        KitchenOp::Plate(i) => {
            if let Some(id) = pick(world, i) {
                let _ = world.plate_bundle(id, None);
            }
        }
        KitchenOp::CounterPrep(i) => {
            if let Some(id) = pick(world, i) {
                let _ = world.add_ingredient_to_bundle(id, IngredientSource::Inventory(CABBAGE_STOCK), 10.0);
            }
        }
        KitchenOp::Submerge(n) => {
            let _ = world.submerge_basket(n);
        }
        KitchenOp::Lift(n) => {
            let _ = world.lift_basket(n);
        }
        KitchenOp::Wash(n) => {
            let _ = world.wash_wok(n);
        }
        KitchenOp::Clear(n) => {
            let _ = world.clear_basket(n);
        }
        KitchenOp::Tick(secs) => {
            world.tick(f32::from(secs));
        }
    }
}

const TONKATSU_STEPS: [DecoStepId; 3] = [DecoStepId(2001), DecoStepId(2002), DecoStepId(2003)];

fn step_amounts(world: &KitchenWorld, plate: InstanceId) -> Vec<f64> {
    let plating = world.instance(plate).unwrap().plating.as_ref().unwrap();
    TONKATSU_STEPS
        .iter()
        .map(|&step| plating.amount_for_step(step))
        .collect()
}

fn layer_count(world: &KitchenWorld, plate: InstanceId) -> usize {
    world.instance(plate).unwrap().plating.as_ref().unwrap().layer_count()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every instance is in exactly one place after any action sequence
    #[test]
    fn single_ownership_holds(ops in arb_kitchen_ops(60)) {
        let mut world = sample_world();
        for op in &ops {
            apply_kitchen_op(&mut world, op);
            prop_assert!(
                world.ownership_violations().is_empty(),
                "violations {:?} after {:?}",
                world.ownership_violations(),
                op
            );
        }
        for burner in world.burners() {
            if let Some(id) = burner.instance {
                prop_assert_eq!(
                    world.instance(id).unwrap().location,
                    Location::Burner(burner.burner_number)
                );
            }
        }
    }

    /// Plate progress never goes backwards, whatever is attempted
    #[test]
    fn decoration_progress_is_monotonic(salad in 1.0..120.0f64, ops in arb_deco_ops(30)) {
        let mut world = sample_world();
        let (main, instances) = plated_main(&mut world, TONKATSU);
        let side = staged_salad(&mut world, &instances, salad);
        let sauce = world.pull_from_inventory(SAUCE_STOCK, 45.0).unwrap();

        let mut amounts = step_amounts(&world, main);
        let mut layers = layer_count(&world, main);
        let mut complete = world.check_deco_complete(main);

        for op in &ops {
            match *op {
                DecoOp::MergeSalad(amount) => {
                    if world.instance(side).is_some() {
                        let _ = world.merge_bundle(main, side, Some(amount));
                    }
                }
                DecoOp::Sauce(c, amount) => {
                    let _ = world.apply_deco_item(
                        main,
                        GridPosition::new(c).unwrap(),
                        DecoIngredientRef::SettingItem(sauce),
                        amount,
                    );
                }
                DecoOp::Sesame(c) => {
                    let _ = world.apply_deco_item(
                        main,
                        GridPosition::new(c).unwrap(),
                        DecoIngredientRef::DecoItem(SESAME),
                        1.0,
                    );
                }
                DecoOp::Parsley(c) => {
                    let _ = world.apply_deco_item(
                        main,
                        GridPosition::new(c).unwrap(),
                        DecoIngredientRef::DecoItem(PARSLEY),
                        1.0,
                    );
                }
            }

            let now = step_amounts(&world, main);
            for (before, after) in amounts.iter().zip(&now) {
                prop_assert!(after + AMOUNT_EPSILON >= *before);
            }
            let steps = world.recipes.deco_steps(TONKATSU);
            for (step, amount) in steps.iter().zip(&now) {
                prop_assert!(*amount <= step.target_amount() + AMOUNT_EPSILON);
            }
            let now_layers = layer_count(&world, main);
            prop_assert!(now_layers >= layers);
            let now_complete = world.check_deco_complete(main);
            prop_assert!(!complete || now_complete);

            amounts = now;
            layers = now_layers;
            complete = now_complete;
        }

        prop_assert!(world.ownership_violations().is_empty());
    }
}
