//! Wok and fryer behavior driven through world ticks

mod common;

use common::*;
use kitchen_sim::simulation::{
    BasketStatus, CookingAction, DecoIngredientRef, Destination, FryerTransition, GridPosition,
    IngredientSource, IntakeError, KitchenError, KitchenEvent, Location, WokState, WokTransition,
    FRY_TIMER_MAX, FRY_TIMER_MIN,
};

#[test]
fn test_wok_overheats_then_burns() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    let main = instances[0];
    assert!(world.move_bundle(main, Destination::Burner(1)));
    world
        .add_ingredient_to_burner(1, IngredientSource::Inventory(RICE_STOCK), 200.0)
        .unwrap();

    let mut events = Vec::new();
    for _ in 0..60 {
        events.extend(world.tick(1.0));
        if world.burner(1).unwrap().state == WokState::Overheating {
            break;
        }
    }
    assert!(events.contains(&KitchenEvent::Wok(1, WokTransition::StartedOverheating)));
    assert_eq!(world.overheat_alert(), vec![1]);
    assert!(!world.instance(main).unwrap().is_burned);

    for _ in 0..60 {
        events.extend(world.tick(1.0));
    }
    assert!(events.contains(&KitchenEvent::Wok(1, WokTransition::Burned)));
    assert_eq!(world.burner(1).unwrap().state, WokState::Burned);
    assert!(world.instance(main).unwrap().is_burned);
    assert_eq!(world.game_state.mistakes, 1);
    assert!(world.overheat_alert().is_empty());

    // Nothing else can go on a burned wok
    let (_, other) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    assert!(!world.move_bundle(other[0], Destination::Burner(1)));
    assert_eq!(
        world.perform_wok_action(1, CookingAction::StirFry),
        Err(KitchenError::BurnerBurned(1))
    );

    world.wash_wok(1).unwrap();
    let burner = world.burner(1).unwrap();
    assert_eq!(burner.state, WokState::Idle);
    assert!(burner.is_free());
    let ruined = world.instance(main).unwrap();
    assert_eq!(ruined.location, Location::NotAssigned);
    assert!(ruined.ingredients.is_empty());
    assert!(!ruined.is_burned);
    assert!(world.ownership_violations().is_empty());
}

#[test]
fn test_water_cools_an_overheating_wok() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    assert!(world.move_bundle(instances[0], Destination::Burner(2)));

    while world.overheat_alert().is_empty() {
        world.tick(1.0);
    }
    world.perform_wok_action(2, CookingAction::AddWater).unwrap();
    let events = world.tick(0.1);
    assert_eq!(events, vec![KitchenEvent::Wok(2, WokTransition::CooledDown)]);
    assert_eq!(world.burner(2).unwrap().state, WokState::Cooking);
    assert_eq!(world.instance(instances[0]).unwrap().actions, vec![CookingAction::AddWater]);
}

#[test]
fn test_wash_requires_a_burned_wok() {
    let mut world = sample_world();
    assert_eq!(world.wash_wok(1), Err(KitchenError::BurnerNotBurned(1)));
    assert_eq!(world.wash_wok(9), Err(KitchenError::UnknownBurner(9)));
    assert_eq!(
        world.add_ingredient_to_burner(1, IngredientSource::Inventory(RICE_STOCK), 10.0),
        Err(KitchenError::BurnerEmpty(1))
    );
}

#[test]
fn test_basket_without_order_is_not_selectable() {
    let mut world = sample_world();

    assert!(!world.is_basket_selectable(1));
    assert!(world.selectable_baskets().is_empty());
    assert_eq!(
        world.add_ingredient_to_basket(1, IngredientSource::Inventory(PATTY_STOCK), 1.0, None),
        Err(IntakeError::NoOrder(1))
    );
    assert_eq!(world.select_basket(1), Err(IntakeError::NoOrder(1)));
    assert_eq!(world.selection.basket, None);
    assert_eq!(world.inventory().record(PATTY_STOCK).unwrap().stock, 40.0);
}

#[test]
fn test_fryer_cycle() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(TONKATSU).unwrap();
    let main = main_of(&world, &instances);

    assert!(world.move_bundle(main, Destination::FryerBasket(1)));
    assert_eq!(world.selectable_baskets(), vec![1]);
    world.select_basket(1).unwrap();
    assert_eq!(world.basket(1).unwrap().timer_secs, 180);
    assert_eq!(world.fryer_bundle(1).unwrap().id, main);

    world
        .add_ingredient_to_basket(1, IngredientSource::Inventory(PATTY_STOCK), 1.0, Some(120))
        .unwrap();
    assert_eq!(world.basket(1).unwrap().timer_secs, 120);
    assert_eq!(world.instance(main).unwrap().ingredients.len(), 1);

    world.submerge_basket(1).unwrap();
    assert!(!world.is_basket_selectable(1));
    assert_eq!(
        world.add_ingredient_to_basket(1, IngredientSource::Inventory(PATTY_STOCK), 1.0, None),
        Err(IntakeError::Submerged(1))
    );
    assert_eq!(world.submerge_basket(1), Err(KitchenError::AlreadySubmerged(1)));
    assert!(!world.move_bundle(main, Destination::Staged));

    let mut done = false;
    for _ in 0..125 {
        if world
            .tick(1.0)
            .contains(&KitchenEvent::Fryer(1, FryerTransition::Done))
        {
            done = true;
            break;
        }
    }
    assert!(done);
    assert!(world.basket(1).unwrap().is_done);

    world.lift_basket(1).unwrap();
    assert_eq!(world.lift_basket(1), Err(KitchenError::NotSubmerged(1)));
    world.plate_bundle(main, None).unwrap();
    let basket = world.basket(1).unwrap();
    assert_eq!(basket.status, BasketStatus::Empty);
    assert!(basket.instance.is_none());
    assert_eq!(world.game_state.mistakes, 0);
}

#[test]
fn test_forgotten_basket_burns() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(TONKATSU).unwrap();
    let main = main_of(&world, &instances);
    assert!(world.move_bundle(main, Destination::FryerBasket(2)));
    world
        .add_ingredient_to_basket(2, IngredientSource::Inventory(PATTY_STOCK), 1.0, None)
        .unwrap();
    world.submerge_basket(2).unwrap();

    let mut events = Vec::new();
    for _ in 0..250 {
        events.extend(world.tick(1.0));
    }
    assert!(events.contains(&KitchenEvent::Fryer(2, FryerTransition::Done)));
    assert!(events.contains(&KitchenEvent::Fryer(2, FryerTransition::Burned)));
    assert_eq!(world.basket(2).unwrap().status, BasketStatus::Burned);
    assert!(world.instance(main).unwrap().is_burned);
    assert_eq!(world.game_state.mistakes, 1);

    assert_eq!(world.clear_basket(1), Err(KitchenError::BasketNotBurned(1)));
    world.clear_basket(2).unwrap();
    assert_eq!(world.basket(2).unwrap().status, BasketStatus::Empty);
    let ruined = world.instance(main).unwrap();
    assert_eq!(ruined.location, Location::NotAssigned);
    assert!(ruined.ingredients.is_empty());
}

#[test]
fn test_fryer_timer_is_clamped() {
    let mut world = sample_world();
    assert_eq!(world.set_basket_timer(1, 180).unwrap(), 180);
    assert_eq!(world.adjust_basket_timer(1, 1).unwrap(), 195);
    assert_eq!(world.adjust_basket_timer(1, -2).unwrap(), 165);
    assert_eq!(world.set_basket_timer(1, 10_000).unwrap(), FRY_TIMER_MAX);
    assert_eq!(world.set_basket_timer(1, 0).unwrap(), FRY_TIMER_MIN);
    assert_eq!(world.adjust_basket_timer(1, -100).unwrap(), FRY_TIMER_MIN);
    assert_eq!(world.set_basket_timer(7, 60), Err(KitchenError::UnknownBasket(7)));
}

#[test]
fn test_instance_has_one_location() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(TONKATSU).unwrap();
    let main = main_of(&world, &instances);

    assert!(world.move_bundle(main, Destination::Burner(1)));
    assert!(world.move_bundle(main, Destination::FryerBasket(1)));
    assert!(world.burner(1).unwrap().is_free());
    assert_eq!(world.basket(1).unwrap().instance, Some(main));
    assert_eq!(world.instance(main).unwrap().location, Location::FryerBasket(1));

    // Occupied destinations refuse and leave the instance where it was
    let (_, other) = world.accept_order(TONKATSU).unwrap();
    let other_main = main_of(&world, &other);
    assert!(!world.move_bundle(other_main, Destination::FryerBasket(1)));
    assert_eq!(world.instance(other_main).unwrap().location, Location::NotAssigned);

    assert!(world.move_bundle(main, Destination::NotAssigned));
    assert!(world.basket(1).unwrap().instance.is_none());
    assert!(world.ownership_violations().is_empty());
}

#[test]
fn test_served_instances_can_no_longer_move() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    assert!(world.move_bundle(instances[0], Destination::Staged));
    let before = world.instances().len();

    let (_, ghost) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    let staged = world.setting_bundles();
    assert_eq!(staged.len(), 1);
    assert!(world.move_bundle(ghost[0], Destination::Burner(1)));
    world
        .add_ingredient_to_burner(1, IngredientSource::Inventory(RICE_STOCK), 200.0)
        .unwrap();
    world.plate_bundle(ghost[0], None).unwrap();
    world
        .apply_deco_item(ghost[0], GridPosition::CENTER, DecoIngredientRef::DecoItem(PARSLEY), 1.0)
        .unwrap();
    assert!(world.serve_bundle(ghost[0]));

    assert!(!world.move_bundle(ghost[0], Destination::Burner(1)));
    assert_eq!(world.instances().len(), before);
    assert!(world.burner(1).unwrap().is_free());
}

#[test]
fn test_counter_prep_only_off_equipment() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(TONKATSU).unwrap();
    let main = main_of(&world, &instances);
    assert!(world.move_bundle(main, Destination::FryerBasket(1)));

    assert_eq!(
        world.add_ingredient_to_bundle(main, IngredientSource::Inventory(PATTY_STOCK), 1.0),
        Err(KitchenError::NotOnCounter(main))
    );

    let cabbage = world.pull_from_inventory(CABBAGE_STOCK, 80.0).unwrap();
    let side = side_of(&world, &instances);
    world
        .add_ingredient_to_bundle(side, IngredientSource::Setting(cabbage), 50.0)
        .unwrap();
    assert_eq!(world.instance(side).unwrap().available_amount(), 50.0);
    assert_eq!(world.setting().get(cabbage).unwrap().available_amount(), 30.0);
    assert_eq!(
        world.add_ingredient_to_bundle(side, IngredientSource::Setting(cabbage), 40.0),
        Err(KitchenError::InsufficientAmount {
            available: 30.0,
            requested: 40.0
        })
    );
}

#[test]
fn test_burned_basket_holds_its_food_until_cleared() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(TONKATSU).unwrap();
    let main = main_of(&world, &instances);
    assert!(world.move_bundle(main, Destination::FryerBasket(1)));
    world
        .add_ingredient_to_basket(1, IngredientSource::Inventory(PATTY_STOCK), 1.0, Some(FRY_TIMER_MIN))
        .unwrap();
    world.submerge_basket(1).unwrap();
    for _ in 0..100 {
        world.tick(1.0);
    }
    assert_eq!(world.basket(1).unwrap().status, BasketStatus::Burned);
    world.lift_basket(1).unwrap();

    assert!(!world.move_bundle(main, Destination::Staged));
    assert_eq!(world.plate_bundle(main, None), Err(KitchenError::BasketBurned(1)));
    let basket = world.basket(1).unwrap();
    assert_eq!(basket.status, BasketStatus::Burned);
    assert_eq!(basket.instance, Some(main));
    assert!(!world.serve_bundle(main));
    assert_eq!(world.game_state.plates_served, 0);

    world.clear_basket(1).unwrap();
    assert_eq!(world.basket(1).unwrap().status, BasketStatus::Empty);
    assert!(!world.instance(main).unwrap().is_burned);
    assert!(world.move_bundle(main, Destination::FryerBasket(1)));
    assert!(world.ownership_violations().is_empty());
}

#[test]
fn test_burned_wok_holds_its_food_until_washed() {
    let mut world = sample_world();
    let (_, instances) = world.accept_order(KIMCHI_FRIED_RICE).unwrap();
    let main = instances[0];
    assert!(world.move_bundle(main, Destination::Burner(1)));
    world
        .add_ingredient_to_burner(1, IngredientSource::Inventory(RICE_STOCK), 200.0)
        .unwrap();
    for _ in 0..120 {
        world.tick(1.0);
    }
    assert_eq!(world.burner(1).unwrap().state, WokState::Burned);

    assert!(!world.move_bundle(main, Destination::NotAssigned));
    assert!(!world.move_bundle(main, Destination::Burner(2)));
    assert_eq!(world.plate_bundle(main, None), Err(KitchenError::BurnerBurned(1)));
    assert_eq!(world.burner(1).unwrap().instance, Some(main));
    assert_eq!(world.instance(main).unwrap().location, Location::Burner(1));
    assert!(!world.serve_bundle(main));

    world.wash_wok(1).unwrap();
    world.plate_bundle(main, None).unwrap();
    assert!(world.burner(1).unwrap().is_free());
    assert!(world.ownership_violations().is_empty());
}
