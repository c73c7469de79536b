//! Shared fixtures built on the bundled sample kitchen
#![allow(dead_code)]

use kitchen_sim::simulation::{
    Difficulty, IngredientId, IngredientSource, InstanceId, JsonBackend, KitchenWorld,
    RecipeId, SimConfig,
};

pub const KIMCHI_FRIED_RICE: RecipeId = RecipeId(1);
pub const TONKATSU: RecipeId = RecipeId(2);
pub const COLD_BUCKWHEAT: RecipeId = RecipeId(3);

pub const PARSLEY: IngredientId = IngredientId(501);
pub const SESAME: IngredientId = IngredientId(502);
pub const SEAWEED: IngredientId = IngredientId(503);

pub const RICE_STOCK: IngredientId = IngredientId(1101);
pub const KIMCHI_STOCK: IngredientId = IngredientId(1102);
pub const PATTY_STOCK: IngredientId = IngredientId(1103);
pub const CABBAGE_STOCK: IngredientId = IngredientId(1104);
pub const SAUCE_STOCK: IngredientId = IngredientId(1105);

pub fn sample_world() -> KitchenWorld {
    let backend = JsonBackend::sample().expect("sample data parses");
    KitchenWorld::from_backend(&backend, 1, SimConfig::default()).expect("sample store loads")
}

pub fn sample_world_at(difficulty: Difficulty) -> KitchenWorld {
    sample_world().with_difficulty(difficulty)
}

pub fn main_of(world: &KitchenWorld, instances: &[InstanceId]) -> InstanceId {
    *instances
        .iter()
        .find(|&&id| world.instance(id).unwrap().is_main_dish)
        .expect("order has a main dish")
}

pub fn side_of(world: &KitchenWorld, instances: &[InstanceId]) -> InstanceId {
    *instances
        .iter()
        .find(|&&id| !world.instance(id).unwrap().is_main_dish)
        .expect("order has a side bundle")
}

/// Accept an order and plate its main dish straight away
pub fn plated_main(world: &mut KitchenWorld, recipe: RecipeId) -> (InstanceId, Vec<InstanceId>) {
    let (_, instances) = world.accept_order(recipe).unwrap();
    let main = main_of(world, &instances);
    world.plate_bundle(main, None).unwrap();
    (main, instances)
}

/// Stage the tonkatsu side salad with `grams` of cabbage in it
pub fn staged_salad(world: &mut KitchenWorld, instances: &[InstanceId], grams: f64) -> InstanceId {
    let side = side_of(world, instances);
    assert!(world.stage_bundle(side));
    world
        .add_ingredient_to_bundle(side, IngredientSource::Inventory(CABBAGE_STOCK), grams)
        .unwrap();
    side
}
