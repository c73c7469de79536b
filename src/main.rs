use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use kitchen_sim::simulation::{
    CookingAction, DecoSelection, Destination, Difficulty, GridPosition, IngredientId,
    IngredientSource, InstanceId, JsonBackend, KitchenBackend, KitchenWorld, RecipeId, SimConfig,
};

#[derive(Parser)]
#[command(name = "kitchen_sim")]
#[command(about = "Kitchen training simulator, headless shift")]
struct Cli {
    /// Tick budget for the whole shift
    #[arg(long, default_value = "5000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Difficulty tier (beginner, intermediate, advanced)
    #[arg(long, default_value = "beginner")]
    difficulty: Difficulty,

    /// Seed for the order generator
    #[arg(long)]
    seed: Option<u64>,

    /// Store data JSON file; the bundled sample kitchen when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Store code to load from the data
    #[arg(long, default_value = "GANGNAM")]
    store: String,

    /// Simulation config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    let mut backend = match &cli.data {
        Some(path) => JsonBackend::from_json_file(path)?,
        None => JsonBackend::sample()?,
    };

    run_headless(&cli, &mut backend, config)
}

/// Drives the world tick by tick within a fixed budget
struct Shift {
    world: KitchenWorld,
    delta: f32,
    ticks_left: u32,
}

impl Shift {
    /// Advance roughly `secs` of simulated time
    fn run_for(&mut self, secs: f32) {
        let wanted = (secs / self.delta).ceil() as u32;
        for _ in 0..wanted.min(self.ticks_left) {
            self.world.tick(self.delta);
            self.ticks_left -= 1;
        }
    }

    /// Tick until `done` holds or `max_secs` pass; returns whether it held
    fn run_until(&mut self, max_secs: f32, done: impl Fn(&KitchenWorld) -> bool) -> bool {
        let mut remaining = (max_secs / self.delta).ceil() as u32;
        while !done(&self.world) {
            if remaining == 0 || self.ticks_left == 0 {
                return false;
            }
            self.world.tick(self.delta);
            self.ticks_left -= 1;
            remaining -= 1;
        }
        true
    }
}

/// Run the scripted shift in headless mode (no UI)
fn run_headless(cli: &Cli, backend: &mut JsonBackend, config: SimConfig) -> Result<()> {
    ensure!(cli.delta > 0.0, "--delta must be positive, got {}", cli.delta);
    let store = backend.find_store(&cli.store)?;
    info!("Running kitchen shift for {} ({})", store.name, store.code);
    info!(
        "Ticks: {}, Delta: {}s, Difficulty: {:?}",
        cli.ticks, cli.delta, cli.difficulty
    );

    let mut world = KitchenWorld::from_backend(&*backend, store.id, config)
        .with_context(|| format!("Failed to set up store {}", store.code))?
        .with_difficulty(cli.difficulty);
    if let Some(seed) = cli.seed {
        world = world.with_seed(seed);
    }

    let mut shift = Shift {
        world,
        delta: cli.delta,
        ticks_left: cli.ticks,
    };

    if let Err(err) = cook_kimchi_fried_rice(&mut shift) {
        warn!("Kimchi fried rice not served: {:#}", err);
    }
    if let Err(err) = fry_tonkatsu(&mut shift) {
        warn!("Tonkatsu not served: {:#}", err);
    }

    match shift.world.accept_random_order() {
        Ok((order_id, _)) => info!("Next ticket on the rail: {}", order_id),
        Err(err) => warn!("No next ticket: {}", err),
    }
    let idle = shift.ticks_left;
    shift.run_for(idle as f32 * shift.delta);

    for record in shift.world.take_score_records() {
        backend.record_score(record)?;
    }

    let state = &shift.world.game_state;
    info!("=== SHIFT COMPLETE ===");
    info!("Simulated time: {:.1}s", shift.world.time);
    info!("Plates served: {}", state.plates_served);
    info!("Mistakes: {}", state.mistakes);
    info!("Warnings: {}", state.warnings);
    info!("Score: {}", state.score);
    info!("Scores recorded: {}", backend.scores().len());

    shift.world.print_summary();
    Ok(())
}

/// Wok dish: cook, cool the wok when it overheats, plate and garnish
fn cook_kimchi_fried_rice(shift: &mut Shift) -> Result<()> {
    info!("=== KIMCHI FRIED RICE ===");
    let world = &mut shift.world;
    let (_, instances) = world.accept_order(RecipeId(1))?;
    let main = main_instance(world, &instances)?;

    ensure!(world.move_bundle(main, Destination::Burner(1)), "burner 1 is not free");
    world.add_ingredient_to_burner(1, IngredientSource::Inventory(IngredientId(1101)), 200.0)?;
    world.add_ingredient_to_burner(1, IngredientSource::Inventory(IngredientId(1102)), 50.0)?;
    world.perform_wok_action(1, CookingAction::StirFry)?;

    if shift.run_until(30.0, |w| !w.overheat_alert().is_empty()) {
        shift.world.perform_wok_action(1, CookingAction::AddWater)?;
    }
    shift.run_for(2.0);

    let world = &mut shift.world;
    world.plate_bundle(main, None)?;
    world.select_deco_ingredient(DecoSelection::DecoItem(IngredientId(501)))?;
    world.place_selected(main, GridPosition::CENTER, None)?;
    ensure!(world.serve_bundle(main), "plate is not complete");
    Ok(())
}

/// Fryer dish with a merged side salad and staged sauce
fn fry_tonkatsu(shift: &mut Shift) -> Result<()> {
    info!("=== TONKATSU ===");
    let world = &mut shift.world;
    let (_, instances) = world.accept_order(RecipeId(2))?;
    let main = main_instance(world, &instances)?;
    let side = instances
        .iter()
        .copied()
        .find(|&id| id != main)
        .context("order has no side bundle")?;

    ensure!(world.move_bundle(main, Destination::FryerBasket(1)), "basket 1 is not free");
    world.add_ingredient_to_basket(1, IngredientSource::Inventory(IngredientId(1103)), 1.0, None)?;
    world.submerge_basket(1)?;

    ensure!(world.move_bundle(side, Destination::Staged), "could not stage the salad");
    world.add_ingredient_to_bundle(side, IngredientSource::Inventory(IngredientId(1104)), 60.0)?;
    let sauce = world.pull_from_inventory(IngredientId(1105), 30.0)?;

    let timer = world.basket(1).map_or(0, |b| b.timer_secs) as f32;
    ensure!(
        shift.run_until(timer + 1.0, |w| w.basket(1).is_some_and(|b| b.is_done)),
        "ran out of time before the basket finished"
    );

    let world = &mut shift.world;
    world.lift_basket(1)?;
    world.plate_bundle(main, None)?;

    world.select_deco_ingredient(DecoSelection::Bundle(side))?;
    let cell = GridPosition::new(3).context("bad grid cell")?;
    world.place_selected(main, cell, None)?;

    world.select_deco_ingredient(DecoSelection::SettingItem(sauce))?;
    world.place_selected(main, GridPosition::CENTER, None)?;

    world.select_deco_ingredient(DecoSelection::DecoItem(IngredientId(502)))?;
    world.place_selected(main, GridPosition::CENTER, None)?;

    ensure!(world.serve_bundle(main), "plate is not complete");
    Ok(())
}

fn main_instance(world: &KitchenWorld, instances: &[InstanceId]) -> Result<InstanceId> {
    instances
        .iter()
        .copied()
        .find(|&id| world.instance(id).is_some_and(|i| i.is_main_dish))
        .context("order has no main dish")
}
