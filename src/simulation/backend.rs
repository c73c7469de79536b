//! Backend collaborator boundary
//!
//! The hosted database is reached through [`KitchenBackend`]. Failures here
//! are ordinary `anyhow` errors for the caller to surface; they never touch
//! simulation state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::game_state::ScoreRecord;
use super::inventory::Inventory;
use super::layout::KitchenLayout;
use super::recipe::{DecoIngredient, Recipe, RecipeBook};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: u64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub store_id: u64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Everything the backend holds for one store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreData {
    pub store: Store,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub deco_ingredients: Vec<DecoIngredient>,
    pub layout: KitchenLayout,
    #[serde(default)]
    pub inventory: Inventory,
}

/// Queries and writes the simulation needs from the backend
pub trait KitchenBackend {
    fn find_store(&self, code: &str) -> Result<Store>;
    fn find_user(&self, store_id: u64, code: &str) -> Result<User>;
    fn list_users(&self, store_id: u64) -> Result<Vec<User>>;
    fn fetch_recipe_book(&self, store_id: u64) -> Result<RecipeBook>;
    fn fetch_layout(&self, store_id: u64) -> Result<KitchenLayout>;
    fn fetch_inventory(&self, store_id: u64) -> Result<Inventory>;
    fn record_score(&mut self, record: ScoreRecord) -> Result<()>;
}

/// Backend served from JSON data held in memory
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    stores: Vec<StoreData>,
    scores: Vec<ScoreRecord>,
}

#[derive(Deserialize)]
struct BackendFile {
    stores: Vec<StoreData>,
}

/// Bundled demo store used by the headless runner and tests
const SAMPLE_DATA: &str = include_str!("../../data/sample_store.json");

impl JsonBackend {
    pub fn new(stores: Vec<StoreData>) -> Self {
        Self {
            stores,
            scores: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: BackendFile = serde_json::from_str(json).context("Invalid backend data")?;
        Ok(Self::new(file.stores))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read backend data {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("While loading {}", path.display()))
    }

    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_DATA)
    }

    /// Scores written so far
    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    fn store_data(&self, store_id: u64) -> Result<&StoreData> {
        self.stores
            .iter()
            .find(|s| s.store.id == store_id)
            .with_context(|| format!("Store {store_id} not found"))
    }
}

impl KitchenBackend for JsonBackend {
    fn find_store(&self, code: &str) -> Result<Store> {
        self.stores
            .iter()
            .map(|s| &s.store)
            .find(|s| s.code == code)
            .cloned()
            .with_context(|| format!("No store with code '{code}'"))
    }

    fn find_user(&self, store_id: u64, code: &str) -> Result<User> {
        self.store_data(store_id)?
            .users
            .iter()
            .find(|u| u.code == code)
            .cloned()
            .with_context(|| format!("No user '{code}' in store {store_id}"))
    }

    fn list_users(&self, store_id: u64) -> Result<Vec<User>> {
        Ok(self.store_data(store_id)?.users.clone())
    }

    fn fetch_recipe_book(&self, store_id: u64) -> Result<RecipeBook> {
        let data = self.store_data(store_id)?;
        Ok(RecipeBook::new(data.recipes.clone(), data.deco_ingredients.clone()))
    }

    fn fetch_layout(&self, store_id: u64) -> Result<KitchenLayout> {
        Ok(self.store_data(store_id)?.layout.clone())
    }

    fn fetch_inventory(&self, store_id: u64) -> Result<Inventory> {
        Ok(self.store_data(store_id)?.inventory.clone())
    }

    fn record_score(&mut self, record: ScoreRecord) -> Result<()> {
        self.scores.push(record);
        Ok(())
    }
}
