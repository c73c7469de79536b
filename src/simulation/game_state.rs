//! Session scoring for the kitchen trainer
//!
//! Tracks the trainee's difficulty tier, mistakes, warnings and served plates.
//! Whether a given mistake costs anything is decided by a [`PenaltyPolicy`]
//! so tier-specific rules stay out of the plating engine.

use serde::{Deserialize, Serialize};

use super::types::{Difficulty, OrderId, RecipeId};

/// Kinds of trainee mistakes the simulation can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MistakeKind {
    /// Ingredient has no decoration step on this dish
    UnmatchedIngredient,
    /// Decoration placed in the wrong grid cell
    WrongPosition,
    /// Decoration placed before an earlier step was finished
    OutOfOrder,
    /// Food burned on a wok or in the fryer
    Burned,
}

/// Maps a mistake and difficulty tier to a penalty in mistake units
pub trait PenaltyPolicy {
    fn penalty(&self, kind: MistakeKind, tier: Difficulty) -> u32;
}

/// Standard scoring: order errors are free at the beginner tier
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPenaltyPolicy;

impl PenaltyPolicy for DefaultPenaltyPolicy {
    fn penalty(&self, kind: MistakeKind, tier: Difficulty) -> u32 {
        match (kind, tier) {
            (MistakeKind::OutOfOrder, Difficulty::Beginner) => 0,
            _ => 1,
        }
    }
}

impl<F> PenaltyPolicy for F
where
    F: Fn(MistakeKind, Difficulty) -> u32,
{
    fn penalty(&self, kind: MistakeKind, tier: Difficulty) -> u32 {
        self(kind, tier)
    }
}

/// Result of a serve, written to the backend as the session score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub session_id: String,
    pub order_id: OrderId,
    pub recipe_id: RecipeId,
    pub menu_name: String,
    pub score: i32,
    pub mistakes: u32,
    pub elapsed_secs: f32,
}

/// Game state that tracks trainee progress
#[derive(Debug, Clone)]
pub struct GameState {
    pub session_id: String,

    pub difficulty: Difficulty,

    /// Total penalty units charged so far
    pub mistakes: u32,

    /// Warnings shown without a penalty (e.g. order errors at beginner tier)
    pub warnings: u32,

    /// Running score
    pub score: i32,

    /// Number of plates served
    pub plates_served: usize,

    /// Session time in seconds
    pub time: f32,

    /// Scores not yet handed to the backend
    pending_records: Vec<ScoreRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            session_id: String::from("local"),
            difficulty,
            mistakes: 0,
            warnings: 0,
            score: 0,
            plates_served: 0,
            time: 0.0,
            pending_records: Vec::new(),
        }
    }

    /// Charge a mistake through `policy`
    /// Returns the penalty applied; zero means it was only a warning
    pub fn record_mistake(&mut self, kind: MistakeKind, policy: &dyn PenaltyPolicy, score_per_mistake: i32) -> u32 {
        let penalty = policy.penalty(kind, self.difficulty);
        if penalty == 0 {
            self.warnings += 1;
        } else {
            self.mistakes += penalty;
            self.score -= score_per_mistake * penalty as i32;
        }
        penalty
    }

    /// Record a served plate and queue its score record
    pub fn record_serve(
        &mut self,
        order_id: OrderId,
        recipe_id: RecipeId,
        menu_name: &str,
        points: i32,
    ) -> &ScoreRecord {
        self.plates_served += 1;
        self.score += points;
        self.pending_records.push(ScoreRecord {
            session_id: self.session_id.clone(),
            order_id,
            recipe_id,
            menu_name: menu_name.to_string(),
            score: points,
            mistakes: self.mistakes,
            elapsed_secs: self.time,
        });
        &self.pending_records[self.pending_records.len() - 1]
    }

    /// Drain queued score records for the backend
    pub fn take_score_records(&mut self) -> Vec<ScoreRecord> {
        std::mem::take(&mut self.pending_records)
    }

    pub fn update(&mut self, delta_secs: f32) {
        self.time += delta_secs;
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Difficulty: {:?} | Served: {} | Mistakes: {} | Warnings: {} | Score: {} | Time: {:.1}s",
            self.difficulty, self.plates_served, self.mistakes, self.warnings, self.score, self.time
        )
    }
}
