use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};
use crate::game::MIN_BOARD_SIZE;

const POP_SIZE: usize = 200;
const KEEP_FRACTION: f64 = 0.1;
const MUTATION_RATE: f64 = 0.1;
const MUTATION_SCALE: f64 = 0.2;
const BOARD_SIZE: i32 = 11;
const PLAYS: usize = 5;
const MAX_STEPS: usize = 10_000;
const STALL_STEPS: usize = 1_000;

/// Everything a training run needs. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub population_size: usize,
    /// share of each generation kept as parents
    pub keep_fraction: f64,
    /// per-weight probability of a gaussian nudge
    pub mutation_rate: f64,
    /// std-dev of that nudge
    pub mutation_scale: f64,
    pub board_size: i32,
    /// games averaged into one fitness value
    pub plays: usize,
    pub max_steps: usize,
    /// end a game early after this many steps without eating
    pub stall_steps: Option<usize>,
    pub seed: Option<u64>,
    /// stop once the best fitness is at or below this
    pub target_fitness: Option<f64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: POP_SIZE,
            keep_fraction: KEEP_FRACTION,
            mutation_rate: MUTATION_RATE,
            mutation_scale: MUTATION_SCALE,
            board_size: BOARD_SIZE,
            plays: PLAYS,
            max_steps: MAX_STEPS,
            stall_steps: Some(STALL_STEPS),
            seed: None,
            target_fitness: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SnakeError::invalid("population_size", "must be positive"));
        }
        if !(self.keep_fraction > 0.0 && self.keep_fraction <= 1.0) {
            return Err(SnakeError::invalid(
                "keep_fraction",
                format!("must be in (0, 1], got {}", self.keep_fraction),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SnakeError::invalid(
                "mutation_rate",
                format!("must be in [0, 1], got {}", self.mutation_rate),
            ));
        }
        if !(self.mutation_scale.is_finite() && self.mutation_scale >= 0.0) {
            return Err(SnakeError::invalid(
                "mutation_scale",
                format!("must be finite and non-negative, got {}", self.mutation_scale),
            ));
        }
        if self.board_size < MIN_BOARD_SIZE {
            return Err(SnakeError::invalid(
                "board_size",
                format!("must be at least {MIN_BOARD_SIZE}, got {}", self.board_size),
            ));
        }
        if self.plays == 0 {
            return Err(SnakeError::invalid("plays", "must be positive"));
        }
        if self.max_steps == 0 {
            return Err(SnakeError::invalid("max_steps", "must be positive"));
        }
        if self.stall_steps == Some(0) {
            return Err(SnakeError::invalid("stall_steps", "must be positive when set"));
        }
        if self.target_fitness.is_some_and(f64::is_nan) {
            return Err(SnakeError::invalid("target_fitness", "is NaN"));
        }
        Ok(())
    }
}
