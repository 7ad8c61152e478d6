use rand::Rng;
use serde::Serialize;

use crate::brain::Brain;
use crate::config::TrainingConfig;
use crate::error::{Result, SnakeError};
use crate::game::GameState;
use crate::game_input::{GameInput, Stimuli};

/// Plays games with a weight vector and turns the outcome into a fitness.
/// Scores are negative body lengths, so lower is better.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Evaluator {
    pub board_size: i32,
    pub max_steps: usize,
    pub stall_steps: Option<usize>,
    pub plays: usize,
}

impl Evaluator {
    pub fn new(board_size: i32, max_steps: usize, stall_steps: Option<usize>, plays: usize) -> Result<Self> {
        let config = TrainingConfig {
            board_size,
            max_steps,
            stall_steps,
            plays,
            ..TrainingConfig::default()
        };
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    /// Expects a config that already passed `validate`.
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            board_size: config.board_size,
            max_steps: config.max_steps,
            stall_steps: config.stall_steps,
            plays: config.plays,
        }
    }

    /// One game to termination or the step cap.
    pub fn evaluate_once<R: Rng + ?Sized>(&self, weights: &[f32], rng: &mut R) -> Result<i64> {
        let brain = Brain::new(weights)?;
        let last = self.play(&brain, rng, |_, _| {})?;
        Ok(score(&last))
    }

    /// Mean score over `plays` independent games.
    pub fn evaluate_repeated<R: Rng + ?Sized>(&self, weights: &[f32], rng: &mut R) -> Result<f64> {
        if self.plays == 0 {
            return Err(SnakeError::invalid("plays", "must be positive"));
        }
        let brain = Brain::new(weights)?;
        let mut total = 0i64;
        for _ in 0..self.plays {
            total += score(&self.play(&brain, rng, |_, _| {})?);
        }
        let fitness = total as f64 / self.plays as f64;
        log::trace!("evaluated {} games, fitness {:.3}", self.plays, fitness);
        Ok(fitness)
    }

    /// One game with every frame and its stimuli kept.
    pub fn play_recorded<R: Rng + ?Sized>(&self, weights: &[f32], rng: &mut R) -> Result<GameTrace> {
        let brain = Brain::new(weights)?;
        let mut states = Vec::new();
        let mut stimuli = Vec::new();
        self.play(&brain, rng, |state, input| {
            states.push(state.clone());
            stimuli.push(*input);
        })?;
        Ok(GameTrace { states, stimuli })
    }

    fn play<R, F>(&self, brain: &Brain, rng: &mut R, mut observe: F) -> Result<GameState>
    where
        R: Rng + ?Sized,
        F: FnMut(&GameState, &Stimuli),
    {
        let mut game = GameState::init(self.board_size, rng)?;
        let mut steps = 0;
        let mut steps_since_eat = 0;

        loop {
            let input = GameInput::from_game(&game);
            observe(&game, &input);
            if !game.is_live() || steps >= self.max_steps {
                break;
            }
            if self.stall_steps.is_some_and(|limit| steps_since_eat >= limit) {
                break;
            }

            let next = game.advance(brain.decide(&input), rng);
            steps += 1;
            if next.body.len() > game.body.len() {
                steps_since_eat = 0;
            } else {
                steps_since_eat += 1;
            }
            game = next;
        }
        Ok(game)
    }
}

pub fn score(state: &GameState) -> i64 {
    -(state.body.len() as i64)
}

/// Frames of one game from the first to the terminal one, with the stimuli
/// the network saw at each of them.
#[derive(Clone, Debug, Serialize)]
pub struct GameTrace {
    states: Vec<GameState>,
    stimuli: Vec<Stimuli>,
}

impl GameTrace {
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    pub fn stimuli(&self) -> &[Stimuli] {
        &self.stimuli
    }

    pub fn final_state(&self) -> &GameState {
        // play always records the initial frame
        &self.states[self.states.len() - 1]
    }

    /// number of moves made
    pub fn steps(&self) -> usize {
        self.states.len() - 1
    }

    pub fn score(&self) -> i64 {
        score(self.final_state())
    }
}
