use std::time::Instant;

use rand_chacha::ChaCha8Rng;

use crate::brain::Brain;
use crate::config::TrainingConfig;
use crate::error::Result;
use crate::evolution::{GenerationStats, Individual, Population};
use crate::fitness::Evaluator;
use crate::utils::seeded_rng;

/// Generational loop, driven one evaluated generation per `next()`.
///
/// Generation 0 is the random initial population. The iterator ends after
/// the requested number of generations, once `target_fitness` is reached, or
/// right after yielding an error.
pub struct Trainer {
    config: TrainingConfig,
    evaluator: Evaluator,
    rng: ChaCha8Rng,
    population: Option<Population>,
    remaining: usize,
    finished: bool,
}

impl Trainer {
    pub fn new(config: TrainingConfig, generations: usize) -> Result<Self> {
        config.validate()?;
        let evaluator = Evaluator::from_config(&config);
        let rng = seeded_rng(config.seed);
        Ok(Self {
            config,
            evaluator,
            rng,
            population: None,
            remaining: generations,
            finished: false,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Latest evaluated generation.
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn best(&self) -> Option<&Individual> {
        self.population.as_ref().and_then(Population::best)
    }

    fn step(&mut self) -> Result<GenerationStats> {
        let start_time = Instant::now();
        let next = match self.population.take() {
            None => Population::new_random(self.config.population_size, Brain::total_weights(), &mut self.rng)?,
            Some(current) => current.evolve(&self.config, &mut self.rng)?,
        };
        let next = next.evaluate(&self.evaluator, &mut self.rng)?;
        let stats = next.stats();

        log::info!(
            "Gen {:>4} | Best Fit: {:>7.2} | Mean Fit: {:>7.2} | Worst Fit: {:>7.2} | Time: {:?}",
            stats.generation,
            stats.min_fitness,
            stats.mean_fitness,
            stats.max_fitness,
            start_time.elapsed()
        );

        self.population = Some(next);
        Ok(stats)
    }

    fn reached_target(&self, stats: &GenerationStats) -> bool {
        self.config.target_fitness.is_some_and(|target| stats.min_fitness <= target)
    }
}

impl Iterator for Trainer {
    type Item = Result<GenerationStats>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        match self.step() {
            Ok(stats) => {
                if self.reached_target(&stats) {
                    log::info!("target fitness reached at generation {}", stats.generation);
                    self.finished = true;
                }
                Some(Ok(stats))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Fresh run of at most `generations` generations; nothing carries over between calls.
pub fn run_generations(config: TrainingConfig, generations: usize) -> Result<Trainer> {
    Trainer::new(config, generations)
}
