use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::TrainingConfig;
use crate::error::{Result, SnakeError};
use crate::fitness::Evaluator;
use crate::genome::Genome;
use crate::utils::vec_stats;

#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    pub genome: Genome,
    /// `None` until evaluated; lower is better
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Self { genome, fitness: None }
    }

    fn sort_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }
}

/// Summary line of one evaluated generation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub min_fitness: f64,
    pub mean_fitness: f64,
    pub max_fitness: f64,
}

/// One generation. Every `evolve` builds a fresh one; the old one stays intact.
#[derive(Clone, Debug)]
pub struct Population {
    pub individuals: Vec<Individual>,
    pub generation: u32,
}

impl Population {
    pub fn new_random<R: Rng + ?Sized>(size: usize, genome_len: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(SnakeError::invalid("population_size", "must be positive"));
        }
        let individuals = (0..size)
            .map(|_| Genome::random(genome_len, rng).map(Individual::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            individuals,
            generation: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Scores every member that has no fitness yet, in parallel.
    /// Each member plays on its own stream seeded from `rng`, so the result
    /// does not depend on how rayon schedules the work.
    pub fn evaluate<R: Rng + ?Sized>(mut self, evaluator: &Evaluator, rng: &mut R) -> Result<Self> {
        let seeds: Vec<u64> = self.individuals.iter().map(|_| rng.r#gen()).collect();
        let pending = self.individuals.iter().filter(|i| i.fitness.is_none()).count();

        self.individuals
            .par_iter_mut()
            .zip(seeds)
            .filter(|(ind, _)| ind.fitness.is_none())
            .try_for_each(|(ind, seed)| {
                let mut stream = ChaCha8Rng::seed_from_u64(seed);
                ind.fitness = Some(evaluator.evaluate_repeated(&ind.genome.weights, &mut stream)?);
                Ok::<(), SnakeError>(())
            })?;

        log::debug!(
            "generation {}: evaluated {} of {} individuals",
            self.generation,
            pending,
            self.len()
        );
        Ok(self)
    }

    /// Best `ceil(len * keep_fraction)` members, ascending by fitness, fitness kept.
    pub fn select_survivors(&self, keep_fraction: f64) -> Vec<Individual> {
        let keep = survivor_count(self.len(), keep_fraction);
        let mut ranked = self.individuals.clone();
        ranked.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
        ranked.truncate(keep);
        ranked
    }

    /// Next generation: survivors carried over as they are, the rest filled
    /// with mutated crossovers of two survivors. Children are unevaluated.
    pub fn evolve<R: Rng + ?Sized>(&self, config: &TrainingConfig, rng: &mut R) -> Result<Population> {
        if self.is_empty() {
            return Err(SnakeError::invalid("population_size", "no survivors to breed from"));
        }
        let noise = Genome::mutation_noise(config.mutation_scale)?;
        let survivors = self.select_survivors(config.keep_fraction);

        let mut new_gen = survivors.clone();
        while new_gen.len() < self.len() {
            let (parent1, parent2) = pick_parents(&survivors, rng);
            let mut child = Genome::crossover(&parent1.genome, &parent2.genome, rng);
            child.apply_noise(config.mutation_rate, &noise, rng);
            new_gen.push(Individual::new(child));
        }

        Ok(Population {
            individuals: new_gen,
            generation: self.generation + 1,
        })
    }

    /// Lowest fitness among evaluated members.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|i| i.fitness.is_some())
            .min_by(|a, b| a.sort_key().total_cmp(&b.sort_key()))
    }

    pub fn stats(&self) -> GenerationStats {
        let fitness: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();
        let stats = vec_stats(&fitness);
        GenerationStats {
            generation: self.generation,
            min_fitness: stats.min,
            mean_fitness: stats.mean,
            max_fitness: stats.max,
        }
    }
}

/// `ceil(size * keep_fraction)` clamped to `1..=size`.
pub fn survivor_count(size: usize, keep_fraction: f64) -> usize {
    if size == 0 {
        return 0;
    }
    let keep = (size as f64 * keep_fraction).ceil();
    if keep.is_nan() { 1 } else { (keep as usize).clamp(1, size) }
}

/// Two distinct survivors when there are at least two.
fn pick_parents<'a, R: Rng + ?Sized>(survivors: &'a [Individual], rng: &mut R) -> (&'a Individual, &'a Individual) {
    let picked: Vec<&Individual> = survivors.choose_multiple(rng, 2).collect();
    match picked.as_slice() {
        [a, b] => (*a, *b),
        _ => (&survivors[0], &survivors[0]),
    }
}
