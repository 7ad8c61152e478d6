use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::error::{Result, SnakeError};

/// One individual's flat weight vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    pub weights: Vec<f32>,
}

impl Genome {
    //standard normal per weight
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self> {
        if len == 0 {
            return Err(SnakeError::invalid("parameters", "vector length must be positive"));
        }
        let weights = (0..len).map(|_| StandardNormal.sample(rng)).collect();
        Ok(Self { weights })
    }

    ///single-point splice: `a[..cut] ++ b[cut..]` with `cut` uniform in `0..=len`
    pub fn crossover<R: Rng + ?Sized>(parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Self {
        debug_assert_eq!(parent_a.weights.len(), parent_b.weights.len());
        let cutoff = rng.gen_range(0..=parent_a.weights.len());
        Self::splice(parent_a, parent_b, cutoff)
    }

    fn splice(parent_a: &Genome, parent_b: &Genome, cutoff: usize) -> Self {
        let mut weights = Vec::with_capacity(parent_a.weights.len());
        weights.extend_from_slice(&parent_a.weights[..cutoff]);
        weights.extend_from_slice(&parent_b.weights[cutoff..]);
        Self { weights }
    }

    ///each weight, with probability `rate`, gets a N(0, scale) nudge
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, scale: f64, rng: &mut R) -> Result<()> {
        let noise = Self::mutation_noise(scale)?;
        self.apply_noise(rate, &noise, rng);
        Ok(())
    }

    /// N(0, scale); `scale` must be finite and non-negative.
    pub fn mutation_noise(scale: f64) -> Result<Normal<f32>> {
        if !(scale.is_finite() && scale >= 0.0) {
            return Err(SnakeError::invalid(
                "mutation_scale",
                format!("must be finite and non-negative, got {}", scale),
            ));
        }
        Normal::new(0.0f32, scale as f32).map_err(|e| SnakeError::invalid("mutation_scale", e.to_string()))
    }

    pub(crate) fn apply_noise<R: Rng + ?Sized>(&mut self, rate: f64, noise: &Normal<f32>, rng: &mut R) {
        for w in &mut self.weights {
            if rng.r#gen::<f64>() < rate {
                *w += noise.sample(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn genome(weights: &[f32]) -> Genome {
        Genome { weights: weights.to_vec() }
    }

    #[test]
    fn test_random_length_and_spread() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let g = Genome::random(4000, &mut rng).unwrap();
        assert_eq!(g.weights.len(), 4000);
        let mean: f32 = g.weights.iter().sum::<f32>() / 4000.0;
        let var: f32 = g.weights.iter().map(|w| (w - mean).powi(2)).sum::<f32>() / 4000.0;
        assert!(mean.abs() < 0.1, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.15, "variance {}", var);
    }

    #[test]
    fn test_random_rejects_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(Genome::random(0, &mut rng), Err(SnakeError::InvalidConfig { .. })));
    }

    #[test]
    fn test_splice_edges() {
        let a = genome(&[1.0, 2.0, 3.0]);
        let b = genome(&[-1.0, -2.0, -3.0]);
        assert_eq!(Genome::splice(&a, &b, 0), b);
        assert_eq!(Genome::splice(&a, &b, 3), a);
        assert_eq!(Genome::splice(&a, &b, 1).weights, vec![1.0, -2.0, -3.0]);
        assert_eq!(Genome::splice(&b, &a, 1).weights, vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_crossover_is_prefix_plus_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let a = genome(&[1.0; 10]);
        let b = genome(&[2.0; 10]);
        for _ in 0..100 {
            let child = Genome::crossover(&a, &b, &mut rng);
            assert_eq!(child.weights.len(), 10);
            let cut = child.weights.iter().take_while(|&&w| w == 1.0).count();
            assert!(child.weights[cut..].iter().all(|&w| w == 2.0));
        }
    }

    #[test]
    fn test_mutate_rate_zero_and_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut g = genome(&[0.5; 50]);
        g.mutate(0.0, 1.0, &mut rng).unwrap();
        assert_eq!(g, genome(&[0.5; 50]));

        g.mutate(1.0, 1.0, &mut rng).unwrap();
        assert!(g.weights.iter().all(|&w| w != 0.5));
    }

    #[test]
    fn test_mutate_touches_about_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut g = genome(&[0.0; 10_000]);
        g.mutate(0.1, 0.5, &mut rng).unwrap();
        let changed = g.weights.iter().filter(|&&w| w != 0.0).count();
        assert!((800..1200).contains(&changed), "changed {}", changed);
    }

    #[test]
    fn test_mutate_rejects_bad_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut g = genome(&[0.0; 3]);
        for scale in [-1.0, -1e-9, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                g.mutate(0.5, scale, &mut rng),
                Err(SnakeError::InvalidConfig { parameter: "mutation_scale", .. })
            ));
        }
        assert_eq!(g, genome(&[0.0; 3]));
    }

    #[test]
    fn test_zero_scale_leaves_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut g = genome(&[0.25; 20]);
        g.mutate(1.0, 0.0, &mut rng).unwrap();
        assert_eq!(g, genome(&[0.25; 20]));
    }
}
