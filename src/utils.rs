use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Board cell. `x` grows to the right, `y` grows downwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    ///one step along (dx, dy)
    pub fn offset(self, (dx, dy): (i32, i32)) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }
}

/// Seeded stream for reproducible runs, entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    }
}

/// min / max / mean of a fitness column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

pub fn vec_stats(xs: &[f64]) -> Stats {
    if xs.is_empty() {
        return Stats { min: 0.0, max: 0.0, mean: 0.0 };
    }
    let (min, max, sum) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY, 0.0), |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v));
    Stats { min, max, mean: sum / xs.len() as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_vec_stats() {
        let stats = vec_stats(&[-3.0, -1.0, -2.0]);
        assert_eq!(stats.min, -3.0);
        assert_eq!(stats.max, -1.0);
        assert!((stats.mean + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec_stats_empty() {
        assert_eq!(vec_stats(&[]), Stats { min: 0.0, max: 0.0, mean: 0.0 });
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: Vec<u32> = (0..8).map(|_| seeded_rng(Some(7)).r#gen()).collect();
        let mut rng = seeded_rng(Some(7));
        let first: u32 = rng.r#gen();
        assert!(a.iter().all(|&v| v == first));
    }
}
