use rand::Rng;

use crate::border::Border;
use crate::utils::Point;

/// Uniformly random free cell, drawn by retrying until it misses the snake.
/// `None` once the snake covers the whole board.
pub fn respawn<R: Rng + ?Sized>(rng: &mut R, border: Border, snake_body: &[Point]) -> Option<Point> {
    if snake_body.len() as i64 >= border.cells() {
        return None;
    }
    loop {
        let pos = Point::new(rng.gen_range(0..border.size), rng.gen_range(0..border.size));
        if !snake_body.contains(&pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_respawn_avoids_body() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let border = Border::new(2);
        let body = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        for _ in 0..50 {
            assert_eq!(respawn(&mut rng, border, &body), Some(Point::new(0, 1)));
        }
    }

    #[test]
    fn test_respawn_full_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let border = Border::new(2);
        let body = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)];
        assert_eq!(respawn(&mut rng, border, &body), None);
    }

    #[test]
    fn test_respawn_stays_inside() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let border = Border::new(5);
        for _ in 0..200 {
            let p = respawn(&mut rng, border, &[]).unwrap();
            assert!(border.is_inside(p));
        }
    }
}
