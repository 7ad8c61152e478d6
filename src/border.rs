use crate::snake::Direction;
use crate::utils::Point;

/// Square playing field `[0, size) x [0, size)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Border {
    pub size: i32,
}

impl Border {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    pub fn is_inside(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    /// Steps from `from` along `dir` until the first cell outside the board.
    pub fn distance_to_wall(&self, from: Point, dir: Direction) -> i32 {
        match dir {
            Direction::Right => self.size - from.x,
            Direction::Left => from.x + 1,
            Direction::Down => self.size - from.y,
            Direction::Up => from.y + 1,
        }
    }

    pub fn cells(&self) -> i64 {
        self.size as i64 * self.size as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_inside() {
        let border = Border::new(3);
        assert!(border.is_inside(Point::new(0, 0)));
        assert!(border.is_inside(Point::new(2, 2)));
        assert!(!border.is_inside(Point::new(3, 0)));
        assert!(!border.is_inside(Point::new(0, -1)));
    }

    #[test]
    fn test_distance_to_wall_counts_steps_to_outside() {
        let border = Border::new(11);
        let head = Point::new(5, 5);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(border.distance_to_wall(head, dir), 6);
        }
        let corner = Point::new(0, 10);
        assert_eq!(border.distance_to_wall(corner, Direction::Left), 1);
        assert_eq!(border.distance_to_wall(corner, Direction::Down), 1);
        assert_eq!(border.distance_to_wall(corner, Direction::Right), 11);
    }
}
