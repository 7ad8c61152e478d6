use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Heading after a 90° turn to the left: (dx, dy) -> (dy, -dx).
    pub fn left(&self) -> Direction {
        let (dx, dy) = self.delta();
        Direction::from_delta((dy, -dx))
    }

    /// Heading after a 90° turn to the right: (dx, dy) -> (-dy, dx).
    pub fn right(&self) -> Direction {
        let (dx, dy) = self.delta();
        Direction::from_delta((-dy, dx))
    }

    fn from_delta(delta: (i32, i32)) -> Direction {
        match delta {
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            _ => Direction::Right,
        }
    }

    /// Unit step (dx, dy); up is negative y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn turn(&self, mv: Move) -> Direction {
        match mv {
            Move::Left => self.left(),
            Move::Continue => *self,
            Move::Right => self.right(),
        }
    }
}

/// Action relative to the current heading.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Move {
    Left,
    Continue,
    Right,
}

impl Move {
    /// Network output order.
    pub const ALL: [Move; 3] = [Move::Left, Move::Continue, Move::Right];

    pub fn from_index(index: usize) -> Option<Move> {
        Move::ALL.get(index).copied()
    }
}
