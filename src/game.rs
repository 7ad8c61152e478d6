use rand::Rng;
use serde::Serialize;

use crate::border::Border;
use crate::error::{Result, SnakeError};
use crate::food;
use crate::snake::{Direction, Move};
use crate::utils::Point;

pub const MIN_BOARD_SIZE: i32 = 2;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum Status {
    Live,
    Dead,
}

/// One frame of a game. Transitions build a new value, the old one is never touched.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct GameState {
    pub board_size: i32,
    pub status: Status,
    pub fruit: Point,
    /// head first
    pub body: Vec<Point>,
    pub direction: Direction,
}

impl GameState {
    /// Fresh game: head in the middle facing up, one tail segment below it,
    /// fruit on a random free cell.
    pub fn init<R: Rng + ?Sized>(board_size: i32, rng: &mut R) -> Result<Self> {
        if board_size < MIN_BOARD_SIZE {
            return Err(SnakeError::invalid(
                "board_size",
                format!("must be at least {MIN_BOARD_SIZE}, got {board_size}"),
            ));
        }
        let border = Border::new(board_size);
        let direction = Direction::Up;
        // upper middle row on even boards so the tail stays inside
        let head = Point::new(board_size / 2, (board_size - 1) / 2);
        let (dx, dy) = direction.delta();
        let body = vec![head, head.offset((-dx, -dy))];
        let fruit = food::respawn(rng, border, &body).ok_or_else(|| {
            SnakeError::invalid("board_size", "leaves no room for the fruit")
        })?;

        Ok(Self {
            board_size,
            status: Status::Live,
            fruit,
            body,
            direction,
        })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn border(&self) -> Border {
        Border::new(self.board_size)
    }

    pub fn is_live(&self) -> bool {
        self.status == Status::Live
    }

    /// Next frame after `mv`. Dead frames are returned unchanged.
    pub fn advance<R: Rng + ?Sized>(&self, mv: Move, rng: &mut R) -> GameState {
        if !self.is_live() {
            return self.clone();
        }

        let direction = self.direction.turn(mv);
        let new_head = self.head().offset(direction.delta());
        if !self.border().is_inside(new_head) {
            return self.killed();
        }

        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(new_head);
        let fruit = if new_head == self.fruit {
            body.extend_from_slice(&self.body);
            match food::respawn(rng, self.border(), &body) {
                Some(fruit) => fruit,
                // board is full, nothing left to play for
                None => return self.killed(),
            }
        } else {
            body.extend_from_slice(&self.body[..self.body.len() - 1]);
            self.fruit
        };

        if body[1..].contains(&new_head) {
            return self.killed();
        }

        GameState {
            board_size: self.board_size,
            status: Status::Live,
            fruit,
            body,
            direction,
        }
    }

    fn killed(&self) -> GameState {
        GameState {
            status: Status::Dead,
            ..self.clone()
        }
    }
}
