use crate::game::GameState;
use crate::snake::Direction;
use crate::utils::Point;

/// wall, fruit and body readings for each of left, straight and right
pub const INPUTS: usize = 9;

pub type Stimuli = [f32; INPUTS];

pub struct GameInput;

impl GameInput {
    /// Three rays cast from the head, relative to the current heading:
    /// `[left wall, left fruit, left body, straight .., right ..]`.
    pub fn from_game(game: &GameState) -> Stimuli {
        let mut input = [0.0f32; INPUTS];
        let eyes = [game.direction.left(), game.direction, game.direction.right()];
        for (i, dir) in eyes.into_iter().enumerate() {
            let [wall, fruit, body] = Self::eye(game, dir);
            input[i * 3] = wall as f32;
            input[i * 3 + 1] = fruit as f32;
            input[i * 3 + 2] = body as f32;
        }
        input
    }

    /// Reading used when nothing lies on a ray. Larger than any wall distance on the board.
    pub fn not_visible(board_size: i32) -> i32 {
        board_size + 1
    }

    fn eye(game: &GameState, dir: Direction) -> [i32; 3] {
        let head = game.head();
        let hidden = Self::not_visible(game.board_size);

        let wall = game.border().distance_to_wall(head, dir);
        let fruit = distance_along(head, game.fruit, dir).unwrap_or(hidden);
        let body = game.body[1..]
            .iter()
            .filter_map(|&seg| distance_along(head, seg, dir))
            .min()
            .unwrap_or(hidden);

        [wall, fruit, body]
    }
}

/// Steps from `from` to `to` when `to` lies strictly ahead along `dir`.
fn distance_along(from: Point, to: Point, dir: Direction) -> Option<i32> {
    let (dx, dy) = dir.delta();
    let (px, py) = (to.x - from.x, to.y - from.y);
    let steps = px * dx + py * dy;
    let on_axis = if dx != 0 { py == 0 } else { px == 0 };
    (on_axis && steps > 0).then_some(steps)
}
