pub mod border;
pub mod brain;
pub mod config;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod food;
pub mod game;
pub mod game_input;
pub mod genome;
pub mod snake;
pub mod training;
pub mod utils;

pub use brain::Brain;
pub use config::TrainingConfig;
pub use error::{Result, SnakeError};
pub use evolution::{GenerationStats, Individual, Population};
pub use fitness::{Evaluator, GameTrace};
pub use game::{GameState, Status};
pub use game_input::{GameInput, Stimuli};
pub use genome::Genome;
pub use snake::{Direction, Move};
pub use training::{Trainer, run_generations};
pub use utils::Point;
