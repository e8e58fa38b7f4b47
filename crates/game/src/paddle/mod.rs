mod controller;
mod state;

pub use controller::{Direction, MotionChange, PaddleController};
pub use state::PaddleState;
