mod engine;
mod state;

pub use engine::{BallEvent, BallPhase, BallPhysicsEngine};
pub use state::BallState;
