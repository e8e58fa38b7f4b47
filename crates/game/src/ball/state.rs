use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BallState {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    pub fn serve(config: &BoardConfig) -> Self {
        Self {
            position: config.serve_position(),
            velocity: config.serve_velocity,
        }
    }

    pub fn across_separator(&self, config: &BoardConfig) -> Self {
        Self {
            position: Vec2::new(config.ball_max_x() - self.position.x, self.position.y),
            velocity: -self.velocity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
