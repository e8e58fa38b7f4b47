use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddleState {
    pub x: f32,
    pub x1: f32,
    pub delta_x: f32,
}

impl PaddleState {
    pub fn new(x: f32, width: f32) -> Self {
        Self {
            x,
            x1: x + width,
            delta_x: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x
    }

    pub fn overlaps(&self, ball_x: f32, ball_size: f32) -> bool {
        self.x <= ball_x + ball_size && self.x1 >= ball_x
    }

    pub fn take_impulse(&mut self) -> f32 {
        std::mem::take(&mut self.delta_x)
    }
}
