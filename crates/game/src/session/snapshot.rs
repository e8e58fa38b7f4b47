use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::BoardColor;
use crate::paddle::PaddleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub local: u32,
    pub remote: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Only present while this peer holds the ball.
    pub ball_position: Option<Vec2>,
    pub paddle: PaddleState,
    pub remote_paddle: Option<PaddleState>,
    pub score: Scoreboard,
    pub color: BoardColor,
    pub authoritative: bool,
    pub paused: bool,
}
