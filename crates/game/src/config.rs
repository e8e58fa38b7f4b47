use std::time::Duration;

use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,

    pub paddle_width: f32,
    pub paddle_speed: f32,
    pub paddle_tick: Duration,

    pub ball_size: f32,
    pub ball_tick: Duration,

    /// Distance from the paddle edge at which the ball is tested against the paddle.
    pub edge_threshold: f32,

    pub serve_offset: f32,
    pub serve_velocity: Vec2,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,

            paddle_width: 80.0,
            paddle_speed: 20.0,
            paddle_tick: Duration::from_millis(10),

            ball_size: 30.0,
            ball_tick: Duration::from_millis(30),

            edge_threshold: 10.0,

            serve_offset: 300.0,
            serve_velocity: Vec2::new(0.0, -10.0),
        }
    }
}

impl BoardConfig {
    pub fn with_board(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn paddle_max_x(&self) -> f32 {
        (self.width - self.paddle_width).max(0.0)
    }

    pub fn ball_max_x(&self) -> f32 {
        self.width - self.ball_size
    }

    pub fn center_paddle_x(&self) -> f32 {
        self.width / 2.0 - self.paddle_width / 2.0
    }

    pub fn serve_position(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - self.ball_size / 2.0,
            self.height - self.serve_offset,
        )
    }
}
