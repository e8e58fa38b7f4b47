use crate::config::BoardConfig;

use super::PaddleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Idle,
    Right,
}

impl Direction {
    pub const KEY_A: u32 = 65;
    pub const KEY_D: u32 = 68;
    pub const KEY_LEFT: u32 = 37;
    pub const KEY_RIGHT: u32 = 39;

    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            Self::KEY_A | Self::KEY_LEFT => Some(Self::Left),
            Self::KEY_D | Self::KEY_RIGHT => Some(Self::Right),
            _ => None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Idle => 0.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionChange {
    Unchanged,
    Start,
    Stop,
}

#[derive(Debug, Clone)]
pub struct PaddleController {
    state: PaddleState,
    direction: Direction,
    paddle_width: f32,
    max_x: f32,
    speed: f32,
}

impl PaddleController {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            state: PaddleState::new(config.center_paddle_x(), config.paddle_width),
            direction: Direction::Idle,
            paddle_width: config.paddle_width,
            max_x: config.paddle_max_x(),
            speed: config.paddle_speed,
        }
    }

    pub fn current_position(&self) -> f32 {
        self.state.x
    }

    pub fn state(&self) -> &PaddleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PaddleState {
        &mut self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) -> MotionChange {
        if direction == self.direction {
            return MotionChange::Unchanged;
        }

        self.direction = direction;
        if direction == Direction::Idle {
            self.state.delta_x = 0.0;
            MotionChange::Stop
        } else {
            MotionChange::Start
        }
    }

    pub fn release(&mut self, direction: Direction) -> MotionChange {
        if direction != self.direction {
            return MotionChange::Unchanged;
        }
        self.set_direction(Direction::Idle)
    }

    pub fn step(&mut self) -> bool {
        if self.direction == Direction::Idle {
            return false;
        }

        let target = self.state.x + self.speed * self.direction.sign();
        let next = target.clamp(0.0, self.max_x);
        let delta = next - self.state.x;

        self.state.x = next;
        self.state.x1 = next + self.paddle_width;
        self.state.delta_x = delta;

        delta != 0.0
    }

    pub fn set_drag_position(&mut self, x: f32, delta_x: f32) {
        let clamped = x.clamp(0.0, self.max_x);

        self.state = PaddleState {
            x: clamped,
            x1: clamped + self.paddle_width,
            delta_x,
        };
    }

    pub fn resize(&mut self, config: &BoardConfig) {
        self.paddle_width = config.paddle_width;
        self.max_x = config.paddle_max_x();

        let clamped = self.state.x.clamp(0.0, self.max_x);
        self.state.x = clamped;
        self.state.x1 = clamped + self.paddle_width;
    }
}
