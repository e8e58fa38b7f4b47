use glam::Vec2;

use crate::color::{derive_colors, BoardColor, SeedSequence};
use crate::config::BoardConfig;
use crate::paddle::PaddleState;

use super::BallState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Serving,
    InFlight,
    Scored,
    HandedOff,
}

impl BallPhase {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Serving | Self::Scored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallEvent {
    WallBounce,
    PaddleHit { colors: BoardColor },
    Missed,
    CrossedSeparator { handoff: BallState },
}

#[derive(Debug, Clone)]
pub struct BallPhysicsEngine {
    config: BoardConfig,
    ball: BallState,
    phase: BallPhase,
    seeds: SeedSequence,
}

impl BallPhysicsEngine {
    pub fn new(config: BoardConfig, color_seed: u64) -> Self {
        Self {
            config,
            ball: BallState::default(),
            phase: BallPhase::HandedOff,
            seeds: SeedSequence::new(color_seed),
        }
    }

    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn serve(&mut self) {
        self.enter(BallPhase::Serving);
    }

    pub fn adopt(&mut self, ball: BallState) {
        self.ball = ball;
        self.phase = BallPhase::InFlight;
    }

    fn hand_off(&mut self) {
        self.phase = BallPhase::HandedOff;
    }

    pub fn step(&mut self, paddle: &mut PaddleState) -> Option<BallEvent> {
        if self.phase != BallPhase::InFlight {
            return None;
        }

        let BallState { position, velocity } = self.ball;
        let size = self.config.ball_size;

        if position.x <= 0.0 || position.x >= self.config.ball_max_x() {
            self.ball.velocity.x = -velocity.x;
            self.ball.position = Vec2::new(position.x - velocity.x, position.y + velocity.y);
            return Some(BallEvent::WallBounce);
        }

        if position.y <= self.config.edge_threshold {
            if paddle.overlaps(position.x, size) {
                let impulse = paddle.take_impulse();
                self.ball.velocity = Vec2::new(velocity.x + impulse, -velocity.y);
                self.ball.position = position + self.ball.velocity;

                let colors = derive_colors(self.seeds.next_seed());
                return Some(BallEvent::PaddleHit { colors });
            }

            self.enter(BallPhase::Scored);
            return Some(BallEvent::Missed);
        }

        if position.y >= self.config.height - size && velocity.y > 0.0 {
            let handoff = self.ball.across_separator(&self.config);
            self.hand_off();
            return Some(BallEvent::CrossedSeparator { handoff });
        }

        self.ball.position = position + velocity;
        None
    }

    fn enter(&mut self, phase: BallPhase) {
        self.phase = phase;
        if phase.is_transient() {
            self.ball = BallState::serve(&self.config);
            self.phase = BallPhase::InFlight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(ball: BallState) -> BallPhysicsEngine {
        let mut engine = BallPhysicsEngine::new(BoardConfig::default(), 1);
        engine.adopt(ball);
        engine
    }

    #[test]
    fn test_idle_until_served() {
        let mut engine = BallPhysicsEngine::new(BoardConfig::default(), 1);
        let mut paddle = PaddleState::new(0.0, 80.0);
        assert_eq!(engine.step(&mut paddle), None);
        assert_eq!(engine.phase(), BallPhase::HandedOff);

        engine.serve();
        assert_eq!(engine.phase(), BallPhase::InFlight);
        assert_eq!(engine.ball().position, Vec2::new(385.0, 300.0));
    }

    #[test]
    fn test_free_flight_advances() {
        let mut engine = engine_with(BallState::new(Vec2::new(200.0, 200.0), Vec2::new(3.0, -4.0)));
        let mut paddle = PaddleState::new(0.0, 80.0);

        assert_eq!(engine.step(&mut paddle), None);
        assert_eq!(engine.ball().position, Vec2::new(203.0, 196.0));
    }

    #[test]
    fn test_paddle_hit_reflects_and_adds_impulse() {
        let mut engine = engine_with(BallState::new(Vec2::new(400.0, 5.0), Vec2::new(2.0, -3.0)));
        let mut paddle = PaddleState { x: 380.0, x1: 460.0, delta_x: 4.0 };

        let event = engine.step(&mut paddle);
        assert!(matches!(event, Some(BallEvent::PaddleHit { .. })));
        assert_eq!(engine.ball().velocity, Vec2::new(6.0, 3.0));
        assert_eq!(engine.ball().position, Vec2::new(406.0, 8.0));
        assert_eq!(paddle.delta_x, 0.0);
    }

    #[test]
    fn test_paddle_hit_colors_are_readable() {
        let mut engine = engine_with(BallState::new(Vec2::new(400.0, 5.0), Vec2::new(2.0, -3.0)));
        let mut paddle = PaddleState::new(380.0, 80.0);

        let Some(BallEvent::PaddleHit { colors }) = engine.step(&mut paddle) else {
            panic!("expected a paddle hit");
        };
        assert_eq!(colors.font, colors.background.contrasting_font());
    }

    #[test]
    fn test_miss_resets_to_serve() {
        let mut engine = engine_with(BallState::new(Vec2::new(100.0, 5.0), Vec2::new(2.0, -3.0)));
        let mut paddle = PaddleState::new(500.0, 80.0);

        assert_eq!(engine.step(&mut paddle), Some(BallEvent::Missed));
        assert_eq!(engine.ball().position, Vec2::new(385.0, 300.0));
        assert_eq!(engine.ball().velocity, Vec2::new(0.0, -10.0));
        assert_eq!(engine.phase(), BallPhase::InFlight);
    }

    #[test]
    fn test_side_wall_undoes_then_reflects() {
        let mut engine = engine_with(BallState::new(Vec2::new(768.0, 200.0), Vec2::new(5.0, 4.0)));
        let mut paddle = PaddleState::new(0.0, 80.0);

        assert_eq!(engine.step(&mut paddle), None);
        assert_eq!(engine.ball().position, Vec2::new(773.0, 204.0));

        assert_eq!(engine.step(&mut paddle), Some(BallEvent::WallBounce));
        assert_eq!(engine.ball().velocity, Vec2::new(-5.0, 4.0));
        assert_eq!(engine.ball().position, Vec2::new(768.0, 208.0));

        assert_eq!(engine.step(&mut paddle), None);
        assert_eq!(engine.ball().position, Vec2::new(763.0, 212.0));
    }

    #[test]
    fn test_crossing_hands_off() {
        let mut engine = engine_with(BallState::new(Vec2::new(300.0, 575.0), Vec2::new(1.0, 10.0)));
        let mut paddle = PaddleState::new(0.0, 80.0);

        let event = engine.step(&mut paddle);
        let Some(BallEvent::CrossedSeparator { handoff }) = event else {
            panic!("expected a separator crossing");
        };
        assert_eq!(handoff.position, Vec2::new(470.0, 575.0));
        assert_eq!(handoff.velocity, Vec2::new(-1.0, -10.0));
        assert_eq!(engine.phase(), BallPhase::HandedOff);
        assert_eq!(engine.step(&mut paddle), None);
    }

    #[test]
    fn test_rising_ball_near_separator_keeps_flying() {
        let mut engine = engine_with(BallState::new(Vec2::new(300.0, 575.0), Vec2::new(0.0, -10.0)));
        let mut paddle = PaddleState::new(0.0, 80.0);

        assert_eq!(engine.step(&mut paddle), None);
        assert_eq!(engine.ball().position, Vec2::new(300.0, 565.0));
    }
}
