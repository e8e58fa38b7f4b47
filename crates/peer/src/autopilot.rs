use glam::Vec2;

use duopong::{BoardConfig, Direction, InputEvent, InputSource, SessionSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Keys,
    Drag,
}

pub struct Autopilot {
    steering: Steering,
    ball_half: Vec2,
    dead_zone: f32,
    held: Direction,
}

impl Autopilot {
    pub fn new(config: &BoardConfig, steering: Steering) -> Self {
        Self {
            steering,
            ball_half: Vec2::splat(config.ball_size * 0.5),
            dead_zone: config.paddle_speed * 0.5,
            held: Direction::Idle,
        }
    }

    fn steer(&mut self, desired: Direction) -> Vec<InputEvent> {
        if desired == self.held {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if self.held != Direction::Idle {
            events.push(InputEvent::Release(self.held));
        }
        if desired != Direction::Idle {
            events.push(InputEvent::Press(desired));
        }
        self.held = desired;
        events
    }
}

impl InputSource for Autopilot {
    fn poll_input(&mut self, view: &SessionSnapshot) -> Vec<InputEvent> {
        let Some(ball) = view.ball_position else {
            return self.steer(Direction::Idle);
        };
        if view.paused {
            return self.steer(Direction::Idle);
        }

        let target = (ball + self.ball_half).x;
        let half_width = view.paddle.width() * 0.5;
        let offset = target - (view.paddle.x + half_width);

        match self.steering {
            Steering::Drag => {
                if offset.abs() <= self.dead_zone {
                    return Vec::new();
                }
                vec![InputEvent::Drag {
                    x: target - half_width,
                    x1: target + half_width,
                    delta_x: 0.0,
                }]
            }
            Steering::Keys => {
                let desired = if offset > self.dead_zone {
                    Direction::Right
                } else if offset < -self.dead_zone {
                    Direction::Left
                } else {
                    Direction::Idle
                };
                self.steer(desired)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duopong::PaddleState;

    fn view(ball_x: f32, paddle_x: f32) -> SessionSnapshot {
        SessionSnapshot {
            ball_position: Some(Vec2::new(ball_x, 100.0)),
            paddle: PaddleState::new(paddle_x, 80.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_keys_press_toward_ball_and_release_when_aligned() {
        let mut pilot = Autopilot::new(&BoardConfig::default(), Steering::Keys);

        assert_eq!(
            pilot.poll_input(&view(600.0, 100.0)),
            vec![InputEvent::Press(Direction::Right)]
        );
        assert!(pilot.poll_input(&view(600.0, 200.0)).is_empty());
        assert_eq!(
            pilot.poll_input(&view(100.0, 200.0)),
            vec![
                InputEvent::Release(Direction::Right),
                InputEvent::Press(Direction::Left)
            ]
        );
        assert_eq!(
            pilot.poll_input(&view(200.0, 175.0)),
            vec![InputEvent::Release(Direction::Left)]
        );
    }

    #[test]
    fn test_releases_when_ball_leaves() {
        let mut pilot = Autopilot::new(&BoardConfig::default(), Steering::Keys);
        pilot.poll_input(&view(600.0, 100.0));

        let gone = SessionSnapshot::default();
        assert_eq!(
            pilot.poll_input(&gone),
            vec![InputEvent::Release(Direction::Right)]
        );
        assert!(pilot.poll_input(&gone).is_empty());
    }

    #[test]
    fn test_drag_centers_paddle_on_ball() {
        let mut pilot = Autopilot::new(&BoardConfig::default(), Steering::Drag);

        assert_eq!(
            pilot.poll_input(&view(385.0, 0.0)),
            vec![InputEvent::Drag {
                x: 360.0,
                x1: 440.0,
                delta_x: 0.0
            }]
        );
        assert!(pilot.poll_input(&view(385.0, 360.0)).is_empty());
    }
}
