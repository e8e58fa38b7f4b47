use std::collections::VecDeque;
use std::time::Duration;

use crate::ball::{BallEvent, BallPhysicsEngine, BallState};
use crate::color::BoardColor;
use crate::config::BoardConfig;
use crate::net::{rand_u64, NetworkSynchronizer, RemoteUpdate, Transport, TransportError};
use crate::paddle::{Direction, MotionChange, PaddleController, PaddleState};

use super::{InputEvent, InputSource, Scoreboard, SessionEvent, SessionSnapshot, TickTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    First,
    Second,
}

/// Which peer is allowed to step the ball. Exactly one side holds `Local` at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Local,
    Remote,
}

impl From<Role> for Authority {
    fn from(role: Role) -> Self {
        match role {
            Role::First => Self::Local,
            Role::Second => Self::Remote,
        }
    }
}

pub struct GameSession<T> {
    config: BoardConfig,
    authority: Authority,
    engine: BallPhysicsEngine,
    paddle: PaddleController,
    remote_paddle: Option<PaddleState>,
    score: Scoreboard,
    colors: BoardColor,
    sync: NetworkSynchronizer<T>,
    input: Option<Box<dyn InputSource>>,
    ball_timer: TickTimer,
    paddle_timer: TickTimer,
    paused: bool,
    connected: bool,
    closed: bool,
    dirty: bool,
    events: VecDeque<SessionEvent>,
}

impl<T: Transport> GameSession<T> {
    pub fn new(config: BoardConfig, role: Role, transport: T) -> Self {
        Self::with_color_seed(config, role, transport, rand_u64())
    }

    pub fn with_color_seed(config: BoardConfig, role: Role, transport: T, color_seed: u64) -> Self {
        let mut session = Self {
            authority: Authority::from(role),
            engine: BallPhysicsEngine::new(config.clone(), color_seed),
            paddle: PaddleController::new(&config),
            remote_paddle: None,
            score: Scoreboard::default(),
            colors: BoardColor::default(),
            sync: NetworkSynchronizer::new(transport),
            input: None,
            ball_timer: TickTimer::new(config.ball_tick),
            paddle_timer: TickTimer::new(config.paddle_tick),
            paused: false,
            connected: true,
            closed: false,
            dirty: true,
            events: VecDeque::new(),
            config,
        };

        if session.authority == Authority::Local {
            session.engine.serve();
            session.ball_timer.arm();
        }

        session
    }

    pub fn with_input(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn is_authoritative(&self) -> bool {
        self.authority == Authority::Local
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn ball(&self) -> Option<&BallState> {
        self.is_authoritative().then(|| self.engine.ball())
    }

    pub fn paddle(&self) -> &PaddleState {
        self.paddle.state()
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn colors(&self) -> BoardColor {
        self.colors
    }

    pub fn transport(&self) -> &T {
        self.sync.transport()
    }

    pub fn ball_timer_armed(&self) -> bool {
        self.ball_timer.is_armed()
    }

    pub fn paddle_timer_armed(&self) -> bool {
        self.paddle_timer.is_armed()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ball_position: self.ball().map(|ball| ball.position),
            paddle: *self.paddle.state(),
            remote_paddle: self.remote_paddle,
            score: self.score,
            color: self.colors,
            authoritative: self.is_authoritative(),
            paused: self.paused,
        }
    }

    pub fn take_snapshot_if_changed(&mut self) -> Option<SessionSnapshot> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.snapshot())
    }

    pub fn update(&mut self, delta: Duration) {
        if self.closed {
            return;
        }

        self.pump_network();
        self.pump_input();

        self.paddle_timer.accumulate(delta);
        while self.paddle_timer.consume_tick() {
            self.step_paddle();
        }

        self.ball_timer.accumulate(delta);
        while self.ball_timer.consume_tick() {
            self.step_ball();
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(direction) => self.set_direction(direction),
            InputEvent::Release(direction) => {
                let change = self.paddle.release(direction);
                self.apply_motion(change);
            }
            InputEvent::Drag { x, x1, delta_x } => self.drag(x, x1, delta_x),
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        let change = self.paddle.set_direction(direction);
        self.apply_motion(change);
    }

    // The hitbox keeps the configured width, so the sampled right edge is not used.
    pub fn drag(&mut self, x: f32, _x1: f32, delta_x: f32) {
        self.paddle.set_drag_position(x, delta_x);
        self.dirty = true;

        let paddle = *self.paddle.state();
        self.broadcast(|sync| sync.announce_paddle(&paddle));
    }

    pub fn handle_remote(&mut self, update: RemoteUpdate) {
        match update {
            RemoteUpdate::Score(score) => {
                if score > self.score.local {
                    self.score.local = score;
                    self.events.push_back(SessionEvent::Scored { score });
                }
            }
            RemoteUpdate::Background(color) => {
                if color != self.colors.background {
                    self.colors.background = color;
                    self.events.push_back(SessionEvent::ColorChanged(self.colors));
                }
            }
            RemoteUpdate::Font(color) => {
                if color != self.colors.font {
                    self.colors.font = color;
                    self.events.push_back(SessionEvent::ColorChanged(self.colors));
                }
            }
            RemoteUpdate::Ball(ball) => self.take_authority(ball),
            RemoteUpdate::Paddle(paddle) => self.remote_paddle = Some(paddle),
        }
        self.dirty = true;
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.ball_timer.cancel();
        self.paddle_timer.cancel();
        self.dirty = true;
    }

    pub fn resume(&mut self) {
        if !self.connected || self.closed {
            return;
        }

        self.paused = false;
        if self.is_authoritative() {
            self.ball_timer.arm();
        }
        if self.paddle.direction() != Direction::Idle {
            self.paddle_timer.arm();
        }
        self.dirty = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width;
        self.config.height = height;
        self.paddle.resize(&self.config);
        self.engine.set_config(self.config.clone());
        self.dirty = true;
    }

    pub fn teardown(&mut self) -> Option<Box<dyn InputSource>> {
        self.ball_timer.cancel();
        self.paddle_timer.cancel();
        self.closed = true;
        self.input.take()
    }

    fn apply_motion(&mut self, change: MotionChange) {
        match change {
            MotionChange::Unchanged => {}
            MotionChange::Start => {
                self.paddle_timer.cancel();
                if !self.paused && !self.closed {
                    self.paddle_timer.arm();
                }
            }
            MotionChange::Stop => self.paddle_timer.cancel(),
        }
    }

    fn step_paddle(&mut self) {
        if !self.paddle.step() {
            return;
        }
        self.dirty = true;

        let paddle = *self.paddle.state();
        self.broadcast(|sync| sync.announce_paddle(&paddle));
    }

    fn step_ball(&mut self) {
        let event = self.engine.step(self.paddle.state_mut());
        self.dirty = true;

        match event {
            None | Some(BallEvent::WallBounce) => {}
            Some(BallEvent::PaddleHit { colors }) => {
                self.colors = colors;
                self.events.push_back(SessionEvent::ColorChanged(colors));
                self.broadcast(|sync| sync.announce_colors(&colors));
            }
            Some(BallEvent::Missed) => {
                self.score.remote += 1;
                let opponent_score = self.score.remote;
                log::info!("missed the ball, opponent now at {}", opponent_score);

                self.events
                    .push_back(SessionEvent::Conceded { opponent_score });
                self.broadcast(|sync| sync.announce_score(opponent_score));
            }
            Some(BallEvent::CrossedSeparator { handoff }) => {
                self.authority = Authority::Remote;
                self.ball_timer.cancel();
                log::debug!("handing the ball over at {:?}", handoff.position);

                self.events.push_back(SessionEvent::AuthorityLost);
                self.broadcast(|sync| sync.announce_handoff(&handoff));
            }
        }
    }

    fn take_authority(&mut self, ball: BallState) {
        if self.is_authoritative() {
            log::warn!("received a ball while already holding one, adopting the newer ball");
        }
        if !ball.is_finite() {
            log::warn!("ignoring handoff with non-finite ball state");
            return;
        }

        self.engine.adopt(ball);
        self.authority = Authority::Local;
        if !self.paused && !self.closed {
            self.ball_timer.arm();
        }
        log::debug!("took over the ball at {:?}", ball.position);
        self.events.push_back(SessionEvent::AuthorityGained);
    }

    fn pump_network(&mut self) {
        if !self.connected {
            return;
        }

        match self.sync.receive() {
            Ok(updates) => {
                for update in updates {
                    self.handle_remote(update);
                }
            }
            Err(e) => self.transport_failed(e),
        }
    }

    fn pump_input(&mut self) {
        let view = self.snapshot();
        let Some(input) = self.input.as_mut() else {
            return;
        };

        for event in input.poll_input(&view) {
            self.handle_input(event);
        }
    }

    fn broadcast<F>(&mut self, send: F)
    where
        F: FnOnce(&mut NetworkSynchronizer<T>) -> Result<(), TransportError>,
    {
        if !self.connected {
            return;
        }
        if let Err(e) = send(&mut self.sync) {
            self.transport_failed(e);
        }
    }

    fn transport_failed(&mut self, error: TransportError) {
        if error.is_disconnect() {
            log::warn!("transport lost, pausing session: {}", error);
            self.connected = false;
            self.pause();
            self.events.push_back(SessionEvent::ConnectionLost);
        } else {
            log::warn!("transport error: {}", error);
        }
    }
}
