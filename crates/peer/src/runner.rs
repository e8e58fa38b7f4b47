use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use duopong::{GameSession, NetworkStats, SessionEvent, UdpTransport};

use crate::autopilot::{Autopilot, Steering};
use crate::config::PeerConfig;

pub struct PeerRunner {
    session: GameSession<UdpTransport>,
    last_tick_time: Instant,
    started: Instant,
    duration: Option<Duration>,
    running: bool,
}

impl PeerRunner {
    pub fn new(config: PeerConfig) -> io::Result<Self> {
        let mut transport = UdpTransport::bind(config.bind)?;
        transport.set_remote(config.remote);
        transport.set_timeout(config.remote_timeout);
        if let Some(sim) = config.packet_loss {
            transport.set_packet_loss_sim(sim);
        }

        let steering = if config.autopilot_drag {
            Steering::Drag
        } else {
            Steering::Keys
        };
        let pilot = Autopilot::new(&config.board, steering);

        let session = GameSession::new(config.board, config.role, transport)
            .with_input(Box::new(pilot));

        Ok(Self {
            session,
            last_tick_time: Instant::now(),
            started: Instant::now(),
            duration: config.duration,
            running: true,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.session.transport().local_addr()
    }

    pub fn stats(&self) -> NetworkStats {
        self.session.transport().stats().clone()
    }

    pub fn run(&mut self) {
        while self.running {
            self.tick_once();

            if self
                .duration
                .is_some_and(|limit| self.started.elapsed() >= limit)
            {
                self.running = false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        self.shutdown();
    }

    pub fn tick_once(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_tick_time;
        self.last_tick_time = now;

        self.session.update(delta);

        let events: Vec<SessionEvent> = self.session.drain_events().collect();
        for event in events {
            self.log_event(event);
        }
    }

    fn log_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Scored { score } | SessionEvent::Conceded { opponent_score: score } => {
                let board = self.session.score();
                log::info!(
                    "{} ({}): {} - {}",
                    event.as_str(),
                    score,
                    board.local,
                    board.remote
                );
            }
            SessionEvent::ColorChanged(color) => {
                log::debug!(
                    "{}: background {} font {}",
                    event.as_str(),
                    color.background,
                    color.font
                );
            }
            SessionEvent::ConnectionLost => {
                log::warn!("{}, stopping", event.as_str());
                self.running = false;
            }
            SessionEvent::AuthorityGained | SessionEvent::AuthorityLost => {
                log::debug!("{}", event.as_str());
            }
        }
    }

    fn shutdown(&mut self) {
        let stats = self.stats();
        let score = self.session.score();
        log::info!(
            "final score {} - {}, sent {} received {} dropped {} rejected {}",
            score.local,
            score.remote,
            stats.packets_sent,
            stats.packets_received,
            stats.packets_dropped,
            stats.packets_rejected
        );
        self.session.teardown();
    }
}
