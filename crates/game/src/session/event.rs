use crate::color::BoardColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    AuthorityGained,
    AuthorityLost,
    Scored { score: u32 },
    Conceded { opponent_score: u32 },
    ColorChanged(BoardColor),
    ConnectionLost,
}

impl SessionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorityGained => "ball arrived",
            Self::AuthorityLost => "ball crossed the separator",
            Self::Scored { .. } => "scored",
            Self::Conceded { .. } => "conceded",
            Self::ColorChanged(_) => "board color changed",
            Self::ConnectionLost => "connection lost",
        }
    }
}
