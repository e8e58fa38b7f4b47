mod event;
mod game;
mod input;
mod snapshot;
mod timer;

pub use event::SessionEvent;
pub use game::{Authority, GameSession, Role};
pub use input::{InputEvent, InputQueue, InputSource, QueuedInput};
pub use snapshot::{Scoreboard, SessionSnapshot};
pub use timer::TickTimer;
