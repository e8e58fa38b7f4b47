use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::paddle::Direction;

use super::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press(Direction),
    Release(Direction),
    Drag { x: f32, x1: f32, delta_x: f32 },
}

impl InputEvent {
    pub fn key_down(code: u32) -> Option<Self> {
        Direction::from_key_code(code).map(Self::Press)
    }

    pub fn key_up(code: u32) -> Option<Self> {
        Direction::from_key_code(code).map(Self::Release)
    }
}

pub trait InputSource {
    fn poll_input(&mut self, view: &SessionSnapshot) -> Vec<InputEvent>;
}

#[derive(Debug, Default)]
pub struct QueuedInput {
    queue: InputQueue,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> InputQueue {
        self.queue.clone()
    }
}

impl InputSource for QueuedInput {
    fn poll_input(&mut self, _view: &SessionSnapshot) -> Vec<InputEvent> {
        self.queue.events.borrow_mut().drain(..).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl InputQueue {
    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_map_to_events() {
        assert_eq!(InputEvent::key_down(37), Some(InputEvent::Press(Direction::Left)));
        assert_eq!(InputEvent::key_up(68), Some(InputEvent::Release(Direction::Right)));
        assert_eq!(InputEvent::key_down(32), None);
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut source = QueuedInput::new();
        let handle = source.handle();
        handle.push(InputEvent::Press(Direction::Left));
        handle.push(InputEvent::Release(Direction::Left));

        let events = source.poll_input(&SessionSnapshot::default());
        assert_eq!(
            events,
            vec![
                InputEvent::Press(Direction::Left),
                InputEvent::Release(Direction::Left)
            ]
        );
        assert!(handle.is_empty());
    }
}
