//! Turns key presses and releases into `Move` / `StopMoving` events.
//!
//! Terminals with keyboard enhancement report `Press`, `Repeat` and
//! `Release`.  Classic terminals only repeat `Press` while a key is down
//! and never say when it goes up, so a direction that has been quiet for
//! longer than the hold window counts as released.  The expiry runs on
//! both kinds of terminal; repeats keep refreshing a held key.

use std::collections::HashMap;

use crate::entities::{Direction, Event};

#[derive(Debug, Clone)]
pub struct HeldKeys {
    /// Direction → tick it was last seen (press or repeat).
    last_seen: HashMap<Direction, u64>,
    hold_window: u64,
    speed: f64,
}

impl HeldKeys {
    pub fn new(hold_window: u64, speed: f64) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
            speed,
        }
    }

    /// Press or repeat.  Only the first press of a direction moves the ship.
    pub fn press(&mut self, direction: Direction, now: u64) -> Option<Event> {
        match self.last_seen.insert(direction, now) {
            None => Some(Event::Move(direction.signed(self.speed))),
            Some(_) => None,
        }
    }

    pub fn release(&mut self, direction: Direction) -> Option<Event> {
        self.last_seen
            .remove(&direction)
            .map(|_| Event::StopMoving(direction))
    }

    /// Release every direction not seen within the hold window.
    pub fn expire(&mut self, now: u64) -> Vec<Event> {
        let window = self.hold_window;
        let mut stale: Vec<Direction> = self
            .last_seen
            .iter()
            .filter(|(_, &seen)| now.saturating_sub(seen) > window)
            .map(|(&d, _)| d)
            .collect();
        // HashMap order is arbitrary; keep the event order stable.
        stale.sort_by_key(|d| matches!(d, Direction::Right));
        stale.into_iter().filter_map(|d| self.release(d)).collect()
    }
}
