//! Deterministic event source.
//!
//! Clock ticks, seeded random samples and player input are merged into one
//! totally ordered stream.  Within a tick the order is: input, then the
//! random sample (every `random_interval` ticks), then the `Tick` itself.

use std::collections::VecDeque;

use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::compute::{initial_state, reduce};
use crate::config::GameConfig;
use crate::entities::{Event, GameState};
use crate::rng::Lcg;

/// An input event due at a given tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: Event,
}

#[derive(Debug, Clone)]
pub struct EventStream {
    rng: Lcg,
    random_interval: u64,
    random_range: u32,
    next_tick: u64,
    last_tick: Option<u64>,
    script: VecDeque<ScriptedEvent>,
    pending: VecDeque<Event>,
}

impl EventStream {
    /// An endless stream with no scripted input.
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        Self {
            rng: Lcg::seed_from_u64(u64::from(seed)),
            random_interval: config.random_interval.max(1),
            random_range: config.random_range.max(1),
            next_tick: 1,
            last_tick: None,
            script: VecDeque::new(),
            pending: VecDeque::new(),
        }
    }

    /// Stop after `last_tick`.
    pub fn until(mut self, last_tick: u64) -> Self {
        self.last_tick = Some(last_tick);
        self
    }

    /// Replay `script` on top of the clock.  Events are sorted by tick;
    /// events sharing a tick keep their order.
    pub fn with_script(mut self, mut script: Vec<ScriptedEvent>) -> Self {
        script.sort_by_key(|e| e.tick);
        self.script = script.into();
        self
    }

    /// Generator state after every sample drawn so far.
    pub fn rng(&self) -> &Lcg {
        &self.rng
    }

    /// Ordered events for the next tick, with `input` placed first.
    pub fn advance(&mut self, input: impl IntoIterator<Item = Event>) -> Vec<Event> {
        let t = self.next_tick;
        self.next_tick += 1;

        let mut events: Vec<Event> = input.into_iter().collect();
        if t % self.random_interval == 0 {
            events.push(Event::RandomSample(self.rng.next_sample(self.random_range)));
        }
        events.push(Event::Tick(t));
        events
    }
}

impl Iterator for EventStream {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if self.last_tick.is_some_and(|last| self.next_tick > last) {
            return None;
        }
        let t = self.next_tick;
        let mut due = Vec::new();
        while self.script.front().is_some_and(|e| e.tick <= t) {
            if let Some(scripted) = self.script.pop_front() {
                due.push(scripted.event);
            }
        }
        let events = self.advance(due);
        self.pending.extend(events);
        self.pending.pop_front()
    }
}

/// Left fold of `events` over `state`.
pub fn fold_events<I>(state: &GameState, events: I, config: &GameConfig) -> GameState
where
    I: IntoIterator<Item = Event>,
{
    events
        .into_iter()
        .fold(state.clone(), |acc, event| reduce(&acc, &event, config))
}

/// Run a full game for `ticks` ticks from the campaign start.
pub fn replay(config: &GameConfig, seed: u32, script: Vec<ScriptedEvent>, ticks: u64) -> GameState {
    let stream = EventStream::new(config, seed).with_script(script).until(ticks);
    fold_events(&initial_state(config), stream, config)
}
