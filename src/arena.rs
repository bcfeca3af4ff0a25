//! Host-facing arena
//!
//! The rendering/input layer talks to [`Arena`]: it forwards touches and
//! contact reports as they arrive, calls [`Arena::on_frame`] once per rendered
//! frame, and drains [`ArenaEvent`]s to draw. Input is buffered and applied at
//! the next simulation tick, never mid-tick.

use glam::Vec2;

use crate::config::ArenaConfig;
use crate::consts::*;
use crate::error::Result;
use crate::sim::{
    ArenaEvent, ArenaState, ContactBody, ContactEvent, ContactHandler, ContactResolver, TickInput,
    TickSummary, TouchEvent, tick,
};

/// Arena instance holding all state
pub struct Arena {
    state: ArenaState,
    handler: Box<dyn ContactHandler>,
    input: TickInput,
    accumulator: f32,
}

impl Arena {
    /// Start an arena with the stock contact rules
    pub fn new(config: ArenaConfig) -> Result<Self> {
        Self::with_handler(config, Box::new(ContactResolver))
    }

    /// Start an arena with custom contact rules
    pub fn with_handler(config: ArenaConfig, handler: Box<dyn ContactHandler>) -> Result<Self> {
        let state = ArenaState::new(config)?;
        log::info!(
            "Arena {}x{} ready (seed {})",
            state.config.arena_width,
            state.config.arena_height,
            state.config.seed
        );
        Ok(Self {
            state,
            handler,
            input: TickInput::default(),
            accumulator: 0.0,
        })
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    pub fn on_touch_begin(&mut self, point: Vec2) {
        self.input.touches.push(TouchEvent::Begin(point));
    }

    pub fn on_touch_move(&mut self, point: Vec2) {
        self.input.touches.push(TouchEvent::Move(point));
    }

    pub fn on_touch_end(&mut self, point: Vec2) {
        self.input.touches.push(TouchEvent::End(point));
    }

    pub fn on_touch_cancel(&mut self, point: Vec2) {
        self.input.touches.push(TouchEvent::Cancel(point));
    }

    pub fn on_physical_contact(&mut self, a: ContactBody, b: ContactBody) {
        self.input.contacts.push(ContactEvent::new(a, b));
    }

    /// Run fixed-step ticks for a frame of `dt` seconds
    ///
    /// Buffered input goes to the first tick of the frame. If the frame is
    /// too short for any tick, input waits for the next frame. A NaN or
    /// infinite `dt` runs nothing and leaves the accumulator untouched.
    pub fn on_frame(&mut self, dt: f32) -> Vec<TickSummary> {
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame delta {dt}");
            return Vec::new();
        }
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut summaries = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot inputs are consumed by the first substep
            let input = std::mem::take(&mut self.input);
            summaries.push(tick(&mut self.state, &input, SIM_DT, self.handler.as_mut()));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.4}s of frame time", self.accumulator);
            self.accumulator = 0.0;
        }
        summaries
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        self.state.drain_events()
    }

    /// Explicit restart; pending input is discarded
    pub fn new_game(&mut self) {
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.state.new_game();
    }
}
