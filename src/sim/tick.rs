//! Simulation tick
//!
//! Core loop that advances the arena deterministically. Per tick:
//! buffered touches, movement, bounds, contacts, respawn timer.

use super::bounds::is_out_of_bounds;
use super::contact::{ContactEvent, ContactHandler, ContactOutcome};
use super::entity::EntityId;
use super::gesture::TouchEvent;
use super::state::ArenaState;

/// Input buffered since the previous tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch begin/move/end/cancel
    pub touches: Vec<TouchEvent>,
    /// Overlaps reported by the external detector
    pub contacts: Vec<ContactEvent>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty() && self.contacts.is_empty()
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// Ball left the arena and was replaced
    pub bounds_reset: bool,
    /// One outcome per reported contact
    pub contacts: Vec<ContactOutcome>,
    /// Monster spawned by the respawn timer
    pub respawned: Option<EntityId>,
}

/// Advance the arena by `dt` seconds
pub fn tick(
    state: &mut ArenaState,
    input: &TickInput,
    dt: f32,
    handler: &mut dyn ContactHandler,
) -> TickSummary {
    let mut summary = TickSummary::default();

    for touch in &input.touches {
        state.apply_touch(*touch);
    }

    // Movement
    state.time_ticks += 1;
    state.clock += dt as f64;
    if let Some(ball) = state.ball_mut() {
        ball.integrate(dt);
    }
    state.spawner.advance(dt);

    // Bounds before contacts: a reset here makes this tick's contacts stale
    let (width, height) = (state.config.arena_width, state.config.arena_height);
    if state
        .ball()
        .is_some_and(|ball| is_out_of_bounds(ball, width, height))
    {
        log::debug!("Ball left the arena");
        state.reset_ball();
        summary.bounds_reset = true;
    }

    for contact in &input.contacts {
        summary.contacts.push(handler.on_contact(state, contact));
    }

    summary.respawned = state.poll_respawn();

    summary
}
