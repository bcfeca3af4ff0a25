//! Browser bindings
//!
//! JS owns the canvas, sprites and touch listeners. It forwards touches and
//! overlap reports here, calls `frame` from `requestAnimationFrame`, and
//! pulls events back as JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::sim::{CategoryMask, ContactBody, EntityId};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Arena handle exported to JS
#[wasm_bindgen]
pub struct WebArena {
    arena: Arena,
}

#[wasm_bindgen]
impl WebArena {
    /// `config_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: u64) -> Result<WebArena, JsError> {
        let mut config = if config_json.trim().is_empty() {
            ArenaConfig::default()
        } else {
            ArenaConfig::from_json(config_json)?
        };
        config.seed = seed;
        let arena = Arena::new(config)?;
        Ok(WebArena { arena })
    }

    pub fn touch_begin(&mut self, x: f32, y: f32) {
        self.arena.on_touch_begin(Vec2::new(x, y));
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.arena.on_touch_move(Vec2::new(x, y));
    }

    pub fn touch_end(&mut self, x: f32, y: f32) {
        self.arena.on_touch_end(Vec2::new(x, y));
    }

    pub fn touch_cancel(&mut self, x: f32, y: f32) {
        self.arena.on_touch_cancel(Vec2::new(x, y));
    }

    /// Overlap reported by the JS-side physics, with raw category bits
    pub fn contact(&mut self, id_a: u32, bits_a: u32, id_b: u32, bits_b: u32) {
        self.arena.on_physical_contact(
            ContactBody::new(EntityId(id_a), CategoryMask(bits_a)),
            ContactBody::new(EntityId(id_b), CategoryMask(bits_b)),
        );
    }

    /// Advance by a frame of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f64) {
        self.arena.on_frame((dt_ms / 1000.0) as f32);
    }

    /// Output events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.arena.drain_events())?)
    }

    pub fn score(&self) -> u64 {
        self.arena.state().score
    }

    /// `[x, y]` of the ball, empty if none
    pub fn ball_pos(&self) -> Vec<f32> {
        self.arena
            .state()
            .ball()
            .map(|b| b.pos.to_array().to_vec())
            .unwrap_or_default()
    }

    /// `[x, y]` of the monster, empty if none
    pub fn monster_pos(&self) -> Vec<f32> {
        self.arena
            .state()
            .monster()
            .map(|m| m.pos.to_array().to_vec())
            .unwrap_or_default()
    }

    pub fn new_game(&mut self) {
        self.arena.new_game();
    }
}
