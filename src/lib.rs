//! Monster Toss - flick a ball at respawning monsters
//!
//! Core modules:
//! - `sim`: Deterministic simulation (categories, contacts, spawning, tick loop)
//! - `arena`: Host-facing facade that buffers input and steps the simulation
//! - `config`: Arena tunables and monster catalog
//! - `platform`: Browser bindings

pub mod arena;
pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (origin at bottom-center)
    pub const ARENA_WIDTH: f32 = 750.0;
    pub const ARENA_HEIGHT: f32 = 1334.0;

    /// Ball defaults - a 50x50 sprite resting near the bottom
    pub const BALL_LAUNCH_POS: [f32; 2] = [0.0, 100.0];
    pub const BALL_HALF_SIZE: f32 = 25.0;
    /// Drag distance -> impulse multiplier
    pub const IMPULSE_SCALE: f32 = 50.0;

    /// Monster defaults
    pub const RESPAWN_DELAY: f32 = 1.0;
    pub const MONSTER_HALF_SIZE: f32 = 50.0;
    pub const MONSTER_MIN_SCALE: f32 = 0.2;
    pub const MONSTER_MAX_SCALE: f32 = 1.2;
    /// Lowest y a monster may spawn at
    pub const MONSTER_MIN_Y: f32 = 200.0;
    pub const MONSTER_LEG_DURATION: f32 = 1.0;
    pub const MONSTER_WANDER_LEGS: usize = 5;
}
