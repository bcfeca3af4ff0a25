//! Arena configuration
//!
//! Every tunable of the arena lives here. Defaults come from [`crate::consts`];
//! a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ArenaError, Result};
use crate::sim::bounds::point_out_of_bounds;
use crate::sim::{MonsterVariant, MovementStyle, Rgb, SpawnRegion};

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    /// Where a fresh ball is placed
    pub launch_pos: Vec2,
    pub ball_half_extents: Vec2,
    /// Drag-to-impulse multiplier
    pub impulse_scale: f32,

    // === Monsters ===
    /// Seconds between a hit and the next spawn
    pub respawn_delay: f32,
    /// Half size of a monster sprite at scale 1.0
    pub monster_half_extents: Vec2,
    pub monster_min_scale: f32,
    pub monster_max_scale: f32,
    /// Seconds per movement leg
    pub leg_duration: f32,
    /// Waypoints per wander cycle
    pub wander_legs: usize,
    pub catalog: Vec<MonsterVariant>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            launch_pos: Vec2::from(BALL_LAUNCH_POS),
            ball_half_extents: Vec2::splat(BALL_HALF_SIZE),
            impulse_scale: IMPULSE_SCALE,
            respawn_delay: RESPAWN_DELAY,
            monster_half_extents: Vec2::splat(MONSTER_HALF_SIZE),
            monster_min_scale: MONSTER_MIN_SCALE,
            monster_max_scale: MONSTER_MAX_SCALE,
            leg_duration: MONSTER_LEG_DURATION,
            wander_legs: MONSTER_WANDER_LEGS,
            catalog: default_catalog(ARENA_WIDTH, ARENA_HEIGHT),
        }
    }
}

/// The four stock monsters, roaming the upper part of the arena
pub fn default_catalog(arena_width: f32, arena_height: f32) -> Vec<MonsterVariant> {
    let region = SpawnRegion::new(
        Vec2::new(-arena_width / 2.0, MONSTER_MIN_Y),
        Vec2::new(arena_width / 2.0, arena_height),
    );
    [
        ("BlueMonster", Rgb::new(0, 0, 255)),
        ("PurpleMonster", Rgb::new(128, 0, 128)),
        ("BlackMonster", Rgb::new(0, 0, 0)),
        ("GreenMonster", Rgb::new(0, 255, 0)),
    ]
    .into_iter()
    .map(|(name, hit_color)| MonsterVariant {
        name: name.to_string(),
        hit_color,
        region,
        movement: MovementStyle::Wander,
    })
    .collect()
}

impl ArenaConfig {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Arena config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject configurations the arena cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ArenaError::invalid("arena_width/arena_height", "must be positive"));
        }
        if self.ball_half_extents.min_element() < 0.0 {
            return Err(ArenaError::invalid("ball_half_extents", "must not be negative"));
        }
        if !self.impulse_scale.is_finite() {
            return Err(ArenaError::invalid("impulse_scale", "must be finite"));
        }
        if !(self.respawn_delay >= 0.0) {
            return Err(ArenaError::invalid("respawn_delay", "must not be negative"));
        }
        if !(self.leg_duration > 0.0) {
            return Err(ArenaError::invalid("leg_duration", "must be positive"));
        }
        if !(self.monster_min_scale > 0.0 && self.monster_max_scale >= self.monster_min_scale) {
            return Err(ArenaError::invalid(
                "monster_min_scale/monster_max_scale",
                "need 0 < min <= max",
            ));
        }
        if point_out_of_bounds(
            self.launch_pos,
            self.ball_half_extents,
            self.arena_width,
            self.arena_height,
        ) {
            return Err(ArenaError::invalid(
                "launch_pos",
                format!("{:?} is outside the arena", self.launch_pos),
            ));
        }
        if self.catalog.is_empty() {
            return Err(ArenaError::EmptyCatalog);
        }
        if let Some(bad) = self
            .catalog
            .iter()
            .find(|v| v.region.min.x > v.region.max.x || v.region.min.y > v.region.max.y)
        {
            return Err(ArenaError::invalid(
                "catalog",
                format!("{} has an inverted spawn region", bad.name),
            ));
        }
        Ok(())
    }
}
