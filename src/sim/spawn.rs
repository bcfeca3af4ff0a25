//! Monster lifecycle: spawn, hit, delayed respawn
//!
//! The scheduler owns the only monster. Its phase is derived from two
//! optional fields, so "two monsters" or "two timers" cannot be represented:
//!
//! | monster | respawn_at | phase            |
//! |---------|------------|------------------|
//! | None    | None       | `Empty`          |
//! | Some    | None       | `Active`         |
//! | None    | Some       | `PendingRespawn` |
//! | Some    | Some       | `Active` (timer fires as a no-op) |
//!
//! A successful spawn drops any pending timer, and so does a hit, so the
//! timer armed after a hit always runs the full delay from that hit.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::{Category, CollisionMatrix};
use super::entity::{Entity, EntityId, EntityIds};
use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};

/// Color used for the hit effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle a monster spawns and moves within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRegion {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Uniform point inside the region
    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
        )
    }
}

/// How a monster moves once spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementStyle {
    /// Random waypoints inside the region, repeated forever
    #[default]
    Wander,
    /// Left edge, right edge, repeat (at the spawn height)
    Patrol,
}

/// One entry of the monster catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterVariant {
    pub name: String,
    pub hit_color: Rgb,
    pub region: SpawnRegion,
    #[serde(default)]
    pub movement: MovementStyle,
}

/// Cyclic waypoint path, one fixed-duration leg per waypoint
#[derive(Debug, Clone)]
pub struct MovementPath {
    waypoints: Vec<Vec2>,
    leg_duration: f32,
    from: Vec2,
    next: usize,
    leg_elapsed: f32,
}

impl MovementPath {
    pub fn new(start: Vec2, waypoints: Vec<Vec2>, leg_duration: f32) -> Self {
        Self {
            waypoints,
            leg_duration,
            from: start,
            next: 0,
            leg_elapsed: 0.0,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Advance along the path and return the new position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        if self.waypoints.is_empty() || self.leg_duration <= 0.0 {
            return self.from;
        }

        self.leg_elapsed += dt;
        while self.leg_elapsed >= self.leg_duration {
            self.leg_elapsed -= self.leg_duration;
            self.from = self.waypoints[self.next];
            self.next = (self.next + 1) % self.waypoints.len();
        }

        let t = self.leg_elapsed / self.leg_duration;
        self.from.lerp(self.waypoints[self.next], t)
    }
}

/// The live monster
#[derive(Debug, Clone)]
pub struct Monster {
    pub entity: Entity,
    /// Index into the catalog
    pub variant: usize,
    /// Display scale applied to the base sprite size
    pub scale: f32,
    pub path: MovementPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPhase {
    Empty,
    Active,
    PendingRespawn,
}

/// Owns monster creation, destruction and timed respawn
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    catalog: Vec<MonsterVariant>,
    respawn_delay: f64,
    base_half_extents: Vec2,
    scale_range: (f32, f32),
    leg_duration: f32,
    wander_legs: usize,
    monster: Option<Monster>,
    respawn_at: Option<f64>,
}

impl SpawnScheduler {
    pub fn from_config(config: &ArenaConfig) -> Result<Self> {
        if config.catalog.is_empty() {
            return Err(ArenaError::EmptyCatalog);
        }
        Ok(Self {
            catalog: config.catalog.clone(),
            respawn_delay: config.respawn_delay as f64,
            base_half_extents: config.monster_half_extents,
            scale_range: (config.monster_min_scale, config.monster_max_scale),
            leg_duration: config.leg_duration,
            wander_legs: config.wander_legs,
            monster: None,
            respawn_at: None,
        })
    }

    pub fn phase(&self) -> SpawnPhase {
        match (&self.monster, self.respawn_at) {
            (Some(_), _) => SpawnPhase::Active,
            (None, Some(_)) => SpawnPhase::PendingRespawn,
            (None, None) => SpawnPhase::Empty,
        }
    }

    pub fn catalog(&self) -> &[MonsterVariant] {
        &self.catalog
    }

    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    pub fn monster_id(&self) -> Option<EntityId> {
        self.monster.as_ref().map(|m| m.entity.id)
    }

    pub fn variant_of(&self, monster: &Monster) -> &MonsterVariant {
        &self.catalog[monster.variant]
    }

    /// Deadline of the armed respawn timer, if any
    pub fn respawn_at(&self) -> Option<f64> {
        self.respawn_at
    }

    /// Create a monster unless one is already alive
    pub fn spawn(
        &mut self,
        ids: &mut EntityIds,
        matrix: &CollisionMatrix,
        rng: &mut impl Rng,
    ) -> Option<&Monster> {
        if let Some(existing) = &self.monster {
            log::debug!(
                "Spawn skipped: monster {:?} is still alive",
                existing.entity.id
            );
            return None;
        }

        let variant_idx = rng.random_range(0..self.catalog.len());
        let variant = &self.catalog[variant_idx];
        let pos = variant.region.sample(rng);

        let (min_scale, max_scale) = self.scale_range;
        let scale = if min_scale < max_scale {
            rng.random_range(min_scale..max_scale)
        } else {
            min_scale
        };

        let waypoints = match variant.movement {
            MovementStyle::Wander => (0..self.wander_legs)
                .map(|_| variant.region.sample(rng))
                .collect(),
            MovementStyle::Patrol => vec![
                Vec2::new(variant.region.min.x, pos.y),
                Vec2::new(variant.region.max.x, pos.y),
            ],
        };

        let entity = Entity::new(
            ids.next_id(),
            Category::Monster,
            matrix,
            pos,
            self.base_half_extents * scale,
        );
        log::info!(
            "Spawned {} {:?} at ({:.0}, {:.0}) scale {:.2}",
            variant.name,
            entity.id,
            pos.x,
            pos.y,
            scale
        );

        if let Some(deadline) = self.respawn_at.take() {
            log::debug!("Pending respawn (due at {:.3}) dropped by spawn", deadline);
        }
        self.monster = Some(Monster {
            entity,
            variant: variant_idx,
            scale,
            path: MovementPath::new(pos, waypoints, self.leg_duration),
        });
        self.monster.as_ref()
    }

    /// Destroy the live monster if `id` names it
    pub fn hit(&mut self, id: EntityId) -> Option<Monster> {
        match &self.monster {
            Some(m) if m.entity.id == id => {
                let mut monster = self.monster.take()?;
                monster.entity.destroy();
                if let Some(deadline) = self.respawn_at.take() {
                    log::debug!("Stale respawn timer (due at {:.3}) dropped by hit", deadline);
                }
                Some(monster)
            }
            _ => {
                log::debug!("Hit on {:?} ignored: not the live monster", id);
                None
            }
        }
    }

    /// Arm the respawn timer; a pending timer is left as-is
    ///
    /// Returns true if a new timer was armed.
    pub fn schedule_respawn(&mut self, now: f64) -> bool {
        if let Some(deadline) = self.respawn_at {
            log::debug!("Respawn already pending (due at {:.3})", deadline);
            return false;
        }
        self.respawn_at = Some(now + self.respawn_delay);
        true
    }

    /// Drop a pending timer
    pub fn cancel_respawn(&mut self) -> bool {
        self.respawn_at.take().is_some()
    }

    /// Fire the respawn timer if it is due
    pub fn poll(
        &mut self,
        now: f64,
        ids: &mut EntityIds,
        matrix: &CollisionMatrix,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        match self.respawn_at {
            Some(deadline) if now >= deadline => {
                self.respawn_at = None;
                if self.monster.is_some() {
                    log::debug!("Respawn timer fired with a monster alive; nothing to do");
                    return None;
                }
                self.spawn(ids, matrix, rng).map(|m| m.entity.id)
            }
            _ => None,
        }
    }

    /// Move the live monster along its path
    pub fn advance(&mut self, dt: f32) {
        if let Some(monster) = &mut self.monster {
            monster.entity.pos = monster.path.advance(dt);
        }
    }

    /// Back to `Empty`: no monster, no timer
    pub fn clear(&mut self) {
        if let Some(monster) = &mut self.monster {
            monster.entity.destroy();
        }
        self.monster = None;
        self.respawn_at = None;
    }
}
