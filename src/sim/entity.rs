//! Simulated bodies: the ball and the monster

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryMask, CollisionMatrix};

/// Stable entity identifier, never reused within an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Monotonic entity id allocator
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        EntityId(id)
    }
}

/// A body taking part in the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    category: Category,
    pub collision_mask: CategoryMask,
    pub contact_mask: CategoryMask,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half of the sprite's width/height
    pub half_extents: Vec2,
    pub dynamic: bool,
    pub active: bool,
}

impl Entity {
    /// Create an active body with masks taken from the matrix
    pub fn new(
        id: EntityId,
        category: Category,
        matrix: &CollisionMatrix,
        pos: Vec2,
        half_extents: Vec2,
    ) -> Self {
        let masks = matrix.masks(category);
        Self {
            id,
            category,
            collision_mask: masks.collision,
            contact_mask: masks.contact,
            pos,
            vel: Vec2::ZERO,
            half_extents,
            dynamic: true,
            active: true,
        }
    }

    /// Category is fixed at creation
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn is_ball(&self) -> bool {
        self.category == Category::Ball
    }

    /// Add an impulse to the velocity
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.active {
            log::debug!("Ignoring impulse on inactive entity {:?}", self.id);
            return;
        }
        self.vel += impulse;
    }

    /// Teleport to a point (touch drag)
    pub fn move_to(&mut self, point: Vec2) {
        if self.active {
            self.pos = point;
        }
    }

    /// Integrate velocity over `dt`
    pub fn integrate(&mut self, dt: f32) {
        if self.active && self.dynamic {
            self.pos += self.vel * dt;
        }
    }

    /// Mark inactive and stop
    pub fn destroy(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
    }
}

/// Create a resting ball at the launch point
pub fn create_ball(
    id: EntityId,
    launch_pos: Vec2,
    half_extents: Vec2,
    matrix: &CollisionMatrix,
) -> Entity {
    Entity::new(id, Category::Ball, matrix, launch_pos, half_extents)
}
