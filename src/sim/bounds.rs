//! Arena bounds check for the ball
//!
//! The arena origin sits at the bottom-center of the visible area: x runs
//! from `-width/2` to `+width/2`, y from `0` up to `height`. A body counts as
//! gone once it has fully cleared the left, right or top edge. There is no
//! bottom edge.

use glam::Vec2;

use super::entity::Entity;

/// True if the entity has left the visible arena
pub fn is_out_of_bounds(entity: &Entity, arena_width: f32, arena_height: f32) -> bool {
    point_out_of_bounds(entity.pos, entity.half_extents, arena_width, arena_height)
}

/// Bounds rule on a bare position/half-size
#[inline]
pub fn point_out_of_bounds(pos: Vec2, half_extents: Vec2, arena_width: f32, arena_height: f32) -> bool {
    let x_limit = arena_width / 2.0 + half_extents.x;
    pos.x > x_limit || pos.x < -x_limit || pos.y > arena_height + half_extents.y
}
