//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `tick`
//! - Seeded RNG only
//! - Input is applied at tick boundaries, in arrival order
//! - No rendering or platform dependencies

pub mod bounds;
pub mod category;
pub mod contact;
pub mod entity;
pub mod gesture;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::is_out_of_bounds;
pub use category::{Category, CategoryMask, CollisionMatrix, MaskPair};
pub use contact::{
    CollisionGraph, CollisionLink, ContactBody, ContactEvent, ContactHandler, ContactOutcome,
    ContactResolver, describe_collision_graph,
};
pub use entity::{Entity, EntityId, EntityIds, create_ball};
pub use gesture::{GestureTracker, TouchEvent, TouchGesture, compute_impulse};
pub use spawn::{
    Monster, MonsterVariant, MovementPath, MovementStyle, Rgb, SpawnPhase, SpawnRegion,
    SpawnScheduler,
};
pub use state::{ArenaEvent, ArenaState, Effect};
pub use tick::{TickInput, TickSummary, tick};
