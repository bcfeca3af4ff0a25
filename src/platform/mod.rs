//! Platform abstraction layer
//!
//! The simulation is platform-free; this layer adapts it to hosts.
//! - `web`: JS-facing arena handle (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;
