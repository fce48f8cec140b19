//! Two-body elastic collision visualizer.
//!
//! A form collects two masses and two velocities; the bodies then collide
//! elastically along one axis inside a bounded arena.  The physics lives in
//! [`simulation`] and is independent of rendering.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod rendering;
pub mod simulation;
