use bevy::prelude::*;

use crate::constants::ARENA_WIDTH;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` is centred on the world origin with one world unit
/// per logical pixel, so the 800×500 window spans x ∈ [-400, 400].
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Map an arena position (display units from the left wall) to world space.
///
/// Positions are rounded to whole pixels; every body sits on the arena's
/// vertical middle.
#[inline]
pub fn arena_to_world(position: f32) -> Vec2 {
    Vec2::new(position.round() - ARENA_WIDTH / 2.0, 0.0)
}
