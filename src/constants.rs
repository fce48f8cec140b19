//! Centralised simulation and layout constants.
//!
//! Every runtime-tunable value here is mirrored by a field in
//! [`crate::config::SimConfig`], which can override it from
//! `assets/collision.toml`.  Window geometry is fixed at compile time.

// ── Window / Arena ────────────────────────────────────────────────────────────

/// Logical window width; also the arena width the bodies bounce inside.
pub const ARENA_WIDTH: f32 = 800.0;

/// Logical window height.
pub const ARENA_HEIGHT: f32 = 500.0;

/// Thickness of the black arena border (px).
pub const ARENA_BORDER_PX: f32 = 3.0;

pub const WINDOW_TITLE: &str = "Elastic Collision Simulator";

// ── Physics ───────────────────────────────────────────────────────────────────

/// Conversion between stored velocities (display units per second) and the
/// physical velocities typed into the form.
///
/// A typed velocity of `3` m/s moves a body `3 × 60 = 180` display units per
/// second.  The collision law divides by this before applying the elastic
/// formula and multiplies the result back.
pub const VELOCITY_SCALE: f32 = 60.0;

/// Radius shared by both bodies (display units).
pub const BODY_RADIUS: f32 = 20.0;

/// Minimum simulated time between two resolved collisions (seconds).
///
/// Discrete stepping can leave the bodies overlapped for several frames after
/// a contact; the cooldown keeps one contact from producing several impulses.
pub const COLLISION_COOLDOWN_SECS: f32 = 0.2;

/// Fixed physics step rate (Hz).
pub const PHYSICS_HZ: f32 = 60.0;

/// Starting position of body 1 (display units from the left wall).
pub const BODY1_START_X: f32 = 200.0;

/// Starting position of body 2 (display units from the left wall).
pub const BODY2_START_X: f32 = 600.0;

// ── Input form ────────────────────────────────────────────────────────────────

/// Caret visibility flips once per period while a field is active (seconds).
pub const CARET_BLINK_SECS: f32 = 0.5;

/// Redraw rate while the input form is idle (Hz).
pub const FORM_REDRAW_HZ: f32 = 30.0;

/// Font size used for labels, fields and telemetry.
pub const UI_FONT_SIZE: f32 = 22.0;
