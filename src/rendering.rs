//! Rendering systems: arena border, body circles, and the telemetry overlay.
//!
//! ## Layer Model
//!
//! | Layer          | Technology | Source of truth                 |
//! |----------------|------------|---------------------------------|
//! | Arena border   | Bevy UI    | static, 3 px black              |
//! | Body circles   | `Mesh2d`   | `SimulationState::bodies`       |
//! | Telemetry text | Bevy UI    | masses + current velocities     |
//!
//! ## System Responsibilities
//!
//! | System                         | Schedule           | Purpose                       |
//! |--------------------------------|--------------------|-------------------------------|
//! | `setup_arena`                  | `OnEnter(Running)` | Spawn border, circles, text   |
//! | `sync_body_transforms_system`  | `Update`           | Circles follow body positions |
//! | `telemetry_display_system`     | `Update`           | Refresh velocity readout      |

use crate::constants::{ARENA_BORDER_PX, UI_FONT_SIZE};
use crate::graphics::arena_to_world;
use crate::simulation::SimulationState;
use bevy::prelude::*;

/// Root of the arena border overlay.
#[derive(Component)]
pub struct ArenaBorder;

/// Circle drawn for `SimulationState::bodies[index]`.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual(pub usize);

/// Which telemetry line a text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryLine {
    Masses,
    Velocities,
}

fn body_color(index: usize) -> Color {
    if index == 0 {
        Color::srgb(1.0, 0.0, 0.0)
    } else {
        Color::srgb(0.0, 0.0, 1.0)
    }
}

/// Masses keep a decimal point even when whole (`2.0`, not `2`).
pub fn masses_line(m1: f32, m2: f32) -> String {
    format!("Mass 1: {m1:?} kg   |   Mass 2: {m2:?} kg")
}

pub fn velocities_line(v1: f32, v2: f32) -> String {
    format!("Velocity 1: {v1:.2} m/s   |   Velocity 2: {v2:.2} m/s")
}

// ── OnEnter(Running) ──────────────────────────────────────────────────────────

/// Spawn the arena border, one circle per body, and the telemetry text.
pub fn setup_arena(
    mut commands: Commands,
    state: Option<Res<SimulationState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Some(state) = state else {
        return;
    };

    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            border: UiRect::all(Val::Px(ARENA_BORDER_PX)),
            ..default()
        },
        BorderColor::all(Color::BLACK),
        ArenaBorder,
    ));

    for (index, body) in state.bodies.iter().enumerate() {
        commands.spawn((
            Mesh2d(meshes.add(Circle::new(body.radius))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(body_color(index)))),
            Transform::from_translation(arena_to_world(body.position).extend(0.0)),
            BodyVisual(index),
        ));
    }

    let [v1, v2] = state.physical_velocities();
    let lines = [
        (
            TelemetryLine::Masses,
            masses_line(state.bodies[0].mass, state.bodies[1].mass),
        ),
        (TelemetryLine::Velocities, velocities_line(v1, v2)),
    ];
    for (row, (line, text)) in lines.into_iter().enumerate() {
        commands.spawn((
            Text::new(text),
            TextFont {
                font_size: UI_FONT_SIZE,
                ..default()
            },
            TextColor(Color::BLACK),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0 + row as f32 * 30.0),
                ..default()
            },
            line,
        ));
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Move each circle to its body's rounded position.
pub fn sync_body_transforms_system(
    state: Option<Res<SimulationState>>,
    mut visuals: Query<(&BodyVisual, &mut Transform)>,
) {
    let Some(state) = state else {
        return;
    };
    for (visual, mut transform) in visuals.iter_mut() {
        if let Some(body) = state.bodies.get(visual.0) {
            let pos = arena_to_world(body.position);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
        }
    }
}

/// Refresh the velocity line from the current state.
pub fn telemetry_display_system(
    state: Option<Res<SimulationState>>,
    mut lines: Query<(&TelemetryLine, &mut Text)>,
) {
    let Some(state) = state else {
        return;
    };
    if !state.is_changed() {
        return;
    }
    let [v1, v2] = state.physical_velocities();
    for (line, mut text) in lines.iter_mut() {
        if *line == TelemetryLine::Velocities {
            text.0 = velocities_line(v1, v2);
        }
    }
}
