//! Input form — `AppState` definition and `InputFormPlugin`.
//!
//! ## States
//!
//! | State       | Description                                  |
//! |-------------|----------------------------------------------|
//! | `InputForm` | Initial state; masses and velocities entered |
//! | `Running`   | Simulation running; form despawned for good  |
//!
//! ## Systems (registered by `InputFormPlugin`)
//!
//! | System                     | Schedule                | Purpose                          |
//! |----------------------------|-------------------------|----------------------------------|
//! | `setup_input_form`         | `OnEnter(InputForm)`    | Spawn labels, fields, start btn  |
//! | `enable_form_redraw`       | `OnEnter(InputForm)`    | Low-power 30 Hz redraw           |
//! | `cleanup_input_form`       | `OnExit(InputForm)`     | Despawn form UI entities         |
//! | `field_focus_system`       | `Update / in InputForm` | Click-to-focus, last click wins  |
//! | `field_keyboard_system`    | `Update / in InputForm` | Edit the focused field           |
//! | `caret_blink_system`       | `Update / in InputForm` | 500 ms caret blink               |
//! | `field_visual_system`      | `Update / in InputForm` | Highlight + caret repaint        |
//! | `field_label_color_system` | `Update / in InputForm` | Red label on focused field       |
//! | `start_button_system`      | `Update / in InputForm` | Validate and submit              |

use std::time::Duration;

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};

use crate::config::SimConfig;
use crate::constants::UI_FONT_SIZE;
use crate::error::SimResult;

mod common;
mod field;
mod input_form;
mod types;

use common::*;
pub use field::*;
pub use input_form::*;
pub use types::*;

/// Registers `AppState`, the form UI setup/teardown, and the field handlers.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(AppState::Running))`, so the state is always registered
/// first.
pub struct InputFormPlugin;

impl Plugin for InputFormPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_systems(
                OnEnter(AppState::InputForm),
                (setup_input_form, enable_form_redraw),
            )
            .add_systems(OnExit(AppState::InputForm), cleanup_input_form)
            .add_systems(
                Update,
                (
                    field_focus_system,
                    field_keyboard_system,
                    caret_blink_system,
                    field_visual_system,
                    field_label_color_system,
                    start_button_system,
                )
                    .chain()
                    .run_if(in_state(AppState::InputForm)),
            );
    }
}
