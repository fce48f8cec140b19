use bevy::prelude::*;

use super::FieldSlot;

/// Top-level application state machine.
///
/// The transition is one-way: once the form is submitted there is no path
/// back into `InputForm`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Input form; shown on startup.
    #[default]
    InputForm,
    /// Bodies moving inside the arena.
    Running,
}

/// Root node of the input form; entire tree is despawned on `OnExit(InputForm)`.
#[derive(Component)]
pub struct InputFormRoot;

/// Tags the label text next to a field.
#[derive(Component, Debug, Clone, Copy)]
pub struct FieldLabel(pub FieldSlot);

/// Tags the "Start Simulation" button.
#[derive(Component)]
pub struct StartButton;

/// Status line under the start button; shows why a submission was rejected.
#[derive(Component)]
pub struct FormStatusText;
