use bevy::prelude::*;
use bevy::window::WindowResolution;

use elastic_collision::config::{self, SimConfig};
use elastic_collision::constants::{ARENA_HEIGHT, ARENA_WIDTH, PHYSICS_HZ, WINDOW_TITLE};
use elastic_collision::graphics;
use elastic_collision::menu::InputFormPlugin;
use elastic_collision::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::WHITE))
        // Insert SimConfig with compiled defaults; load_sim_config will
        // overwrite it from assets/collision.toml (if present) in PreStartup.
        .insert_resource(SimConfig::default())
        .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ as f64))
        // InputFormPlugin registers AppState, so it goes first.
        .add_plugins(InputFormPlugin)
        .add_plugins(SimulationPlugin)
        // Load config in PreStartup: the initial OnEnter(InputForm) runs
        // before Startup and already reads it.
        .add_systems(PreStartup, config::load_sim_config)
        .add_systems(Startup, graphics::setup_camera)
        .run();
}
