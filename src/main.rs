use bevy::input::InputSystems;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use grapple_arena::config::{ArenaConfig, CONFIG_PATH};
use grapple_arena::graphics::ArenaViewPlugin;
use grapple_arena::input::{gamepad_connection_system, gather_pad_inputs_system};
use grapple_arena::match_loop::MatchPlugin;
use grapple_arena::menu::MenuPlugin;

fn main() {
    // Config problems are content errors: refuse to start rather than run
    // with half-applied tuning.
    let config = match ArenaConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[SETUP] {e}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grapple Arena".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        .add_plugins((MenuPlugin, MatchPlugin, ArenaViewPlugin))
        .add_systems(
            PreUpdate,
            (gamepad_connection_system, gather_pad_inputs_system)
                .chain()
                .after(InputSystems),
        )
        .run();
}
