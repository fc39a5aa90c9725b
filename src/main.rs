use bevy::prelude::*;

mod camera;
mod config;
mod headline;
mod input;
mod placement;
mod visual;

use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::GreetingPlugin;

fn main() {
    let (config, source) = config::load_or_default();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Evasive Greeting".into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(config)
    .insert_resource(source)
    .add_systems(Startup, config::report_config)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(GreetingPlugin);

    app.run();
}
