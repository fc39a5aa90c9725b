use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::config::GreetingConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_message::<ViewportResized>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_viewport);
    }
}

/// Logical size of the primary window, re-read every frame
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Sent after the viewport settles on a new size
#[derive(Message, Debug, Clone, Copy)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

/// Placement container inside the window, in window coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn is_narrow(&self, breakpoint: f32) -> bool {
        self.width <= breakpoint
    }

    /// Everything below the headline band
    pub fn arena(&self, headline_band: f32) -> ArenaBounds {
        let band = headline_band.min(self.height * 0.4).max(0.0);
        ArenaBounds {
            left: 0.0,
            top: band,
            width: self.width.max(0.0),
            height: (self.height - band).max(0.0),
        }
    }
}

impl ArenaBounds {
    /// Window point -> arena-relative point
    pub fn to_local(&self, window_pos: Vec2) -> Vec2 {
        window_pos - Vec2::new(self.left, self.top)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// The surface is pure UI; a 2D camera is enough to render it
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.99, 0.93, 0.95)),
            ..default()
        },
        MainCamera,
    ));
}

/// Track the window size and announce changes
fn update_viewport(
    mut viewport: ResMut<Viewport>,
    mut resized: MessageReader<WindowResized>,
    mut out: MessageWriter<ViewportResized>,
    windows: Query<&Window>,
    config: Res<GreetingConfig>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let width = window.width();
    let height = window.height();
    let changed = (width - viewport.width).abs() > 0.5 || (height - viewport.height).abs() > 0.5;

    // Drain the window messages; the size itself comes straight from the window
    let had_resize = resized.read().count() > 0;

    if !changed {
        return;
    }

    let first_measure = viewport.width == 0.0 && viewport.height == 0.0;
    viewport.width = width;
    viewport.height = height;

    if first_measure && !had_resize {
        return;
    }

    info!(
        "Viewport resized to {}x{} (narrow: {})",
        width,
        height,
        viewport.is_narrow(config.surface.narrow_breakpoint)
    );
    out.write(ViewportResized { width, height });
}
