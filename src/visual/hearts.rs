//! Ambient floating hearts behind the greeting.
//!
//! Purely decorative: nothing here reads or writes placement state.

use bevy::math::Rot2;
use bevy::prelude::*;
use bevy::ui::UiTransform;
use rand::Rng;

use crate::{config::GreetingConfig, placement::EntryPoint};

use super::routing::Invoke;

/// Narrowest width hearts are spread across
const MIN_SPREAD_WIDTH: f32 = 320.0;

const HEART_COLOR: Vec4 = Vec4::new(1.0, 0.42, 0.6, 1.0);

/// Randomised flight of one heart
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HeartParams {
    /// Horizontal start, logical px
    pub x: f32,
    /// Horizontal drift over one flight
    pub dx: f32,
    pub duration_secs: f32,
    /// Negative: the heart starts part-way through its flight
    pub delay_secs: f32,
    pub size: f32,
    pub opacity: f32,
}

impl HeartParams {
    pub fn sample<R: Rng>(rng: &mut R, viewport_width: f32) -> Self {
        let spread = viewport_width.max(MIN_SPREAD_WIDTH);
        let duration_secs = 10.0 + rng.random::<f32>() * 14.0;
        HeartParams {
            x: rng.random::<f32>() * spread,
            dx: (rng.random::<f32>() - 0.5) * 120.0,
            duration_secs,
            delay_secs: -rng.random::<f32>() * duration_secs,
            size: 10.0 + rng.random::<f32>() * 14.0,
            opacity: 0.18 + rng.random::<f32>() * 0.32,
        }
    }

    /// Flight progress in `[0, 1)` at `elapsed_secs`
    pub fn progress(&self, elapsed_secs: f32) -> f32 {
        ((elapsed_secs - self.delay_secs) / self.duration_secs).rem_euclid(1.0)
    }

    /// Top-left position in window coordinates
    pub fn position(&self, elapsed_secs: f32, viewport_height: f32) -> Vec2 {
        let t = self.progress(elapsed_secs);
        let travel = viewport_height + self.size * 2.0;
        Vec2::new(
            self.x + self.dx * t,
            viewport_height + self.size - travel * t,
        )
    }
}

/// Parameters for a full set of hearts; empty when motion is reduced
pub fn plan_hearts<R: Rng>(
    rng: &mut R,
    count: usize,
    viewport_width: f32,
    reduced_motion: bool,
) -> Vec<HeartParams> {
    if reduced_motion {
        return Vec::new();
    }
    (0..count)
        .map(|_| HeartParams::sample(rng, viewport_width))
        .collect()
}

#[derive(Component)]
pub struct HeartsLayer;

/// System: (Re)spawn the hearts on startup and on every resize
pub fn spawn_hearts(
    mut commands: Commands,
    mut invocations: MessageReader<Invoke>,
    config: Res<GreetingConfig>,
    windows: Query<&Window>,
    layer: Query<Entity, With<HeartsLayer>>,
    hearts: Query<Entity, With<HeartParams>>,
) {
    let requested = invocations
        .read()
        .filter(|invoke| invoke.0 == EntryPoint::SpawnAmbient)
        .count();
    if requested == 0 {
        return;
    }

    let (Ok(window), Ok(layer)) = (windows.single(), layer.single()) else {
        return;
    };

    for heart in &hearts {
        commands.entity(heart).despawn();
    }

    let plan = plan_hearts(
        &mut rand::rng(),
        config.motion.heart_count,
        window.width(),
        config.reduced_motion(),
    );
    debug!("Spawning {} ambient hearts", plan.len());

    commands.entity(layer).with_children(|parent| {
        for params in plan {
            let color = HEART_COLOR.with_w(params.opacity);
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(params.size),
                    height: Val::Px(params.size),
                    ..default()
                },
                BackgroundColor(Color::srgba(color.x, color.y, color.z, color.w)),
                UiTransform {
                    rotation: Rot2::degrees(45.0),
                    ..default()
                },
                params,
            ));
        }
    });
}

/// System: Float hearts upwards
pub fn float_hearts(
    time: Res<Time>,
    windows: Query<&Window>,
    mut hearts: Query<(&HeartParams, &mut Node)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let elapsed = time.elapsed_secs();

    for (params, mut node) in &mut hearts {
        let pos = params.position(elapsed, window.height());
        node.left = Val::Px(pos.x);
        node.top = Val::Px(pos.y);
    }
}
