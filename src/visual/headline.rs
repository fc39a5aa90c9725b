use bevy::math::Rot2;
use bevy::prelude::*;
use bevy::ui::{UiTransform, Val2};
use std::time::Duration;

use crate::{
    config::GreetingConfig,
    headline::{AnimationUnit, Segment, build_segments, kine_pose},
    placement::EntryPoint,
};

use super::routing::Invoke;

const HEADLINE_FONT_SIZE: f32 = 44.0;
const HEADLINE_COLOR: Color = Color::srgb(0.45, 0.08, 0.25);

#[derive(Component)]
pub struct HeadlineRoot;

/// One animated character of the headline
#[derive(Component, Debug, Clone, Copy)]
pub struct KineUnit(pub AnimationUnit);

/// When the headline was built; units are timed from here
#[derive(Resource, Debug, Clone, Copy)]
pub struct HeadlineClock {
    pub built_at: Duration,
}

/// System: Split the headline into timed units (runs once)
pub fn build_headline(
    mut commands: Commands,
    mut invocations: MessageReader<Invoke>,
    config: Res<GreetingConfig>,
    time: Res<Time>,
    clock: Option<Res<HeadlineClock>>,
    root: Query<Entity, With<HeadlineRoot>>,
) {
    let requested = invocations
        .read()
        .filter(|invoke| invoke.0 == EntryPoint::BuildHeadline)
        .count();
    if requested == 0 || clock.is_some() {
        return;
    }
    let Ok(root) = root.single() else {
        return;
    };

    let segments = build_segments(&config.surface.headline);
    let unit_count = animated_unit_count(&segments);

    commands.entity(root).with_children(|parent| {
        for segment in segments {
            match segment {
                Segment::Word(units) => {
                    parent
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            ..default()
                        })
                        .with_children(|word| {
                            for unit in units {
                                word.spawn((
                                    Text::new(unit.glyph.to_string()),
                                    TextFont {
                                        font_size: HEADLINE_FONT_SIZE,
                                        ..default()
                                    },
                                    TextColor(HEADLINE_COLOR),
                                    UiTransform::default(),
                                    KineUnit(unit),
                                ));
                            }
                        });
                }
                Segment::Separator('\n') => {
                    // Full-width spacer forces a line break in the wrapping row
                    parent.spawn(Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(0.0),
                        ..default()
                    });
                }
                Segment::Separator(_) => {
                    parent.spawn(Node {
                        width: Val::Px(HEADLINE_FONT_SIZE * 0.3),
                        ..default()
                    });
                }
            }
        }
    });

    info!("Headline built with {} animated units", unit_count);
    commands.insert_resource(HeadlineClock {
        built_at: time.elapsed(),
    });
}

fn animated_unit_count(segments: &[Segment]) -> usize {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Word(units) => units.len(),
            Segment::Separator(_) => 0,
        })
        .sum()
}

/// System: Float each headline character on its own loop
pub fn animate_headline(
    time: Res<Time>,
    config: Res<GreetingConfig>,
    clock: Option<Res<HeadlineClock>>,
    mut units: Query<(&KineUnit, &mut UiTransform)>,
) {
    if config.reduced_motion() {
        return;
    }
    let Some(clock) = clock else {
        return;
    };

    let elapsed_ms = time.elapsed().saturating_sub(clock.built_at).as_secs_f32() * 1000.0;
    for (unit, mut transform) in &mut units {
        let pose = kine_pose(&unit.0, elapsed_ms);
        transform.translation = Val2::px(0.0, pose.lift);
        transform.rotation = Rot2::degrees(pose.tilt_deg);
    }
}
