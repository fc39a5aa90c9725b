use bevy::prelude::*;
use bevy::ui::UiTransform;

use crate::{config::GreetingConfig, placement::ControlId};

use super::{
    headline::HeadlineRoot,
    hearts::HeartsLayer,
    surface::{
        ArenaRoot, ControlLabel, EvadeVisual, GreetingControl, QuestionCard, ResultCard,
        ResultText,
    },
};

const LABEL_FONT_SIZE: f32 = 26.0;
const RESULT_FONT_SIZE: f32 = 40.0;

/// System: Spawn the static UI tree (content arrives via entry points)
pub fn setup_surface(mut commands: Commands, config: Res<GreetingConfig>) {
    let surface = &config.surface;

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            overflow: Overflow::clip(),
            ..default()
        },
        ZIndex(-1),
        HeartsLayer,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Px(surface.headline_band),
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            align_content: AlignContent::Center,
            padding: UiRect::horizontal(Val::Px(16.0)),
            ..default()
        },
        HeadlineRoot,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(surface.headline_band),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.55)),
            ArenaRoot,
            QuestionCard,
        ))
        .with_children(|arena| {
            spawn_control(arena, ControlId::Accept, &surface.accept_label);
            spawn_control(arena, ControlId::Evade, &surface.evade_label);
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            ResultCard,
        ))
        .with_children(|card| {
            card.spawn((
                Text::new(surface.result_line.clone()),
                TextFont {
                    font_size: RESULT_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgba(0.45, 0.08, 0.25, 0.0)),
                ResultText,
            ));
        });

    info!(
        "Greeting surface spawned (reduced motion: {})",
        config.reduced_motion()
    );
}

fn spawn_control(parent: &mut ChildSpawnerCommands<'_>, id: ControlId, label: &str) {
    let mut control = parent.spawn((
        Node {
            position_type: PositionType::Absolute,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(Color::NONE),
        Outline::new(Val::Px(3.0), Val::Px(3.0), Color::NONE),
        UiTransform::default(),
        GreetingControl { id },
    ));

    if id == ControlId::Evade {
        control.insert(EvadeVisual::default());
    }

    control.with_children(|button| {
        button.spawn((
            Text::new(label.to_string()),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            ControlLabel { id },
        ));
    });
}
