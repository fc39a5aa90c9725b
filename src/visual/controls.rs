use bevy::prelude::*;
use bevy::ui::UiTransform;

use crate::{
    config::GreetingConfig,
    placement::{
        ControlId, EntryPoint, Placement, PlacementEngine, PlacementSource, Size, TriggerOutcome,
    },
};

use super::{
    result::ResultTransition,
    routing::Invoke,
    surface::{
        ArenaRoot, ControlLabel, EvadeVisual, FocusState, GreetingControl, QuestionCard,
        SurfaceGeometry, top_left_for,
    },
    utils::{bump_curve, tint},
};

pub const ACCEPT_COLOR: Vec4 = Vec4::new(0.93, 0.25, 0.45, 1.0);
pub const EVADE_COLOR: Vec4 = Vec4::new(0.55, 0.58, 0.72, 1.0);
pub const LABEL_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
const FOCUS_RING: Vec4 = Vec4::new(0.35, 0.1, 0.25, 1.0);

/// How long the bump plays, in seconds
const BUMP_SECS: f32 = 0.26;

impl EvadeVisual {
    pub fn apply(&mut self, placement: &Placement) {
        let presentation = placement.tier.presentation();
        self.center = Some(placement.center);
        self.scale = presentation.scale;
        self.opacity = presentation.opacity;
        self.saturation = presentation.saturation;
        self.blur = presentation.blur;
        if placement.bump {
            self.bump_elapsed = Some(0.0);
        }
    }

    /// Scale including any bump in flight
    pub fn display_scale(&self) -> f32 {
        let bump = self
            .bump_elapsed
            .map_or(1.0, |elapsed| bump_curve(elapsed / BUMP_SECS));
        self.scale * bump
    }
}

/// System: Run the evasion entry point
pub fn handle_trigger(
    mut invocations: MessageReader<Invoke>,
    mut engine: ResMut<PlacementEngine>,
    mut evade: Query<&mut EvadeVisual>,
    time: Res<Time>,
    config: Res<GreetingConfig>,
    windows: Query<&Window>,
) {
    let (Ok(window), Ok(mut visual)) = (windows.single(), evade.single_mut()) else {
        return;
    };

    for invoke in invocations.read() {
        if invoke.0 != EntryPoint::Trigger {
            continue;
        }

        // Geometry is re-read for every trigger, never cached
        let geometry = SurfaceGeometry::measure(window, &config, visual.center);
        let from = engine.last_center();
        match engine.trigger(time.elapsed(), &geometry, &mut rand::rng()) {
            TriggerOutcome::Moved(placement) => {
                let fallback = matches!(placement.source, PlacementSource::Fallback(_));
                let travel = from.map_or(0.0, |from| from.distance(placement.center));
                info!(
                    "Dodge #{} -> ({:.0}, {:.0}) travelled {:.0}px, tier {:?}{}",
                    engine.escalation(),
                    placement.center.x,
                    placement.center.y,
                    travel,
                    placement.tier,
                    if fallback { " [fallback]" } else { "" }
                );
                visual.apply(&placement);
            }
            TriggerOutcome::Ignored => {
                debug!("Dodge ignored while settling");
            }
        }
    }
}

/// System: Deterministic placement on startup and resize
pub fn handle_initial_placement(
    mut invocations: MessageReader<Invoke>,
    mut engine: ResMut<PlacementEngine>,
    mut evade: Query<&mut EvadeVisual>,
    config: Res<GreetingConfig>,
    windows: Query<&Window>,
) {
    let requested = invocations
        .read()
        .filter(|invoke| invoke.0 == EntryPoint::InitialPlacement)
        .count();
    if requested == 0 {
        return;
    }

    let (Ok(window), Ok(mut visual)) = (windows.single(), evade.single_mut()) else {
        return;
    };

    let geometry = SurfaceGeometry::measure(window, &config, visual.center);
    let placement = engine.initial_placement(&geometry);
    info!(
        "Evading control placed at ({:.0}, {:.0}), narrow layout: {}",
        placement.center.x, placement.center.y, geometry.narrow
    );
    visual.apply(&placement);
}

/// System: Advance the bump animation
pub fn animate_bump(time: Res<Time>, mut evade: Query<&mut EvadeVisual>) {
    let dt = time.delta_secs();
    for mut visual in &mut evade {
        if let Some(elapsed) = visual.bump_elapsed {
            let elapsed = elapsed + dt;
            visual.bump_elapsed = (elapsed < BUMP_SECS).then_some(elapsed);
        }
    }
}

/// System: Push layout and presentation onto the UI nodes
pub fn sync_control_nodes(
    config: Res<GreetingConfig>,
    focus: Res<FocusState>,
    transition: Res<ResultTransition>,
    windows: Query<&Window>,
    mut arena: Query<&mut Node, (With<ArenaRoot>, Without<GreetingControl>)>,
    mut controls: Query<
        (
            &GreetingControl,
            &mut Node,
            &mut UiTransform,
            &mut BackgroundColor,
            &mut Outline,
            Option<&EvadeVisual>,
        ),
        Without<ArenaRoot>,
    >,
    mut labels: Query<(&ControlLabel, &mut TextColor)>,
    mut cards: Query<&mut BackgroundColor, (With<QuestionCard>, Without<GreetingControl>)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let geometry = SurfaceGeometry::measure(window, &config, None);
    let fade = transition.question_opacity();

    if let Ok(mut node) = arena.single_mut() {
        node.top = Val::Px(geometry.arena.top);
        node.width = Val::Px(geometry.arena.width);
        node.height = Val::Px(geometry.arena.height);
    }

    for mut background in &mut cards {
        background.0.set_alpha(0.55 * fade);
    }

    let mut evade_alpha = 1.0;
    let mut evade_blur = 0.0;

    for (control, mut node, mut transform, mut background, mut outline, evade) in &mut controls {
        let (center, size, color, scale, opacity, saturation) = match (control.id, evade) {
            (ControlId::Evade, Some(visual)) => {
                let Some(center) = visual.center else {
                    continue;
                };
                evade_alpha = visual.opacity;
                evade_blur = visual.blur;
                (
                    center,
                    geometry.evade_size,
                    EVADE_COLOR,
                    visual.display_scale(),
                    visual.opacity,
                    visual.saturation,
                )
            }
            _ => (
                geometry.accept_rect().center(),
                geometry.accept_size,
                ACCEPT_COLOR,
                1.0,
                1.0,
                1.0,
            ),
        };

        place_node(&mut node, center, size);
        transform.scale = Vec2::splat(scale);
        background.0 = tint(color, saturation, opacity * fade);

        let focused = focus.focused == Some(control.id) && !transition.controls_disabled();
        outline.color = if focused {
            tint(FOCUS_RING, 1.0, fade)
        } else {
            Color::NONE
        };
    }

    for (label, mut color) in &mut labels {
        let alpha = match label.id {
            // Blur has no UI equivalent; soften the glyphs instead
            ControlId::Evade => evade_alpha * (1.0 - evade_blur),
            ControlId::Accept => 1.0,
        };
        color.0 = tint(LABEL_COLOR, 1.0, alpha * fade);
    }
}

fn place_node(node: &mut Node, center: Vec2, size: Size) {
    let top_left = top_left_for(center, size);
    node.left = Val::Px(top_left.x);
    node.top = Val::Px(top_left.y);
    node.width = Val::Px(size.width);
    node.height = Val::Px(size.height);
}
