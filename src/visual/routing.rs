//! Turns raw input into surface events, and surface events into entry points.
//!
//! The mapping itself lives in `placement::bindings`; this module only
//! decides which control an input landed on.

use bevy::prelude::*;

use crate::{
    camera::ViewportResized,
    config::GreetingConfig,
    input::{FocusKey, PointerEvent, PointerEventType},
    placement::{ControlId, EntryPoint, InteractionEvent, Target, entry_points},
};

use super::{
    result::ResultTransition,
    surface::{EvadeVisual, FocusState, SurfaceGeometry},
};

/// An interaction the surface observed
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceEvent {
    pub event: InteractionEvent,
    pub target: Target,
}

/// Request to run one entry point
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invoke(pub EntryPoint);

/// Pointer bookkeeping needed to detect "enter" transitions
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    hovering_evade: bool,
}

impl PointerTracker {
    /// Classify one pointer event given the control under it
    pub fn classify(
        &mut self,
        event_type: PointerEventType,
        is_touch: bool,
        hit: Option<ControlId>,
    ) -> Option<(InteractionEvent, ControlId)> {
        match (event_type, is_touch) {
            (PointerEventType::Move, false) => {
                let inside = hit == Some(ControlId::Evade);
                let entered = inside && !self.hovering_evade;
                self.hovering_evade = inside;
                entered.then_some((InteractionEvent::PointerEnter, ControlId::Evade))
            }
            (PointerEventType::Up, false) => hit.map(|id| (InteractionEvent::Click, id)),
            (PointerEventType::Down, true) => match hit {
                Some(ControlId::Evade) => Some((InteractionEvent::TouchStart, ControlId::Evade)),
                _ => None,
            },
            // Touch on the evading control never becomes a click
            (PointerEventType::Up, true) => match hit {
                Some(ControlId::Accept) => Some((InteractionEvent::Click, ControlId::Accept)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// System: Announce startup once the app is running
pub fn announce_startup(mut out: MessageWriter<SurfaceEvent>) {
    out.write(SurfaceEvent {
        event: InteractionEvent::Startup,
        target: Target::Viewport,
    });
}

/// System: Forward viewport resizes
pub fn announce_resize(
    mut resized: MessageReader<ViewportResized>,
    mut out: MessageWriter<SurfaceEvent>,
) {
    // Several resizes in one frame collapse into one re-placement
    if let Some(last) = resized.read().last() {
        debug!("Resize to {}x{}", last.width, last.height);
        out.write(SurfaceEvent {
            event: InteractionEvent::Resize,
            target: Target::Viewport,
        });
    }
}

/// System: Map pointer input onto the two controls
pub fn pointer_to_surface_events(
    mut pointer_events: MessageReader<PointerEvent>,
    mut tracker: ResMut<PointerTracker>,
    mut out: MessageWriter<SurfaceEvent>,
    config: Res<GreetingConfig>,
    windows: Query<&Window>,
    evade: Query<&EvadeVisual>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let evade_center = evade.single().ok().and_then(|visual| visual.center);
    let geometry = SurfaceGeometry::measure(window, &config, evade_center);

    for event in pointer_events.read() {
        let hit = geometry.hit(event.position);

        if let Some((kind, id)) = tracker.classify(event.event_type, event.is_touch(), hit) {
            out.write(SurfaceEvent {
                event: kind,
                target: Target::Control(id),
            });
        }
    }
}

/// System: Keyboard focus navigation and activation
pub fn focus_to_surface_events(
    mut keys: MessageReader<FocusKey>,
    mut focus: ResMut<FocusState>,
    mut out: MessageWriter<SurfaceEvent>,
) {
    for key in keys.read() {
        let event = match key {
            FocusKey::Next | FocusKey::Previous => {
                let focused = focus.step(*key == FocusKey::Next);
                (focused == ControlId::Evade)
                    .then_some((InteractionEvent::FocusGained, ControlId::Evade))
            }
            FocusKey::Activate => focus.focused.map(|id| (InteractionEvent::Click, id)),
        };

        if let Some((event, id)) = event {
            out.write(SurfaceEvent {
                event,
                target: Target::Control(id),
            });
        }
    }
}

/// System: Expand surface events through the binding table
pub fn route_surface_events(
    mut events: MessageReader<SurfaceEvent>,
    mut out: MessageWriter<Invoke>,
    transition: Res<ResultTransition>,
) {
    for event in events.read() {
        if transition.controls_disabled() && matches!(event.target, Target::Control(_)) {
            continue;
        }
        for entry in entry_points(event.event, event.target) {
            debug!("{:?} on {:?} -> {:?}", event.event, event.target, entry);
            out.write(Invoke(entry));
        }
    }
}
