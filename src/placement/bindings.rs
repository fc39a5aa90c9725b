// placement/bindings.rs

use super::geometry::ControlId;

/// Raw interaction the host observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionEvent {
    PointerEnter,
    FocusGained,
    TouchStart,
    Click,
    Startup,
    Resize,
}

/// What the event happened to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Control(ControlId),
    Viewport,
}

/// Core operation the host should invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    Trigger,
    /// Deferred by one frame at startup so layout has settled
    InitialPlacement,
    BuildHeadline,
    SpawnAmbient,
    Accept,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub event: InteractionEvent,
    pub target: Target,
    pub entry: EntryPoint,
}

const fn bind(event: InteractionEvent, target: Target, entry: EntryPoint) -> Binding {
    Binding {
        event,
        target,
        entry,
    }
}

const EVADE: Target = Target::Control(ControlId::Evade);
const ACCEPT: Target = Target::Control(ControlId::Accept);

/// Every reaction the surface has, in dispatch order
pub const BINDINGS: &[Binding] = &[
    bind(InteractionEvent::PointerEnter, EVADE, EntryPoint::Trigger),
    bind(InteractionEvent::FocusGained, EVADE, EntryPoint::Trigger),
    bind(InteractionEvent::TouchStart, EVADE, EntryPoint::Trigger),
    bind(InteractionEvent::Click, EVADE, EntryPoint::Trigger),
    bind(InteractionEvent::Click, ACCEPT, EntryPoint::Accept),
    bind(InteractionEvent::Startup, Target::Viewport, EntryPoint::BuildHeadline),
    bind(InteractionEvent::Startup, Target::Viewport, EntryPoint::SpawnAmbient),
    bind(InteractionEvent::Startup, Target::Viewport, EntryPoint::InitialPlacement),
    bind(InteractionEvent::Resize, Target::Viewport, EntryPoint::SpawnAmbient),
    bind(InteractionEvent::Resize, Target::Viewport, EntryPoint::InitialPlacement),
];

/// Entry points bound to `event` on `target`, in table order
pub fn entry_points(event: InteractionEvent, target: Target) -> impl Iterator<Item = EntryPoint> {
    BINDINGS
        .iter()
        .filter(move |b| b.event == event && b.target == target)
        .map(|b| b.entry)
}
