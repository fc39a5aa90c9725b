use crate::config::GreetingConfig;
use crate::placement::PlacementEngine;
use crate::visual::controls::{
    animate_bump, handle_initial_placement, handle_trigger, sync_control_nodes,
};
use crate::visual::headline::{animate_headline, build_headline};
use crate::visual::hearts::{float_hearts, spawn_hearts};
use crate::visual::result::{ResultTransition, animate_result, handle_accept};
use crate::visual::routing::{
    Invoke, PointerTracker, SurfaceEvent, announce_resize, announce_startup,
    focus_to_surface_events, pointer_to_surface_events, route_surface_events,
};
use crate::visual::setup::setup_surface;
use crate::visual::surface::FocusState;
use bevy::prelude::*;

pub struct GreetingPlugin;

impl Plugin for GreetingPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GreetingConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(PlacementEngine::new(
            config.placement.clone(),
            config.reduced_motion(),
        ))
        .insert_resource(ResultTransition::new(config.result_fade()))
        .init_resource::<FocusState>()
        .init_resource::<PointerTracker>()
        .add_message::<SurfaceEvent>()
        .add_message::<Invoke>()
        // The startup event is only read next frame, which defers the first
        // placement until the window has a real size
        .add_systems(Startup, (setup_surface, announce_startup).chain())
        .add_systems(
            Update,
            (
                // Input -> surface events -> entry points
                announce_resize,
                pointer_to_surface_events,
                focus_to_surface_events,
                route_surface_events,
                // Entry points
                build_headline,
                spawn_hearts,
                handle_initial_placement,
                handle_trigger,
                handle_accept,
                // Animation and presentation
                animate_bump,
                animate_headline,
                float_hearts,
                animate_result,
                sync_control_nodes,
            )
                .chain(),
        );
    }
}
