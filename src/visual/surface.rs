use bevy::prelude::*;

use crate::{
    camera::{ArenaBounds, Viewport},
    config::GreetingConfig,
    placement::{ControlId, ControlRect, GeometryError, GeometryProvider, Size},
};

/// Accept anchor as a fraction of the arena (wide layout)
const ACCEPT_ANCHOR_WIDE: Vec2 = Vec2::new(0.32, 0.55);

/// Accept anchor as a fraction of the arena (narrow layout)
const ACCEPT_ANCHOR_NARROW: Vec2 = Vec2::new(0.5, 0.4);

#[derive(Component, Debug, Clone, Copy)]
pub struct GreetingControl {
    pub id: ControlId,
}

#[derive(Component)]
pub struct ArenaRoot;

#[derive(Component)]
pub struct QuestionCard;

#[derive(Component)]
pub struct ResultCard;

#[derive(Component)]
pub struct ResultText;

/// Text inside a control
#[derive(Component)]
pub struct ControlLabel {
    pub id: ControlId,
}

/// Runtime state of the evading control
#[derive(Component, Debug, Default)]
pub struct EvadeVisual {
    /// Container-relative center; unset until the first placement
    pub center: Option<Vec2>,
    pub scale: f32,
    pub opacity: f32,
    pub saturation: f32,
    pub blur: f32,
    /// Seconds into the current bump, if one is playing
    pub bump_elapsed: Option<f32>,
}

/// Which control has keyboard focus
#[derive(Resource, Debug, Default)]
pub struct FocusState {
    pub focused: Option<ControlId>,
}

impl FocusState {
    const ORDER: [ControlId; 2] = [ControlId::Accept, ControlId::Evade];

    /// Move focus one step; returns the newly focused control
    pub fn step(&mut self, forward: bool) -> ControlId {
        let next = match (self.focused, forward) {
            (None, true) => ControlId::Accept,
            (None, false) => ControlId::Evade,
            (Some(current), _) => {
                let idx = Self::ORDER.iter().position(|c| *c == current).unwrap_or(0);
                Self::ORDER[(idx + 1) % Self::ORDER.len()]
            }
        };
        self.focused = Some(next);
        next
    }
}

/// Snapshot of the surface geometry, measured from the window on demand
#[derive(Debug, Clone, Copy)]
pub struct SurfaceGeometry {
    pub arena: ArenaBounds,
    pub narrow: bool,
    pub accept_size: Size,
    pub evade_size: Size,
    pub evade_center: Option<Vec2>,
}

impl SurfaceGeometry {
    pub fn measure(window: &Window, config: &GreetingConfig, evade_center: Option<Vec2>) -> Self {
        let viewport = Viewport {
            width: window.width(),
            height: window.height(),
        };
        Self::from_viewport(&viewport, config, evade_center)
    }

    pub fn from_viewport(
        viewport: &Viewport,
        config: &GreetingConfig,
        evade_center: Option<Vec2>,
    ) -> Self {
        let surface = &config.surface;
        SurfaceGeometry {
            arena: viewport.arena(surface.headline_band),
            narrow: viewport.is_narrow(surface.narrow_breakpoint),
            accept_size: Size::new(surface.accept_size[0], surface.accept_size[1]),
            evade_size: Size::new(surface.evade_size[0], surface.evade_size[1]),
            evade_center,
        }
    }

    fn arena_size(&self) -> Size {
        Size::new(self.arena.width, self.arena.height)
    }

    pub fn accept_rect(&self) -> ControlRect {
        let anchor = if self.narrow {
            ACCEPT_ANCHOR_NARROW
        } else {
            ACCEPT_ANCHOR_WIDE
        };
        let center = Vec2::new(self.arena.width, self.arena.height) * anchor;
        ControlRect::from_center(center, self.accept_size)
    }

    pub fn evade_rect(&self) -> Option<ControlRect> {
        self.evade_center
            .map(|center| ControlRect::from_center(center, self.evade_size))
    }

    /// Which control (if any) sits under a window-space point
    pub fn hit(&self, window_pos: Vec2) -> Option<ControlId> {
        let local = self.arena.to_local(window_pos);
        if self.evade_rect().is_some_and(|r| r.contains(local)) {
            return Some(ControlId::Evade);
        }
        if self.accept_rect().contains(local) {
            return Some(ControlId::Accept);
        }
        None
    }
}

impl GeometryProvider for SurfaceGeometry {
    fn container_bounds(&self) -> Result<Size, GeometryError> {
        let size = self.arena_size();
        if size.is_measurable() {
            Ok(size)
        } else {
            Err(GeometryError::ContainerUnavailable)
        }
    }

    fn control_bounds(&self, id: ControlId) -> Result<ControlRect, GeometryError> {
        if !self.arena_size().is_measurable() {
            return Err(GeometryError::ControlUnavailable(id));
        }
        match id {
            ControlId::Accept => Ok(self.accept_rect()),
            // Only the size matters to the search; fall back to the arena middle
            ControlId::Evade => Ok(self.evade_rect().unwrap_or_else(|| {
                ControlRect::from_center(
                    Vec2::new(self.arena.width, self.arena.height) / 2.0,
                    self.evade_size,
                )
            })),
        }
    }

    fn narrow_layout(&self) -> bool {
        self.narrow
    }
}

/// Top-left offset that puts a control of `size` centered on `center`
pub fn top_left_for(center: Vec2, size: Size) -> Vec2 {
    center - Vec2::new(size.width, size.height) / 2.0
}
