pub mod bindings;
pub mod engine;
pub mod geometry;
pub mod tier;

pub use bindings::{EntryPoint, InteractionEvent, Target, entry_points};
pub use engine::{Placement, PlacementEngine, PlacementSource, TriggerOutcome};
pub use geometry::{ControlId, ControlRect, GeometryError, GeometryProvider, Size};
pub use tier::DifficultyTier;
