//! Headline text split into independently timed character units.
//!
//! Each visible character floats on its own loop. Delays repeat in a
//! 14-step wave so long headlines keep the same rhythm instead of drifting
//! later and later.

pub mod units;

pub use units::{AnimationUnit, Segment, build_segments, build_units};

use crate::visual::utils::ease_in_out_cubic;

/// Peak lift of a character, in logical pixels
const LIFT_PX: f32 = 6.0;

/// Peak tilt, in degrees
const TILT_DEG: f32 = 4.0;

/// Offset to draw a unit with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinePose {
    /// Negative is up
    pub lift: f32,
    pub tilt_deg: f32,
}

impl KinePose {
    pub const REST: KinePose = KinePose {
        lift: 0.0,
        tilt_deg: 0.0,
    };
}

/// Pose of `unit` at `elapsed_ms` after the headline was built.
///
/// Units sit at rest until their start delay has passed, then loop with
/// their own duration.
pub fn kine_pose(unit: &AnimationUnit, elapsed_ms: f32) -> KinePose {
    let local = elapsed_ms - unit.start_delay_ms as f32;
    if local < 0.0 || unit.duration_ms == 0 {
        return KinePose::REST;
    }

    let phase = (local / unit.duration_ms as f32).fract();
    // 0 -> 1 -> 0 over one loop
    let ping_pong = 1.0 - (phase * 2.0 - 1.0).abs();
    let eased = ease_in_out_cubic(ping_pong);

    KinePose {
        lift: -LIFT_PX * eased,
        tilt_deg: TILT_DEG * (phase * std::f32::consts::TAU).sin(),
    }
}
