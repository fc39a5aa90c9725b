// ============================================================================
// EASING FUNCTIONS for the bump, fades and headline float
// ============================================================================

use bevy::color::Color;
use bevy::math::{Vec3, Vec4};

/// Ease-in-out cubic: slow at start and end, fast in the middle
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic: fast at start, decelerates at end
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

/// Scale multiplier for the dodge "bump": a quick swell that settles back to 1.0
pub fn bump_curve(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let swell = (t * std::f32::consts::PI).sin();
    1.0 + 0.12 * swell * (1.0 - ease_out_cubic(t))
}

// ============================================================================
// HSV - used to desaturate the evading control as it escalates
// ============================================================================

/// Convert RGB to HSV (Hue, Saturation, Value)
pub fn rgb_to_hsv(color: Vec4) -> Vec3 {
    let r = color.x;
    let g = color.y;
    let b = color.z;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta < 0.00001 {
        0.0
    } else if (max - r).abs() < 0.00001 {
        ((g - b) / delta) % 6.0
    } else if (max - g).abs() < 0.00001 {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let h = (h / 6.0).rem_euclid(1.0);

    let s = if max < 0.00001 { 0.0 } else { delta / max };

    Vec3::new(h, s, max)
}

/// Convert HSV back to RGB (alpha = 1)
pub fn hsv_to_rgb(hsv: Vec3) -> Vec4 {
    let h = hsv.x * 6.0;
    let s = hsv.y;
    let v = hsv.z;

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Vec4::new(r + m, g + m, b + m, 1.0)
}

/// Scale saturation by `factor` and replace alpha with `alpha`
pub fn tint(color: Vec4, factor: f32, alpha: f32) -> Color {
    let mut hsv = rgb_to_hsv(color);
    hsv.y = (hsv.y * factor).clamp(0.0, 1.0);
    let rgb = hsv_to_rgb(hsv);
    Color::srgba(rgb.x, rgb.y, rgb.z, alpha * color.w)
}
