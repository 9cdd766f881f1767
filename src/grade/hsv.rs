//! 8-bit HSV: hue in half-degrees `[0, 179]`, saturation and value in `[0, 255]`.

use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelBuffer;
use crate::foundation::math::add_clamped;

/// Largest legal hue on the half-degree scale.
pub const HUE_MAX: u8 = 179;

/// Signed deltas added to each HSV channel in a single round trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvShift {
    /// Hue delta in half-degrees.
    pub hue: i32,
    /// Saturation delta.
    pub saturation: i32,
    /// Value delta.
    pub value: i32,
}

impl HsvShift {
    /// True when applying this shift is a no-op.
    pub fn is_identity(self) -> bool {
        self == Self::default()
    }
}

/// Convert RGB to 8-bit HSV.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = f32::from(v - min);

    let s = if v == 0 {
        0
    } else {
        (255.0 * diff / f32::from(v)).round() as u8
    };

    let h = if diff == 0.0 {
        0
    } else {
        let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
        let mut deg = if v == r {
            60.0 * (gf - bf) / diff
        } else if v == g {
            60.0 * (bf - rf) / diff + 120.0
        } else {
            60.0 * (rf - gf) / diff + 240.0
        };
        if deg < 0.0 {
            deg += 360.0;
        }
        let half = (deg / 2.0).round() as u32;
        (half % 180) as u8
    };

    [h, s, v]
}

/// Convert 8-bit HSV back to RGB, rounding to nearest.
pub fn hsv_to_rgb([h, s, v]: [u8; 3]) -> [u8; 3] {
    let s = f32::from(s) / 255.0;
    let v = f32::from(v) / 255.0;
    let sector_pos = (f32::from(h) * 2.0 / 60.0).rem_euclid(6.0);
    let sector = sector_pos.floor();
    let f = sector_pos - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_level(r), to_level(g), to_level(b)]
}

/// Shift hue, saturation and value together: one conversion in, one out.
///
/// Hue saturates at `[0, 179]` rather than wrapping.
pub fn shift_hsv(buffer: PixelBuffer, shift: HsvShift) -> PixelBuffer {
    if shift.is_identity() {
        return buffer;
    }
    buffer.map_rgb(|rgb| {
        let [h, s, v] = rgb_to_hsv(rgb);
        let h = i32::from(h).saturating_add(shift.hue).clamp(0, i32::from(HUE_MAX)) as u8;
        let s = add_clamped(s, shift.saturation);
        let v = add_clamped(v, shift.value);
        hsv_to_rgb([h, s, v])
    })
}

/// Shift hue only, in half-degrees.
pub fn shift_hue(buffer: PixelBuffer, delta: i32) -> PixelBuffer {
    shift_hsv(
        buffer,
        HsvShift {
            hue: delta,
            ..HsvShift::default()
        },
    )
}

/// Shift saturation only.
pub fn shift_saturation(buffer: PixelBuffer, delta: i32) -> PixelBuffer {
    shift_hsv(
        buffer,
        HsvShift {
            saturation: delta,
            ..HsvShift::default()
        },
    )
}

fn to_level(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/grade/hsv.rs"]
mod tests;
