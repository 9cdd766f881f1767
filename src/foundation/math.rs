//! Small numeric helpers shared by the grading and blending stages.

/// Map an 8-bit sample into `[0, 1]`.
pub(crate) fn unit_from_u8(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Map a normalized value back to 8 bits, clamping and rounding to nearest.
///
/// Non-finite input maps to 0.
pub(crate) fn u8_from_unit(v: f32) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Clamp an `f32` level into `[0, 255]` and truncate toward zero.
pub(crate) fn u8_trunc(v: f32) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Add a signed delta to a sample, saturating at both ends.
pub(crate) fn add_clamped(v: u8, delta: i32) -> u8 {
    i32::from(v).saturating_add(delta).clamp(0, 255) as u8
}

/// Clamp a caller-supplied opacity into `[0, 1]`; non-finite values become 0.
pub(crate) fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// ITU-R 601 luma in 16-bit fixed point, rounded.
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let acc = u32::from(r) * 19_595 + u32::from(g) * 38_470 + u32::from(b) * 7_471 + 0x8000;
    (acc >> 16) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
