//! Blend math over straight-alpha RGBA8 buffers.
//!
//! Every binary operation checks that base and overlay share dimensions before touching a
//! pixel. Arithmetic is clamped at the point of computation and never fails.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{PixelBuffer, Rgba8};
use crate::foundation::error::FxResult;
use crate::foundation::math::{clamp_opacity, u8_from_unit, unit_from_u8};

/// Guard against division by zero in colour dodge.
pub const DODGE_EPSILON: f32 = 1e-6;

/// Default colour-dodge noise strength.
pub const DEFAULT_NOISE_OPACITY: f64 = 0.15;

/// How an overlay is combined with its base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Straight-alpha "over".
    Normal,
    /// Soft light, weighted by overlay alpha.
    #[default]
    SoftLight,
}

/// Scale the overlay's alpha by `opacity` in place, truncating.
///
/// `opacity` is clamped into `[0, 1]`.
pub fn scale_opacity(overlay: &mut PixelBuffer, opacity: f64) {
    let opacity = clamp_opacity(opacity);
    if opacity >= 1.0 {
        return;
    }
    for px in overlay.raw_mut().chunks_exact_mut(4) {
        px[3] = (f64::from(px[3]) * opacity) as u8;
    }
}

/// Composite `overlay` over `base` with the standard straight-alpha over operator.
pub fn alpha_composite(base: &PixelBuffer, overlay: &PixelBuffer) -> FxResult<PixelBuffer> {
    zip_pixels(base, overlay, over_px)
}

/// Soft-light `overlay` onto `base`, using the overlay's alpha as a mix weight.
///
/// Output alpha is the base's alpha.
pub fn soft_light(base: &PixelBuffer, overlay: &PixelBuffer) -> FxResult<PixelBuffer> {
    zip_pixels(base, overlay, soft_light_px)
}

/// Blend with `mode`.
pub fn blend(base: &PixelBuffer, overlay: &PixelBuffer, mode: BlendMode) -> FxResult<PixelBuffer> {
    match mode {
        BlendMode::Normal => alpha_composite(base, overlay),
        BlendMode::SoftLight => soft_light(base, overlay),
    }
}

/// Opaque buffer of independent uniform RGB samples in `[0, 255]`.
pub fn noise_layer<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> FxResult<PixelBuffer> {
    let mut out = PixelBuffer::filled(width, height, [0, 0, 0, 255])?;
    for px in out.raw_mut().chunks_exact_mut(4) {
        px[0] = rng.random();
        px[1] = rng.random();
        px[2] = rng.random();
    }
    Ok(out)
}

/// Colour-dodge `noise` into `base` at `opacity`. Only the noise RGB is read; output alpha is
/// the base's alpha.
pub fn color_dodge(base: &PixelBuffer, noise: &PixelBuffer, opacity: f64) -> FxResult<PixelBuffer> {
    let opacity = clamp_opacity(opacity) as f32;
    zip_pixels(base, noise, |b, n| {
        let mut out = [0u8, 0, 0, b[3]];
        for c in 0..3 {
            let bc = unit_from_u8(b[c]);
            let nc = unit_from_u8(n[c]);
            let dodged = (bc / (1.0 - nc + DODGE_EPSILON)).clamp(0.0, 1.0);
            out[c] = u8_from_unit(bc * (1.0 - opacity) + dodged * opacity);
        }
        out
    })
}

/// Colour-dodge fresh noise from `rng` into `base`.
#[tracing::instrument(skip(base, rng), fields(width = base.width(), height = base.height()))]
pub fn color_dodge_noise<R: Rng + ?Sized>(
    base: &PixelBuffer,
    opacity: f64,
    rng: &mut R,
) -> FxResult<PixelBuffer> {
    let noise = noise_layer(base.width(), base.height(), rng)?;
    color_dodge(base, &noise, opacity)
}

/// Colour-dodge noise drawn from the thread-local default generator.
pub fn color_dodge_noise_default(base: &PixelBuffer, opacity: f64) -> FxResult<PixelBuffer> {
    color_dodge_noise(base, opacity, &mut rand::rng())
}

fn zip_pixels(
    base: &PixelBuffer,
    overlay: &PixelBuffer,
    f: impl Fn(Rgba8, Rgba8) -> Rgba8,
) -> FxResult<PixelBuffer> {
    base.ensure_same_size(overlay)?;
    let mut out = base.clone();
    for (d, s) in out
        .raw_mut()
        .chunks_exact_mut(4)
        .zip(overlay.as_raw().chunks_exact(4))
    {
        let px = f([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&px);
    }
    Ok(out)
}

fn over_px(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src[3] == 0 {
        return dst;
    }
    let sa = unit_from_u8(src[3]);
    let da = unit_from_u8(dst[3]);
    let da_rest = da * (1.0 - sa);
    let out_a = sa + da_rest;
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = unit_from_u8(src[c]);
        let dc = unit_from_u8(dst[c]);
        out[c] = u8_from_unit((sc * sa + dc * da_rest) / out_a);
    }
    out[3] = u8_from_unit(out_a);
    out
}

fn soft_light_px(base: Rgba8, overlay: Rgba8) -> Rgba8 {
    let weight = unit_from_u8(overlay[3]);
    let mut out = base;
    if weight <= 0.0 {
        return out;
    }
    for c in 0..3 {
        let b = unit_from_u8(base[c]);
        let o = unit_from_u8(overlay[c]);
        let lit = if o <= 0.5 {
            2.0 * b * o + b * b * (1.0 - 2.0 * o)
        } else {
            2.0 * b * (1.0 - o) + b.sqrt() * (2.0 * o - 1.0)
        };
        out[c] = u8_from_unit(lit * weight + b * (1.0 - weight));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
