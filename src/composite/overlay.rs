use serde::{Deserialize, Serialize};

use crate::composite::blend::{BlendMode, blend, scale_opacity};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{FxError, FxResult};
use crate::pattern::generator::{PatternKind, generate_pattern};

/// Default opacity of the pixel-grid overlay.
pub const DEFAULT_GRID_OPACITY: f64 = 0.60;
/// Default opacity of stripe overlays, single image or animated.
pub const DEFAULT_STRIPE_OPACITY: f64 = 0.65;

/// One procedural overlay laid over a single image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayParams {
    /// Overlay shape.
    pub pattern: PatternKind,
    /// Vertical scroll of the pattern in pixels.
    pub offset: u32,
    /// Alpha multiplier applied to the generated overlay.
    pub opacity: f64,
    /// How the overlay meets the base.
    pub mode: BlendMode,
}

impl OverlayParams {
    /// Corner grid at 60%, composited normally.
    pub fn grid() -> Self {
        Self {
            pattern: PatternKind::grid(),
            offset: 0,
            opacity: DEFAULT_GRID_OPACITY,
            mode: BlendMode::Normal,
        }
    }

    /// Stripes at 65% in soft light.
    pub fn stripes(gradient: bool) -> Self {
        Self {
            pattern: PatternKind::stripes(gradient),
            offset: 0,
            opacity: DEFAULT_STRIPE_OPACITY,
            mode: BlendMode::SoftLight,
        }
    }

    /// Parse parameters from JSON. Missing fields keep the gradient-stripe defaults.
    pub fn from_json(json: &str) -> FxResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FxError::serde(format!("parse overlay params JSON: {e}")))
    }
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self::stripes(true)
    }
}

/// Generate the overlay at the base's size, scale its alpha, and blend it in.
#[tracing::instrument(skip(base), fields(width = base.width(), height = base.height()))]
pub fn apply_overlay(base: &PixelBuffer, params: &OverlayParams) -> FxResult<PixelBuffer> {
    let mut overlay = generate_pattern(params.pattern, base.width(), base.height(), params.offset)?;
    scale_opacity(&mut overlay, params.opacity);
    blend(base, &overlay, params.mode)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/overlay.rs"]
mod tests;
