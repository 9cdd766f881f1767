use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{FxError, FxResult};
use crate::grade::channels::{
    ColorBalance, adjust_brightness, adjust_contrast, apply_color_balance, desaturate,
};
use crate::grade::hsv::{HsvShift, shift_hsv};
use crate::grade::tone_curve::{Levels, ToneCurve};

/// Constants of the fixed grading pass. Defaults reproduce the signature grade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeParams {
    /// Collapse RGB to luma before anything else.
    pub monochrome: bool,
    /// HSV deltas, applied in one round trip.
    pub hsv: HsvShift,
    /// Additive colour balance.
    pub balance: ColorBalance,
    /// Brightness factor.
    pub brightness: f32,
    /// Contrast factor (pivot 128).
    pub contrast: f32,
    /// Final levels curve.
    pub levels: Levels,
}

impl Default for GradeParams {
    fn default() -> Self {
        Self {
            monochrome: true,
            hsv: HsvShift {
                hue: 80,
                saturation: -80,
                value: 0,
            },
            balance: ColorBalance::default(),
            brightness: 0.80,
            contrast: 1.10,
            levels: Levels {
                gamma: 0.50,
                ..Levels::IDENTITY
            },
        }
    }
}

impl GradeParams {
    /// Parse parameters from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> FxResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FxError::serde(format!("parse grade params JSON: {e}")))
    }
}

/// The fixed multi-stage grade: monochrome, HSV shift, colour balance, brightness then
/// contrast, levels.
///
/// The levels table is built once at construction, so one pipeline can grade many buffers.
#[derive(Clone, Debug)]
pub struct AdjustmentPipeline {
    params: GradeParams,
    curve: ToneCurve,
}

impl AdjustmentPipeline {
    /// Build a pipeline for `params`.
    pub fn new(params: GradeParams) -> Self {
        Self {
            curve: ToneCurve::build(params.levels),
            params,
        }
    }

    /// The parameters this pipeline was built with.
    pub fn params(&self) -> &GradeParams {
        &self.params
    }

    /// Run every stage over `buffer`. Alpha passes through unchanged; a zero-area buffer is
    /// returned as is.
    #[tracing::instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
    pub fn apply(&self, buffer: PixelBuffer) -> PixelBuffer {
        if buffer.is_empty() {
            return buffer;
        }
        let p = &self.params;

        let mut out = buffer;
        if p.monochrome {
            out = desaturate(out);
            tracing::debug!("monochrome done");
        }
        out = shift_hsv(out, p.hsv);
        out = apply_color_balance(out, p.balance);
        out = adjust_brightness(out, p.brightness);
        out = adjust_contrast(out, p.contrast);
        tracing::debug!(
            brightness = p.brightness,
            contrast = p.contrast,
            "colour stages done"
        );
        self.curve.apply(out)
    }
}

impl Default for AdjustmentPipeline {
    fn default() -> Self {
        Self::new(GradeParams::default())
    }
}

/// One-shot convenience for [`AdjustmentPipeline::apply`].
pub fn grade(buffer: PixelBuffer, params: &GradeParams) -> PixelBuffer {
    AdjustmentPipeline::new(*params).apply(buffer)
}

#[cfg(test)]
#[path = "../../tests/unit/grade/pipeline.rs"]
mod tests;
