use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelBuffer;

/// Levels parameters: input black/white points, midtone gamma, output black/white points.
///
/// Values outside `[0, 255]` are accepted; they produce a degenerate but well-defined table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Levels {
    /// Input level at or below which output is `out_black`.
    pub in_black: i32,
    /// Midtone gamma; the normalized level is raised to `1 / gamma`.
    pub gamma: f64,
    /// Input level at or above which output is `out_white`.
    pub in_white: i32,
    /// Output level for the darkest input.
    pub out_black: i32,
    /// Output level for the brightest input.
    pub out_white: i32,
}

impl Levels {
    /// The identity mapping.
    pub const IDENTITY: Self = Self {
        in_black: 0,
        gamma: 1.0,
        in_white: 255,
        out_black: 0,
        out_white: 255,
    };
}

impl Default for Levels {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A 256-entry lookup table applied to R, G and B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToneCurve {
    table: [u8; 256],
}

impl ToneCurve {
    /// Build the lookup table for `levels`.
    ///
    /// - `i <= in_black` maps to `out_black`, `i >= in_white` maps to `out_white` (the black test
    ///   wins, so `in_black >= in_white` collapses to a step at `in_black`).
    /// - In between, `n = (i - in_black) / (in_white - in_black)` is raised to `1 / gamma` and
    ///   rescaled into `[out_black, out_white]`, clamped to `[0, 255]` and rounded.
    /// - A non-positive or non-finite gamma is taken as its `0+` limit: every level strictly
    ///   inside the active range maps to `out_black`.
    pub fn build(levels: Levels) -> Self {
        let Levels {
            in_black,
            gamma,
            in_white,
            out_black,
            out_white,
        } = levels;

        if in_black >= in_white {
            tracing::warn!(in_black, in_white, "levels black point is not below white point");
        }
        let gamma_degenerate = !gamma.is_finite() || gamma <= 0.0;
        if gamma_degenerate {
            tracing::warn!(gamma, "levels gamma is not positive; using hard threshold");
        }

        let out_lo = f64::from(out_black);
        let out_span = f64::from(out_white) - out_lo;

        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let level = i as i32;
            let n = if level <= in_black {
                0.0
            } else if level >= in_white {
                1.0
            } else {
                let n = (f64::from(level) - f64::from(in_black))
                    / (f64::from(in_white) - f64::from(in_black));
                if gamma_degenerate {
                    0.0
                } else if gamma != 1.0 {
                    n.powf(1.0 / gamma)
                } else {
                    n
                }
            };
            let value = n * out_span + out_lo;
            *slot = value.clamp(0.0, 255.0).round() as u8;
        }
        Self { table }
    }

    /// The identity curve.
    pub fn identity() -> Self {
        Self::build(Levels::IDENTITY)
    }

    /// Look up a single level.
    pub fn map(&self, level: u8) -> u8 {
        self.table[usize::from(level)]
    }

    /// Borrow the table.
    pub fn table(&self) -> &[u8; 256] {
        &self.table
    }

    /// Map every R, G and B sample through the table. Alpha is untouched.
    pub fn apply(&self, buffer: PixelBuffer) -> PixelBuffer {
        buffer.map_rgb_samples(|v| self.table[usize::from(v)])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grade/tone_curve.rs"]
mod tests;
