use serde::{Deserialize, Serialize};

use crate::foundation::core::PixelBuffer;
use crate::foundation::math::{add_clamped, luma_u8, u8_trunc};

/// Mid-gray pivot used by [`adjust_contrast`].
pub const CONTRAST_PIVOT: f32 = 128.0;

/// Signed additive deltas for R, G and B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelOffsets {
    /// Red delta.
    pub red: i32,
    /// Green delta.
    pub green: i32,
    /// Blue delta.
    pub blue: i32,
}

impl ChannelOffsets {
    /// Build offsets from `(red, green, blue)`.
    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }
}

impl std::ops::Add for ChannelOffsets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            red: self.red.saturating_add(rhs.red),
            green: self.green.saturating_add(rhs.green),
            blue: self.blue.saturating_add(rhs.blue),
        }
    }
}

/// Three colour-balance sliders, each expressed as the per-channel shift it causes.
///
/// The sliders are independent levers; [`ColorBalance::total`] folds them into one additive
/// pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBalance {
    /// Cyan ↔ red slider.
    pub cyan_red: ChannelOffsets,
    /// Magenta ↔ green slider.
    pub magenta_green: ChannelOffsets,
    /// Yellow ↔ blue slider.
    pub yellow_blue: ChannelOffsets,
}

impl ColorBalance {
    /// No shift on any slider.
    pub const NEUTRAL: Self = Self {
        cyan_red: ChannelOffsets::new(0, 0, 0),
        magenta_green: ChannelOffsets::new(0, 0, 0),
        yellow_blue: ChannelOffsets::new(0, 0, 0),
    };

    /// Sum of all sliders per channel.
    pub fn total(self) -> ChannelOffsets {
        self.cyan_red + self.magenta_green + self.yellow_blue
    }
}

impl Default for ColorBalance {
    /// The signature grade's sliders: red pushed against blue, green lifted at the expense of
    /// magenta, and a touch of blue over yellow.
    fn default() -> Self {
        Self {
            cyan_red: ChannelOffsets::new(30, 0, -30),
            magenta_green: ChannelOffsets::new(-20, 40, -20),
            yellow_blue: ChannelOffsets::new(-10, -10, 20),
        }
    }
}

/// Replace R, G and B with their luma. Alpha is kept.
pub fn desaturate(buffer: PixelBuffer) -> PixelBuffer {
    buffer.map_rgb(|[r, g, b]| {
        let l = luma_u8(r, g, b);
        [l, l, l]
    })
}

/// Add signed deltas to R, G and B, clamping to `[0, 255]`.
pub fn add_channel_offsets(buffer: PixelBuffer, offsets: ChannelOffsets) -> PixelBuffer {
    if offsets == ChannelOffsets::default() {
        return buffer;
    }
    buffer.map_rgb(|[r, g, b]| {
        [
            add_clamped(r, offsets.red),
            add_clamped(g, offsets.green),
            add_clamped(b, offsets.blue),
        ]
    })
}

/// Apply every slider of `balance` in one additive pass.
pub fn apply_color_balance(buffer: PixelBuffer, balance: ColorBalance) -> PixelBuffer {
    add_channel_offsets(buffer, balance.total())
}

/// Multiply R, G and B by `factor`, clamp, truncate. `1.0` is the identity.
pub fn adjust_brightness(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    buffer.map_rgb_samples(|v| u8_trunc(f32::from(v) * factor))
}

/// Scale each sample's distance from mid-gray by `factor`, clamp, truncate. `1.0` is the
/// identity.
pub fn adjust_contrast(buffer: PixelBuffer, factor: f32) -> PixelBuffer {
    buffer.map_rgb_samples(|v| u8_trunc(CONTRAST_PIVOT + factor * (f32::from(v) - CONTRAST_PIVOT)))
}

#[cfg(test)]
#[path = "../../tests/unit/grade/channels.rs"]
mod tests;
