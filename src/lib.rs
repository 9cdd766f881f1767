//! rasterfx is a layered raster effects engine over straight-alpha RGBA8 buffers.
//!
//! It grades an image, lays procedural overlays on top of it, and turns a scrolling overlay
//! into a looping animation. Decoding and encoding image files is left to the caller; the
//! engine only ever sees decoded [`PixelBuffer`]s.
//!
//! # Pipeline overview
//!
//! 1. **Grade**: [`AdjustmentPipeline`] runs the fixed pass (monochrome, HSV shift, colour
//!    balance, brightness/contrast, levels) over one buffer.
//! 2. **Overlay**: [`generate_pattern`] synthesizes a white, alpha-shaped grid or stripe layer;
//!    [`apply_overlay`] scales its opacity and blends it in ([`BlendMode`]).
//! 3. **Noise**: [`color_dodge_noise`] dodges uniform noise from a caller-supplied generator.
//! 4. **Animate**: [`generate_animation`] scrolls a pattern across frames and hands an ordered
//!    [`FrameSequence`] to any [`FrameSink`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO**: every operation is a pure function over in-memory buffers.
//! - **Straight alpha** end-to-end: alpha is never premultiplied.
//! - **Clamped arithmetic**: out-of-range intermediate values are clamped where they arise;
//!   only precondition violations produce an [`FxError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animate;
mod composite;
mod encode;
mod foundation;
mod grade;
mod pattern;

pub use animate::sequencer::{
    AnimationParams, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_DURATION_MS, DEFAULT_OFFSET_STEP, Frame,
    FrameSequence, RenderThreading, generate_animation,
};
pub use composite::blend::{
    BlendMode, DEFAULT_NOISE_OPACITY, DODGE_EPSILON, alpha_composite, blend, color_dodge,
    color_dodge_noise, color_dodge_noise_default, noise_layer, scale_opacity, soft_light,
};
pub use composite::overlay::{
    DEFAULT_GRID_OPACITY, DEFAULT_STRIPE_OPACITY, OverlayParams, apply_overlay,
};
pub use encode::sink::{FrameSink, ImageFramesSink, InMemorySink, SinkConfig};
pub use foundation::core::{PixelBuffer, Rgba8};
pub use foundation::error::{FxError, FxResult};
pub use grade::channels::{
    CONTRAST_PIVOT, ChannelOffsets, ColorBalance, add_channel_offsets, adjust_brightness,
    adjust_contrast, apply_color_balance, desaturate,
};
pub use grade::hsv::{HUE_MAX, HsvShift, hsv_to_rgb, rgb_to_hsv, shift_hsv, shift_hue, shift_saturation};
pub use grade::pipeline::{AdjustmentPipeline, GradeParams, grade};
pub use grade::tone_curve::{Levels, ToneCurve};
pub use pattern::generator::{
    DEFAULT_GRID_CELL, DEFAULT_STRIPE_CELL_HEIGHT, DEFAULT_STRIPE_CELL_WIDTH, DEFAULT_STRIPE_ROWS,
    PatternDescriptor, PatternKind, UnitCell, generate_pattern, parse_pattern_kind, tile,
};
