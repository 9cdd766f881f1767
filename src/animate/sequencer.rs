use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::composite::blend::{scale_opacity, soft_light};
use crate::composite::overlay::DEFAULT_STRIPE_OPACITY;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{FxError, FxResult};
use crate::pattern::generator::{PatternDescriptor, PatternKind};

/// Default number of frames in a stripe animation.
pub const DEFAULT_FRAME_COUNT: u32 = 10;
/// Default per-frame display time.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;
/// Default scroll between consecutive frames.
pub const DEFAULT_OFFSET_STEP: u32 = 2;

/// Threading controls for multi-frame generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render frames on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker count. Must be `>= 1` when set.
    pub threads: Option<usize>,
}

/// Parameters of a scrolling-pattern animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Overlay shape.
    pub pattern: PatternKind,
    /// Number of frames; must be non-zero.
    pub frame_count: u32,
    /// Alpha multiplier applied to each generated overlay.
    pub opacity: f64,
    /// Display time of every frame.
    pub frame_duration_ms: u32,
    /// Pattern scroll added per frame.
    pub offset_step: u32,
    /// Sequential or parallel frame generation.
    pub threading: RenderThreading,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            pattern: PatternKind::default(),
            frame_count: DEFAULT_FRAME_COUNT,
            opacity: DEFAULT_STRIPE_OPACITY,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
            offset_step: DEFAULT_OFFSET_STEP,
            threading: RenderThreading::default(),
        }
    }
}

impl AnimationParams {
    /// Parse parameters from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> FxResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FxError::serde(format!("parse animation params JSON: {e}")))
    }
}

/// One animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Composited pixels.
    pub image: PixelBuffer,
    /// Display time in milliseconds.
    pub duration_ms: u32,
    /// Pattern scroll this frame was rendered at.
    pub offset: u32,
}

/// Ordered, non-empty list of same-sized frames plus a loop flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    looping: bool,
}

impl FrameSequence {
    /// Validate and wrap `frames`: at least one frame, all the same size.
    pub fn new(frames: Vec<Frame>, looping: bool) -> FxResult<Self> {
        let Some(first) = frames.first() else {
            return Err(FxError::EmptySequence);
        };
        let dims = first.image.dimensions();
        for f in &frames[1..] {
            if f.image.dimensions() != dims {
                return Err(FxError::dimension_mismatch(dims, f.image.dimensions()));
            }
        }
        Ok(Self { frames, looping })
    }

    /// Borrow the frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Take the frames in playback order.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether playback repeats forever.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Shared `(width, height)` of every frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames
            .first()
            .map(|f| f.image.dimensions())
            .unwrap_or((0, 0))
    }

    /// Stream every frame, in order, into `sink`.
    #[tracing::instrument(skip_all, fields(frames = self.frames.len()))]
    pub fn write_to(&self, sink: &mut dyn FrameSink) -> FxResult<()> {
        if self.frames.is_empty() {
            return Err(FxError::EmptySequence);
        }
        let (width, height) = self.dimensions();
        sink.begin(SinkConfig {
            width,
            height,
            frame_count: self.frames.len(),
            looping: self.looping,
        })?;
        for (idx, frame) in self.frames.iter().enumerate() {
            sink.push_frame(idx, frame)?;
        }
        sink.end()
    }
}

/// Render a looping animation of `params.pattern` scrolling over `base`.
///
/// Frame `i` soft-lights the pattern at offset `i * offset_step` onto the untouched `base`.
/// Frames come out in generation order whether or not they were rendered in parallel.
#[tracing::instrument(skip(base), fields(width = base.width(), height = base.height()))]
pub fn generate_animation(base: &PixelBuffer, params: &AnimationParams) -> FxResult<FrameSequence> {
    if params.frame_count == 0 {
        return Err(FxError::validation("animation frame_count must be >= 1"));
    }
    if base.is_empty() {
        return Err(FxError::empty_buffer("animation base has zero area"));
    }
    if (params.frame_count - 1)
        .checked_mul(params.offset_step)
        .is_none()
    {
        return Err(FxError::validation("animation offsets overflow u32"));
    }

    let render = |i: u32| render_frame(base, params, i);
    let frames = if params.threading.parallel {
        let pool = build_thread_pool(params.threading.threads)?;
        pool.install(|| {
            (0..params.frame_count)
                .into_par_iter()
                .map(render)
                .collect::<FxResult<Vec<_>>>()
        })?
    } else {
        (0..params.frame_count)
            .map(render)
            .collect::<FxResult<Vec<_>>>()?
    };

    FrameSequence::new(frames, true)
}

fn render_frame(base: &PixelBuffer, params: &AnimationParams, i: u32) -> FxResult<Frame> {
    let offset = i * params.offset_step;
    let descriptor = PatternDescriptor {
        kind: params.pattern,
        offset,
    };
    let mut overlay = descriptor.generate(base.width(), base.height())?;
    scale_opacity(&mut overlay, params.opacity);
    let image = soft_light(base, &overlay)?;
    tracing::debug!(frame = i, offset, "frame rendered");
    Ok(Frame {
        image,
        duration_ms: params.frame_duration_ms,
        offset,
    })
}

fn build_thread_pool(threads: Option<usize>) -> FxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FxError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FxError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/animate/sequencer.rs"]
mod tests;
