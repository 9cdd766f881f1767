use crate::animate::sequencer::Frame;
use crate::foundation::error::FxResult;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will follow.
    pub frame_count: usize,
    /// Whether playback repeats forever.
    pub looping: bool,
}

/// Consumer of animation frames, typically an external multi-frame encoder.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0,
/// between exactly one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FxResult<()>;
    /// Push one frame in playback order.
    fn push_frame(&mut self, idx: usize, frame: &Frame) -> FxResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FxResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, Frame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(usize, Frame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FxResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame) -> FxResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FxResult<()> {
        Ok(())
    }
}

/// Collects frames as [`image::Frame`]s with per-frame delays, ready for a multi-frame encoder
/// such as `image::codecs::gif::GifEncoder`.
#[derive(Default)]
pub struct ImageFramesSink {
    looping: bool,
    frames: Vec<image::Frame>,
}

impl ImageFramesSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loop flag captured in `begin`.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Borrow the collected frames.
    pub fn frames(&self) -> &[image::Frame] {
        &self.frames
    }

    /// Take the collected frames.
    pub fn into_frames(self) -> Vec<image::Frame> {
        self.frames
    }
}

impl FrameSink for ImageFramesSink {
    fn begin(&mut self, cfg: SinkConfig) -> FxResult<()> {
        self.looping = cfg.looping;
        self.frames = Vec::with_capacity(cfg.frame_count);
        Ok(())
    }

    fn push_frame(&mut self, _idx: usize, frame: &Frame) -> FxResult<()> {
        let rgba = frame.image.clone().into_rgba_image()?;
        let delay = image::Delay::from_numer_denom_ms(frame.duration_ms, 1);
        self.frames.push(image::Frame::from_parts(rgba, 0, 0, delay));
        Ok(())
    }

    fn end(&mut self) -> FxResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
