pub(crate) mod channels;
pub(crate) mod hsv;
pub(crate) mod pipeline;
pub(crate) mod tone_curve;
