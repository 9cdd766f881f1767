use anyhow::Context;

use crate::foundation::error::{FxError, FxResult};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Dense row-major RGBA8 image, straight alpha.
///
/// Invariant: `data.len() == width * height * 4`. Every constructor checks it, and the pixel
/// accessors rely on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, validating the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FxResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(FxError::validation(format!(
                "rgba8 buffer for {width}x{height} must hold {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw RGB8 bytes; every pixel becomes fully opaque.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> FxResult<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| FxError::validation("rgb buffer size overflow"))?;
        if rgb.len() != pixels * 3 {
            return Err(FxError::validation(format!(
                "rgb8 buffer for {width}x{height} must hold {} bytes, got {}",
                pixels * 3,
                rgb.len()
            )));
        }
        let mut data = Vec::with_capacity(pixels * 4);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> FxResult<Self> {
        let pixels = byte_len(width, height)? / 4;
        Ok(Self {
            width,
            height,
            data: px.repeat(pixels),
        })
    }

    /// A fully transparent black buffer.
    pub fn transparent(width: u32, height: u32) -> FxResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Convert any decoded image into straight RGBA8.
    ///
    /// Images without an alpha channel come out fully opaque.
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        Self::from(img.to_rgba8())
    }

    /// Hand the pixels to the `image` crate for encoding by the caller.
    pub fn into_rgba_image(self) -> FxResult<image::RgbaImage> {
        let (width, height) = (self.width, self.height);
        let img = image::RgbaImage::from_raw(width, height, self.data)
            .with_context(|| format!("build {width}x{height} rgba image"))?;
        Ok(img)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Borrow the RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Take the RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel. Returns `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Iterate over the alpha channel in row-major order.
    pub fn alpha_channel(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|p| p[3])
    }

    /// Check that `other` has the same size as `self`.
    pub fn ensure_same_size(&self, other: &PixelBuffer) -> FxResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(FxError::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Rewrite R, G and B of every pixel; alpha is left untouched.
    pub(crate) fn map_rgb(mut self, mut f: impl FnMut([u8; 3]) -> [u8; 3]) -> Self {
        for px in self.data.chunks_exact_mut(4) {
            let out = f([px[0], px[1], px[2]]);
            px[..3].copy_from_slice(&out);
        }
        self
    }

    /// Rewrite each R, G and B sample independently; alpha is left untouched.
    pub(crate) fn map_rgb_samples(self, mut f: impl FnMut(u8) -> u8) -> Self {
        self.map_rgb(|[r, g, b]| [f(r), f(g), f(b)])
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

fn byte_len(width: u32, height: u32) -> FxResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FxError::validation("rgba8 buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
