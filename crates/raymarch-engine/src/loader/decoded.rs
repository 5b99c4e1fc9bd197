use crate::coords::SurfaceSize;
use crate::gl::{GlError, GlResult};

/// A decoded image: tightly packed RGBA8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(Some(pixels.len()), Self::byte_len(width, height));
        Self { width, height, pixels }
    }

    /// Bytes a `width` x `height` RGBA8 image occupies, `None` on overflow.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
    }

    /// Checks that `pixels` holds exactly `width * height` RGBA8 texels.
    ///
    /// The fields are public, so anything about to hand the buffer to GL
    /// calls this first.
    pub fn validate(&self) -> GlResult<()> {
        match Self::byte_len(self.width, self.height) {
            Some(expected) if expected == self.pixels.len() => Ok(()),
            expected => Err(GlError::ImageData {
                width: self.width,
                height: self.height,
                expected,
                found: self.pixels.len(),
            }),
        }
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// Returns a copy with the row order reversed.
    pub fn flipped_vertically(&self) -> Self {
        let stride = self.width as usize * 4;
        let pixels = if stride == 0 {
            Vec::new()
        } else {
            self.pixels
                .chunks_exact(stride)
                .rev()
                .flatten()
                .copied()
                .collect()
        };
        Self { width: self.width, height: self.height, pixels }
    }

    /// Drops the alpha channel (cube map faces are uploaded as RGB8).
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

impl From<image::RgbaImage> for DecodedImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height, pixels: img.into_raw() }
    }
}
