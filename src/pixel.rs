use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BitmapError;

/// Bytes per stored pixel (B, G, R).
pub const BYTES_PER_PIXEL: usize = 3;

/// Channel index of blue within a pixel.
pub const B: usize = 0;
/// Channel index of green within a pixel.
pub const G: usize = 1;
/// Channel index of red within a pixel.
pub const R: usize = 2;

/// Unpadded 24-bit pixel grid.
///
/// Pixels are stored row-major, 3 bytes each in BMP channel order
/// (blue, green, red). Rows keep whatever order the source file used;
/// row 0 is the first row stored in the file, which is the bottom row of a
/// bottom-up bitmap.
///
/// The byte offset of pixel `(x, y)` is `(y * width + x) * 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Allocate a zero-filled (black) buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
        })
    }

    /// Wrap existing B,G,R bytes. The length must be exactly `width * height * 3`.
    pub fn from_bgr_bytes(data: Vec<u8>, width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(BitmapError::BufferTooSmall {
                needed: len,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes in one unpadded row.
    pub fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Raw B,G,R bytes, no padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 3]] {
        self.data.as_chunks::<BYTES_PER_PIXEL>().0
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        self.data.as_chunks_mut::<BYTES_PER_PIXEL>().0
    }

    /// Pixel at column `x` of stored row `y`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let idx = self.index(x, y)?;
        self.pixels().get(idx).copied()
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8; 3]> {
        let idx = self.index(x, y)?;
        self.pixels_mut().get_mut(idx)
    }

    /// Pixels of stored row `y`.
    pub fn row(&self, y: u32) -> Option<&[[u8; 3]]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.pixels().get(start..start + w)
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [[u8; 3]]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.pixels_mut().get_mut(start..start + w)
    }

    /// Iterate stored rows as pixel slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[[u8; 3]]> + '_ {
        self.pixels().chunks_exact(self.width as usize)
    }

    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [[u8; 3]]> + '_ {
        let w = self.width as usize;
        self.pixels_mut().chunks_exact_mut(w)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Typed view as `BGR<u8>` pixels.
    #[cfg(feature = "rgb")]
    pub fn as_bgr(&self) -> &[rgb::alt::BGR<u8>] {
        self.data.as_pixels()
    }

    #[cfg(feature = "rgb")]
    pub fn as_bgr_mut(&mut self) -> &mut [rgb::alt::BGR<u8>] {
        self.data.as_pixels_mut()
    }

    /// Borrow as an [`imgref::ImgRef`]. No copy.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::alt::BGR<u8>> {
        imgref::ImgRef::new(self.as_bgr(), self.width as usize, self.height as usize)
    }

    #[cfg(feature = "imgref")]
    pub fn as_imgref_mut(&mut self) -> imgref::ImgRefMut<'_, rgb::alt::BGR<u8>> {
        let (w, h) = (self.width as usize, self.height as usize);
        imgref::ImgRefMut::new(self.as_bgr_mut(), w, h)
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidFormat(alloc::format!(
            "empty pixel grid {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        })
}
