//! 24-bit uncompressed BMP container: header pass-through and row padding.
//!
//! Only the magic bytes and the two dimension fields of the 54-byte header
//! are interpreted. Everything else (bit depth, compression, resolution,
//! data offset) is carried verbatim from decode to encode.

mod decode;
mod encode;

pub(crate) use decode::{decode_pixels, parse_header};
pub(crate) use encode::encode_image;

use crate::error::BitmapError;
use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

/// Size of the BITMAPFILEHEADER + BITMAPINFOHEADER pair.
pub const HEADER_LEN: usize = 54;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;

/// Filler bytes needed to bring a row of `width` pixels to a multiple of 4.
///
/// Always in `0..=3`. Computed on `width % 4` so it cannot overflow.
pub fn row_padding(width: u32) -> usize {
    let row_mod = (width % 4) as usize * BYTES_PER_PIXEL % 4;
    (4 - row_mod) % 4
}

/// The 54-byte BMP header, kept byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    bytes: [u8; HEADER_LEN],
}

impl BmpHeader {
    /// Build a standard BITMAPINFOHEADER for a bottom-up 24-bit image.
    pub fn new_24bit(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        };
        let signed_width = i32::try_from(width).map_err(|_| too_large())?;
        let signed_height = i32::try_from(height).map_err(|_| too_large())?;
        let geometry = Geometry::new(signed_width, signed_height)?;
        let pixel_data_size = u32::try_from(geometry.stored_len).map_err(|_| too_large())?;
        let file_size = pixel_data_size
            .checked_add(HEADER_LEN as u32)
            .ok_or_else(too_large)?;

        let mut b = [0u8; HEADER_LEN];
        // File header (14 bytes)
        b[0..2].copy_from_slice(b"BM");
        b[2..6].copy_from_slice(&file_size.to_le_bytes());
        // 6..10 reserved
        b[10..14].copy_from_slice(&(HEADER_LEN as u32).to_le_bytes()); // data offset

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        b[14..18].copy_from_slice(&40u32.to_le_bytes());
        b[18..22].copy_from_slice(&signed_width.to_le_bytes());
        b[22..26].copy_from_slice(&signed_height.to_le_bytes()); // positive = bottom-up
        b[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
        b[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
        // 30..34 compression = BI_RGB
        b[34..38].copy_from_slice(&pixel_data_size.to_le_bytes());
        b[38..42].copy_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
        b[42..46].copy_from_slice(&2835u32.to_le_bytes()); // v resolution
        // 46..54 colors used / important = 0
        Ok(Self { bytes: b })
    }

    /// Take the first 54 bytes of `data` verbatim.
    ///
    /// Checks length and magic only. Dimensions are validated when the
    /// pixel region is decoded.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let bytes: [u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| {
                BitmapError::InvalidFormat(alloc::format!(
                    "header needs {HEADER_LEN} bytes, got {}",
                    data.len()
                ))
            })?;
        if &bytes[0..2] != b"BM" {
            return Err(BitmapError::InvalidFormat(alloc::format!(
                "bad magic bytes {:02X} {:02X}",
                bytes[0],
                bytes[1]
            )));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }

    /// Signed width at offset 18.
    pub fn width(&self) -> i32 {
        read_i32_le(&self.bytes, WIDTH_OFFSET)
    }

    /// Signed height at offset 22. Negative means top-down row order.
    pub fn height(&self) -> i32 {
        read_i32_le(&self.bytes, HEIGHT_OFFSET)
    }

    pub fn is_top_down(&self) -> bool {
        self.height() < 0
    }

    /// Validated row/stride arithmetic for these dimensions.
    pub(crate) fn geometry(&self) -> Result<Geometry, BitmapError> {
        Geometry::new(self.width(), self.height())
    }
}

fn read_i32_le(bytes: &[u8; HEADER_LEN], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Row layout derived from the header dimensions. Never stored in the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Geometry {
    pub width: u32,
    pub rows: u32,
    /// Unpadded bytes per row.
    pub row_len: usize,
    pub padding: usize,
    /// Padded bytes per row as stored.
    pub stride: usize,
    /// Stored pixel region length (padded).
    pub stored_len: usize,
    /// Unpadded pixel buffer length.
    pub buffer_len: usize,
}

impl Geometry {
    pub fn new(width: i32, height: i32) -> Result<Self, BitmapError> {
        if width <= 0 {
            return Err(BitmapError::InvalidFormat(alloc::format!(
                "width must be positive, got {width}"
            )));
        }
        if height == 0 {
            return Err(BitmapError::InvalidFormat("height is zero".into()));
        }
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width.into(),
            height: height.into(),
        };
        let w = width as u32;
        let rows = height.unsigned_abs();
        let padding = row_padding(w);
        let row_len = (w as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(too_large)?;
        let stride = row_len
            .checked_add(padding)
            .ok_or_else(too_large)?;
        let stored_len = stride
            .checked_mul(rows as usize)
            .ok_or_else(too_large)?;
        let buffer_len = row_len.checked_mul(rows as usize).ok_or_else(too_large)?;
        Ok(Self {
            width: w,
            rows,
            row_len,
            padding,
            stride,
            stored_len,
            buffer_len,
        })
    }
}

/// A decoded bitmap: the verbatim header plus its unpadded pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: BmpHeader,
    pixels: PixelBuffer,
}

impl Image {
    /// A black bottom-up image with a freshly written 24-bit header.
    pub fn new_24bit(width: u32, height: u32) -> Result<Self, BitmapError> {
        let header = BmpHeader::new_24bit(width, height)?;
        let pixels = PixelBuffer::new(width, height)?;
        Ok(Self { header, pixels })
    }

    /// Pair a header with pixels. Dimensions must agree.
    pub fn from_parts(header: BmpHeader, pixels: PixelBuffer) -> Result<Self, BitmapError> {
        let geometry = header.geometry()?;
        if geometry.width != pixels.width() || geometry.rows != pixels.height() {
            return Err(BitmapError::BufferTooSmall {
                needed: geometry.buffer_len,
                actual: pixels.as_bytes().len(),
            });
        }
        Ok(Self { header, pixels })
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Row count (absolute value of the header height).
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn into_parts(self) -> (BmpHeader, PixelBuffer) {
        (self.header, self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_formula() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
        assert_eq!(row_padding(u32::MAX), 3);
        for w in 1..64u32 {
            assert_eq!((w as usize * 3 + row_padding(w)) % 4, 0);
        }
    }

    #[test]
    fn new_header_reads_back() {
        let h = BmpHeader::new_24bit(3, 2).unwrap();
        assert_eq!(h.width(), 3);
        assert_eq!(h.height(), 2);
        assert!(!h.is_top_down());
        assert_eq!(&h.as_bytes()[0..2], b"BM");
        // 3 px * 3 bytes + 3 padding = 12 per row
        assert_eq!(&h.as_bytes()[2..6], &(54u32 + 24).to_le_bytes());
        assert_eq!(&h.as_bytes()[28..30], &24u16.to_le_bytes());
    }

    #[test]
    fn dimensions_are_little_endian() {
        let mut raw = [0u8; HEADER_LEN];
        raw[0] = b'B';
        raw[1] = b'M';
        raw[18..22].copy_from_slice(&[0x01, 0x02, 0x00, 0x00]);
        raw[22..26].copy_from_slice(&(-7i32).to_le_bytes());
        let h = BmpHeader::from_bytes(&raw).unwrap();
        assert_eq!(h.width(), 0x0201);
        assert_eq!(h.height(), -7);
        assert!(h.is_top_down());
        assert_eq!(h.geometry().unwrap().rows, 7);
    }

    #[test]
    fn short_and_bad_magic_rejected() {
        assert!(matches!(
            BmpHeader::from_bytes(b"BM\x00\x00"),
            Err(BitmapError::InvalidFormat(_))
        ));
        let mut raw = [0u8; HEADER_LEN];
        raw[0] = b'X';
        raw[1] = b'X';
        assert!(matches!(
            BmpHeader::from_bytes(&raw),
            Err(BitmapError::InvalidFormat(_))
        ));
    }

    #[test]
    fn geometry_rejects_bad_dimensions() {
        assert!(matches!(
            Geometry::new(0, 4),
            Err(BitmapError::InvalidFormat(_))
        ));
        assert!(matches!(
            Geometry::new(-3, 4),
            Err(BitmapError::InvalidFormat(_))
        ));
        assert!(matches!(
            Geometry::new(4, 0),
            Err(BitmapError::InvalidFormat(_))
        ));
    }

    #[test]
    fn geometry_strides() {
        let g = Geometry::new(5, -3).unwrap();
        assert_eq!(g.row_len, 15);
        assert_eq!(g.padding, 1);
        assert_eq!(g.stride, 16);
        assert_eq!(g.stored_len, 48);
        assert_eq!(g.buffer_len, 45);
    }

    #[test]
    fn new_header_rejects_dimensions_past_i32() {
        let over = i32::MAX as u32 + 1;
        for (w, h) in [(1, u32::MAX), (u32::MAX, 1), (over, 1), (1, over)] {
            match BmpHeader::new_24bit(w, h) {
                Err(BitmapError::DimensionsTooLarge { width, height }) => {
                    assert_eq!((width, height), (i64::from(w), i64::from(h)));
                }
                other => panic!("expected DimensionsTooLarge for {w}x{h}, got {other:?}"),
            }
        }
        assert!(matches!(
            Image::new_24bit(1, u32::MAX),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn from_parts_checks_dimensions() {
        let header = BmpHeader::new_24bit(4, 2).unwrap();
        let wrong = PixelBuffer::new(2, 4).unwrap();
        assert!(Image::from_parts(header.clone(), wrong).is_err());
        let mut right = PixelBuffer::new(4, 2).unwrap();
        right.as_bytes_mut()[0] = 9;
        let image = Image::from_parts(header.clone(), right.clone()).unwrap();
        assert_eq!(image.into_parts(), (header, right));
    }
}
