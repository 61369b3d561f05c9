use crate::bmp::Geometry;
use crate::error::BitmapError;

/// Caps on what a decode may allocate, checked against the header's
/// geometry before any pixel bytes are read.
///
/// Every field defaults to `None`, meaning unlimited.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    /// Applies to the row count, so top-down images are capped the same way.
    pub max_height: Option<u64>,
    /// Width times rows.
    pub max_pixels: Option<u64>,
    /// Size of the unpadded [`PixelBuffer`](crate::PixelBuffer) allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check(&self, geometry: &Geometry) -> Result<(), BitmapError> {
        let pixels = u64::from(geometry.width) * u64::from(geometry.rows);
        let checks = [
            ("width", u64::from(geometry.width), self.max_width),
            ("height", u64::from(geometry.rows), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("pixel buffer bytes", geometry.buffer_len as u64, self.max_memory_bytes),
        ];
        for (what, value, max) in checks {
            if let Some(max) = max.filter(|&max| value > max) {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }
}
