//! BMP decoder: header capture and padding removal.

use alloc::vec::Vec;

use enough::Stop;

use super::{BmpHeader, Geometry, HEADER_LEN};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Capture the header and validate its dimensions.
pub(crate) fn parse_header(data: &[u8]) -> Result<(BmpHeader, Geometry), BitmapError> {
    let header = BmpHeader::from_bytes(data)?;
    let geometry = header.geometry()?;
    Ok((header, geometry))
}

/// Copy the stored rows after the header into an unpadded buffer.
///
/// Rows stay in file order; each row drops its trailing `padding` bytes.
pub(crate) fn decode_pixels(
    data: &[u8],
    geometry: &Geometry,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let body = data.get(HEADER_LEN..).unwrap_or_default();
    let stored = body
        .get(..geometry.stored_len)
        .ok_or(BitmapError::TruncatedData {
            needed: geometry.stored_len,
            actual: body.len(),
        })?;
    if body.len() > geometry.stored_len {
        tracing::warn!(
            trailing = body.len() - geometry.stored_len,
            "ignoring bytes after pixel data"
        );
    }

    let mut out = Vec::with_capacity(geometry.buffer_len);
    for (row_idx, row) in stored.chunks_exact(geometry.stride).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(&row[..geometry.row_len]);
    }

    PixelBuffer::from_bgr_bytes(out, geometry.width, geometry.rows)
}
