//! BMP encoder: verbatim header plus zero-padded rows.

use alloc::vec::Vec;
use enough::Stop;

use super::{Geometry, HEADER_LEN, Image};
use crate::error::BitmapError;

/// Serialize `image` with its original header.
///
/// Padding is recomputed from the width and always written as zero bytes.
pub(crate) fn encode_image(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let header = image.header();
    let geometry = header.geometry()?;
    let pixels = image.pixels();
    let file_size = geometry
        .stored_len
        .checked_add(HEADER_LEN)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width().into(),
            height: header.height().into(),
        })?;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(header.as_bytes());
    write_rows(&mut out, pixels.as_bytes(), &geometry, stop)?;

    tracing::debug!(
        width = geometry.width,
        rows = geometry.rows,
        padding = geometry.padding,
        bytes = out.len(),
        "encoded bmp"
    );
    Ok(out)
}

fn write_rows(
    out: &mut Vec<u8>,
    pixels: &[u8],
    geometry: &Geometry,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for (row_idx, row) in pixels.chunks_exact(geometry.row_len).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(row);
        out.extend(core::iter::repeat_n(0u8, geometry.padding));
    }
    Ok(())
}
