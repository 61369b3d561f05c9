use crate::bmp::{self, HEADER_LEN};
use crate::error::BitmapError;

/// Header probe result. Computed without touching the pixel region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    /// Row count (absolute header height).
    pub height: u32,
    /// Header height was negative (first stored row is the top row).
    pub top_down: bool,
    /// Filler bytes at the end of each stored row.
    pub padding: usize,
    /// Stored bytes per row, including padding.
    pub row_stride: usize,
    /// Expected length of the padded pixel region.
    pub pixel_data_len: usize,
    /// Whether `data` holds the whole pixel region.
    pub complete: bool,
}

impl ImageInfo {
    /// Probe a BMP byte stream.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let (header, geometry) = bmp::parse_header(data)?;
        Ok(Self {
            width: geometry.width,
            height: geometry.rows,
            top_down: header.is_top_down(),
            padding: geometry.padding,
            row_stride: geometry.stride,
            pixel_data_len: geometry.stored_len,
            complete: data.len() - HEADER_LEN >= geometry.stored_len,
        })
    }
}
