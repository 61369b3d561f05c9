//! # bmpfilter
//!
//! 24-bit uncompressed BMP decoding and encoding with in-place pixel filters.
//!
//! ## Header Pass-Through
//!
//! The 54-byte header is captured verbatim on decode and written back
//! verbatim on encode. Only the `BM` magic and the width/height fields are
//! read; bit depth, compression and resolution are trusted as-is. Rows are
//! kept in file order (bottom-up files stay bottom-up), and row padding is
//! recomputed from the width as `(4 - (width * 3) % 4) % 4` on both sides.
//! Padding bytes are always re-emitted as zero.
//!
//! ## Transforms
//!
//! [`Transform`] lists the catalog: color filters (`invert`, `grayscale`,
//! `bw`, `sepia`, `red`, `green`, `blue`, `yellow`, `tint`, `thunderNoir`,
//! `moonlight`, `colorPop`, `sunset`, `dusk`) and the two reflections
//! (`reflectX`, `reflectY`). All run in place and never fail.
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, bitfields) or palette BMPs
//! - Bit depths other than 24
//! - Color-accurate conversions; the filters are stylistic
//!
//! ## Usage
//!
//! ```
//! use bmpfilter::{Image, Transform, Unstoppable, decode_bmp, encode_bmp};
//!
//! let image = Image::new_24bit(4, 2)?;
//! let bytes = encode_bmp(&image, Unstoppable)?;
//!
//! let mut decoded = decode_bmp(&bytes, Unstoppable)?;
//! Transform::Invert.apply(decoded.pixels_mut());
//! assert!(decoded.pixels().as_bytes().iter().all(|&b| b == 255));
//!
//! let out = encode_bmp(&decoded, Unstoppable)?;
//! assert_eq!(&out[..54], &bytes[..54]);
//! # Ok::<(), bmpfilter::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;
pub mod transform;

mod decode;

#[cfg(feature = "std")]
mod pipeline;

// Re-exports
pub use bmp::{BmpHeader, HEADER_LEN, Image, row_padding};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, PixelBuffer};
pub use transform::Transform;

#[cfg(feature = "std")]
pub use pipeline::{Pipeline, PipelineError, PipelineReport};

use alloc::vec::Vec;

/// Decode a 24-bit BMP without limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode with the image's own header and zero row padding.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode_image(image, &stop)
}

/// Look up `name` in the catalog and apply it to `image` in place.
pub fn apply_transform(image: &mut Image, name: &str) -> Result<Transform, BitmapError> {
    let transform: Transform = name.parse()?;
    transform.apply(image.pixels_mut());
    Ok(transform)
}
