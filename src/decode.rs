use enough::Stop;

use crate::bmp::{self, Image};
use crate::error::BitmapError;
use crate::limits::Limits;

/// Builder for decoding a BMP byte stream.
///
/// ```
/// use bmpfilter::{DecodeRequest, Image, Limits, Unstoppable, encode_bmp};
///
/// let bytes = encode_bmp(&Image::new_24bit(2, 2)?, Unstoppable)?;
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let image = DecodeRequest::new(&bytes).with_limits(&limits).decode(Unstoppable)?;
/// assert_eq!((image.width(), image.height()), (2, 2));
/// # Ok::<(), bmpfilter::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode into an owned [`Image`]. The input is never modified.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BitmapError> {
        self.decode_dyn(&stop)
    }

    pub(crate) fn decode_dyn(self, stop: &dyn Stop) -> Result<Image, BitmapError> {
        let (header, geometry) = bmp::parse_header(self.data)?;
        if let Some(limits) = self.limits {
            limits.check(&geometry)?;
        }
        stop.check()?;
        let pixels = bmp::decode_pixels(self.data, &geometry, stop)?;
        tracing::debug!(
            width = geometry.width,
            rows = geometry.rows,
            top_down = header.is_top_down(),
            padding = geometry.padding,
            "decoded bmp"
        );
        Image::from_parts(header, pixels)
    }
}
