//! In-place pixel filters and reflections.
//!
//! Every transform visits the whole [`PixelBuffer`] and leaves its width,
//! height and length unchanged. None of them can fail.

mod color;
mod reflect;

use core::fmt;
use core::str::FromStr;

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// One entry of the transform catalog.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Each channel becomes `255 - channel`.
    Invert,
    /// Each channel becomes the truncated mean of the three.
    Grayscale,
    /// Blue and green take the red value.
    BlackAndWhite,
    /// Classic sepia matrix, rounded and clamped.
    Sepia,
    /// Blue and green zeroed.
    Red,
    /// Red zeroed.
    Green,
    /// Blue and green zeroed (same channels as [`Transform::Red`]).
    Blue,
    /// Green and red saturated.
    Yellow,
    /// Green 165, red 255.
    Tint,
    /// Green and red set to 135.
    ThunderNoir,
    /// Green zeroed, blue halved.
    Moonlight,
    /// Green zeroed, blue halved.
    ColorPop,
    /// Blue zeroed, green halved.
    Sunset,
    /// Red zeroed, green halved.
    Dusk,
    /// Swap rows top to bottom.
    ReflectY,
    /// Swap columns left to right within each row.
    ReflectX,
}

impl Transform {
    pub const ALL: [Transform; 16] = [
        Transform::Invert,
        Transform::Grayscale,
        Transform::BlackAndWhite,
        Transform::Sepia,
        Transform::Red,
        Transform::Green,
        Transform::Blue,
        Transform::Yellow,
        Transform::Tint,
        Transform::ThunderNoir,
        Transform::Moonlight,
        Transform::ColorPop,
        Transform::Sunset,
        Transform::Dusk,
        Transform::ReflectY,
        Transform::ReflectX,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
            Self::BlackAndWhite => "bw",
            Self::Sepia => "sepia",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Tint => "tint",
            Self::ThunderNoir => "thunderNoir",
            Self::Moonlight => "moonlight",
            Self::ColorPop => "colorPop",
            Self::Sunset => "sunset",
            Self::Dusk => "dusk",
            Self::ReflectY => "reflectY",
            Self::ReflectX => "reflectX",
        }
    }

    /// Alternate spellings also accepted by [`FromStr`].
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Grayscale => &["greyscale", "gray", "grey"],
            Self::BlackAndWhite => &["blackAndWhite"],
            Self::ReflectY => &["reflectHorizontalAxis", "flipVertical"],
            Self::ReflectX => &["reflectVerticalAxis", "flipHorizontal"],
            _ => &[],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Invert => "invert every channel",
            Self::Grayscale => "average the three channels",
            Self::BlackAndWhite => "copy red into blue and green",
            Self::Sepia => "warm brown sepia tone",
            Self::Red => "zero blue and green",
            Self::Green => "zero red",
            Self::Blue => "zero blue and green (same as red)",
            Self::Yellow => "saturate green and red",
            Self::Tint => "orange tint (green 165, red 255)",
            Self::ThunderNoir => "set green and red to 135",
            Self::Moonlight => "zero green, halve blue",
            Self::ColorPop => "zero green, halve blue",
            Self::Sunset => "zero blue, halve green",
            Self::Dusk => "zero red, halve green",
            Self::ReflectY => "mirror across the horizontal axis",
            Self::ReflectX => "mirror across the vertical axis",
        }
    }

    /// Whether this transform reorders pixels rather than recoloring them.
    pub fn is_geometric(self) -> bool {
        matches!(self, Self::ReflectX | Self::ReflectY)
    }

    /// Apply in place.
    pub fn apply(self, buf: &mut PixelBuffer) {
        tracing::debug!(
            transform = self.name(),
            width = buf.width(),
            height = buf.height(),
            "applying transform"
        );
        match self {
            Self::Invert => color::invert(buf),
            Self::Grayscale => color::grayscale(buf),
            Self::BlackAndWhite => color::black_and_white(buf),
            Self::Sepia => color::sepia(buf),
            Self::Red => color::red(buf),
            Self::Green => color::green(buf),
            Self::Blue => color::blue(buf),
            Self::Yellow => color::yellow(buf),
            Self::Tint => color::tint(buf),
            Self::ThunderNoir => color::thunder_noir(buf),
            Self::Moonlight => color::moonlight(buf),
            Self::ColorPop => color::color_pop(buf),
            Self::Sunset => color::sunset(buf),
            Self::Dusk => color::dusk(buf),
            Self::ReflectY => reflect::reflect_y(buf),
            Self::ReflectX => reflect::reflect_x(buf),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = BitmapError;

    /// Case-insensitive; `-` and `_` are ignored, so `thunder-noir` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Transform::ALL
            .into_iter()
            .find(|t| {
                normalize(t.name()) == wanted
                    || t.aliases().iter().any(|a| normalize(a) == wanted)
            })
            .ok_or_else(|| BitmapError::UnknownTransform(s.into()))
    }
}

fn normalize(s: &str) -> alloc::string::String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
