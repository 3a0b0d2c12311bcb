//! RGBA colors and their shortest textual fill representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit-per-channel RGBA color. Equality is exact, channel-wise.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Named colors that are strictly shorter than any hex spelling of the
/// same value. Only exact opaque matches are replaced.
///
/// https://developer.mozilla.org/docs/Web/CSS/named-color
const SHORT_NAMED_COLORS: &[(Color, &str)] = &[
    (Color::opaque(0xff, 0x00, 0x00), "red"),
    (Color::opaque(0xd2, 0xb4, 0x8c), "tan"),
    (Color::opaque(0x00, 0x00, 0x80), "navy"),
    (Color::opaque(0x00, 0x80, 0x80), "teal"),
    (Color::opaque(0xff, 0xd7, 0x00), "gold"),
    (Color::opaque(0xcd, 0x85, 0x3f), "peru"),
    (Color::opaque(0xdd, 0xa0, 0xdd), "plum"),
    (Color::opaque(0xff, 0xfa, 0xfa), "snow"),
    (Color::opaque(0xff, 0xc0, 0xcb), "pink"),
    (Color::opaque(0x80, 0x80, 0x80), "gray"),
    (Color::opaque(0xf0, 0xff, 0xff), "azure"),
    (Color::opaque(0xf5, 0xf5, 0xdc), "beige"),
    (Color::opaque(0xa5, 0x2a, 0x2a), "brown"),
    (Color::opaque(0xff, 0x7f, 0x50), "coral"),
    (Color::opaque(0x00, 0x80, 0x00), "green"),
    (Color::opaque(0xff, 0xff, 0xf0), "ivory"),
    (Color::opaque(0xf0, 0xe6, 0x8c), "khaki"),
    (Color::opaque(0xfa, 0xf0, 0xe6), "linen"),
    (Color::opaque(0x80, 0x80, 0x00), "olive"),
    (Color::opaque(0xf5, 0xde, 0xb3), "wheat"),
    (Color::opaque(0xff, 0xe4, 0xc4), "bisque"),
    (Color::opaque(0x4b, 0x00, 0x82), "indigo"),
    (Color::opaque(0x80, 0x00, 0x00), "maroon"),
    (Color::opaque(0xff, 0xa5, 0x00), "orange"),
    (Color::opaque(0xda, 0x70, 0xd6), "orchid"),
    (Color::opaque(0x80, 0x00, 0x80), "purple"),
    (Color::opaque(0xfa, 0x80, 0x72), "salmon"),
    (Color::opaque(0xa0, 0x52, 0x2d), "sienna"),
    (Color::opaque(0xc0, 0xc0, 0xc0), "silver"),
    (Color::opaque(0xff, 0x63, 0x47), "tomato"),
    (Color::opaque(0xee, 0x82, 0xee), "violet"),
];

impl Color {
    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Returns true if the alpha channel is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }

    /// Returns the channels as an `[r, g, b, a]` array.
    #[inline]
    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a color from a raw channel slice.
    ///
    /// Returns `None` unless the slice holds exactly four channels.
    pub fn from_channels(channels: &[u8]) -> Option<Self> {
        match *channels {
            [r, g, b, a] => Some(Self::new(r, g, b, a)),
            _ => None,
        }
    }

    /// Returns the named color for this value, if one is shorter than hex.
    pub fn short_name(&self) -> Option<&'static str> {
        SHORT_NAMED_COLORS
            .iter()
            .find(|(color, _)| color == self)
            .map(|(_, name)| *name)
    }

    /// Formats the color as the shortest hexadecimal notation.
    ///
    /// The alpha channel is omitted when fully opaque, and `#rrggbb[aa]`
    /// collapses to `#rgb[a]` when every written channel repeats its digit.
    ///
    /// https://developer.mozilla.org/docs/Web/CSS/hex-color
    pub fn to_hex(&self) -> String {
        let channels: &[u8] = if self.is_opaque() {
            &[self.r, self.g, self.b]
        } else {
            &[self.r, self.g, self.b, self.a]
        };

        let collapsible = channels.iter().all(|c| c >> 4 == c & 0x0f);
        let mut hex = String::with_capacity(1 + channels.len() * 2);
        hex.push('#');
        for channel in channels {
            if collapsible {
                hex.push_str(&format!("{:x}", channel & 0x0f));
            } else {
                hex.push_str(&format!("{:02x}", channel));
            }
        }
        hex
    }

    /// Returns the shortest valid fill value for this color.
    pub fn fill(&self) -> String {
        match self.short_name() {
            Some(name) => name.to_string(),
            None => self.to_hex(),
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color({}, {}, {}, {})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}
