use std::str::FromStr;

use palette::{FromColor, Hsv as PaletteHsv, Srgb};

use crate::error::{Error, Result};
use crate::named;

/// An sRGB color with channels normalized to [0, 1] and an optional alpha.
///
/// Equality compares the RGB triple exactly, with no tolerance. Alpha is
/// ignored.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: Option<f32>,
}

/// Hue, saturation and value, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

/// Exact RGB identity of a color, usable as a map key. Alpha is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorKey([u32; 3]);

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Self {
        Self::new(self.r, self.g, self.b)
    }

    /// Create from an 8-bit `palette::Srgb`.
    pub fn from_srgb_u8(srgb: Srgb<u8>) -> Self {
        let srgb: Srgb<f32> = srgb.into_format();
        Self::new(srgb.red, srgb.green, srgb.blue)
    }

    /// Convert to 8-bit sRGB, clamping out-of-range channels.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        let clamped = Srgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        );
        clamped.into_format()
    }

    /// Parse a hex color like `#ff8800`, `ff8800` or the short form `#f80`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |s: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|_| Error::InvalidArgument(format!("invalid hex color: {hex}")))
        };
        if !digits.is_ascii() {
            return Err(Error::InvalidArgument(format!("invalid hex color: {hex}")));
        }
        let (r, g, b) = match digits.len() {
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                (r * 17, g * 17, b * 17)
            }
            n => {
                return Err(Error::InvalidArgument(format!(
                    "invalid hex color: expected 3 or 6 hex digits, got {n}"
                )))
            }
        };
        Ok(Self::from_srgb_u8(Srgb::new(r, g, b)))
    }

    /// Serialize to lowercase hex `#rrggbb`. Alpha is not included.
    pub fn to_hex(self) -> String {
        let c = self.to_srgb_u8();
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    }

    /// Standard HSV, with hue scaled from degrees into [0, 1).
    pub fn hsv(self) -> Hsv {
        let hsv: PaletteHsv = PaletteHsv::from_color(Srgb::new(self.r, self.g, self.b));
        let mut hue = hsv.hue.into_positive_degrees() / 360.0;
        if hue >= 1.0 {
            hue = 0.0;
        }
        Hsv {
            hue,
            saturation: hsv.saturation,
            value: hsv.value,
        }
    }

    /// True when all three channels are equal, i.e. the hue is undefined.
    pub fn is_grey(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// True when every channel (alpha included) is finite and within [0, 1].
    pub fn is_valid(self) -> bool {
        let in_range = |c: f32| c.is_finite() && (0.0..=1.0).contains(&c);
        in_range(self.r) && in_range(self.g) && in_range(self.b) && self.alpha.map_or(true, in_range)
    }

    pub fn key(self) -> ColorKey {
        // +0.0 folds -0.0 into 0.0 so both map to the same key
        ColorKey([
            (self.r + 0.0).to_bits(),
            (self.g + 0.0).to_bits(),
            (self.b + 0.0).to_bits(),
        ])
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: f32) -> f32 {
            let c = c.clamp(0.0, 1.0);
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#rrggbb`, `#rgb`, or any built-in color name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Color::from_hex(s);
        }
        named::lookup(s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown color: {s}")))
    }
}
