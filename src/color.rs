use palette::{FromColor, IntoColor, Lab, Srgb};

use crate::error::{Error, Result};

/// An 8-bit sRGB color, the form colors arrive in from extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::InvalidColor(format!("not a hex color: {hex:?}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn to_srgb_f32(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Clamp an `Srgb<f32>` to [0, 1] and quantize.
    fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: quantize(srgb.red),
            g: quantize(srgb.green),
            b: quantize(srgb.blue),
        }
    }

    /// Convert to CIELAB (D65), the space CIEDE2000 is defined in.
    pub fn to_lab(self) -> Lab {
        self.to_srgb_f32().into_color()
    }

    /// Convert to HSL with hue in degrees.
    pub fn to_hsl(self) -> Hsl {
        let hsl = palette::Hsl::from_color(self.to_srgb_f32());
        Hsl::new(
            hsl.hue.into_positive_degrees(),
            hsl.saturation,
            hsl.lightness,
        )
    }

    /// Create from HSL, clamping out-of-gamut channels.
    pub fn from_hsl(hsl: Hsl) -> Self {
        let srgb = Srgb::from_color(palette::Hsl::new(
            hsl.hue,
            hsl.saturation,
            hsl.lightness,
        ));
        Self::from_srgb_f32_clamped(srgb)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color in HSL: hue in `[0, 360)` degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees.
    pub hue: f32,
    /// Saturation, 0 for gray.
    pub saturation: f32,
    /// Lightness, 0 for black and 1 for white.
    pub lightness: f32,
}

impl Hsl {
    /// The hue is normalized into `[0, 360)`.
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        Self {
            hue: if hue >= 360.0 { 0.0 } else { hue },
            saturation,
            lightness,
        }
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsl()
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        Rgb::from_hsl(hsl)
    }
}
