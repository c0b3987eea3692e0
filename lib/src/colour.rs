//! Terminal true-colour codec
//!
//! Maps 16-bit RGBA pixels onto 8-bit [`Colour256`] triples and renders those as
//! ANSI true-colour escapes or hex notation.

use crate::error::ColourError;
use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Escape sequence that turns colour output back off
pub const RESET: &str = "\x1b[0m";

/// An RGB colour with 8 bits per channel, no alpha
///
/// Transparency is expressed as `Option<Colour256>::None`, never as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour256 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Premultiply the colour channels of a straight-alpha pixel
///
/// Returns `[r, g, b, a]` with each colour channel scaled by `a / 65535`, the
/// form in which both the glyph mapper and the colour codec read pixels.
pub fn premultiply(pixel: &Rgba<u16>) -> [u32; 4] {
    let [r, g, b, a] = pixel.0.map(u32::from);
    [r * a / 0xFFFF, g * a / 0xFFFF, b * a / 0xFFFF, a]
}

impl Colour256 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from 16-bit channel values
    ///
    /// Returns `None` for a fully transparent pixel. Channels are reduced to
    /// 8 bits by truncating division by 256, so 65535 maps to 255 and 255 to 0.
    pub fn from_channels(r: u32, g: u32, b: u32, a: u32) -> Option<Self> {
        if a == 0 {
            return None;
        }
        Some(Self {
            r: (r / 256) as u8,
            g: (g / 256) as u8,
            b: (b / 256) as u8,
        })
    }

    /// Colour of a straight-alpha 16-bit pixel (premultiplied first)
    pub fn from_pixel(pixel: &Rgba<u16>) -> Option<Self> {
        let [r, g, b, a] = premultiply(pixel);
        Self::from_channels(r, g, b, a)
    }

    /// Parse `rrggbb` hex notation, with an optional `0x` or `#` prefix
    ///
    /// Up to 32 bits are accepted; red is taken from bits 16-23, green from
    /// bits 8-15 and blue from bits 0-7. Only hex digits may follow the
    /// prefix: no sign, no surrounding whitespace.
    pub fn from_hex(hex: &str) -> Result<Self, ColourError> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .or_else(|| hex.strip_prefix('#'))
            .unwrap_or(hex);
        if digits.is_empty() {
            return Err(ColourError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColourError::InvalidDigits(hex.to_string()));
        }
        let val = u32::from_str_radix(digits, 16).map_err(|source| ColourError::InvalidHex {
            input: hex.to_string(),
            source,
        })?;
        Ok(Self {
            r: (val >> 16) as u8,
            g: ((val >> 8) & 0xFF) as u8,
            b: (val & 0xFF) as u8,
        })
    }

    /// True-colour background escape for this colour
    pub fn true_colour_escape(&self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// `0xrrggbb`, lower case
    pub fn hex(&self) -> String {
        format!("0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Packed `0xRRGGBB` value
    pub fn to_u32(&self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl FromStr for Colour256 {
    type Err = ColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
