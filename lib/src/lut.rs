//! Glyph ramp lookup
//!
//! A single fixed ramp of 29 glyphs ordered by ink density, densest first.

/// Glyphs from densest (index 0) to empty (the trailing space)
pub const GLYPH_RAMP: [char; 29] = [
    'Ñ', '@', '#', 'W', '$', '9', '8', '7', '6', '5', '4', '3', '2', '1', '0', '?', '!', 'a',
    'b', 'c', ';', ':', '+', '=', '-', ',', '.', '_', ' ',
];

/// Number of glyphs in the ramp
pub const RAMP_LEN: usize = GLYPH_RAMP.len();

/// Index of the blank glyph, used for transparent pixels
pub const BLANK_INDEX: usize = RAMP_LEN - 1;

/// Width of the channel-sum band covered by one glyph
///
/// Three channels of 0..=65535 spread over the ramp. Kept as a real value so
/// the band boundaries are not shifted by integer truncation.
pub const CHAR_STEP: f64 = (65535.0 * 3.0) / RAMP_LEN as f64;

/// Ramp index for an opaque pixel's channel sum
///
/// Normal tone maps black to the densest glyph and white to the blank one;
/// `reverse` produces the negative. A full-intensity sum lands exactly on
/// `RAMP_LEN` and is held on the last band.
pub fn tone_index(channel_sum: u32, reverse: bool) -> usize {
    let index = ((channel_sum as f64 / CHAR_STEP).floor() as usize).min(BLANK_INDEX);
    if reverse { BLANK_INDEX - index } else { index }
}

/// Glyph for a premultiplied `[r, g, b, a]` pixel
pub fn glyph_for(channels: [u32; 4], reverse: bool) -> char {
    let [r, g, b, a] = channels;
    if a == 0 {
        return GLYPH_RAMP[BLANK_INDEX];
    }
    GLYPH_RAMP[tone_index(r + g + b, reverse)]
}
