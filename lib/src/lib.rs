//! asciify - image to character-art converter
//!
//! Rescales a decoded image with one of four interpolation algorithms and maps
//! every pixel of the result onto a fixed 29-glyph density ramp, optionally
//! wrapping each glyph in a true-colour terminal escape.
//!
//! # Example
//! ```no_run
//! use asciify::{process_image, AsciiConfig, ScaleOptions};
//!
//! let input = image::open("photo.jpg").unwrap();
//! let config = AsciiConfig {
//!     scale: ScaleOptions::from_raw(120, 40, 0.0).unwrap(),
//!     ..Default::default()
//! };
//! let output = process_image(&input, &config);
//! println!("{}", output.text);
//! ```

use image::{ImageBuffer, Rgba};

pub mod ascii;
pub mod colour;
pub mod config;
pub mod error;
pub mod lut;
pub mod processor;
pub mod scale;

/// RGBA image with 16-bit channels, the working format of the whole pipeline
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

// Re-export main types for convenience
pub use colour::Colour256;
pub use config::{AsciiConfig, ScaleOptions, ScalingAlgorithm, Sizing};
pub use error::{ColourError, ConfigError};
pub use processor::{Conversion, process_image, process_preview};
