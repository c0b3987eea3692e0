use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Interpolation algorithm used when rescaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingAlgorithm {
    #[default]
    NearestNeighbour,
    ApproxBilinear,
    Bilinear,
    CatmullRom,
}

impl ScalingAlgorithm {
    /// All algorithms, fast & low quality first, slow & high quality last
    pub const ORDER: [ScalingAlgorithm; 4] = [
        ScalingAlgorithm::NearestNeighbour,
        ScalingAlgorithm::ApproxBilinear,
        ScalingAlgorithm::Bilinear,
        ScalingAlgorithm::CatmullRom,
    ];

    /// Short name used on the command line
    pub fn flag(&self) -> &'static str {
        match self {
            ScalingAlgorithm::NearestNeighbour => "near",
            ScalingAlgorithm::ApproxBilinear => "approx",
            ScalingAlgorithm::Bilinear => "bilinear",
            ScalingAlgorithm::CatmullRom => "cat",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ScalingAlgorithm::NearestNeighbour => "Nearest Neighbour",
            ScalingAlgorithm::ApproxBilinear => "Approximate Bilinear",
            ScalingAlgorithm::Bilinear => "Bilinear",
            ScalingAlgorithm::CatmullRom => "CatmullRom",
        }
    }

    /// One-line summary of every algorithm in quality order, for help output
    pub fn help_text() -> String {
        let flags: Vec<String> = Self::ORDER
            .iter()
            .map(|a| format!("{} [{}]", a.flag(), a.name()))
            .collect();
        format!(
            "Choose scaling algorithm (fast & low quality to slow but high quality: {})",
            flags.join(", ")
        )
    }
}

impl fmt::Display for ScalingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|a| a.flag() == s)
            .ok_or_else(|| ConfigError::InvalidScalingMethod(s.to_string()))
    }
}

/// The single sizing rule in effect for a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Exact target size, aspect ratio not preserved
    Explicit { width: u32, height: u32 },
    /// Uniform factor applied to both source dimensions
    Factor(f64),
    /// Shrink (never grow past `factor`, never past 1.0) to fit the bounds
    FitToWindow {
        max_width: u32,
        max_height: u32,
        factor: f64,
    },
}

/// Sizing rule plus interpolation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    pub sizing: Sizing,
    pub algorithm: ScalingAlgorithm,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            sizing: Sizing::Factor(1.0),
            algorithm: ScalingAlgorithm::default(),
        }
    }
}

impl ScaleOptions {
    /// Resolve raw `width`/`height`/`factor` values into a sizing rule
    ///
    /// A factor of `0.0` means "unused". Width and height both set select
    /// [`Sizing::Explicit`]; otherwise the factor is used and any lone
    /// width or height is dropped.
    pub fn from_raw(width: u32, height: u32, factor: f64) -> Result<Self, ConfigError> {
        if width == 0 && height == 0 && (factor <= 0.0 || factor.is_nan()) {
            return Err(ConfigError::InvalidDimensions);
        }
        if factor == 0.0 && (width == 0 || height == 0) {
            return Err(ConfigError::InvalidDimensions);
        }
        let sizing = if width != 0 && height != 0 {
            Sizing::Explicit { width, height }
        } else {
            Sizing::Factor(factor)
        };
        Ok(Self {
            sizing,
            algorithm: ScalingAlgorithm::default(),
        })
    }

    /// Sizing for previews, where width and height are window bounds
    ///
    /// With both bounds set the factor restarts at 1.0 and the image is
    /// shrunk to fit; `force` instead takes the bounds as an exact size.
    pub fn window(width: u32, height: u32, factor: f64, force: bool) -> Self {
        let sizing = match (width, height) {
            (0, _) | (_, 0) => Sizing::Factor(factor),
            _ if force => Sizing::Explicit { width, height },
            _ => Sizing::FitToWindow {
                max_width: width,
                max_height: height,
                factor: 1.0,
            },
        };
        Self {
            sizing,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Configuration for a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiConfig {
    /// Rescaling applied before mapping
    pub scale: ScaleOptions,

    /// Rendering
    pub reverse_tone: bool,  // negative image, default false
    pub mirror: bool,        // horizontal flip, default false
    pub colourise: bool,     // true-colour background escapes, default false

    /// Preview cells are one space wide instead of three
    pub preview_single_spacing: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            scale: ScaleOptions::default(),
            reverse_tone: false,
            mirror: false,
            colourise: false,
            preview_single_spacing: false,
        }
    }
}

impl AsciiConfig {
    /// Validates the sizing rule
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = match self.scale.sizing {
            Sizing::Explicit { width, height } => width > 0 && height > 0,
            Sizing::Factor(factor) => factor.is_finite() && factor > 0.0,
            Sizing::FitToWindow { factor, .. } => factor.is_finite() && factor > 0.0,
        };
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidDimensions)
        }
    }
}
