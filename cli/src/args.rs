use asciify::ScalingAlgorithm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version)]
#[command(about = "Convert images and camera frames to character art", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image to character art and write it to a text file
    Convert(ConvertArgs),

    /// Show an image in the terminal as true-colour blocks
    Preview(PreviewArgs),

    /// Render an MJPEG stream (e.g. piped from a webcam) frame by frame
    ///
    /// Stops at the end of the stream or on Ctrl-C, also while waiting for input.
    Cam(CamArgs),
}

fn parse_algorithm(s: &str) -> Result<ScalingAlgorithm, String> {
    s.parse().map_err(|e: asciify::ConfigError| e.to_string())
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file (JPEG or PNG)
    #[arg(short = 'f', long = "file")]
    pub input: Option<PathBuf>,

    /// The width to resize the image to
    #[arg(short, long, default_value_t = 0)]
    pub width: u32,

    /// The height to resize the image to
    #[arg(short = 'H', long, default_value_t = 0)]
    pub height: u32,

    /// The scaling factor to use instead of width/height
    #[arg(short = 's', long = "scale", default_value_t = 1.0)]
    pub factor: f64,

    /// Scaling algorithm
    #[arg(short = 'm', long = "mode", default_value = "near", value_parser = parse_algorithm)]
    pub algorithm: ScalingAlgorithm,

    /// Output file
    #[arg(short, long, default_value = "output.txt")]
    pub output: PathBuf,

    /// Replace output files if they exist
    #[arg(short = 'r', long)]
    pub overwrite: bool,

    /// Also print the result to stdout
    #[arg(short = 'A', long = "print")]
    pub print: bool,

    /// Make a negative of the output (white <> black)
    #[arg(short = 'n', long)]
    pub negative: bool,

    /// Mirror the output horizontally
    #[arg(short = 'i', long)]
    pub mirror: bool,

    /// Colour every character with the pixel's true colour
    #[arg(short = 'C', long)]
    pub colour: bool,

    /// Save a copy of the scaled image under the given file name
    #[arg(short = 'c', long = "save-scaled")]
    pub save_scaled: Option<PathBuf>,

    /// Strip trailing spaces from every row (plain output only)
    #[arg(long)]
    pub trim: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input file (JPEG or PNG)
    #[arg(short = 'f', long = "file")]
    pub input: Option<PathBuf>,

    /// Max width - shrinks the image (if required) to fit
    #[arg(short, long, default_value_t = 0)]
    pub width: u32,

    /// Max height - shrinks the image (if required) to fit
    #[arg(short = 'H', long, default_value_t = 0)]
    pub height: u32,

    /// The scaling factor, used unless both width and height are set
    #[arg(short = 's', long = "scale", default_value_t = 1.0)]
    pub factor: f64,

    /// Scaling algorithm
    #[arg(short = 'm', long = "mode", default_value = "near", value_parser = parse_algorithm)]
    pub algorithm: ScalingAlgorithm,

    /// Use width and height as the exact size, one space per pixel
    #[arg(short = 'S', long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CamArgs {
    /// MJPEG source file or pipe, `-` for stdin
    #[arg(short = 'd', long = "device", default_value = "-")]
    pub source: String,

    /// Output width in columns
    #[arg(short, long, default_value_t = 0)]
    pub width: u32,

    /// Output height in rows
    #[arg(short = 'H', long, default_value_t = 0)]
    pub height: u32,

    /// The scaling factor to use instead of width/height
    #[arg(short = 's', long = "scale", default_value_t = 1.0)]
    pub factor: f64,

    /// Show a negative image (black <> white)
    #[arg(short = 'n', long)]
    pub negative: bool,

    /// Do not mirror the output
    #[arg(long)]
    pub no_mirror: bool,

    /// Colour every character with the pixel's true colour
    #[arg(short = 'C', long)]
    pub colour: bool,
}
