use crate::args::{CamArgs, ConvertArgs, PreviewArgs};
use crate::error::CliError;
use crate::stream::MjpegFrames;
use asciify::ascii::trim_trailing_spaces;
use asciify::colour::RESET;
use asciify::{AsciiConfig, Rgba16Image, ScaleOptions, ScalingAlgorithm, process_image, process_preview};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

const SUPPORTED_INPUTS: [&str; 3] = ["jpg", "jpeg", "png"];
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const INTERRUPTED_EXIT: i32 = 130;

/// Interrupt state shared by the camera loop and its Ctrl-C handler
#[derive(Debug, Default)]
struct CamState {
    stopped: AtomicBool,
    idle: AtomicBool,
}

impl CamState {
    /// Records an interrupt; true when the loop is waiting on input and must be
    /// terminated by the handler itself
    fn interrupt(&self) -> bool {
        self.stopped.store(true, Ordering::SeqCst);
        self.idle.load(Ordering::SeqCst)
    }

    /// Runs a blocking read with the loop marked idle
    ///
    /// Returns `None` without reading once an interrupt has been recorded.
    fn wait_for<T>(&self, read: impl FnOnce() -> Option<T>) -> Option<T> {
        self.idle.store(true, Ordering::SeqCst);
        let item = if self.stopped.load(Ordering::SeqCst) {
            None
        } else {
            read()
        };
        self.idle.store(false, Ordering::SeqCst);
        item
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Checks that the input exists and is a JPEG or PNG
pub fn check_input(input: Option<&Path>) -> Result<PathBuf, CliError> {
    let path = input.ok_or(CliError::MissingInputFile)?;
    if !path.is_file() {
        return Err(CliError::MissingInputFile);
    }
    match lowercase_extension(path) {
        Some(ext) if SUPPORTED_INPUTS.contains(&ext.as_str()) => Ok(path.to_path_buf()),
        Some(ext) => Err(CliError::UnsupportedInputFormat(ext)),
        None => Err(CliError::UnsupportedInputFormat(path.display().to_string())),
    }
}

/// Refuses to clobber an existing file unless `overwrite` is set
pub fn check_output(output: &Path, overwrite: bool) -> Result<(), CliError> {
    if output.exists() && !overwrite {
        return Err(CliError::OutputFileExists(output.to_path_buf()));
    }
    Ok(())
}

/// PNG for a `.png` name, maximum-quality JPEG for anything else
pub fn save_scaled(path: &Path, scaled: &Rgba16Image) -> Result<(), CliError> {
    if lowercase_extension(path).as_deref() == Some("png") {
        scaled.save_with_format(path, ImageFormat::Png)?;
    } else {
        let rgb = DynamicImage::ImageRgba16(scaled.clone()).to_rgb8();
        let writer = BufWriter::new(File::create(path)?);
        rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, 100))?;
    }
    info!("scaled image saved to {}", path.display());
    Ok(())
}

pub fn convert(args: ConvertArgs) -> Result<(), CliError> {
    let scale =
        ScaleOptions::from_raw(args.width, args.height, args.factor)?.with_algorithm(args.algorithm);
    let input = check_input(args.input.as_deref())?;
    check_output(&args.output, args.overwrite)?;
    if let Some(path) = &args.save_scaled {
        check_output(path, args.overwrite)?;
    }

    let config = AsciiConfig {
        scale,
        reverse_tone: args.negative,
        mirror: args.mirror,
        colourise: args.colour,
        ..Default::default()
    };
    config.validate()?;

    let img = image::open(&input)?;
    debug!("loaded {} ({}x{})", input.display(), img.width(), img.height());

    let conversion = process_image(&img, &config);
    let text = if args.trim && !args.colour {
        trim_trailing_spaces(&conversion.text)
    } else {
        conversion.text
    };

    fs::write(&args.output, &text)?;
    info!(
        "wrote {}x{} characters to {}",
        conversion.scaled.width(),
        conversion.scaled.height(),
        args.output.display()
    );

    if let Some(path) = &args.save_scaled {
        save_scaled(path, &conversion.scaled)?;
    }

    if args.print {
        println!("{text}");
    }
    Ok(())
}

pub fn preview(args: PreviewArgs) -> Result<(), CliError> {
    let input = check_input(args.input.as_deref())?;
    let config = AsciiConfig {
        scale: ScaleOptions::window(args.width, args.height, args.factor, args.force)
            .with_algorithm(args.algorithm),
        preview_single_spacing: args.force,
        ..Default::default()
    };
    config.validate()?;

    let img = image::open(&input)?;
    let conversion = process_preview(&img, &config);
    println!("{}", conversion.text);
    Ok(())
}

fn open_source(source: &str) -> Result<Box<dyn Read>, CliError> {
    if source == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(File::open(source)?))
    }
}

pub fn cam(args: CamArgs) -> Result<(), CliError> {
    let config = AsciiConfig {
        scale: ScaleOptions::from_raw(args.width, args.height, args.factor)?
            .with_algorithm(ScalingAlgorithm::NearestNeighbour),
        reverse_tone: args.negative,
        mirror: !args.no_mirror,
        colourise: args.colour,
        ..Default::default()
    };
    config.validate()?;

    let state = Arc::new(CamState::default());
    let handler_state = state.clone();
    ctrlc::set_handler(move || {
        if handler_state.interrupt() {
            // Blocked on input: the loop cannot observe the flag
            process::exit(INTERRUPTED_EXIT);
        }
    })?;

    let mut frames = MjpegFrames::new(BufReader::new(open_source(&args.source)?));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    let mut shown = 0u64;

    loop {
        let Some(frame) = state.wait_for(|| frames.next()) else {
            break;
        };
        let frame = frame?;
        let img = match image::load_from_memory_with_format(&frame, ImageFormat::Jpeg) {
            Ok(img) => img,
            Err(e) => {
                warn!("skipping undecodable frame: {e}");
                continue;
            }
        };

        let conversion = process_image(&img, &config);
        writeln!(out, "{CLEAR_SCREEN}{}", conversion.text)?;
        out.flush()?;
        shown += 1;
    }

    if args.colour {
        write!(out, "{RESET}")?;
        out.flush()?;
    }

    let elapsed = start.elapsed().as_secs_f64();
    if elapsed > 0.0 {
        info!("{shown} frames in {elapsed:.1}s ({:.1} fps)", shown as f64 / elapsed);
    }
    Ok(())
}
