use crate::Rgba16Image;
use crate::colour::{Colour256, RESET, premultiply};
use crate::lut::glyph_for;
use rayon::prelude::*;

/// Preview cell padding with the default 1:3 cell aspect correction
const PREVIEW_CELL: &str = "   ";

/// Preview cell padding when the geometry already accounts for cell aspect
const PREVIEW_CELL_SINGLE: &str = " ";

/// Glyph resolved for one source pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelChar {
    pub x: u32,
    pub y: u32,
    pub glyph: char,
}

/// Glyph plus colour resolved for one source pixel
///
/// `colour` is `None` for a fully transparent pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourPixelChar {
    pub pixel: PixelChar,
    pub colour: Option<Colour256>,
}

/// Select the glyph for the pixel at (`x`, `y`)
///
/// Transparent pixels always map to the blank glyph; otherwise the summed,
/// alpha-premultiplied channels pick a band of the ramp. `reverse` selects the
/// negative mapping.
pub fn select_pixel_char(img: &Rgba16Image, x: u32, y: u32, reverse: bool) -> PixelChar {
    let channels = premultiply(img.get_pixel(x, y));
    PixelChar {
        x,
        y,
        glyph: glyph_for(channels, reverse),
    }
}

/// Select glyph and colour for the pixel at (`x`, `y`)
pub fn select_colour_pixel_char(
    img: &Rgba16Image,
    x: u32,
    y: u32,
    reverse: bool,
) -> ColourPixelChar {
    let [r, g, b, a] = premultiply(img.get_pixel(x, y));
    ColourPixelChar {
        pixel: PixelChar {
            x,
            y,
            glyph: glyph_for([r, g, b, a], reverse),
        },
        colour: Colour256::from_channels(r, g, b, a),
    }
}

/// Fill a row-major grid with one cell per pixel
///
/// Every row owns a disjoint slice of the grid and is filled on the rayon
/// pool, so completion order never affects the result. With `mirror` the cell
/// for column `x` is stored at `width - x - 1`.
fn fill_grid<T, F>(img: &Rgba16Image, mirror: bool, select: F) -> Vec<T>
where
    T: Clone + Default + Send,
    F: Fn(u32, u32) -> T + Sync,
{
    let (width, height) = img.dimensions();
    let width = width as usize;
    let mut grid = vec![T::default(); width * height as usize];
    if width == 0 {
        return grid;
    }

    grid.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let column = if mirror { width - x - 1 } else { x };
                row[column] = select(x as u32, y as u32);
            }
        });

    grid
}

/// Split a grid back into rows, keeping empty rows of a zero-width image
fn grid_rows<T>(grid: &[T], width: u32, height: u32) -> Vec<&[T]> {
    if width == 0 {
        return vec![&grid[..0]; height as usize];
    }
    grid.chunks(width as usize).collect()
}

/// Convert an image to plain character art
///
/// Rows are joined with `\n` and kept verbatim, trailing blanks included.
pub fn img_to_ascii(img: &Rgba16Image, reverse: bool, mirror: bool) -> String {
    let grid = fill_grid(img, mirror, |x, y| select_pixel_char(img, x, y, reverse));
    let (width, height) = img.dimensions();

    grid_rows(&grid, width, height)
        .into_iter()
        .map(|row| row.iter().map(|pc| pc.glyph).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert an image to character art on a true-colour background
///
/// Each glyph is preceded by its pixel's background escape; transparent pixels
/// get no escape. Every row ends with a reset, and so does the block.
pub fn img_to_ascii_coloured(img: &Rgba16Image, reverse: bool, mirror: bool) -> String {
    let grid = fill_grid(img, mirror, |x, y| select_colour_pixel_char(img, x, y, reverse));
    let (width, height) = img.dimensions();

    let rows: Vec<String> = grid_rows(&grid, width, height)
        .into_iter()
        .map(|row| {
            let mut line = String::with_capacity(row.len() * 20 + RESET.len());
            for cell in row {
                if let Some(colour) = cell.colour {
                    line.push_str(&colour.true_colour_escape());
                }
                line.push(cell.pixel.glyph);
            }
            line.push_str(RESET);
            line
        })
        .collect();

    let mut text = rows.join("\n");
    text.push_str(RESET);
    text
}

/// Render an image as coloured blocks without glyphs
///
/// Each pixel becomes its background escape followed by three spaces, or by a
/// single space when `single` is set. Cells are separated by resets and every
/// row ends with one.
pub fn img_to_preview(img: &Rgba16Image, single: bool) -> String {
    let grid = fill_grid(img, false, |x, y| Colour256::from_pixel(img.get_pixel(x, y)));
    let (width, height) = img.dimensions();
    let padding = if single { PREVIEW_CELL_SINGLE } else { PREVIEW_CELL };

    grid_rows(&grid, width, height)
        .into_iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|colour| {
                    let escape = colour.map(|c| c.true_colour_escape()).unwrap_or_default();
                    format!("{escape}{padding}")
                })
                .collect();
            format!("{}{RESET}", cells.join(RESET))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing spaces from every row of a plain text block
pub fn trim_trailing_spaces(text: &str) -> String {
    text.split('\n')
        .map(|row| row.trim_end_matches(' '))
        .collect::<Vec<_>>()
        .join("\n")
}
