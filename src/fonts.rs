//! Caption fonts: an outline font picked from a preference list, with a
//! built-in bitmap font as the terminal choice.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info, warn};

/// Width of a bitmap glyph, in cells.
const CELL_WIDTH: u32 = 5;
/// Height of a bitmap glyph, in cells.
const CELL_HEIGHT: u32 = 7;
/// Horizontal advance of a bitmap glyph, in cells (glyph plus one gap).
const CELL_ADVANCE: u32 = CELL_WIDTH + 1;

/// A font that captions can be measured and drawn with.
pub enum CaptionFont {
    /// A TrueType/OpenType font loaded from disk.
    Outline {
        /// Parsed font data.
        font: FontVec,
        /// Where the font was loaded from.
        source: PathBuf,
    },
    /// The built-in 5x7 bitmap font.
    Builtin,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { source, .. } => f
                .debug_struct("Outline")
                .field("source", source)
                .finish_non_exhaustive(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

impl CaptionFont {
    /// Tries each candidate in order and returns the first one that parses,
    /// falling back to [`CaptionFont::Builtin`].
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match Self::from_file(path) {
                Ok(font) => {
                    info!("Using caption font {}", path.display());
                    return font;
                }
                Err(err) => debug!("Skipping font {}: {}", path.display(), err),
            }
        }
        warn!("No caption font could be loaded, using the built-in bitmap font");
        Self::Builtin
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)?;
        Ok(Self::Outline {
            font,
            source: path.to_path_buf(),
        })
    }

    /// True when no outline font was found.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Rendered width of `text` in pixels at pixel size `size`.
    pub fn text_width(&self, size: f32, text: &str) -> u32 {
        match self {
            Self::Outline { font, .. } => {
                let scaled = font.as_scaled(em_scale(font, size));
                let mut width = 0.0f32;
                let mut prev = None;
                for ch in text.chars() {
                    let glyph = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, glyph);
                    }
                    width += scaled.h_advance(glyph);
                    prev = Some(glyph);
                }
                width.max(0.0).ceil() as u32
            }
            Self::Builtin => {
                let count = text.chars().count() as u32;
                if count == 0 {
                    return 0;
                }
                let block = block_size(size);
                (count * CELL_ADVANCE - 1) * block
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`. Pixels outside the
    /// image are dropped.
    pub fn draw(&self, image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            Self::Outline { font, .. } => {
                draw_text_mut(image, color, x, y, em_scale(font, size), font, text);
            }
            Self::Builtin => {
                let block = block_size(size) as i32;
                let mut cursor = x;
                for ch in text.chars() {
                    draw_glyph(image, color, cursor, y, block, glyph_rows(ch));
                    cursor += CELL_ADVANCE as i32 * block;
                }
            }
        }
    }
}

/// Scale at which one em is `size` pixels. `PxScale` itself measures the
/// ascent-to-descent height, which is taller than the em for most fonts.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

/// Side length of one bitmap cell, in pixels, for a given font size.
fn block_size(size: f32) -> u32 {
    ((size / CELL_HEIGHT as f32).round() as u32).max(1)
}

fn draw_glyph(image: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, block: i32, rows: [u8; 7]) {
    let (width, height) = (image.width() as i32, image.height() as i32);
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..CELL_WIDTH {
            if (bits >> (CELL_WIDTH - 1 - col)) & 1 == 0 {
                continue;
            }
            let left = x + col as i32 * block;
            let top = y + row as i32 * block;
            for py in top..top + block {
                for px in left..left + block {
                    if px >= 0 && py >= 0 && px < width && py < height {
                        image.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

/// Row bitmaps for the built-in font, most significant of the low five bits
/// on the left. Lowercase folds to uppercase; anything unknown is `?`.
#[rustfmt::skip]
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '\'' => [0b01100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
