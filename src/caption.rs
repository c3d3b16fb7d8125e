//! Draws the roast onto a meme: border, label banner and a bottom-anchored
//! caption block, all outlined so they read on any background.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageReader, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::constants::JPEG_QUALITY;
use crate::error::RoasterError;
use crate::fonts::CaptionFont;
use crate::layout::wrap_text;

/// Outer border and label fill.
pub const ACCENT: Rgb<u8> = Rgb([0xFF, 0x45, 0x00]);
/// Inner border.
pub const DARK_ACCENT: Rgb<u8> = Rgb([0x8B, 0x00, 0x00]);
/// Caption fill.
pub const CAPTION_FILL: Rgb<u8> = Rgb([0xFF, 0xFA, 0xCD]);
/// Outline colour stamped behind all text.
pub const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

/// Number of 1px border rings.
pub const BORDER_RINGS: u32 = 6;
/// Rings drawn in [`ACCENT`] before switching to [`DARK_ACCENT`].
const ACCENT_RINGS: u32 = 3;
/// Outline reach in each axis.
pub const OUTLINE_RADIUS: i32 = 3;
/// Top edge of the label.
pub const LABEL_TOP: i32 = 20;
/// Gap between the last caption line and the bottom edge.
pub const BOTTOM_MARGIN: i32 = 25;
/// Extra spacing added to the caption font size per line.
pub const LINE_GAP: i32 = 10;

const LABEL_SIZE_RATIO: f64 = 0.07;
const BODY_SIZE_RATIO: f64 = 0.05;
const BODY_WIDTH_RATIO: f64 = 0.9;

/// A line of text and where its top-left corner goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    /// Text drawn on this line.
    pub text: String,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

/// Where everything lands for a given image size and text.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    /// Label font size in pixels.
    pub label_size: f32,
    /// Upper-cased label, `None` when blank.
    pub label: Option<PlacedLine>,
    /// Caption font size in pixels.
    pub body_size: f32,
    /// Vertical distance between caption lines.
    pub line_height: i32,
    /// Caption lines, top to bottom.
    pub body: Vec<PlacedLine>,
}

fn font_size(height: u32, ratio: f64) -> f32 {
    ((f64::from(height) * ratio) as u32).max(1) as f32
}

fn centered_x(image_width: u32, text_width: u32) -> i32 {
    (image_width as i32 - text_width as i32).div_euclid(2)
}

/// Computes the placement of the label and the wrapped caption for an
/// image of `width` x `height`.
pub fn layout_caption(
    font: &CaptionFont,
    width: u32,
    height: u32,
    label: &str,
    body: &str,
) -> CaptionLayout {
    let label_size = font_size(height, LABEL_SIZE_RATIO);
    let label_text = label.trim().to_uppercase();
    let label = (!label_text.is_empty()).then(|| PlacedLine {
        x: centered_x(width, font.text_width(label_size, &label_text)),
        y: LABEL_TOP,
        text: label_text,
    });

    let body_size = font_size(height, BODY_SIZE_RATIO);
    let max_width = (f64::from(width) * BODY_WIDTH_RATIO) as u32;
    let lines = wrap_text(body, |line| font.text_width(body_size, line), max_width);
    let line_height = body_size as i32 + LINE_GAP;
    let mut y = height as i32 - lines.len() as i32 * line_height - BOTTOM_MARGIN;
    let mut placed = Vec::with_capacity(lines.len());
    for text in lines {
        let x = centered_x(width, font.text_width(body_size, &text));
        placed.push(PlacedLine { text, x, y });
        y += line_height;
    }

    CaptionLayout {
        label_size,
        label,
        body_size,
        line_height,
        body: placed,
    }
}

/// Stamps `text` in [`OUTLINE`] over the full square of offsets around
/// `(x, y)`, then draws it once in `fill` on top.
pub fn draw_outlined_text(
    image: &mut RgbImage,
    font: &CaptionFont,
    size: f32,
    line: &PlacedLine,
    fill: Rgb<u8>,
) {
    for dx in -OUTLINE_RADIUS..=OUTLINE_RADIUS {
        for dy in -OUTLINE_RADIUS..=OUTLINE_RADIUS {
            font.draw(image, OUTLINE, line.x + dx, line.y + dy, size, &line.text);
        }
    }
    font.draw(image, fill, line.x, line.y, size, &line.text);
}

fn draw_border(image: &mut RgbImage) {
    let (width, height) = image.dimensions();
    for inset in 0..BORDER_RINGS {
        if width <= inset * 2 || height <= inset * 2 {
            break;
        }
        let color = if inset < ACCENT_RINGS {
            ACCENT
        } else {
            DARK_ACCENT
        };
        let rect = Rect::at(inset as i32, inset as i32).of_size(width - inset * 2, height - inset * 2);
        draw_hollow_rect_mut(image, rect, color);
    }
}

/// Adds the border, label and caption to `image` and hands it back.
/// The dimensions never change.
pub fn caption_image(mut image: RgbImage, font: &CaptionFont, label: &str, body: &str) -> RgbImage {
    draw_border(&mut image);
    let (width, height) = image.dimensions();
    let layout = layout_caption(font, width, height, label, body);
    if let Some(label) = &layout.label {
        draw_outlined_text(&mut image, font, layout.label_size, label, ACCENT);
    }
    for line in &layout.body {
        draw_outlined_text(&mut image, font, layout.body_size, line, CAPTION_FILL);
    }
    image
}

/// Encodes an RGB image as JPEG.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut output = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);
    encoder.encode_image(image)?;
    Ok(output)
}

/// Loads the meme at `path`, captions it and returns JPEG bytes.
pub fn render_roast(
    path: &Path,
    font: &CaptionFont,
    label: &str,
    body: &str,
) -> Result<Vec<u8>, RoasterError> {
    let meme = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let captioned = caption_image(meme.to_rgb8(), font, label, body);
    Ok(encode_jpeg(&captioned, JPEG_QUALITY)?)
}

/// Decodes image bytes, for callers holding an in-memory meme.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ImageError> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(image.to_rgb8())
}
