use crate::{
    error::{Error, Result},
    raster::{BoundingBox, Raster, ink_bounds},
};
use fontdue::{Font, FontSettings};
use image::{
    GrayImage, Luma,
    imageops::{self, FilterType},
};
use log::*;

pub const DEFAULT_BOX_SIZE: u32 = 24;
/// Glyphs are rendered into a scratch buffer twice this size per side
pub const MAX_BOX_SIZE: u32 = 1024;
pub const DEFAULT_FONT_SIZES: [f32; 6] = [48.0, 40.0, 36.0, 32.0, 28.0, 24.0];
/// Pixels brighter than this become ink
pub const INK_THRESHOLD: u8 = 128;

/// Something that can draw a single glyph into an 8-bit coverage canvas.
///
/// The pen starts at the top-left corner of `canvas`: the glyph's ascender line is
/// on row 0 and its origin on column 0. Ink that falls outside the canvas is dropped.
pub trait GlyphRenderer {
    fn render(&self, glyph: char, size: f32, canvas: &mut GrayImage);
}

/// A [`GlyphRenderer`] backed by an outline font
pub struct FontRenderer {
    font: Font,
}

impl FontRenderer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::Load(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn has_glyph(&self, glyph: char) -> bool {
        self.font.lookup_glyph_index(glyph) != 0
    }
}

impl GlyphRenderer for FontRenderer {
    fn render(&self, glyph: char, size: f32, canvas: &mut GrayImage) {
        if !self.has_glyph(glyph) {
            debug!("The font has no glyph for U+{:04X}", glyph as u32);
            return;
        }

        let (metrics, coverage) = self.font.rasterize(glyph, size);
        let ascent = self
            .font
            .horizontal_line_metrics(size)
            .map_or(size, |m| m.ascent)
            .round() as i64;

        // `ymin` is the offset of the bitmap's bottom edge above the baseline
        let left = i64::from(metrics.xmin);
        let top = ascent - i64::from(metrics.ymin) - metrics.height as i64;

        for (row, line) in coverage.chunks(metrics.width.max(1)).enumerate() {
            let y = top + row as i64;
            if y < 0 || y >= i64::from(canvas.height()) {
                continue;
            }
            for (col, &value) in line.iter().enumerate() {
                let x = left + col as i64;
                if x < 0 || x >= i64::from(canvas.width()) {
                    continue;
                }
                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                pixel.0[0] = pixel.0[0].max(value);
            }
        }
    }
}

/// Controls the size search performed by [`rasterize`]
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    box_size: u32,
    font_sizes: Vec<f32>,
    threshold: u8,
}

impl RasterOptions {
    /// The candidate sizes are tried largest first regardless of the order given here
    pub fn new(box_size: u32, font_sizes: &[f32]) -> Result<Self> {
        if box_size == 0 {
            return Err(Error::InvalidBoxSize);
        }
        if box_size > MAX_BOX_SIZE {
            return Err(Error::BoxTooLarge(box_size));
        }
        if font_sizes.is_empty() {
            return Err(Error::NoFontSizes);
        }
        if let Some(bad) = font_sizes.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(Error::InvalidFontSize(bad.to_string()));
        }

        let mut font_sizes = font_sizes.to_vec();
        font_sizes.sort_by(|a, b| b.total_cmp(a));
        font_sizes.dedup();

        Ok(Self {
            box_size,
            font_sizes,
            threshold: INK_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    /// Strictly decreasing
    pub fn font_sizes(&self) -> &[f32] {
        &self.font_sizes
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            font_sizes: DEFAULT_FONT_SIZES.to_vec(),
            threshold: INK_THRESHOLD,
        }
    }
}

/// Renders `glyph` into a `box_size` square binary raster.
///
/// The largest candidate size whose ink is no taller than the box is cropped to its
/// ink and centered (floor division, so odd remainders go to the right and bottom).
/// Width is not checked, a glyph wider than the box is clipped on both sides. If no
/// candidate fits, the smallest one is cropped and scaled to fill the whole box.
/// A glyph without ink produces a blank raster.
pub fn rasterize<R: GlyphRenderer + ?Sized>(
    renderer: &R,
    glyph: char,
    options: &RasterOptions,
) -> Raster {
    let box_size = options.box_size;

    for &size in &options.font_sizes {
        let scratch = render_scratch(renderer, glyph, size, box_size);
        let Some(bounds) = ink_bounds(&scratch) else {
            trace!("No ink at {size}px");
            continue;
        };

        if bounds.height() <= box_size {
            debug!(
                "Using {size}px, glyph is {}x{} in a {box_size}px box",
                bounds.width(),
                bounds.height()
            );
            return centered(&scratch, bounds, box_size, options.threshold);
        }
        trace!(
            "Rejected {size}px, glyph is {}px tall in a {box_size}px box",
            bounds.height()
        );
    }

    let Some(&smallest) = options.font_sizes.last() else {
        return Raster::blank(box_size, box_size);
    };
    warn!("No candidate size fits a {box_size}px box, scaling the {smallest}px glyph to fit");

    let scratch = render_scratch(renderer, glyph, smallest, box_size);
    let mut out = GrayImage::new(box_size, box_size);
    match ink_bounds(&scratch) {
        Some(bounds) => {
            let cropped = crop(&scratch, bounds);
            let scaled = imageops::resize(&cropped, box_size, box_size, FilterType::CatmullRom);
            imageops::replace(&mut out, &scaled, 0, 0);
        }
        None => warn!("U+{:04X} has no ink, the icon will be blank", glyph as u32),
    }
    Raster::binarize(&out, options.threshold)
}

/// Loads `font_bytes` and rasterizes `glyph` with it
pub fn rasterize_font(font_bytes: &[u8], glyph: char, options: &RasterOptions) -> Result<Raster> {
    let renderer = FontRenderer::from_bytes(font_bytes)?;
    Ok(rasterize(&renderer, glyph, options))
}

fn render_scratch<R: GlyphRenderer + ?Sized>(
    renderer: &R,
    glyph: char,
    size: f32,
    box_size: u32,
) -> GrayImage {
    let side = box_size.saturating_mul(2);
    let mut scratch = GrayImage::from_pixel(side, side, Luma([0]));
    renderer.render(glyph, size, &mut scratch);
    scratch
}

fn crop(img: &GrayImage, bounds: BoundingBox) -> GrayImage {
    imageops::crop_imm(img, bounds.x0, bounds.y0, bounds.width(), bounds.height()).to_image()
}

fn centered(scratch: &GrayImage, bounds: BoundingBox, box_size: u32, threshold: u8) -> Raster {
    let glyph = crop(scratch, bounds);
    let x = (i64::from(box_size) - i64::from(bounds.width())).div_euclid(2);
    let y = (i64::from(box_size) - i64::from(bounds.height())).div_euclid(2);

    let mut out = GrayImage::new(box_size, box_size);
    imageops::replace(&mut out, &glyph, x, y);
    Raster::binarize(&out, threshold)
}
