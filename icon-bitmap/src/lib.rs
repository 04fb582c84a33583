//! Turns one glyph of an outline font into a packed 1 bit per pixel icon for small
//! displays, and into a C header that declares it.
//!
//! The pipeline only moves forward: [`rasterizer::rasterize`] produces a [`Raster`],
//! [`pack::pack`] turns it into bytes and [`header::serialize`] into text. Nothing here
//! touches the filesystem or the network.

pub mod draw;
pub mod error;
pub mod fallback;
pub mod header;
pub mod pack;
pub mod raster;
pub mod rasterizer;

pub use error::{Error, Result};
pub use header::HeaderSpec;
pub use pack::PackedBitmap;
pub use raster::Raster;
pub use rasterizer::{FontRenderer, GlyphRenderer, RasterOptions};

/// The output of one run of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub raster: Raster,
    pub packed: Vec<u8>,
    pub header: String,
}

impl Icon {
    pub fn bitmap(&self) -> PackedBitmap<'_> {
        PackedBitmap::new_const(&self.packed, self.raster.width(), self.raster.height())
    }
}

/// Rasterizes `glyph`, packs it and renders the header text
pub fn generate<R: GlyphRenderer + ?Sized>(
    renderer: &R,
    glyph: char,
    options: &RasterOptions,
    spec: &HeaderSpec,
) -> Result<Icon> {
    spec.validate()?;
    let raster = rasterizer::rasterize(renderer, glyph, options);
    let packed = pack::pack(&raster);
    let header = header::serialize(&packed, raster.width(), raster.height(), spec)?;
    Ok(Icon {
        raster,
        packed,
        header,
    })
}

/// Same as [`generate`], loading the renderer from font bytes first
pub fn generate_from_font(
    font_bytes: &[u8],
    glyph: char,
    options: &RasterOptions,
    spec: &HeaderSpec,
) -> Result<Icon> {
    let renderer = FontRenderer::from_bytes(font_bytes)?;
    generate(&renderer, glyph, options, spec)
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{GrayImage, Luma};

    /// Solid 4x4 block in the top left, plus a faint pixel that stretches the ink
    /// bounds to 8x8 but is too dim to survive binarization
    struct QuadrantRenderer;

    impl GlyphRenderer for QuadrantRenderer {
        fn render(&self, _glyph: char, _size: f32, canvas: &mut GrayImage) {
            let mut paint = |x: u32, y: u32, value: u8| {
                if x < canvas.width() && y < canvas.height() {
                    canvas.put_pixel(x, y, Luma([value]));
                }
            };
            for y in 0..4 {
                for x in 0..4 {
                    paint(x, y, 255);
                }
            }
            paint(7, 7, 40);
        }
    }

    #[test]
    fn test_top_left_quadrant() -> Result<()> {
        let options = RasterOptions::new(8, &[16.0, 8.0])?;
        let icon = generate(&QuadrantRenderer, 'x', &options, &HeaderSpec::default())?;

        assert_eq!(
            icon.packed,
            vec![0xF0, 0xF0, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00]
        );
        assert!(icon.header.contains("#define FA_WIFI_ICON_WIDTH 8\n"));
        assert!(icon.header.contains("#define FA_WIFI_ICON_HEIGHT 8\n"));
        assert!(
            icon.header
                .contains("    0xF0, 0xF0, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00,\n")
        );
        assert_eq!(icon.bitmap().to_raster(), icon.raster);
        Ok(())
    }

    #[test]
    fn test_box_sized_binary_output() -> Result<()> {
        for box_size in [1, 7, 20, 24, 33] {
            let options = RasterOptions::new(box_size, &[16.0])?;
            let icon = generate(&QuadrantRenderer, 'x', &options, &HeaderSpec::default())?;
            assert_eq!(icon.raster.width(), box_size);
            assert_eq!(icon.raster.height(), box_size);
            assert_eq!(icon.packed.len(), pack::packed_len(box_size, box_size));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_symbol_fails_before_rendering() {
        let spec = HeaderSpec {
            symbol: "not valid".to_string(),
            ..Default::default()
        };
        assert_eq!(
            generate(&QuadrantRenderer, 'x', &RasterOptions::default(), &spec),
            Err(Error::InvalidSymbol("not valid".to_string()))
        );
    }

    #[test]
    fn test_bad_font_bytes() {
        let result = generate_from_font(
            &[0u8; 64],
            '\u{F1EB}',
            &RasterOptions::default(),
            &HeaderSpec::default(),
        );
        assert!(matches!(result, Err(Error::Load(_))));
    }
}
