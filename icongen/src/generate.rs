use crate::{
    acquire::{self, AcquireError},
    config::Config,
    emit::write_atomic,
};
use icon_bitmap::{FontRenderer, GlyphRenderer, HeaderSpec, Icon, RasterOptions};
use log::*;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// One variant per stage, so the message says where things stopped
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Font acquisition failed: {0}")]
    Acquisition(#[from] AcquireError),
    #[error("Font loading failed: {0}")]
    Load(#[source] icon_bitmap::Error),
    #[error("Header serialization failed: {0}")]
    Serialization(#[source] icon_bitmap::Error),
    #[error("Writing {} failed: {source}", .path.display())]
    Emit { path: PathBuf, source: io::Error },
}

/// The parts of a [`Config`] that have been checked and converted
struct Plan {
    glyph: char,
    options: RasterOptions,
    spec: HeaderSpec,
}

/// Fetches the font, renders the icon and writes the header. Nothing is written
/// unless every earlier stage succeeded.
pub fn run(config: &Config, offline: bool) -> Result<Icon, GenError> {
    // Validate before touching the network
    let plan = check_config(config)?;
    let font_bytes = acquire::fetch_font(&config.font, offline)?;
    let renderer = FontRenderer::from_bytes(&font_bytes).map_err(GenError::Load)?;
    if !renderer.has_glyph(plan.glyph) {
        warn!(
            "The font has no glyph for U+{:04X}, the icon will be blank",
            plan.glyph as u32
        );
    }
    write_icon(&plan, &config.header.output, &renderer)
}

fn write_icon<R: GlyphRenderer + ?Sized>(
    plan: &Plan,
    path: &Path,
    renderer: &R,
) -> Result<Icon, GenError> {
    let icon = icon_bitmap::generate(renderer, plan.glyph, &plan.options, &plan.spec)
        .map_err(GenError::Serialization)?;

    write_atomic(path, icon.header.as_bytes()).map_err(|source| GenError::Emit {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Wrote {}x{} icon to {}",
        icon.raster.width(),
        icon.raster.height(),
        path.display()
    );

    Ok(icon)
}

fn check_config(config: &Config) -> Result<Plan, GenError> {
    let options = config
        .icon
        .raster_options()
        .map_err(|e| GenError::Config(e.to_string()))?;
    let spec = config.header.spec();
    spec.validate().map_err(|e| GenError::Config(e.to_string()))?;
    let glyph = config.icon.glyph().ok_or_else(|| {
        GenError::Config(format!(
            "{:#X} is not a Unicode scalar value",
            config.icon.codepoint
        ))
    })?;
    Ok(Plan {
        glyph,
        options,
        spec,
    })
}
