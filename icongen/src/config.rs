use icon_bitmap::{
    HeaderSpec, RasterOptions,
    rasterizer::{DEFAULT_BOX_SIZE, DEFAULT_FONT_SIZES, INK_THRESHOLD},
};
use log::*;
use serde_derive::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    pub codepoint: u32,
    pub box_size: u32,
    pub font_sizes: Vec<f32>,
    pub threshold: u8,
}

impl Default for Icon {
    fn default() -> Self {
        Self {
            codepoint: 0xF1EB,
            box_size: DEFAULT_BOX_SIZE,
            font_sizes: DEFAULT_FONT_SIZES.to_vec(),
            threshold: INK_THRESHOLD,
        }
    }
}

impl Icon {
    pub fn glyph(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }

    pub fn raster_options(&self) -> icon_bitmap::Result<RasterOptions> {
        Ok(RasterOptions::new(self.box_size, &self.font_sizes)?.with_threshold(self.threshold))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Used as is when set, nothing is downloaded or cached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub urls: Vec<String>,
    pub cache_file: String,
    /// Defaults to a directory in the platform's cache location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            path: None,
            urls: vec![
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/webfonts/fa-solid-900.ttf"
                    .to_string(),
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/webfonts/fa-solid-900.ttf"
                    .to_string(),
            ],
            cache_file: "fa-solid-900.ttf".to_string(),
            cache_dir: None,
            timeout_secs: 20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    pub output: PathBuf,
    pub symbol: String,
    pub comments: Vec<String>,
    pub includes: Vec<String>,
    pub placement: String,
}

impl Default for Header {
    fn default() -> Self {
        let spec = HeaderSpec::default();
        Self {
            output: PathBuf::from("include/fa_wifi_icon.h"),
            symbol: spec.symbol,
            comments: spec.comments,
            includes: spec.includes,
            placement: spec.placement,
        }
    }
}

impl Header {
    pub fn spec(&self) -> HeaderSpec {
        HeaderSpec {
            symbol: self.symbol.clone(),
            comments: self.comments.clone(),
            includes: self.includes.clone(),
            placement: self.placement.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub icon: Icon,
    pub font: Font,
    pub header: Header,
}

impl Config {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(Box::new(e));
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(Box::new(e))
            }
        }
    }
}
