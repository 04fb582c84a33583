use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("The font could not be parsed: {0}")]
    Load(String),
    #[error("The box size must be at least one pixel")]
    InvalidBoxSize,
    #[error("A {0}px box is larger than the {max}px limit", max = crate::rasterizer::MAX_BOX_SIZE)]
    BoxTooLarge(u32),
    #[error("At least one candidate font size is required")]
    NoFontSizes,
    #[error("The font size {0} is not a positive finite number")]
    InvalidFontSize(String),
    #[error("Expected {expected} packed bytes, found {actual}")]
    PackedLength { expected: usize, actual: usize },
    #[error("`{0}` is not a valid C identifier")]
    InvalidSymbol(String),
    #[error("Formatting the header failed")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
