use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeamlineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Codec {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("out of memory in {component} for {width}x{height} raster")]
    Allocation {
        component: &'static str,
        width: usize,
        height: usize,
    },

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("channel value {max_value} exceeds the pyramid pixel range (max {limit})")]
    PrecisionOverflow { max_value: u32, limit: i64 },

    #[error("empty input list")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, SeamlineError>;
