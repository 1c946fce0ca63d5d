use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One input image and the canvas position of its upper-left pixel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
}

impl InputSpec {
    pub fn new(path: impl Into<PathBuf>, x: u32, y: u32) -> Self {
        Self {
            path: path.into(),
            x,
            y,
        }
    }
}

/// Configuration for one blend run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Ordered input list. Order matters: each iteration blends the
    /// accumulated canvas with the next entry.
    pub inputs: Vec<InputSpec>,
    pub output: PathBuf,
    /// Disable the non-overlapping pre-assembly heuristic.
    #[serde(default)]
    pub one_at_a_time: bool,
    /// Optional cap on the pyramid depth.
    #[serde(default)]
    pub max_levels: Option<u32>,
    /// Quality for lossy output formats (JPEG), 1-100.
    #[serde(default)]
    pub jpeg_quality: Option<u8>,
    /// Write every blended pyramid level as
    /// `<prefix>-<iteration>-l<level>.png` for inspection.
    #[serde(default)]
    pub dump_pyramids: Option<PathBuf>,
}
