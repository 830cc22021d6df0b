use std::path::PathBuf;

use thiserror::Error;

/// Startup and per-frame precondition failures.
///
/// Everything here is fatal to the pipeline: either the configuration
/// is unusable before any frame is processed, or a frame arrived with
/// dimensions the startup-time lookup tables were not built for.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("rotation matrix is singular (|det| = {det:.3e})")]
    SingularRotation { det: f64 },

    #[error(
        "depth frame is {actual_rows}x{actual_cols} but the undistortion \
         table was built for {expected_rows}x{expected_cols}"
    )]
    FrameSizeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("classifier window ({window} cells) does not fit the {side}x{side} raster")]
    WindowTooLarge { window: usize, side: usize },

    #[error("classifier window ({window} cells) is smaller than the {patch}-cell depth patch")]
    WindowTooSmall { window: usize, patch: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
