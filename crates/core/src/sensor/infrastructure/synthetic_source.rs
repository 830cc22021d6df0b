use crate::sensor::domain::depth_source::DepthSource;
use crate::shared::constants::{
    DEFAULT_DEPTH_CX, DEFAULT_DEPTH_CY, DEFAULT_DEPTH_FX, DEFAULT_DEPTH_FY, DEPTH_COLS,
    DEPTH_ROWS,
};
use crate::shared::depth_frame::DepthFrame;
use crate::shared::intrinsics::CameraIntrinsics;

/// A circular patch held closer to the camera than the wall.
#[derive(Clone, Copy, Debug)]
pub struct Blob {
    pub center_row: usize,
    pub center_col: usize,
    pub radius_px: usize,
    pub depth_m: f32,
}

/// Synthetic depth source: a flat wall, optionally with one raised blob.
///
/// Stands in for the physical sensor in the CLI and in end-to-end
/// tests; emits a fixed number of identical frames and then ends the
/// stream. `wall_depth_m = 0.0` produces an all-invalid frame.
pub struct SyntheticDepthSource {
    intrinsics: CameraIntrinsics,
    rows: usize,
    cols: usize,
    wall_depth_m: f32,
    blob: Option<Blob>,
    frames_remaining: usize,
}

impl SyntheticDepthSource {
    pub fn new(wall_depth_m: f32, blob: Option<Blob>, frames: usize) -> Self {
        Self {
            intrinsics: CameraIntrinsics::undistorted(
                DEFAULT_DEPTH_FX,
                DEFAULT_DEPTH_FY,
                DEFAULT_DEPTH_CX,
                DEFAULT_DEPTH_CY,
            ),
            rows: DEPTH_ROWS,
            cols: DEPTH_COLS,
            wall_depth_m,
            blob,
            frames_remaining: frames,
        }
    }

    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn render(&self) -> DepthFrame {
        let mut data = vec![self.wall_depth_m; self.rows * self.cols];
        if let Some(blob) = self.blob {
            let r2 = (blob.radius_px * blob.radius_px) as i64;
            for r in 0..self.rows {
                for c in 0..self.cols {
                    let dr = r as i64 - blob.center_row as i64;
                    let dc = c as i64 - blob.center_col as i64;
                    if dr * dr + dc * dc <= r2 {
                        data[r * self.cols + c] = blob.depth_m;
                    }
                }
            }
        }
        DepthFrame::new(data, self.rows, self.cols)
    }
}

impl DepthSource for SyntheticDepthSource {
    fn intrinsics(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    fn next_frame(&mut self) -> Result<Option<DepthFrame>, Box<dyn std::error::Error>> {
        if self.frames_remaining == 0 {
            return Ok(None);
        }
        self.frames_remaining -= 1;
        Ok(Some(self.render()))
    }
}
