use crate::sensor::domain::undistortion::{UndistortionMap, UndistortionProvider};
use crate::shared::intrinsics::CameraIntrinsics;

/// Inverts the Brown-Conrady distortion model by fixed-point iteration.
///
/// For each pixel the distorted normalized coordinate is known; the
/// undistorted one is recovered by iterating
/// `x <- (x_d - tangential(x)) / radial(x)` a fixed number of rounds,
/// then mapped back through the pinhole to pixel units.
pub struct PinholeUndistorter {
    iterations: usize,
}

impl PinholeUndistorter {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    fn undistort_normalized(&self, intr: &CameraIntrinsics, xd: f64, yd: f64) -> (f64, f64) {
        let mut x = xd;
        let mut y = yd;
        for _ in 0..self.iterations {
            let r2 = x * x + y * y;
            let radial = 1.0 + intr.k1 * r2 + intr.k2 * r2 * r2 + intr.k3 * r2 * r2 * r2;
            let dx = 2.0 * intr.p1 * x * y + intr.p2 * (r2 + 2.0 * x * x);
            let dy = intr.p1 * (r2 + 2.0 * y * y) + 2.0 * intr.p2 * x * y;
            x = (xd - dx) / radial;
            y = (yd - dy) / radial;
        }
        (x, y)
    }
}

impl Default for PinholeUndistorter {
    fn default() -> Self {
        Self::new(5)
    }
}

impl UndistortionProvider for PinholeUndistorter {
    fn lookup_table(
        &self,
        intrinsics: &CameraIntrinsics,
        rows: usize,
        cols: usize,
    ) -> UndistortionMap {
        let mut coords = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let xd = (c as f64 - intrinsics.cx) / intrinsics.fx;
                let yd = (r as f64 - intrinsics.cy) / intrinsics.fy;
                let (x, y) = self.undistort_normalized(intrinsics, xd, yd);
                coords.push((
                    x * intrinsics.fx + intrinsics.cx,
                    y * intrinsics.fy + intrinsics.cy,
                ));
            }
        }
        UndistortionMap::new(coords, rows, cols)
    }
}
