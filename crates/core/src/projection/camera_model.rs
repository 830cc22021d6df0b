use crate::sensor::domain::undistortion::UndistortionMap;
use crate::shared::depth_frame::DepthFrame;
use crate::shared::error::PipelineError;
use crate::shared::intrinsics::CameraIntrinsics;
use crate::shared::point::Point3D;

/// A frame's back-projected point cloud plus its background elevation.
///
/// `points` is index-parallel to the source frame. `background` is the
/// minimum z seen across the frame and later stands in for raster
/// cells no point ever reached.
pub struct BackProjection {
    pub points: Vec<Point3D>,
    pub background: f64,
}

/// Back-projects depth pixels into camera-space 3D points.
///
/// Depth is converted to millimeters with the z axis pointing from the
/// scene toward the camera (z is negative in front of the sensor).
/// Zero-depth pixels still produce a degenerate point at the origin
/// and participate in the background minimum.
pub struct CameraModel {
    intrinsics: CameraIntrinsics,
    map: UndistortionMap,
}

impl CameraModel {
    pub fn new(intrinsics: CameraIntrinsics, map: UndistortionMap) -> Self {
        Self { intrinsics, map }
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn back_project(&self, frame: &DepthFrame) -> Result<BackProjection, PipelineError> {
        if frame.rows() != self.map.rows() || frame.cols() != self.map.cols() {
            return Err(PipelineError::FrameSizeMismatch {
                expected_rows: self.map.rows(),
                expected_cols: self.map.cols(),
                actual_rows: frame.rows(),
                actual_cols: frame.cols(),
            });
        }

        let intr = &self.intrinsics;
        let mut points = Vec::with_capacity(frame.len());
        let mut background = f64::MAX;
        for (i, &depth) in frame.data().iter().enumerate() {
            let (x, y) = self.map.get(i);
            let z = -(depth as f64) * 1000.0;
            points.push(Point3D {
                x: -(x - intr.cx) * z / intr.fx,
                y: (y - intr.cy) * z / intr.fy,
                z,
            });
            if z < background {
                background = z;
            }
        }
        Ok(BackProjection { points, background })
    }

    /// Reproject a camera-space point back onto the sensor image plane.
    pub fn reproject(&self, p: &Point3D) -> (f64, f64) {
        let intr = &self.intrinsics;
        (
            -(intr.fx * p.x) / p.z + intr.cx,
            (intr.fy * p.y) / p.z - intr.cy,
        )
    }
}
