use crate::shared::point::Point3D;

/// A single accepted window before merging, with the recovered 3D
/// position in camera space.
#[derive(Clone, Copy, Debug)]
pub struct RawDetection {
    /// Window top-left row in the raster.
    pub row: usize,
    /// Window top-left column in the raster.
    pub col: usize,
    /// Face position in millimeters, camera space.
    pub position: Point3D,
}

/// A group of raw detections that agree on one physical face.
#[derive(Clone, Copy, Debug)]
pub struct FaceCluster {
    /// Mean position of the clustered detections.
    pub centroid: Point3D,
    /// How many raw detections the cluster absorbed.
    pub count: usize,
}

/// Final per-face output of the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct FaceDetection {
    /// Face position in millimeters, camera space.
    pub position: Point3D,
    /// Reprojected image-plane coordinates for display.
    pub pixel: (f64, f64),
    /// Display radius in pixels.
    pub radius: f64,
    /// Raw detections merged into this face.
    pub count: usize,
}
