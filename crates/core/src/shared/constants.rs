/// Physical extent of the orthographic projection raster, in mm.
pub const DEFAULT_EXTENT_MM: f64 = 2800.0;

/// Raster resolution in cells per millimeter (a 165 mm face spans ~21 cells).
pub const DEFAULT_RESOLUTION: f64 = 0.127272727;

/// Classifier window side in raster cells.
pub const DEFAULT_FACE_SIZE: usize = 21;

/// Maximum hole-filling radius in cells, half a face.
pub const DEFAULT_FILL_RADIUS: u8 = 10;

/// Euclidean distance below which raw detections merge, in mm.
pub const DEFAULT_MERGE_DISTANCE_MM: f64 = 50.0;

/// Side of the center patch averaged to recover a window's depth.
pub const DEPTH_PATCH: usize = 11;

/// Fixed display radius of a merged detection, in sensor pixels.
pub const DISPLAY_RADIUS_PX: f64 = 20.0;

/// Depth sensor frame dimensions (Kinect v2 depth stream).
pub const DEPTH_COLS: usize = 512;
pub const DEPTH_ROWS: usize = 424;

/// Factory depth camera calibration, used when the device reports none.
pub const DEFAULT_DEPTH_FX: f64 = 5.8498272251689014e+02;
pub const DEFAULT_DEPTH_FY: f64 = 5.8509835924680374e+02;
pub const DEFAULT_DEPTH_CX: f64 = 3.1252165122981484e+02;
pub const DEFAULT_DEPTH_CY: f64 = 2.3821622578866226e+02;
