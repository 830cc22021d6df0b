//! Per-frame 3D face candidate detection over depth-sensor data.
//!
//! One depth frame flows through: back-projection into a camera-space
//! point cloud, orthographic scatter into a top-down elevation raster,
//! bounded hole filling, integral-image construction, sliding-window
//! classification, and proximity merging of raw hits into distinct
//! face detections with 3D position.

pub mod detection;
pub mod pipeline;
pub mod projection;
pub mod sensor;
pub mod shared;
