use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_EXTENT_MM, DEFAULT_FACE_SIZE, DEFAULT_FILL_RADIUS, DEFAULT_MERGE_DISTANCE_MM,
    DEFAULT_RESOLUTION, DEPTH_PATCH,
};
use crate::shared::error::PipelineError;

/// Tunable parameters of the detection pipeline.
///
/// All fields are optional in the JSON file; missing ones take the
/// defaults below. Angles are radians.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Physical side length of the rasterized volume in millimeters.
    pub extent_mm: f64,
    /// Raster cells per millimeter.
    pub resolution: f64,
    /// Classifier window side in cells.
    pub face_size: usize,
    /// Maximum hole-fill distance in cells.
    pub fill_radius: u8,
    /// Detections closer than this merge into one face.
    pub merge_distance_mm: f64,
    /// Scene orientation applied before scattering (x, y, z radians).
    pub euler_angles: (f64, f64, f64),
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            extent_mm: DEFAULT_EXTENT_MM,
            resolution: DEFAULT_RESOLUTION,
            face_size: DEFAULT_FACE_SIZE,
            fill_radius: DEFAULT_FILL_RADIUS,
            merge_distance_mm: DEFAULT_MERGE_DISTANCE_MM,
            euler_angles: (0.0, 0.0, 0.0),
        }
    }
}

impl DetectionConfig {
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| PipelineError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Cells per side of the square raster, truncated from the
    /// physical extent.
    pub fn raster_side(&self) -> usize {
        (self.extent_mm * self.resolution) as usize
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.extent_mm.is_finite() || self.extent_mm <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "extent_mm must be positive and finite, got {}",
                self.extent_mm
            )));
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        if self.face_size < DEPTH_PATCH {
            return Err(PipelineError::InvalidConfig(format!(
                "face_size must be at least {DEPTH_PATCH} to hold the depth patch, got {}",
                self.face_size
            )));
        }
        if self.raster_side() < self.face_size {
            return Err(PipelineError::WindowTooLarge {
                window: self.face_size,
                side: self.raster_side(),
            });
        }
        if self.fill_radius == 0 {
            return Err(PipelineError::InvalidConfig(
                "fill_radius must be at least 1".to_string(),
            ));
        }
        if !self.merge_distance_mm.is_finite() || self.merge_distance_mm <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "merge_distance_mm must be positive and finite, got {}",
                self.merge_distance_mm
            )));
        }
        let (ax, ay, az) = self.euler_angles;
        if !(ax.is_finite() && ay.is_finite() && az.is_finite()) {
            return Err(PipelineError::InvalidConfig(
                "euler_angles must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
