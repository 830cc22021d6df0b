use std::time::Instant;

use crate::detection::domain::cascade_detector::FaceCascadeDetector;
use crate::detection::domain::classifier::CascadeClassifier;
use crate::detection::domain::detection_merger::DetectionMerger;
use crate::detection::domain::detections::FaceDetection;
use crate::detection::domain::integral::IntegralTables;
use crate::pipeline::config::DetectionConfig;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::projection::camera_model::CameraModel;
use crate::projection::hole_fill::HoleFiller;
use crate::projection::orthographic::OrthographicProjector;
use crate::projection::rotation::RotationFrame;
use crate::sensor::domain::undistortion::UndistortionMap;
use crate::shared::constants::{DEPTH_PATCH, DISPLAY_RADIUS_PX};
use crate::shared::depth_frame::DepthFrame;
use crate::shared::error::PipelineError;
use crate::shared::intrinsics::CameraIntrinsics;

/// Per-frame detection pipeline, wired once at startup.
///
/// A frame flows through five stages: back-projection and orthographic
/// scatter, hole filling, integral table construction, the window
/// scan, and cluster merging. Everything orientation- or
/// geometry-dependent (rotation matrices, undistortion table, raster
/// dimensions) is computed here once and reused for every frame.
pub struct FramePipeline {
    camera: CameraModel,
    rotation: RotationFrame,
    projector: OrthographicProjector,
    filler: HoleFiller,
    detector: FaceCascadeDetector,
    merger: DetectionMerger,
}

impl FramePipeline {
    pub fn new(
        config: &DetectionConfig,
        intrinsics: CameraIntrinsics,
        map: UndistortionMap,
        classifier: Box<dyn CascadeClassifier>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;

        let projector = OrthographicProjector::from_extent(config.extent_mm, config.resolution);
        let window = classifier.window_size();
        if window > projector.width() {
            return Err(PipelineError::WindowTooLarge {
                window,
                side: projector.width(),
            });
        }
        // the window size comes from the classifier, not the config,
        // so the depth-patch bound must be re-checked here
        if window < DEPTH_PATCH {
            return Err(PipelineError::WindowTooSmall {
                window,
                patch: DEPTH_PATCH,
            });
        }

        let (ax, ay, az) = config.euler_angles;
        Ok(Self {
            camera: CameraModel::new(intrinsics, map),
            rotation: RotationFrame::from_euler(ax, ay, az)?,
            projector,
            filler: HoleFiller::new(config.fill_radius),
            detector: FaceCascadeDetector::new(classifier, config.resolution),
            merger: DetectionMerger::new(config.merge_distance_mm),
        })
    }

    pub fn process(&self, frame: &DepthFrame) -> Result<Vec<FaceDetection>, PipelineError> {
        self.process_logged(frame, &mut NullPipelineLogger)
    }

    pub fn process_logged(
        &self,
        frame: &DepthFrame,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<FaceDetection>, PipelineError> {
        let start = Instant::now();
        let projected = self.camera.back_project(frame)?;
        let (mut raster, mut mask) = self.projector.scatter(&projected.points, &self.rotation);
        logger.timing("project", elapsed_ms(start));

        let start = Instant::now();
        self.filler
            .fill(&mut raster, &mut mask, projected.background);
        logger.timing("fill", elapsed_ms(start));

        let start = Instant::now();
        let tables = IntegralTables::build(&raster, &mask);
        logger.timing("integral", elapsed_ms(start));

        let start = Instant::now();
        let raw = self
            .detector
            .detect(&tables, &self.rotation, self.projector.center());
        logger.metric("raw_detections", raw.len() as f64);
        logger.timing("detect", elapsed_ms(start));

        let start = Instant::now();
        let faces = self
            .merger
            .merge(raw)
            .into_iter()
            .map(|cluster| FaceDetection {
                position: cluster.centroid,
                pixel: self.camera.reproject(&cluster.centroid),
                radius: DISPLAY_RADIUS_PX,
                count: cluster.count,
            })
            .collect();
        logger.timing("merge", elapsed_ms(start));

        Ok(faces)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::StdoutPipelineLogger;

    struct AcceptAll {
        size: usize,
    }

    impl CascadeClassifier for AcceptAll {
        fn window_size(&self) -> usize {
            self.size
        }
        fn evaluate(&self, _: &IntegralTables, _: (usize, usize), _: f64) -> bool {
            true
        }
    }

    fn identity_map(rows: usize, cols: usize) -> UndistortionMap {
        let mut coords = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                coords.push((c as f64, r as f64));
            }
        }
        UndistortionMap::new(coords, rows, cols)
    }

    fn small_config() -> DetectionConfig {
        DetectionConfig {
            extent_mm: 400.0,
            resolution: 0.1, // 40-cell raster
            face_size: 21,
            fill_radius: 2,
            merge_distance_mm: 50.0,
            euler_angles: (0.0, 0.0, 0.0),
        }
    }

    fn pipeline(rows: usize, cols: usize) -> FramePipeline {
        // fx = fy = 1000 maps one sensor pixel to one millimeter at 1 m
        let intrinsics =
            CameraIntrinsics::undistorted(1000.0, 1000.0, cols as f64 / 2.0, rows as f64 / 2.0);
        FramePipeline::new(
            &small_config(),
            intrinsics,
            identity_map(rows, cols),
            Box::new(AcceptAll { size: 21 }),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_depth_frame_yields_no_faces() {
        // every pixel collapses to the origin; the lone raster cell can
        // never cover a full classifier window
        let p = pipeline(32, 32);
        let frame = DepthFrame::new(vec![0.0; 32 * 32], 32, 32);
        let faces = p.process(&frame).unwrap();
        assert!(faces.is_empty());
    }

    #[test]
    fn test_flat_wall_produces_detections() {
        // a 1 m wall back-projects to a dense 32x32 mm patch that fully
        // covers many windows; the accept-all classifier turns each
        // covered window into a detection
        let p = pipeline(32, 32);
        let frame = DepthFrame::new(vec![1.0; 32 * 32], 32, 32);
        let faces = p.process(&frame).unwrap();
        assert!(!faces.is_empty());
        for face in &faces {
            assert_eq!(face.radius, DISPLAY_RADIUS_PX);
            assert!(face.count >= 1);
            assert!(face.pixel.0.is_finite());
            assert!(face.pixel.1.is_finite());
        }
    }

    #[test]
    fn test_frame_size_mismatch_propagates() {
        let p = pipeline(32, 32);
        let frame = DepthFrame::new(vec![1.0; 16 * 16], 16, 16);
        assert!(matches!(
            p.process(&frame),
            Err(PipelineError::FrameSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_stage_timings_are_recorded() {
        let p = pipeline(32, 32);
        let frame = DepthFrame::new(vec![1.0; 32 * 32], 32, 32);
        let mut logger = StdoutPipelineLogger::new(10);
        p.process_logged(&frame, &mut logger).unwrap();

        for stage in ["project", "fill", "integral", "detect", "merge"] {
            assert_eq!(logger.timings_for(stage).unwrap().len(), 1, "{stage}");
        }
        assert_eq!(logger.metrics_for("raw_detections").unwrap().len(), 1);
    }

    #[test]
    fn test_oversized_window_is_rejected_at_construction() {
        let config = small_config(); // 40-cell raster
        let intrinsics = CameraIntrinsics::undistorted(1000.0, 1000.0, 16.0, 16.0);
        let result = FramePipeline::new(
            &config,
            intrinsics,
            identity_map(32, 32),
            Box::new(AcceptAll { size: 64 }),
        );
        assert!(matches!(
            result,
            Err(PipelineError::WindowTooLarge { window: 64, side: 40 })
        ));
    }

    #[test]
    fn test_window_smaller_than_depth_patch_is_rejected_at_construction() {
        // a 5-cell window would make the centered depth patch index
        // underflow during the scan, so it must fail up front
        let intrinsics = CameraIntrinsics::undistorted(1000.0, 1000.0, 16.0, 16.0);
        let result = FramePipeline::new(
            &small_config(),
            intrinsics,
            identity_map(32, 32),
            Box::new(AcceptAll { size: 5 }),
        );
        assert!(matches!(
            result,
            Err(PipelineError::WindowTooSmall {
                window: 5,
                patch: 11
            })
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let config = DetectionConfig {
            merge_distance_mm: -1.0,
            ..small_config()
        };
        let intrinsics = CameraIntrinsics::undistorted(1000.0, 1000.0, 16.0, 16.0);
        let result = FramePipeline::new(
            &config,
            intrinsics,
            identity_map(32, 32),
            Box::new(AcceptAll { size: 21 }),
        );
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }
}
