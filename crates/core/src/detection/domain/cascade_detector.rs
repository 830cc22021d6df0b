use crate::detection::domain::classifier::CascadeClassifier;
use crate::detection::domain::detections::RawDetection;
use crate::detection::domain::integral::IntegralTables;
use crate::projection::rotation::RotationFrame;
use crate::shared::constants::DEPTH_PATCH;
use crate::shared::point::Point3D;

/// Scans the elevation raster for face candidates.
///
/// The scan slides the classifier window over every raster position,
/// but a window is only scored when every one of its cells is valid
/// after hole filling; partially covered windows straddle the filled
/// region's edge and would score against background values.
///
/// Accepted windows are lifted back to metric camera space: the window
/// center maps to X/Y through the raster resolution and the elevation
/// of a small center patch averages into Z, then the inverse rotation
/// undoes the scatter orientation.
pub struct FaceCascadeDetector {
    classifier: Box<dyn CascadeClassifier>,
    resolution: f64,
}

impl FaceCascadeDetector {
    pub fn new(classifier: Box<dyn CascadeClassifier>, resolution: f64) -> Self {
        Self {
            classifier,
            resolution,
        }
    }

    pub fn window_size(&self) -> usize {
        self.classifier.window_size()
    }

    pub fn detect(
        &self,
        tables: &IntegralTables,
        rotation: &RotationFrame,
        center: (usize, usize),
    ) -> Vec<RawDetection> {
        let size = self.classifier.window_size();
        let half = size / 2;
        let patch_half = DEPTH_PATCH / 2;
        let full_coverage = (size * size) as u32;
        let (cx, cy) = center;

        let mut detections = Vec::new();
        for i in 0..tables.height().saturating_sub(size) {
            for j in 0..tables.width().saturating_sub(size) {
                if tables.coverage(i, j, size) != full_coverage {
                    continue;
                }
                if !self.classifier.evaluate(tables, (i, j), 1.0) {
                    continue;
                }

                let x = ((j + half) as f64 - cx as f64) / self.resolution;
                let y = (cy as f64 - (i + half) as f64) / self.resolution;
                let z = tables.region_sum(
                    i + half - patch_half,
                    j + half - patch_half,
                    DEPTH_PATCH,
                    DEPTH_PATCH,
                ) / (DEPTH_PATCH * DEPTH_PATCH) as f64
                    / self.resolution;

                detections.push(RawDetection {
                    row: i,
                    col: j,
                    position: rotation.apply_inverse(&Point3D { x, y, z }),
                });
            }
        }
        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;
    use std::sync::{Arc, Mutex};

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

    struct RejectAll {
        size: usize,
        seen: Arc<Mutex<Vec<(usize, usize)>>>,
    }

    impl CascadeClassifier for RejectAll {
        fn window_size(&self) -> usize {
            self.size
        }
        fn evaluate(&self, _: &IntegralTables, origin: (usize, usize), _: f64) -> bool {
            self.seen.lock().unwrap().push(origin);
            false
        }
    }

    /// Background raster with one fully valid elevated square.
    fn square_scene(side: usize, top: usize, size: usize, value: f64) -> IntegralTables {
        let mut raster = Array2::from_elem((side, side), -9000.0);
        let mut mask = Array2::<u8>::zeros((side, side));
        for i in top..top + size {
            for j in top..top + size {
                raster[[i, j]] = value;
                mask[[i, j]] = 1;
            }
        }
        IntegralTables::build(&raster, &mask)
    }

    #[test]
    fn test_single_square_yields_single_detection() {
        let tables = square_scene(100, 40, 21, 500.0);
        let detector = FaceCascadeDetector::new(Box::new(AcceptAll { size: 21 }), 0.1);
        let detections = detector.detect(&tables, &RotationFrame::identity(), (50, 50));

        // only the window exactly over the square has full coverage
        assert_eq!(detections.len(), 1);
        let d = &detections[0];
        assert_eq!((d.row, d.col), (40, 40));
        // window center (50, 50) sits on the raster center
        assert_relative_eq!(d.position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(d.position.y, 0.0, epsilon = 1e-9);
        // uniform patch elevation divided by the resolution
        assert_relative_eq!(d.position.z, 500.0 / 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_partial_coverage_never_reaches_classifier() {
        let tables = square_scene(60, 20, 21, 100.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let detector = FaceCascadeDetector::new(
            Box::new(RejectAll {
                size: 21,
                seen: Arc::clone(&seen),
            }),
            1.0,
        );
        let detections = detector.detect(&tables, &RotationFrame::identity(), (30, 30));
        // rejection filters every window; only the one fully covered
        // window was ever scored
        assert!(detections.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![(20, 20)]);
    }

    #[test]
    fn test_raster_smaller_than_window_yields_nothing() {
        let raster = Array2::from_elem((10, 10), 1.0);
        let mask = Array2::<u8>::ones((10, 10));
        let tables = IntegralTables::build(&raster, &mask);
        let detector = FaceCascadeDetector::new(Box::new(AcceptAll { size: 21 }), 1.0);
        assert!(detector
            .detect(&tables, &RotationFrame::identity(), (5, 5))
            .is_empty());
    }

    #[test]
    fn test_isolated_square_merges_to_one_face() {
        use crate::detection::domain::detection_merger::DetectionMerger;
        use crate::detection::infrastructure::variance_classifier::VarianceWindowClassifier;

        // variance-gated end to end: the uniform elevated square is the
        // only window with full coverage, and its variance is zero
        let tables = square_scene(100, 40, 21, 500.0);
        let classifier = VarianceWindowClassifier::new(21, 1e-6);
        let detector = FaceCascadeDetector::new(Box::new(classifier), 0.1);
        let raw = detector.detect(&tables, &RotationFrame::identity(), (50, 50));
        assert_eq!(raw.len(), 1);
        assert_eq!((raw[0].row, raw[0].col), (40, 40));

        let clusters = DetectionMerger::new(50.0).merge(raw);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 1);
        assert_relative_eq!(clusters[0].centroid.z, 500.0 / 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_rotation_is_applied_to_position() {
        let tables = square_scene(100, 10, 21, 300.0);
        let rot = RotationFrame::from_euler(0.0, 0.0, std::f64::consts::FRAC_PI_2).unwrap();
        let detector = FaceCascadeDetector::new(Box::new(AcceptAll { size: 21 }), 0.1);

        let with_rot = detector.detect(&tables, &rot, (50, 50))[0].position;
        let without = detector.detect(&tables, &RotationFrame::identity(), (50, 50))[0].position;
        let expected = rot.apply_inverse(&without);
        assert_relative_eq!(with_rot.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(with_rot.y, expected.y, epsilon = 1e-9);
        assert_relative_eq!(with_rot.z, expected.z, epsilon = 1e-9);
    }
}
