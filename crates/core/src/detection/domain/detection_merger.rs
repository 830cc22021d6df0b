use crate::detection::domain::detections::{FaceCluster, RawDetection};
use crate::shared::point::Point3D;

/// Groups raw detections that refer to the same physical face.
///
/// Clustering is seeded: the first remaining detection becomes the
/// seed and absorbs every other detection strictly closer to it than
/// the threshold. Membership is judged against the seed alone, so two
/// detections farther apart than the threshold never share a cluster
/// through an intermediate one.
pub struct DetectionMerger {
    threshold_mm: f64,
}

impl DetectionMerger {
    pub fn new(threshold_mm: f64) -> Self {
        Self { threshold_mm }
    }

    pub fn merge(&self, detections: Vec<RawDetection>) -> Vec<FaceCluster> {
        let mut remaining = detections;
        let mut clusters = Vec::new();

        while !remaining.is_empty() {
            let seed = remaining.remove(0);
            let mut sum = seed.position;
            let mut count = 1usize;

            remaining.retain(|d| {
                if d.position.distance(&seed.position) < self.threshold_mm {
                    sum.x += d.position.x;
                    sum.y += d.position.y;
                    sum.z += d.position.z;
                    count += 1;
                    false
                } else {
                    true
                }
            });

            clusters.push(FaceCluster {
                centroid: Point3D {
                    x: sum.x / count as f64,
                    y: sum.y / count as f64,
                    z: sum.z / count as f64,
                },
                count,
            });
        }
        clusters
    }
}
