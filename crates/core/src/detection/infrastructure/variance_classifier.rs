use crate::detection::domain::classifier::CascadeClassifier;
use crate::detection::domain::integral::IntegralTables;

/// Accepts windows whose elevation variance stays under a ceiling.
///
/// A face candidate seen top-down is a compact, roughly level patch of
/// elevation; windows mixing foreground and background show a much
/// larger spread. Variance comes from the sum and squared-sum tables
/// in constant time per window.
pub struct VarianceWindowClassifier {
    window_size: usize,
    max_variance: f64,
}

impl VarianceWindowClassifier {
    pub fn new(window_size: usize, max_variance: f64) -> Self {
        Self {
            window_size,
            max_variance,
        }
    }
}

impl CascadeClassifier for VarianceWindowClassifier {
    fn window_size(&self) -> usize {
        self.window_size
    }

    fn evaluate(&self, tables: &IntegralTables, origin: (usize, usize), _scale: f64) -> bool {
        let (row, col) = origin;
        let n = (self.window_size * self.window_size) as f64;
        let mean = tables.region_sum(row, col, self.window_size, self.window_size) / n;
        let mean_sq = tables.region_sq_sum(row, col, self.window_size, self.window_size) / n;
        mean_sq - mean * mean <= self.max_variance
    }
}
