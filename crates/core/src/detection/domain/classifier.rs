use crate::detection::domain::integral::IntegralTables;

/// Decides whether a raster window contains a face.
///
/// Implementations read the precomputed integral tables instead of the
/// raster itself, so a single evaluation is constant time regardless
/// of the window size.
pub trait CascadeClassifier: Send {
    /// Side length in cells of the square window this classifier scores.
    fn window_size(&self) -> usize;

    /// Score the window whose top-left corner is `origin`, returning
    /// `true` to accept it as a face candidate.
    fn evaluate(&self, tables: &IntegralTables, origin: (usize, usize), scale: f64) -> bool;
}
