use crate::shared::intrinsics::CameraIntrinsics;

/// Per-pixel lookup table of undistorted pixel coordinates, row-major,
/// parallel to the depth frame. Built once at startup and reused
/// unmodified for every frame.
#[derive(Clone, Debug)]
pub struct UndistortionMap {
    coords: Vec<(f64, f64)>,
    rows: usize,
    cols: usize,
}

impl UndistortionMap {
    pub fn new(coords: Vec<(f64, f64)>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            coords.len(),
            rows * cols,
            "coordinate count must equal rows * cols"
        );
        Self { coords, rows, cols }
    }

    /// Undistorted `(x, y)` pixel coordinate for the pixel at `index`.
    pub fn get(&self, index: usize) -> (f64, f64) {
        self.coords[index]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Builds the per-pixel undistortion lookup table from intrinsics.
pub trait UndistortionProvider {
    fn lookup_table(
        &self,
        intrinsics: &CameraIntrinsics,
        rows: usize,
        cols: usize,
    ) -> UndistortionMap;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_row_major() {
        let coords = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
        let map = UndistortionMap::new(coords, 2, 2);
        assert_eq!(map.get(1), (1.0, 0.0));
        assert_eq!(map.get(2), (0.0, 1.0));
        assert_eq!(map.len(), 4);
    }

    #[test]
    #[should_panic(expected = "coordinate count must equal rows * cols")]
    fn test_mismatched_length_panics() {
        UndistortionMap::new(vec![(0.0, 0.0); 3], 2, 2);
    }
}
