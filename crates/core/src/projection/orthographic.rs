use ndarray::Array2;

use crate::projection::rotation::RotationFrame;
use crate::shared::point::Point3D;

/// Scatters a rotated point cloud into a top-down elevation raster.
///
/// Each point lands in one cell; among all points competing for a cell
/// the one nearest the camera (largest projected depth) wins, whatever
/// the scatter order. Cells no point reaches stay at `-inf` with
/// mask 0 and are finalized by the hole filler.
pub struct OrthographicProjector {
    width: usize,
    height: usize,
}

impl OrthographicProjector {
    /// Square raster sized from a physical extent and a cell density.
    pub fn from_extent(extent_mm: f64, resolution: f64) -> Self {
        let side = (extent_mm * resolution) as usize;
        Self {
            width: side,
            height: side,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raster center `(cx, cy)`, the cell the camera axis passes through.
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    pub fn scatter(
        &self,
        points: &[Point3D],
        rotation: &RotationFrame,
    ) -> (Array2<f64>, Array2<u8>) {
        let mut raster = Array2::from_elem((self.height, self.width), f64::NEG_INFINITY);
        let mut mask = Array2::<u8>::zeros((self.height, self.width));
        let m = rotation.matrix();
        let (cx, cy) = self.center();

        for p in points {
            let j = cy as i64 - p.dot_row(&m[1]).round() as i64;
            let k = cx as i64 + p.dot_row(&m[0]).round() as i64;
            if j < 0 || k < 0 || j >= self.height as i64 || k >= self.width as i64 {
                continue;
            }
            let (j, k) = (j as usize, k as usize);
            let depth = p.dot_row(&m[2]);
            if depth > raster[[j, k]] {
                raster[[j, k]] = depth;
                mask[[j, k]] = 1;
            }
        }
        (raster, mask)
    }
}
