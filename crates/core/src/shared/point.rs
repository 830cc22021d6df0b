/// A 3D point in camera space, millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product against one row of a 3×3 matrix.
    pub fn dot_row(&self, row: &[f64; 3]) -> f64 {
        self.x * row[0] + self.y * row[1] + self.z * row[2]
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
