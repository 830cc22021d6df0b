use crate::shared::error::PipelineError;
use crate::shared::point::Point3D;

/// Determinants this close to zero mean the matrix cannot be inverted.
const DET_EPSILON: f64 = 1e-12;

/// A frame orientation: a 3×3 rotation matrix and its algebraic inverse.
///
/// The inverse is computed by cofactors rather than transposition so
/// the same code path serves matrices supplied directly through
/// [`RotationFrame::from_matrix`], which need not be orthonormal.
/// Computed once per orientation choice and reused across frames.
#[derive(Clone, Debug)]
pub struct RotationFrame {
    matrix: [[f64; 3]; 3],
    inverse: [[f64; 3]; 3],
}

impl RotationFrame {
    /// Combined X/Y/Z rotation from Euler angles in radians.
    pub fn from_euler(ax: f64, ay: f64, az: f64) -> Result<Self, PipelineError> {
        let (sin_x, cos_x) = ax.sin_cos();
        let (sin_y, cos_y) = ay.sin_cos();
        let (sin_z, cos_z) = az.sin_cos();

        Self::from_matrix([
            [
                cos_z * cos_y + sin_z * sin_x * sin_y,
                sin_z * cos_y - cos_z * sin_x * sin_y,
                cos_x * sin_y,
            ],
            [-sin_z * cos_x, cos_z * cos_x, sin_x],
            [
                sin_z * sin_x * cos_y - cos_z * sin_y,
                -cos_z * sin_x * cos_y - sin_z * sin_y,
                cos_x * cos_y,
            ],
        ])
    }

    /// Build from an explicit matrix, failing if it is not invertible.
    pub fn from_matrix(m: [[f64; 3]; 3]) -> Result<Self, PipelineError> {
        let det = m[0][0] * (m[2][2] * m[1][1] - m[2][1] * m[1][2])
            - m[1][0] * (m[2][2] * m[0][1] - m[2][1] * m[0][2])
            + m[2][0] * (m[1][2] * m[0][1] - m[1][1] * m[0][2]);
        if det.abs() < DET_EPSILON {
            return Err(PipelineError::SingularRotation { det });
        }

        let inverse = [
            [
                (m[2][2] * m[1][1] - m[2][1] * m[1][2]) / det,
                -(m[2][2] * m[0][1] - m[2][1] * m[0][2]) / det,
                (m[1][2] * m[0][1] - m[1][1] * m[0][2]) / det,
            ],
            [
                -(m[2][2] * m[1][0] - m[2][0] * m[1][2]) / det,
                (m[2][2] * m[0][0] - m[2][0] * m[0][2]) / det,
                -(m[1][2] * m[0][0] - m[1][0] * m[0][2]) / det,
            ],
            [
                (m[2][1] * m[1][0] - m[2][0] * m[1][1]) / det,
                -(m[2][1] * m[0][0] - m[2][0] * m[0][1]) / det,
                (m[1][1] * m[0][0] - m[1][0] * m[0][1]) / det,
            ],
        ];
        Ok(Self { matrix: m, inverse })
    }

    /// No rotation. Infallible by construction.
    pub fn identity() -> Self {
        Self {
            matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            inverse: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.matrix
    }

    pub fn inverse(&self) -> &[[f64; 3]; 3] {
        &self.inverse
    }

    pub fn apply(&self, p: &Point3D) -> Point3D {
        Point3D {
            x: p.dot_row(&self.matrix[0]),
            y: p.dot_row(&self.matrix[1]),
            z: p.dot_row(&self.matrix[2]),
        }
    }

    pub fn apply_inverse(&self, p: &Point3D) -> Point3D {
        Point3D {
            x: p.dot_row(&self.inverse[0]),
            y: p.dot_row(&self.inverse[1]),
            z: p.dot_row(&self.inverse[2]),
        }
    }
}
