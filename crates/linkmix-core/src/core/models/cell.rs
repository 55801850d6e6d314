use nalgebra::{Matrix3, Vector3};

/// Periodic simulation cell.
///
/// The three repeat vectors are stored as the rows of a 3×3 matrix, the same
/// convention used by the `rvecs` record of checkpoint files. Lengths are in
/// atomic units (bohr).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    rvecs: Matrix3<f64>,
}

impl Cell {
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            rvecs: Matrix3::from_fn(|r, c| rows[r][c]),
        }
    }

    /// Returns repeat vector `index` (0 = a, 1 = b, 2 = c).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn vector(&self, index: usize) -> Vector3<f64> {
        self.rvecs.row(index).transpose()
    }

    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let mut rows = [[0.0; 3]; 3];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.rvecs[(r, c)];
            }
        }
        rows
    }

    /// Reciprocal vectors as rows, such that `gvecs * delta` yields fractional
    /// coordinates of a Cartesian displacement.
    ///
    /// Returns `None` for a singular cell.
    pub fn gvecs(&self) -> Option<Matrix3<f64>> {
        self.rvecs.transpose().try_inverse()
    }

    /// Returns a new cell with repeat vector `index` replaced.
    pub fn with_vector(&self, index: usize, vector: Vector3<f64>) -> Self {
        let mut rvecs = self.rvecs;
        rvecs.set_row(index, &vector.transpose());
        Self { rvecs }
    }

    /// Returns a new cell with each repeat vector multiplied by its repetition count.
    pub fn scaled(&self, reps: [usize; 3]) -> Self {
        let mut rvecs = self.rvecs;
        for (r, &n) in reps.iter().enumerate() {
            let row = rvecs.row(r) * n as f64;
            rvecs.set_row(r, &row);
        }
        Self { rvecs }
    }
}
