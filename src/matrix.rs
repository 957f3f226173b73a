//! Dense matrices: the pairwise distance input and the cumulative DP output.

use crate::error::InputError;

/// Validated pairwise distance matrix between a query of `rows` samples and
/// a reference of `cols` samples. All entries are non-negative; inadmissible
/// cells hold `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PairwiseMatrix {
    /// Create a matrix from row-major data, validating shape and entries.
    ///
    /// `+inf` entries are allowed (they mark inadmissible cells); NaN and
    /// negative entries are rejected.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::EmptyMatrix`] | `rows` or `cols` is zero |
    /// | [`InputError::ShapeMismatch`] | `data.len() != rows * cols` |
    /// | [`InputError::NanDistance`] | Any entry is NaN |
    /// | [`InputError::NegativeDistance`] | Any entry is negative |
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, InputError> {
        if rows == 0 || cols == 0 {
            return Err(InputError::EmptyMatrix);
        }
        if data.len() != rows * cols {
            return Err(InputError::ShapeMismatch {
                rows,
                cols,
                expected: rows * cols,
                got: data.len(),
            });
        }
        for (idx, &v) in data.iter().enumerate() {
            if v.is_nan() {
                return Err(InputError::NanDistance {
                    row: idx / cols,
                    col: idx % cols,
                });
            }
            if v < 0.0 {
                return Err(InputError::NegativeDistance {
                    row: idx / cols,
                    col: idx % cols,
                    value: v,
                });
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix filled with `+inf`, to be populated on admissible
    /// cells only. Entries written later are validated by the caller.
    pub(crate) fn filled_inf(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![f64::INFINITY; rows * cols],
        }
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    /// Return the entry at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Return the number of query samples.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of reference samples.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Cumulative minimal-cost matrix produced by the DP. `get(i, j)` is the
/// optimal cost of reaching cell `(i, j)`; unreachable cells hold `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CumulativeMatrix {
    pub(crate) fn filled_inf(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![f64::INFINITY; rows * cols],
        }
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    /// Drop the leading virtual row added for open-begin alignment.
    pub(crate) fn without_first_row(mut self) -> Self {
        self.data.drain(..self.cols);
        self.rows -= 1;
        self
    }

    /// Return the cumulative cost at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Return the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the last row as a slice.
    #[must_use]
    pub fn last_row(&self) -> &[f64] {
        &self.data[(self.rows - 1) * self.cols..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(
            PairwiseMatrix::new(0, 3, vec![]),
            Err(InputError::EmptyMatrix)
        ));
    }

    #[test]
    fn rejects_shape_mismatch() {
        assert!(matches!(
            PairwiseMatrix::new(2, 2, vec![0.0; 3]),
            Err(InputError::ShapeMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn rejects_negative_entry() {
        let result = PairwiseMatrix::new(2, 2, vec![0.0, 1.0, -0.5, 2.0]);
        assert!(matches!(
            result,
            Err(InputError::NegativeDistance { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn rejects_nan_entry() {
        let result = PairwiseMatrix::new(1, 2, vec![0.0, f64::NAN]);
        assert!(matches!(result, Err(InputError::NanDistance { row: 0, col: 1 })));
    }

    #[test]
    fn accepts_infinite_entries() {
        let m = PairwiseMatrix::new(1, 2, vec![0.0, f64::INFINITY]).unwrap();
        assert_eq!(m.get(0, 1), f64::INFINITY);
    }

    #[test]
    fn row_major_access() {
        let m = PairwiseMatrix::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    fn cumulative_trim_first_row() {
        let mut d = CumulativeMatrix::filled_inf(3, 2);
        d.set(0, 0, 0.0);
        d.set(1, 1, 7.0);
        let trimmed = d.without_first_row();
        assert_eq!(trimmed.rows(), 2);
        assert_eq!(trimmed.get(0, 1), 7.0);
    }

    #[test]
    fn cumulative_last_row() {
        let mut d = CumulativeMatrix::filled_inf(2, 2);
        d.set(1, 0, 3.0);
        d.set(1, 1, 4.0);
        assert_eq!(d.last_row(), &[3.0, 4.0]);
    }
}
