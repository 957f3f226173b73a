//! Batch pairwise alignment over a collection of series.

use rayon::prelude::*;
use tracing::instrument;

use crate::align::Dtw;
use crate::error::AlignError;
use crate::series::Series;

/// Raw alignment distances between every ordered pair of a series
/// collection, stored row-major. The full matrix is kept because DTW
/// distance is not symmetric for asymmetric step patterns or partial
/// alignments. The diagonal is zero by definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Return the number of series in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the raw distance from query series `i` to reference series `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Return the distances from query series `i` to every reference.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterate over `(query, reference, distance)` for all ordered pairs
    /// with `query != reference`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |i| {
            (0..self.n)
                .filter(move |&j| j != i)
                .map(move |j| (i, j, self.get(i, j)))
        })
    }
}

impl Dtw {
    /// Compute raw alignment distances for every ordered pair of `series`.
    ///
    /// Alignments run distance-only (no paths are retained) and are
    /// parallelized across pairs with rayon; each pair is still a
    /// single-threaded DP.
    ///
    /// # Errors
    ///
    /// Returns the first [`AlignError`] produced by any pair.
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn pairwise(&self, series: &[Series]) -> Result<DistanceMatrix, AlignError> {
        let n = series.len();
        let calc = self.clone().distance_only(true);

        let data: Vec<f64> = (0..n * n)
            .into_par_iter()
            .map(|flat| {
                let (i, j) = (flat / n, flat % n);
                if i == j {
                    return Ok(0.0);
                }
                calc.align(series[i].as_view(), series[j].as_view())
                    .map(|r| r.distance())
            })
            .collect::<Result<_, AlignError>>()?;

        Ok(DistanceMatrix { n, data })
    }
}
