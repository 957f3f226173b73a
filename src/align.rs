//! Alignment entry points.

use tracing::instrument;

use crate::backtrack::backtrack;
use crate::cost::cumulative;
use crate::error::{AlignError, ConfigError, InputError};
use crate::matrix::PairwiseMatrix;
use crate::metric::Metric;
use crate::path::WarpingPath;
use crate::pattern::{NormalizeGuide, StepPattern};
use crate::result::AlignmentResult;
use crate::series::SeriesView;
use crate::window::{Window, WindowMask};

/// Immutable alignment configuration.
///
/// Each call is a synchronous, single-threaded computation; a `Dtw` value
/// may be shared across threads and reused for any number of alignments.
///
/// # Examples
///
/// ```
/// use logwarp::{Dtw, Series};
///
/// let query = Series::univariate(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let reference = Series::univariate(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let result = Dtw::new().align(query.as_view(), reference.as_view()).unwrap();
/// assert_eq!(result.distance(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Dtw {
    window: Window,
    pattern: StepPattern,
    metric: Metric,
    distance_only: bool,
    open_begin: bool,
    open_end: bool,
}

impl Dtw {
    /// Create a configuration with the defaults of the field: symmetric2
    /// pattern, no window, Euclidean metric, closed ends, full result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: Window::None,
            // the catalog always contains symmetric2
            pattern: StepPattern::named("symmetric2").expect("symmetric2 is built in"),
            metric: Metric::Euclidean,
            distance_only: false,
            open_begin: false,
            open_end: false,
        }
    }

    /// Replace the admissibility window.
    #[must_use]
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Replace the step pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: StepPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Resolve and set a built-in step pattern by name.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::UnknownPattern`] | `name` is not a built-in pattern |
    pub fn with_pattern_named(mut self, name: &str) -> Result<Self, ConfigError> {
        self.pattern = StepPattern::named(name)?;
        Ok(self)
    }

    /// Replace the pointwise metric used by [`align`][Dtw::align].
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Skip path backtracking and retain only distances.
    #[must_use]
    pub fn distance_only(mut self, yes: bool) -> Self {
        self.distance_only = yes;
        self
    }

    /// Allow the alignment to start away from the reference start
    /// (partial alignment). Requires a pattern normalized by 'N'.
    #[must_use]
    pub fn open_begin(mut self, yes: bool) -> Self {
        self.open_begin = yes;
        self
    }

    /// Allow the alignment to end away from the reference end
    /// (partial alignment). Requires a normalizable pattern.
    #[must_use]
    pub fn open_end(mut self, yes: bool) -> Self {
        self.open_end = yes;
        self
    }

    /// Align two series, building the pairwise distance matrix from the
    /// configured metric on admissible cells only.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::Config`] | Open-begin/open-end incompatible with the pattern |
    /// | [`AlignError::Input`] | Feature widths differ, or the metric produced NaN/negative values |
    /// | [`AlignError::Infeasible`] | No admissible path connects the lattice corners |
    #[instrument(skip(self, query, reference), fields(n = query.len(), m = reference.len()))]
    pub fn align(
        &self,
        query: SeriesView<'_>,
        reference: SeriesView<'_>,
    ) -> Result<AlignmentResult, AlignError> {
        self.check_flags()?;
        if query.width() != reference.width() {
            return Err(InputError::FeatureMismatch {
                query: query.width(),
                reference: reference.width(),
            }
            .into());
        }
        let n = query.len();
        let m = reference.len();
        let mask = self.window.generate(n, m);

        let mut x = PairwiseMatrix::filled_inf(n, m);
        for &(i, j) in mask.pairs() {
            let value = self.metric.eval(query.row(i), reference.row(j));
            if value.is_nan() {
                return Err(InputError::NanDistance { row: i, col: j }.into());
            }
            if value < 0.0 {
                return Err(InputError::NegativeDistance {
                    row: i,
                    col: j,
                    value,
                }
                .into());
            }
            x.set(i, j, value);
        }

        self.align_low(&x, mask)
    }

    /// Align from a precomputed pairwise distance matrix.
    ///
    /// # Errors
    ///
    /// Same as [`align`][Dtw::align], minus the metric-related conditions
    /// (the matrix was validated at construction).
    #[instrument(skip(self, matrix), fields(n = matrix.rows(), m = matrix.cols()))]
    pub fn align_matrix(&self, matrix: &PairwiseMatrix) -> Result<AlignmentResult, AlignError> {
        self.check_flags()?;
        let mask = self.window.generate(matrix.rows(), matrix.cols());
        self.align_low(matrix, mask)
    }

    fn check_flags(&self) -> Result<(), ConfigError> {
        if self.open_begin && self.pattern.guide() != NormalizeGuide::N {
            return Err(ConfigError::OpenBeginRequiresQueryNormalization);
        }
        if self.open_end && !self.pattern.is_normalizable() {
            return Err(ConfigError::OpenEndRequiresNormalizable);
        }
        Ok(())
    }

    fn align_low(
        &self,
        x: &PairwiseMatrix,
        mask: WindowMask,
    ) -> Result<AlignmentResult, AlignError> {
        let n = x.rows();
        let m = x.cols();

        let d = cumulative(x, &mask, &self.pattern, self.open_begin);

        let last = d.last_row();
        let (terminal_col, distance) = if self.open_end {
            // arg-min of the raw last row; the lowest column wins ties
            let mut best = (0, f64::INFINITY);
            for (j, &v) in last.iter().enumerate() {
                if v < best.1 {
                    best = (j, v);
                }
            }
            best
        } else {
            (m - 1, last[m - 1])
        };
        if !distance.is_finite() {
            return Err(AlignError::Infeasible {
                query_len: n,
                reference_len: m,
            });
        }
        let normalized_distance = self.pattern.normalize(distance, n, terminal_col);

        let path = if self.distance_only {
            None
        } else {
            let steps = backtrack(&d, x, &mask, &self.pattern, terminal_col, self.open_begin);
            Some(WarpingPath::new(steps))
        };

        let d = if self.open_begin { d.without_first_row() } else { d };

        Ok(AlignmentResult::new(
            d,
            path,
            self.window.clone(),
            self.pattern.clone(),
            distance,
            normalized_distance,
            (n - 1, terminal_col),
        ))
    }
}

impl Default for Dtw {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    fn series(values: Vec<f64>) -> Series {
        Series::univariate(values).expect("valid test series")
    }

    #[test]
    fn identical_series_distance_zero() {
        let x = series(vec![1.0, 2.0, 3.0]);
        let r = Dtw::new().align(x.as_view(), x.as_view()).unwrap();
        assert_eq!(r.distance(), 0.0);
        assert_eq!(r.normalized_distance(), Some(0.0));
    }

    #[test]
    fn hand_computed_symmetric2() {
        // see cost::tests::hand_computed_symmetric2_3x3
        let x = series(vec![1.0, 2.0, 3.0]);
        let y = series(vec![3.0, 2.0, 1.0]);
        let r = Dtw::new().align(x.as_view(), y.as_view()).unwrap();
        assert!((r.distance() - 5.0).abs() < 1e-10);
        assert!((r.normalized_distance().unwrap() - 5.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn align_matches_align_matrix() {
        let x = series(vec![1.0, 3.0, 5.0, 2.0]);
        let y = series(vec![2.0, 4.0, 1.0]);
        let direct = Dtw::new().align(x.as_view(), y.as_view()).unwrap();

        let mut data = Vec::new();
        for i in 0..4 {
            for j in 0..3 {
                data.push((x.row(i)[0] - y.row(j)[0]).abs());
            }
        }
        let matrix = PairwiseMatrix::new(4, 3, data).unwrap();
        let from_matrix = Dtw::new().align_matrix(&matrix).unwrap();

        assert!((direct.distance() - from_matrix.distance()).abs() < 1e-10);
        assert_eq!(direct.path().unwrap(), from_matrix.path().unwrap());
    }

    #[test]
    fn multivariate_alignment() {
        let x = Series::multivariate(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 2).unwrap();
        let y = Series::multivariate(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 2).unwrap();
        let r = Dtw::new().align(x.as_view(), y.as_view()).unwrap();
        assert_eq!(r.distance(), 0.0);
    }

    #[test]
    fn feature_width_mismatch() {
        let x = Series::multivariate(vec![0.0, 0.0], 2).unwrap();
        let y = series(vec![0.0, 1.0]);
        let result = Dtw::new().align(x.as_view(), y.as_view());
        assert!(matches!(
            result,
            Err(AlignError::Input(InputError::FeatureMismatch {
                query: 2,
                reference: 1
            }))
        ));
    }

    #[test]
    fn open_begin_rejects_non_n_pattern() {
        let x = series(vec![1.0, 2.0]);
        let result = Dtw::new().open_begin(true).align(x.as_view(), x.as_view());
        assert!(matches!(
            result,
            Err(AlignError::Config(
                ConfigError::OpenBeginRequiresQueryNormalization
            ))
        ));
    }

    #[test]
    fn open_end_rejects_non_normalizable_pattern() {
        let x = series(vec![1.0, 2.0]);
        let result = Dtw::new()
            .with_pattern_named("symmetric1")
            .unwrap()
            .open_end(true)
            .align(x.as_view(), x.as_view());
        assert!(matches!(
            result,
            Err(AlignError::Config(ConfigError::OpenEndRequiresNormalizable))
        ));
    }

    #[test]
    fn open_end_stops_at_best_column() {
        // reference carries a costly tail the open end skips
        let x = series(vec![1.0, 2.0, 3.0]);
        let y = series(vec![1.0, 2.0, 3.0, 10.0, 20.0]);
        let r = Dtw::new().open_end(true).align(x.as_view(), y.as_view()).unwrap();
        assert_eq!(r.distance(), 0.0);
        assert_eq!(r.terminal(), (2, 2));
        assert_eq!(r.path().unwrap().last().unwrap().reference, 2);
    }

    #[test]
    fn open_begin_and_end_find_embedded_match() {
        let x = series(vec![2.0, 3.0]);
        let y = series(vec![1.0, 2.0, 3.0, 4.0]);
        let r = Dtw::new()
            .with_pattern_named("asymmetric")
            .unwrap()
            .open_begin(true)
            .open_end(true)
            .align(x.as_view(), y.as_view())
            .unwrap();
        assert_eq!(r.distance(), 0.0);
        let got: Vec<(usize, usize)> = r
            .path()
            .unwrap()
            .steps()
            .iter()
            .map(|s| (s.query, s.reference))
            .collect();
        assert_eq!(got, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn zero_band_on_unequal_lengths_is_infeasible() {
        let x = series(vec![0.0; 4]);
        let y = series(vec![0.0; 10]);
        let result = Dtw::new()
            .with_window(Window::SakoeChiba { size: 0 })
            .align(x.as_view(), y.as_view());
        assert!(matches!(
            result,
            Err(AlignError::Infeasible {
                query_len: 4,
                reference_len: 10
            })
        ));
    }

    #[test]
    fn distance_only_skips_path() {
        let x = series(vec![1.0, 2.0, 3.0]);
        let r = Dtw::new()
            .distance_only(true)
            .align(x.as_view(), x.as_view())
            .unwrap();
        assert!(!r.has_path());
        assert_eq!(r.distance(), 0.0);
    }

    #[test]
    fn custom_metric_validation() {
        let x = series(vec![1.0, 2.0]);
        let negative = Dtw::new()
            .with_metric(Metric::custom(|_, _| -1.0))
            .align(x.as_view(), x.as_view());
        assert!(matches!(
            negative,
            Err(AlignError::Input(InputError::NegativeDistance { .. }))
        ));
        let nan = Dtw::new()
            .with_metric(Metric::custom(|_, _| f64::NAN))
            .align(x.as_view(), x.as_view());
        assert!(matches!(
            nan,
            Err(AlignError::Input(InputError::NanDistance { .. }))
        ));
    }

    #[test]
    fn open_begin_trims_cumulative_matrix() {
        let x = series(vec![2.0, 3.0]);
        let y = series(vec![1.0, 2.0, 3.0, 4.0]);
        let r = Dtw::new()
            .with_pattern_named("asymmetric")
            .unwrap()
            .open_begin(true)
            .open_end(true)
            .align(x.as_view(), y.as_view())
            .unwrap();
        assert_eq!(r.cumulative().rows(), 2);
        assert_eq!(r.cumulative().cols(), 4);
    }
}
