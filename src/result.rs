//! Immutable alignment result and its path-query interface.

use crate::error::QueryError;
use crate::matrix::CumulativeMatrix;
use crate::path::WarpingPath;
use crate::pattern::StepPattern;
use crate::window::Window;

/// Axis selector for [`AlignmentResult::warping_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpTarget {
    /// Warp the query: for every reference index, the matched query index.
    Query,
    /// Warp the reference: for every query index, the matched reference index.
    Reference,
}

/// Immutable bundle of alignment outputs, produced once per call.
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    cumulative: CumulativeMatrix,
    path: Option<WarpingPath>,
    window: Window,
    pattern: StepPattern,
    distance: f64,
    normalized_distance: Option<f64>,
    terminal: (usize, usize),
}

impl AlignmentResult {
    pub(crate) fn new(
        cumulative: CumulativeMatrix,
        path: Option<WarpingPath>,
        window: Window,
        pattern: StepPattern,
        distance: f64,
        normalized_distance: Option<f64>,
        terminal: (usize, usize),
    ) -> Self {
        Self {
            cumulative,
            path,
            window,
            pattern,
            distance,
            normalized_distance,
            terminal,
        }
    }

    /// Return the raw alignment distance: the cumulative cost at the
    /// terminal cell.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Return the normalized alignment distance, or `None` when the step
    /// pattern is non-normalizable.
    #[must_use]
    pub fn normalized_distance(&self) -> Option<f64> {
        self.normalized_distance
    }

    /// Return the terminal cell `(query, reference)` the alignment ends at.
    /// For closed-end alignment this is the last lattice cell; for open-end
    /// it is the arg-min of the last row.
    #[must_use]
    pub fn terminal(&self) -> (usize, usize) {
        self.terminal
    }

    /// Return true if a warping path was computed.
    #[must_use]
    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// Return the warping path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`QueryError::PathNotComputed`] | The alignment was distance-only |
    pub fn path(&self) -> Result<&WarpingPath, QueryError> {
        self.path.as_ref().ok_or(QueryError::PathNotComputed)
    }

    /// Return the cumulative cost matrix (virtual open-begin row already
    /// removed).
    #[must_use]
    pub fn cumulative(&self) -> &CumulativeMatrix {
        &self.cumulative
    }

    /// Return the window the alignment was computed under.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Return the step pattern the alignment was computed with.
    #[must_use]
    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Map every integer index on the source axis to its matched index on
    /// the target axis by linear interpolation over the discrete path,
    /// truncated to integers. The first entry is pinned to the path's
    /// minimum on the target axis, where interpolation is otherwise
    /// undefined.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`QueryError::PathNotComputed`] | The alignment was distance-only |
    pub fn warping_index(&self, target: WarpTarget) -> Result<Vec<usize>, QueryError> {
        let path = self.path()?;
        let steps = path.steps();
        // xs: source axis the output is indexed by; ys: the warped target axis
        let (xs, ys): (Vec<usize>, Vec<usize>) = match target {
            WarpTarget::Reference => steps.iter().map(|s| (s.query, s.reference)).unzip(),
            WarpTarget::Query => steps.iter().map(|s| (s.reference, s.query)).unzip(),
        };

        let lo = xs[0];
        let hi = xs[xs.len() - 1];
        let mut out = Vec::with_capacity(hi - lo + 1);
        for t in lo..=hi {
            // leftmost path node at or past t; xs is non-decreasing
            let k = xs.partition_point(|&v| v < t);
            let value = if xs[k] == t {
                ys[k] as f64
            } else {
                let (x0, y0) = (xs[k - 1] as f64, ys[k - 1] as f64);
                let (x1, y1) = (xs[k] as f64, ys[k] as f64);
                y0 + (y1 - y0) * (t as f64 - x0) / (x1 - x0)
            };
            out.push(value as usize);
        }
        // interpolation is undefined at the left boundary
        out[0] = ys[0];
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::WarpingStep;

    fn result_with_path(steps: Vec<(usize, usize)>) -> AlignmentResult {
        let steps: Vec<WarpingStep> = steps
            .into_iter()
            .map(|(query, reference)| WarpingStep { query, reference })
            .collect();
        let terminal = (steps[steps.len() - 1].query, steps[steps.len() - 1].reference);
        AlignmentResult::new(
            CumulativeMatrix::filled_inf(1, 1),
            Some(WarpingPath::new(steps)),
            Window::None,
            StepPattern::named("symmetric2").unwrap(),
            0.0,
            Some(0.0),
            terminal,
        )
    }

    #[test]
    fn diagonal_path_maps_identity() {
        let r = result_with_path(vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(r.warping_index(WarpTarget::Reference).unwrap(), vec![0, 1, 2]);
        assert_eq!(r.warping_index(WarpTarget::Query).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn plateau_path_snaps_to_matched_node() {
        // query 0 matches references 0..=2, then the path goes diagonal
        let r = result_with_path(vec![(0, 0), (0, 1), (0, 2), (1, 3), (2, 4)]);
        // one reference index per query index
        assert_eq!(r.warping_index(WarpTarget::Reference).unwrap(), vec![0, 3, 4]);
        // per reference index: exact matches everywhere
        assert_eq!(r.warping_index(WarpTarget::Query).unwrap(), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn interpolates_across_skipped_source_indices() {
        // query jumps 0 -> 2 (a skip move): index 1 is interpolated
        let r = result_with_path(vec![(0, 0), (2, 1), (3, 2)]);
        let idx = r.warping_index(WarpTarget::Reference).unwrap();
        // t=1 interpolates halfway between (0,0) and (2,1), truncating to 0
        assert_eq!(idx, vec![0, 0, 1, 2]);
    }

    #[test]
    fn first_entry_pinned_to_target_minimum() {
        // open-begin style path starting away from reference 0
        let r = result_with_path(vec![(0, 2), (1, 3), (2, 4)]);
        let idx = r.warping_index(WarpTarget::Reference).unwrap();
        assert_eq!(idx[0], 2);
    }

    #[test]
    fn distance_only_result_rejects_path_queries() {
        let r = AlignmentResult::new(
            CumulativeMatrix::filled_inf(1, 1),
            None,
            Window::None,
            StepPattern::named("symmetric2").unwrap(),
            1.0,
            Some(0.5),
            (0, 0),
        );
        assert!(!r.has_path());
        assert!(matches!(r.path(), Err(QueryError::PathNotComputed)));
        assert!(matches!(
            r.warping_index(WarpTarget::Reference),
            Err(QueryError::PathNotComputed)
        ));
    }
}
