//! Warping path types.

/// A single step in a warping path, matching query index `query` to
/// reference index `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    /// Index in the query series.
    pub query: usize,
    /// Index in the reference series.
    pub reference: usize,
}

/// An ordered sequence of matched index pairs, non-decreasing in both
/// coordinates, with no repeated consecutive nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the first step of the path.
    #[must_use]
    pub fn first(&self) -> Option<&WarpingStep> {
        self.0.first()
    }

    /// Return the last step of the path.
    #[must_use]
    pub fn last(&self) -> Option<&WarpingStep> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
