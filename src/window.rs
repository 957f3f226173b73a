//! Admissibility windows constraining which index pairs may be matched.

use std::fmt;
use std::sync::Arc;

/// Constraint on the warping window. Immutable per-call value object.
///
/// The window intuitively controls how much distortion is allowed when
/// matching a pair of curves: only admissible `(i, j)` cells participate
/// in the DP.
#[derive(Clone, Default)]
pub enum Window {
    /// Every index pair is admissible.
    #[default]
    None,

    /// Sakoe-Chiba band: `(i, j)` is admissible iff `|i - j| <= size`.
    SakoeChiba {
        /// Band half-width.
        size: usize,
    },

    /// Itakura parallelogram, bounding the local warping slope.
    Itakura,

    /// User-supplied predicate, evaluated densely once before DP.
    User(Arc<dyn Fn(usize, usize) -> bool + Send + Sync>),
}

impl Window {
    /// Wrap a user-supplied predicate as a window.
    pub fn user(f: impl Fn(usize, usize) -> bool + Send + Sync + 'static) -> Self {
        Self::User(Arc::new(f))
    }

    /// Materialize the window for a `len_x` by `len_y` lattice.
    ///
    /// Returns the dense admissibility mask together with the admissible
    /// pair list in row-major order, which is the order the DP scans cells.
    #[must_use]
    pub fn generate(&self, len_x: usize, len_y: usize) -> WindowMask {
        let mut cells = vec![false; len_x * len_y];
        let mut pairs = Vec::new();
        for i in 0..len_x {
            for j in 0..len_y {
                if self.admits(i, j, len_x, len_y) {
                    cells[i * len_y + j] = true;
                    pairs.push((i, j));
                }
            }
        }
        WindowMask {
            len_x,
            len_y,
            cells,
            pairs,
        }
    }

    fn admits(&self, i: usize, j: usize, len_x: usize, len_y: usize) -> bool {
        match self {
            Self::None => true,
            Self::SakoeChiba { size } => i.abs_diff(j) <= *size,
            Self::Itakura => {
                let (i, j) = (i as i64, j as i64);
                let (n, m) = (len_x as i64, len_y as i64);
                j < 2 * i + 1 && i <= 2 * j + 1 && i >= n - 2 * (m - j) && j > m - 2 * (n - i)
            }
            Self::User(f) => f(i, j),
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::SakoeChiba { size } => f.debug_struct("SakoeChiba").field("size", size).finish(),
            Self::Itakura => f.write_str("Itakura"),
            Self::User(_) => f.write_str("User"),
        }
    }
}

/// Dense admissibility mask over a `len_x` by `len_y` lattice, plus the
/// admissible pair list in row-major order.
#[derive(Debug, Clone)]
pub struct WindowMask {
    len_x: usize,
    len_y: usize,
    cells: Vec<bool>,
    pairs: Vec<(usize, usize)>,
}

impl WindowMask {
    /// Return true if cell `(i, j)` is admissible.
    #[must_use]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.len_y + j]
    }

    /// Return the admissible pairs in row-major order.
    #[must_use]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Return the query-axis length of the lattice.
    #[must_use]
    pub fn len_x(&self) -> usize {
        self.len_x
    }

    /// Return the reference-axis length of the lattice.
    #[must_use]
    pub fn len_y(&self) -> usize {
        self.len_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_window_admits_everything() {
        let mask = Window::None.generate(3, 4);
        assert_eq!(mask.pairs().len(), 12);
        for i in 0..3 {
            for j in 0..4 {
                assert!(mask.contains(i, j));
            }
        }
    }

    #[test]
    fn sakoe_chiba_band_membership() {
        let mask = Window::SakoeChiba { size: 1 }.generate(5, 5);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(mask.contains(i, j), i.abs_diff(j) <= 1, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn sakoe_chiba_zero_size_is_diagonal() {
        let mask = Window::SakoeChiba { size: 0 }.generate(4, 4);
        assert_eq!(mask.pairs(), &[(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn widening_band_only_adds_cells() {
        let narrow = Window::SakoeChiba { size: 1 }.generate(6, 6);
        let wide = Window::SakoeChiba { size: 3 }.generate(6, 6);
        for i in 0..6 {
            for j in 0..6 {
                if narrow.contains(i, j) {
                    assert!(wide.contains(i, j));
                }
            }
        }
        assert!(wide.pairs().len() > narrow.pairs().len());
    }

    #[test]
    fn itakura_matches_predicate() {
        let (n, m) = (8, 10);
        let mask = Window::Itakura.generate(n, m);
        for i in 0..n {
            for j in 0..m {
                let (ii, jj) = (i as i64, j as i64);
                let (nn, mm) = (n as i64, m as i64);
                let expected = jj < 2 * ii + 1
                    && ii <= 2 * jj + 1
                    && ii >= nn - 2 * (mm - jj)
                    && jj > mm - 2 * (nn - ii);
                assert_eq!(mask.contains(i, j), expected, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn itakura_admits_corners_on_square() {
        let mask = Window::Itakura.generate(6, 6);
        assert!(mask.contains(0, 0));
        assert!(mask.contains(5, 5));
    }

    #[test]
    fn user_window_matches_closure() {
        let mask = Window::user(|i, j| i >= j).generate(4, 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(mask.contains(i, j), i >= j);
            }
        }
    }

    #[test]
    fn pairs_are_row_major() {
        let mask = Window::SakoeChiba { size: 1 }.generate(3, 3);
        let pairs = mask.pairs();
        for w in pairs.windows(2) {
            assert!(w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1));
        }
    }

    #[test]
    fn default_is_no_window() {
        assert!(matches!(Window::default(), Window::None));
    }
}
