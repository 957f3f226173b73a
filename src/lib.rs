//! Dynamic time warping alignment for well-log curves.
//!
//! Pure math library — zero I/O. Aligns two ordered sequences of samples
//! (or feature rows) by computing a monotonic warping path that minimizes
//! cumulative pointwise distance, subject to a configurable transition
//! grammar (27 published step patterns plus user-defined tables) and an
//! admissibility window (Sakoe-Chiba band, Itakura parallelogram, or a
//! user predicate). Supports open-begin/open-end partial alignment,
//! distance-only mode, precomputed distance matrices, and parallel batch
//! pairwise distances.

mod align;
mod backtrack;
mod batch;
mod cost;
mod error;
mod matrix;
mod metric;
mod path;
mod pattern;
mod result;
mod series;
mod window;

pub use align::Dtw;
pub use batch::DistanceMatrix;
pub use error::{AlignError, ConfigError, InputError, QueryError};
pub use matrix::{CumulativeMatrix, PairwiseMatrix};
pub use metric::Metric;
pub use path::{WarpingPath, WarpingStep};
pub use pattern::{NormalizeGuide, StepPattern, StepRule, BUILTIN_PATTERNS};
pub use result::{AlignmentResult, WarpTarget};
pub use series::{Series, SeriesView};
pub use window::{Window, WindowMask};
