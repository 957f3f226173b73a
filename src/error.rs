//! Error types for alignment configuration, input validation, and queries.

/// Errors from invalid alignment configuration. Raised before any DP work.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a step pattern name is not in the built-in catalog.
    #[error("unknown step pattern '{name}'")]
    UnknownPattern {
        /// The unrecognized pattern name.
        name: String,
    },

    /// Returned when a normalization guide string is not one of the four valid values.
    #[error("normalize guide must be one of 'N', 'M', 'N+M', 'none', got '{guide}'")]
    InvalidNormalizeGuide {
        /// The invalid guide string.
        guide: String,
    },

    /// Returned when a metric name is not recognized.
    #[error("unknown metric '{name}'")]
    UnknownMetric {
        /// The unrecognized metric name.
        name: String,
    },

    /// Returned when a custom pattern contains no rules.
    #[error("step pattern must contain at least one rule")]
    EmptyPattern,

    /// Returned when a rule chain has fewer than two offsets.
    #[error("step rule must contain at least a predecessor offset and the terminal (0, 0)")]
    RuleTooShort,

    /// Returned when a rule chain does not end at the (0, 0) offset.
    #[error("step rule must terminate at (0, 0), got ({di}, {dj})")]
    RuleNotTerminated {
        /// Query offset of the last chain node.
        di: i32,
        /// Reference offset of the last chain node.
        dj: i32,
    },

    /// Returned when a rule offset is positive in either axis, which would
    /// break the row-major evaluation order of the DP.
    #[error("step rule offsets must be non-positive, got ({di}, {dj})")]
    PositiveOffset {
        /// Offending query offset.
        di: i32,
        /// Offending reference offset.
        dj: i32,
    },

    /// Returned when a rule's first offset is (0, 0), i.e. the rule has no predecessor.
    #[error("step rule must start at a strict predecessor, not (0, 0)")]
    ZeroFirstOffset,

    /// Returned when the number of edge weights does not match the chain length.
    #[error("step rule with {offsets} offsets needs {expected} weights, got {got}")]
    WeightCountMismatch {
        /// Number of offsets in the chain.
        offsets: usize,
        /// Expected number of edge weights (offsets - 1).
        expected: usize,
        /// Number of weights provided.
        got: usize,
    },

    /// Returned when an edge weight is NaN, infinite, or negative.
    #[error("step rule weight must be finite and non-negative, got {weight}")]
    InvalidWeight {
        /// The invalid weight value.
        weight: f64,
    },

    /// Returned when open-begin alignment is requested with a pattern whose
    /// normalization guide is not 'N'.
    #[error("open-begin alignment requires a step pattern normalized by 'N'")]
    OpenBeginRequiresQueryNormalization,

    /// Returned when open-end alignment is requested with a non-normalizable pattern.
    #[error("open-end alignment requires a normalizable step pattern")]
    OpenEndRequiresNormalizable,
}

/// Errors from invalid input data. Raised before any DP work.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Returned when an empty slice is provided as a series.
    #[error("series must be non-empty")]
    EmptySeries,

    /// Returned when a series contains NaN, infinity, or negative infinity.
    #[error("series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a multivariate series' value count is not a multiple of its width.
    #[error("series of {len} values cannot be split into rows of width {width}")]
    InvalidWidth {
        /// Total number of values provided.
        len: usize,
        /// Requested feature width.
        width: usize,
    },

    /// Returned when query and reference have different feature widths.
    #[error("query has {query} features but reference has {reference}")]
    FeatureMismatch {
        /// Feature width of the query series.
        query: usize,
        /// Feature width of the reference series.
        reference: usize,
    },

    /// Returned when a pairwise distance matrix has a zero dimension.
    #[error("pairwise distance matrix must have at least one row and one column")]
    EmptyMatrix,

    /// Returned when a pairwise distance matrix dimension does not match its data length.
    #[error("matrix of {rows}x{cols} requires {expected} values, got {got}")]
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// rows * cols.
        expected: usize,
        /// Number of values provided.
        got: usize,
    },

    /// Returned when a pairwise distance entry is negative.
    #[error("pairwise distance must be non-negative, got {value} at ({row}, {col})")]
    NegativeDistance {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The negative value found.
        value: f64,
    },

    /// Returned when a pairwise distance entry is NaN.
    #[error("pairwise distance is NaN at ({row}, {col})")]
    NanDistance {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },
}

/// Errors from path-dependent queries on results that carry no path.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Returned when the warping path is requested from a distance-only alignment.
    #[error("warping path was not computed (distance-only alignment)")]
    PathNotComputed,
}

/// Top-level error type for alignment calls.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Invalid configuration, detected before DP starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid input data, detected before DP starts.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The DP completed but no admissible path reaches the terminal cell.
    #[error(
        "alignment of {query_len}x{reference_len} is infeasible: no admissible path \
         reaches the terminal cell (window too restrictive for the step pattern)"
    )]
    Infeasible {
        /// Length of the query series.
        query_len: usize,
        /// Length of the reference series.
        reference_len: usize,
    },

    /// A path-dependent query was made on a distance-only result.
    #[error(transparent)]
    Query(#[from] QueryError),
}
