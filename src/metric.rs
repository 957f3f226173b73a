//! Pluggable pointwise metrics for building the pairwise distance matrix.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Pointwise distance between two feature rows.
///
/// Named metrics cover the common cases; [`Metric::custom`] accepts any
/// callable. Custom metric outputs are validated non-negative and non-NaN
/// when the pairwise matrix is built.
#[derive(Clone)]
pub enum Metric {
    /// Euclidean (L2) distance.
    Euclidean,
    /// Squared Euclidean distance.
    SquaredEuclidean,
    /// Manhattan (L1) distance.
    Manhattan,
    /// Chebyshev (L-infinity) distance.
    Chebyshev,
    /// User-supplied metric.
    Custom(Arc<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>),
}

impl Metric {
    /// Resolve a metric by name: `euclidean`, `sqeuclidean`, `manhattan`
    /// (alias `cityblock`), or `chebyshev`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::UnknownMetric`] | `name` is not in the list above |
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        match name {
            "euclidean" => Ok(Self::Euclidean),
            "sqeuclidean" => Ok(Self::SquaredEuclidean),
            "manhattan" | "cityblock" => Ok(Self::Manhattan),
            "chebyshev" => Ok(Self::Chebyshev),
            _ => Err(ConfigError::UnknownMetric {
                name: name.to_string(),
            }),
        }
    }

    /// Wrap a user-supplied callable as a metric.
    pub fn custom(f: impl Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Evaluate the metric on two feature rows of equal width.
    pub(crate) fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
                .sqrt(),
            Self::SquaredEuclidean => a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum(),
            Self::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Self::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            Self::Custom(f) => f(a, b),
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::Euclidean
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => f.write_str("Euclidean"),
            Self::SquaredEuclidean => f.write_str("SquaredEuclidean"),
            Self::Manhattan => f.write_str("Manhattan"),
            Self::Chebyshev => f.write_str("Chebyshev"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_univariate_is_abs_diff() {
        assert!((Metric::Euclidean.eval(&[3.0], &[1.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn euclidean_multivariate() {
        let d = Metric::Euclidean.eval(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn sqeuclidean() {
        let d = Metric::SquaredEuclidean.eval(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 25.0).abs() < 1e-12);
    }

    #[test]
    fn manhattan() {
        let d = Metric::Manhattan.eval(&[1.0, 1.0], &[4.0, -1.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn chebyshev() {
        let d = Metric::Chebyshev.eval(&[1.0, 1.0], &[4.0, -1.0]);
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn named_lookup() {
        assert!(matches!(Metric::named("euclidean"), Ok(Metric::Euclidean)));
        assert!(matches!(Metric::named("cityblock"), Ok(Metric::Manhattan)));
        assert!(matches!(
            Metric::named("cosine"),
            Err(ConfigError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn custom_callable() {
        let m = Metric::custom(|a, b| (a[0] - b[0]).abs() * 10.0);
        assert!((m.eval(&[1.0], &[2.0]) - 10.0).abs() < 1e-12);
    }
}
