//! Validated series types, 1-D or multi-feature.

use crate::error::InputError;

/// Owned, validated sample sequence. Guaranteed non-empty with all finite
/// values. Stores `len` rows of `width` features in row-major order; a plain
/// 1-D curve is a series of width 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    width: usize,
}

impl Series {
    /// Create a univariate series, validating that it is non-empty and all
    /// values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::EmptySeries`] | `values` is empty |
    /// | [`InputError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn univariate(values: Vec<f64>) -> Result<Self, InputError> {
        Self::multivariate(values, 1)
    }

    /// Create a multivariate series from row-major values and a feature width.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`InputError::EmptySeries`] | `values` is empty or `width` is zero |
    /// | [`InputError::InvalidWidth`] | `values.len()` is not a multiple of `width` |
    /// | [`InputError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn multivariate(values: Vec<f64>, width: usize) -> Result<Self, InputError> {
        validate(&values, width)?;
        Ok(Self { values, width })
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SeriesView<'_> {
        SeriesView {
            values: &self.values,
            width: self.width,
        }
    }

    /// Return the number of samples (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.width
    }

    /// Return true if the series has no samples.
    ///
    /// A [`Series`] built through its constructors is always non-empty, so
    /// this returns `false` for valid instances. Provided to satisfy the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the feature width of each sample.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return sample `i` as a feature slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.width..(i + 1) * self.width]
    }

    /// Consume and return the inner row-major vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = InputError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::univariate(values)
    }
}

/// Borrowed, validated view into a series. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    values: &'a [f64],
    width: usize,
}

impl<'a> SeriesView<'a> {
    /// Create a univariate view, validating non-emptiness and finiteness.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Series::univariate`].
    pub fn univariate(values: &'a [f64]) -> Result<Self, InputError> {
        Self::multivariate(values, 1)
    }

    /// Create a multivariate view over row-major values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Series::multivariate`].
    pub fn multivariate(values: &'a [f64], width: usize) -> Result<Self, InputError> {
        validate(values, width)?;
        Ok(Self { values, width })
    }

    /// Return the number of samples (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.width
    }

    /// Return true if the view has no samples. Always `false` for validated views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the feature width of each sample.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return sample `i` as a feature slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &'a [f64] {
        &self.values[i * self.width..(i + 1) * self.width]
    }
}

fn validate(values: &[f64], width: usize) -> Result<(), InputError> {
    if values.is_empty() || width == 0 {
        return Err(InputError::EmptySeries);
    }
    if values.len() % width != 0 {
        return Err(InputError::InvalidWidth {
            len: values.len(),
            width,
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(InputError::NonFiniteValue { index });
    }
    Ok(())
}
