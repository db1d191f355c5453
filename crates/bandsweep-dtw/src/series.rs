//! Sample and labelled series types with validation guarantees.

use std::fmt;
use std::ops::Index;

use crate::error::DtwError;

/// One coordinate axis of a [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First coordinate.
    X,
    /// Second coordinate.
    Y,
    /// Third coordinate.
    Z,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// A single time step with three real coordinates.
///
/// One-dimensional series keep `y` and `z` at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    /// First coordinate.
    pub x: f64,
    /// Second coordinate.
    pub y: f64,
    /// Third coordinate.
    pub z: f64,
}

impl Sample {
    /// Create a sample from three coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a one-dimensional sample (`y = z = 0`).
    #[must_use]
    pub const fn scalar(x: f64) -> Self {
        Self { x, y: 0.0, z: 0.0 }
    }

    /// Return the coordinate on the given axis.
    #[must_use]
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Integer class label attached to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassLabel(i64);

impl ClassLabel {
    /// Wrap a raw label value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw label value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owned, validated, labelled series. Guaranteed non-empty with all finite
/// coordinates. Immutable once constructed; sample order is temporal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: ClassLabel,
    samples: Vec<Sample>,
}

impl Series {
    /// Create a new series, validating that it is non-empty and all coordinates are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `samples` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any coordinate is NaN or infinite |
    pub fn new(label: ClassLabel, samples: Vec<Sample>) -> Result<Self, DtwError> {
        if samples.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(DtwError::NonFiniteValue { index });
        }
        Ok(Self { label, samples })
    }

    /// Create a one-dimensional series from scalar values.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Series::new`].
    pub fn univariate(label: ClassLabel, values: &[f64]) -> Result<Self, DtwError> {
        Self::new(label, values.iter().copied().map(Sample::scalar).collect())
    }

    /// Return the class label.
    #[must_use]
    pub fn label(&self) -> ClassLabel {
        self.label
    }

    /// Return the samples in temporal order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return true if the series has no time steps.
    ///
    /// A [`Series`] constructed via [`Series::new`] is always non-empty,
    /// so this always returns `false` for valid instances. Provided to satisfy
    /// the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Index<usize> for Series {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_vec() {
        let result = Series::new(ClassLabel::new(1), vec![]);
        assert!(matches!(result, Err(DtwError::EmptySeries)));
    }

    #[test]
    fn rejects_nan() {
        let samples = vec![Sample::scalar(1.0), Sample::new(0.0, f64::NAN, 0.0)];
        let result = Series::new(ClassLabel::new(1), samples);
        assert!(matches!(result, Err(DtwError::NonFiniteValue { index: 1 })));
    }

    #[test]
    fn rejects_infinity_on_z() {
        let samples = vec![Sample::new(0.0, 0.0, f64::NEG_INFINITY)];
        let result = Series::new(ClassLabel::new(1), samples);
        assert!(matches!(result, Err(DtwError::NonFiniteValue { index: 0 })));
    }

    #[test]
    fn univariate_zeroes_y_and_z() {
        let s = Series::univariate(ClassLabel::new(3), &[1.0, 2.0]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.label(), ClassLabel::new(3));
        assert_eq!(s[1], Sample::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn component_selects_axis() {
        let s = Sample::new(1.0, 2.0, 3.0);
        let picked: Vec<f64> = Axis::ALL.iter().map(|&a| s.component(a)).collect();
        assert_eq!(picked, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn label_display() {
        assert_eq!(ClassLabel::new(-4).to_string(), "-4");
    }
}
