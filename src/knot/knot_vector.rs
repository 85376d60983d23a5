use std::ops::Index;

use itertools::Itertools;
use nalgebra::convert;
use simba::scalar::SupersetOf;

use crate::{error::InvalidCurveError, misc::FloatingPoint};

/// Knot vector representation
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotVector<T>(Vec<T>);

impl<T: FloatingPoint> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Create the default knot vector for `count` control points
    /// `degree` copies of zero, the integers `0..=count - degree`, then `degree` copies of `count - degree`.
    /// The curve interpolates its first and last control points.
    ///
    /// Only counts greater than the degree produce a vector of the required `count + degree + 1` length.
    /// # Example
    /// ```
    /// use spline_weights::prelude::KnotVector;
    /// let knots: KnotVector<f64> = KnotVector::clamped_uniform(6, 3);
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 0., 1., 2., 3., 3., 3., 3.]);
    /// ```
    pub fn clamped_uniform(count: usize, degree: usize) -> Self {
        let last = count.saturating_sub(degree);
        let mut knots: Vec<T> = vec![];
        knots.extend(std::iter::repeat_n(T::zero(), degree));
        knots.extend((0..=last).map(knot_value::<T>));
        knots.extend(std::iter::repeat_n(knot_value::<T>(last), degree));
        Self(knots)
    }

    /// Create an unclamped knot vector `0, 1, ..., count + degree`
    /// Used by closed curves, whose ends do not pass through a control point.
    /// # Example
    /// ```
    /// use spline_weights::prelude::KnotVector;
    /// let knots: KnotVector<f64> = KnotVector::unclamped_uniform(4, 2);
    /// assert_eq!(knots.to_vec(), vec![0., 1., 2., 3., 4., 5., 6.]);
    /// ```
    pub fn unclamped_uniform(count: usize, degree: usize) -> Self {
        Self((0..count + degree + 1).map(knot_value).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Check if the knot vector is clamped
    /// `clamped` means the first and last `degree + 1` knots are repeated
    /// e.g. [0, 0, 0, 1, 2, 3, 3, 3] with degree 2 is clamped
    pub fn is_clamped(&self, degree: usize) -> bool {
        let order = degree + 1;
        if self.len() < order * 2 {
            return false;
        }
        let head = &self.0[..order];
        let tail = &self.0[self.len() - order..];
        head.iter().all_equal() && tail.iter().all_equal()
    }

    /// Check the knot vector against a curve with `count` control points of the given degree
    /// # Failures
    /// - the length is not `count + degree + 1`
    /// - a knot is NaN or infinite
    /// - a knot is smaller than its predecessor
    pub fn validate(&self, count: usize, degree: usize) -> Result<(), InvalidCurveError> {
        let expected = count + degree + 1;
        if self.len() != expected {
            return Err(InvalidCurveError::KnotCountMismatch {
                control_points: count,
                expected,
                actual: self.len(),
                knots: self.iter().map(|k| k.to_f64_lossy()).collect(),
            });
        }

        if let Some(index) = self.iter().position(|k| !k.is_finite()) {
            return Err(InvalidCurveError::NonFiniteKnot { index });
        }

        if let Some((index, (previous, value))) = self
            .iter()
            .tuple_windows::<(&T, &T)>()
            .enumerate()
            .find(|(_, (previous, value))| value < previous)
        {
            return Err(InvalidCurveError::DecreasingKnots {
                index: index + 1,
                previous: previous.to_f64_lossy(),
                value: value.to_f64_lossy(),
            });
        }

        Ok(())
    }

    /// Map a normalized parameter in [0, 1] onto the knot values
    /// The range is the interior knot range `[knots[degree + 1], knots[len - degree - 2]]`
    /// widened by one unit at each end, so for unit-spaced knots [0, 1] covers
    /// the whole domain `[knots[degree], knots[len - degree - 1]]`.
    /// Expects a knot vector that passed [`KnotVector::validate`].
    pub(crate) fn remap_parameter(&self, degree: usize, t: T) -> T {
        let order = degree + 1;
        let min = self[order] - T::one();
        let max = self[self.len() - 1 - order] + T::one();
        t * (max - min) + min
    }

    /// Find the segment (knot span index) containing a remapped parameter
    /// Linear search over the interior knots for the last knot not greater than `knot`.
    /// Repeated knots resolve to the later span, and parameters before the first
    /// interior knot fall into the first span, `degree`.
    /// Expects a knot vector that passed [`KnotVector::validate`].
    pub(crate) fn find_segment(&self, degree: usize, knot: T) -> usize {
        let order = degree + 1;
        self.0[order..self.len() - order]
            .iter()
            .rposition(|k| *k <= knot)
            .map(|index| index + order)
            .unwrap_or(degree)
    }

    /// Cast the knot vector to another floating point type
    /// # Example
    /// ```
    /// use spline_weights::prelude::*;
    /// let knots: KnotVector<f64> = KnotVector::clamped_uniform(4, 2);
    /// let knots2 = knots.cast::<f32>();
    /// assert_eq!(knots2.to_vec(), vec![0., 0., 0., 1., 2., 2., 2.]);
    /// ```
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> KnotVector<F> {
        KnotVector::new(self.0.iter().map(|v| convert(*v)).collect())
    }
}

fn knot_value<T: FloatingPoint>(i: usize) -> T {
    convert(i as f64)
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
