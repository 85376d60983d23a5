use nalgebra::convert;

use crate::{
    error::InvalidCurveError, knot::KnotVector, misc::FloatingPoint, weight::WeightMapping,
};

/// Control point weights of a B-spline curve
///
/// Holds the degree and knot vector for a given number of control points, but never the
/// control points themselves. Evaluation returns weights keyed by control point index,
/// built with a modified de Boor's algorithm that tracks weights instead of positions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveWeights<T> {
    control_point_count: usize,
    degree: usize,
    /// the length of the knot vector is equal to the `# of control points + degree + 1`
    knots: KnotVector<T>,
}

impl<T: FloatingPoint> CurveWeights<T> {
    /// Create a curve weight evaluator
    /// Knots default to [`KnotVector::clamped_uniform`] when omitted.
    /// # Failures
    /// - if the degree is zero
    /// - if the number of control points is not greater than the degree
    /// - if the knot vector length is not `control_point_count + degree + 1`
    /// - if the knot vector is decreasing or holds non-finite values
    ///
    /// # Example
    /// ```
    /// use spline_weights::prelude::*;
    ///
    /// let curve = CurveWeights::<f64>::try_new(6, 3, None).unwrap();
    /// let weights = curve.point_weights(0.5).unwrap();
    /// assert_eq!(weights.handles().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    ///
    /// assert!(CurveWeights::<f64>::try_new(3, 3, None).is_err());
    /// ```
    pub fn try_new(
        control_point_count: usize,
        degree: usize,
        knots: Option<KnotVector<T>>,
    ) -> Result<Self, InvalidCurveError> {
        check_control_point_count(control_point_count, degree)?;

        let knots =
            knots.unwrap_or_else(|| KnotVector::clamped_uniform(control_point_count, degree));
        knots.validate(control_point_count, degree)?;

        #[cfg(feature = "log")]
        log::debug!(
            "curve weights: {} control points, degree {}, knots {:?}",
            control_point_count,
            degree,
            knots.as_slice()
        );

        Ok(Self {
            control_point_count,
            degree,
            knots,
        })
    }

    /// Create a closed curve over `control_point_count` distinct control points
    /// The first `degree` control points are wrapped onto the end (see [`wrap_control_points`])
    /// and the knot vector is [`KnotVector::unclamped_uniform`], so the curve returns to its start at `t = 1`.
    /// Indices in the resulting mappings refer to the wrapped sequence.
    pub fn try_periodic(
        control_point_count: usize,
        degree: usize,
    ) -> Result<Self, InvalidCurveError> {
        check_control_point_count(control_point_count, degree)?;
        let wrapped = control_point_count + degree;
        Self::try_new(
            wrapped,
            degree,
            Some(KnotVector::unclamped_uniform(wrapped, degree)),
        )
    }

    pub fn control_point_count(&self) -> usize {
        self.control_point_count
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector<T> {
        &self.knots
    }

    /// Weights of the control points defining the point at `t`
    /// `t` is normalized, 0 and 1 are the ends of the curve.
    /// Returns `degree + 1` entries, highest control point index first.
    pub fn point_weights(&self, t: T) -> Result<WeightMapping<usize, T>, InvalidCurveError> {
        let (knot, segment) = self.locate(t)?;
        let weights = self.de_boor_weights(knot, segment, self.degree)?;
        let first = segment - self.degree;
        Ok(weights
            .into_iter()
            .enumerate()
            .rev()
            .map(|(j, w)| (first + j, w))
            .collect())
    }

    /// Weights of the control points defining the first derivative at `t`
    /// The derivative is taken with respect to the knot values, not the normalized `t`.
    /// Returns `degree + 1` entries, highest control point index first, summing to zero.
    /// # Failures
    /// - if the degree is lower than 2
    pub fn tangent_weights(&self, t: T) -> Result<WeightMapping<usize, T>, InvalidCurveError> {
        if self.degree < 2 {
            return Err(InvalidCurveError::DegreeTooLow {
                degree: self.degree,
                minimum: 2,
            });
        }

        let (knot, segment) = self.locate(t)?;

        // derivative of a degree p curve is a degree p - 1 curve over differences of control points
        let lower = self.degree - 1;
        let weights = self.de_boor_weights(knot, segment, lower)?;

        let degree: T = convert(self.degree as f64);
        let mut tangent = vec![T::zero(); self.degree + 1];
        for (j, w) in weights.into_iter().enumerate() {
            let left = j + segment - lower;
            let right = j + segment + 1;
            let span = self.knots[right] - self.knots[left];
            if span <= T::zero() {
                return Err(InvalidCurveError::DegenerateKnotSpan { left, right });
            }
            let alpha = w * degree / span;
            tangent[j + 1] += alpha;
            tangent[j] -= alpha;
        }

        let first = segment - self.degree;
        Ok(tangent
            .into_iter()
            .enumerate()
            .rev()
            .map(|(j, w)| (first + j, w))
            .collect())
    }

    /// Point weights at `samples` evenly spaced parameters, see [`regular_parameters`]
    pub fn try_sample_point_weights(
        &self,
        samples: usize,
    ) -> Result<Vec<(T, WeightMapping<usize, T>)>, InvalidCurveError> {
        regular_parameters(samples)
            .into_iter()
            .map(|t| self.point_weights(t).map(|w| (t, w)))
            .collect()
    }

    /// Tangent weights at `samples` evenly spaced parameters, see [`regular_parameters`]
    pub fn try_sample_tangent_weights(
        &self,
        samples: usize,
    ) -> Result<Vec<(T, WeightMapping<usize, T>)>, InvalidCurveError> {
        regular_parameters(samples)
            .into_iter()
            .map(|t| self.tangent_weights(t).map(|w| (t, w)))
            .collect()
    }

    /// Remap a normalized parameter and find its segment
    fn locate(&self, t: T) -> Result<(T, usize), InvalidCurveError> {
        if !t.is_finite() {
            return Err(InvalidCurveError::NonFiniteParameter(t.to_f64_lossy()));
        }
        let knot = self.knots.remap_parameter(self.degree, t);
        let segment = self.knots.find_segment(self.degree, knot);

        #[cfg(feature = "log")]
        log::trace!("parameter {} remapped to {} in segment {}", t, knot, segment);

        Ok((knot, segment))
    }

    /// de Boor's triangular recurrence over weights
    /// Cell `j` starts as the unit weight of local control point `j` (`segment - degree + j`).
    /// Each level blends neighbouring cells, the last cell ends up holding the weights of
    /// all `degree + 1` local control points.
    fn de_boor_weights(
        &self,
        knot: T,
        segment: usize,
        degree: usize,
    ) -> Result<Vec<T>, InvalidCurveError> {
        let mut cells: Vec<Vec<T>> = (0..=degree)
            .map(|j| {
                let mut cell = vec![T::zero(); degree + 1];
                cell[j] = T::one();
                cell
            })
            .collect();

        for r in 1..=degree {
            for j in (r..=degree).rev() {
                let left = j + segment - degree;
                let right = j + 1 + segment - r;
                let span = self.knots[right] - self.knots[left];
                if span <= T::zero() {
                    return Err(InvalidCurveError::DegenerateKnotSpan { left, right });
                }
                let alpha = (knot - self.knots[left]) / span;

                let (lower, upper) = cells.split_at_mut(j);
                upper[0]
                    .iter_mut()
                    .zip(lower[j - 1].iter())
                    .for_each(|(w, previous)| *w = *w * alpha + *previous * (T::one() - alpha));
            }
        }

        Ok(cells.swap_remove(degree))
    }
}

fn check_control_point_count(count: usize, degree: usize) -> Result<(), InvalidCurveError> {
    if degree < 1 {
        return Err(InvalidCurveError::DegreeTooLow { degree, minimum: 1 });
    }
    if count <= degree {
        return Err(InvalidCurveError::TooFewControlPoints {
            degree,
            required: degree + 1,
            actual: count,
        });
    }
    Ok(())
}

/// `samples` evenly spaced normalized parameters from 0 to 1 inclusive
/// # Example
/// ```
/// use spline_weights::prelude::regular_parameters;
/// assert_eq!(regular_parameters::<f64>(5), vec![0., 0.25, 0.5, 0.75, 1.]);
/// assert_eq!(regular_parameters::<f64>(1), vec![0.]);
/// ```
pub fn regular_parameters<T: FloatingPoint>(samples: usize) -> Vec<T> {
    match samples {
        0 => vec![],
        1 => vec![T::zero()],
        _ => {
            let last: T = convert((samples - 1) as f64);
            (0..samples)
                .map(|i| convert::<f64, T>(i as f64) / last)
                .collect()
        }
    }
}

/// Append the first `degree` control points to the end of the sequence
/// The wrapped sequence describes a closed curve with [`KnotVector::unclamped_uniform`] knots.
pub fn wrap_control_points<H: Clone>(control_points: &[H], degree: usize) -> Vec<H> {
    control_points
        .iter()
        .chain(control_points.iter().take(degree))
        .cloned()
        .collect()
}

/// Map control points to their weights for the point at `t` on a curve
///
/// Control points can be anything (positions, matrices, attribute names), only their
/// order matters. The returned entries hold clones of the `degree + 1` control points
/// influencing `t`, highest index first.
///
/// # Example
/// ```
/// use spline_weights::prelude::*;
///
/// let cvs = ["cv0", "cv1", "cv2", "cv3", "cv4", "cv5"];
/// let weights = point_on_curve_weights(&cvs, 0.5, 3, None).unwrap();
/// assert_eq!(
///     weights.as_slice(),
///     &[("cv4", 1. / 32.), ("cv3", 15. / 32.), ("cv2", 15. / 32.), ("cv1", 1. / 32.)]
/// );
/// ```
pub fn point_on_curve_weights<H: Clone, T: FloatingPoint>(
    control_points: &[H],
    t: T,
    degree: usize,
    knots: Option<&KnotVector<T>>,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let curve = CurveWeights::try_new(control_points.len(), degree, knots.cloned())?;
    Ok(curve
        .point_weights(t)?
        .map_handles(|i| control_points[i].clone()))
}

/// Map control points to their weights for the tangent at `t` on a curve
///
/// Each control point appears once; the weights sum to zero. Requires a degree of at least 2.
pub fn tangent_on_curve_weights<H: Clone, T: FloatingPoint>(
    control_points: &[H],
    t: T,
    degree: usize,
    knots: Option<&KnotVector<T>>,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let curve = CurveWeights::try_new(control_points.len(), degree, knots.cloned())?;
    Ok(curve
        .tangent_weights(t)?
        .map_handles(|i| control_points[i].clone()))
}

/// Point weights on a closed curve through `control_points`
/// Wrapped control points are merged back onto the originals, so every handle appears once.
pub fn periodic_point_on_curve_weights<H: Clone, T: FloatingPoint>(
    control_points: &[H],
    t: T,
    degree: usize,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let count = control_points.len();
    let curve = CurveWeights::try_periodic(count, degree)?;
    Ok(curve
        .point_weights(t)?
        .map_handles(|i| i % count)
        .consolidated()
        .map_handles(|i| control_points[i].clone()))
}

/// Tangent weights on a closed curve through `control_points`
pub fn periodic_tangent_on_curve_weights<H: Clone, T: FloatingPoint>(
    control_points: &[H],
    t: T,
    degree: usize,
) -> Result<WeightMapping<H, T>, InvalidCurveError> {
    let count = control_points.len();
    let curve = CurveWeights::try_periodic(count, degree)?;
    Ok(curve
        .tangent_weights(t)?
        .map_handles(|i| i % count)
        .consolidated()
        .map_handles(|i| control_points[i].clone()))
}
