use std::{borrow::Borrow, ops::Mul};

use num_traits::Zero;

use crate::misc::FloatingPoint;

/// Ordered pairs of control point handles and their weights
///
/// The recipe for a weighted sum: the point (or tangent) at a parameter is
/// `Σ handle * weight` over the entries. Handles are whatever the caller passed
/// in (positions, matrices, attribute names, indices) and are never inspected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightMapping<H, T>(Vec<(H, T)>);

impl<H, T: FloatingPoint> WeightMapping<H, T> {
    pub fn new(entries: Vec<(H, T)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(H, T)] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (H, T)> {
        self.0.iter()
    }

    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.0.iter().map(|(handle, _)| handle)
    }

    pub fn weights(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().map(|(_, weight)| *weight)
    }

    /// Sum of all weights
    /// One for point mappings, zero for tangent mappings
    pub fn total_weight(&self) -> T {
        self.weights().fold(T::zero(), |acc, w| acc + w)
    }

    /// Sum of the weights attached to `handle`
    pub fn weight_of(&self, handle: &H) -> T
    where
        H: PartialEq,
    {
        self.0
            .iter()
            .filter(|(h, _)| h == handle)
            .fold(T::zero(), |acc, (_, w)| acc + *w)
    }

    /// Replace every handle, keeping weights and order
    pub fn map_handles<G, F: FnMut(H) -> G>(self, mut f: F) -> WeightMapping<G, T> {
        WeightMapping(self.0.into_iter().map(|(h, w)| (f(h), w)).collect())
    }

    /// Merge entries whose handles compare equal
    /// Each handle keeps the position of its first appearance.
    /// # Example
    /// ```
    /// use spline_weights::prelude::WeightMapping;
    /// let mapping = WeightMapping::new(vec![("a", 0.25), ("b", 0.5), ("a", 0.25)]);
    /// let merged = mapping.consolidated();
    /// assert_eq!(merged.as_slice(), &[("a", 0.5), ("b", 0.5)]);
    /// ```
    pub fn consolidated(self) -> Self
    where
        H: PartialEq,
    {
        let mut merged: Vec<(H, T)> = Vec::with_capacity(self.0.len());
        for (handle, weight) in self.0 {
            match merged.iter_mut().find(|(h, _)| *h == handle) {
                Some((_, w)) => *w = *w + weight,
                None => merged.push((handle, weight)),
            }
        }
        Self(merged)
    }

    /// Evaluate the weighted sum for numeric handles
    /// Works with scalars and with nalgebra vectors and matrices.
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use spline_weights::prelude::WeightMapping;
    /// let mapping = WeightMapping::new(vec![
    ///     (Vector3::new(0., 0., 0.), 0.5),
    ///     (Vector3::new(2., 4., 0.), 0.5),
    /// ]);
    /// assert_eq!(mapping.weighted_sum::<Vector3<f64>>(), Vector3::new(1., 2., 0.));
    /// ```
    pub fn weighted_sum<V>(&self) -> V
    where
        H: Borrow<V>,
        V: Clone + Zero + Mul<T, Output = V>,
    {
        self.0.iter().fold(V::zero(), |acc, (handle, weight)| {
            acc + <H as Borrow<V>>::borrow(handle).clone() * *weight
        })
    }
}

impl<H, T> IntoIterator for WeightMapping<H, T> {
    type Item = (H, T);
    type IntoIter = std::vec::IntoIter<(H, T)>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, H, T> IntoIterator for &'a WeightMapping<H, T> {
    type Item = &'a (H, T);
    type IntoIter = std::slice::Iter<'a, (H, T)>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<H, T> FromIterator<(H, T)> for WeightMapping<H, T> {
    fn from_iter<I: IntoIterator<Item = (H, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
