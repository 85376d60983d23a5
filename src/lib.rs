//! Control point weights for B-spline curves and tensor-product surfaces.
//!
//! Instead of evaluating a point, every function returns the weighted-sum recipe
//! for it: which control points contribute and by how much. Control points are
//! opaque handles, so the same weights drive positions, transform matrices or
//! named attributes on the caller's side.

mod curve;
mod error;
mod knot;
mod misc;
mod surface;
mod weight;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::error::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::surface::*;
    pub use crate::weight::*;
}
