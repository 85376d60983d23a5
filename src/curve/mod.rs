pub mod curve_weights;
pub use curve_weights::*;
