use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Scalar types the weights are computed in (f32, f64)
/// Bound to the nalgebra field so weights scale vector and matrix handles directly
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Widen to f64 for diagnostics, NaN if the value cannot be represented
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
