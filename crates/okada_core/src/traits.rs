use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the elastic kernels.
/// Must support basic arithmetic, debug printing, conversion from f64 and
/// crossing thread boundaries (batches are evaluated in parallel).
///
/// Both `f64` and the dual numbers in [`crate::autodiff`] implement it, which
/// is what lets every kernel be differentiated without modification.
pub trait Scalar: Float + FromPrimitive + Debug + Send + Sync + 'static {
    /// Lifts a literal constant into the scalar type.
    fn c(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }

    /// Real part of the scalar, for diagnostics.
    fn value(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: Float + FromPrimitive + Debug + Send + Sync + 'static> Scalar for T {}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use crate::autodiff::Dual;

    #[test]
    fn literal_lifting_keeps_value_and_zero_tangent() {
        let x: Dual = Scalar::c(2.5);
        assert_eq!(x.val, 2.5);
        assert_eq!(x.eps, 0.0);
        assert_eq!(<f64 as Scalar>::c(-1.0), -1.0);
    }

    #[test]
    fn value_projects_nested_duals() {
        let x = Dual::new(Dual::new(3.0, 1.0), Dual::new(1.0, 0.0));
        assert_eq!(x.value(), 3.0);
    }
}
