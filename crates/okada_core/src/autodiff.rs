use crate::traits::Scalar;
use num_traits::{Float, FromPrimitive, Num, NumCast, One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

/// Dual number for forward-mode AD.
/// val: real part
/// eps: infinitesimal part
///
/// The parts are themselves generic, so `Dual<Dual<f64>>` carries second
/// derivatives: seed the inner tangent with one direction and the outer
/// tangent with another, and `result.eps.eps` is the mixed partial.
#[derive(Debug, Clone, Copy)]
pub struct Dual<T = f64> {
    pub val: T,
    pub eps: T,
}

impl<T: Scalar> Dual<T> {
    pub fn new(val: T, eps: T) -> Self {
        Self { val, eps }
    }

    /// A quantity that does not depend on the seeded direction.
    pub fn constant(val: T) -> Self {
        Self::new(val, T::zero())
    }

    /// The independent variable itself (unit tangent).
    pub fn variable(val: T) -> Self {
        Self::new(val, T::one())
    }
}

// Comparisons only look at the real part, so that snapping and branch
// selection take the same path as the plain `f64` evaluation would.
impl<T: Scalar> PartialEq for Dual<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T: Scalar> PartialOrd for Dual<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

// Implement generic traits for Dual to satisfy Scalar (Float).
// This is boilerplate heavy.

impl<T: Scalar> Zero for Dual<T> {
    fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }
    // A zero value with a live tangent is not zero: kernels skip zero
    // dislocation components and must not drop their derivatives.
    fn is_zero(&self) -> bool {
        self.val.is_zero() && self.eps.is_zero()
    }
}

impl<T: Scalar> One for Dual<T> {
    fn one() -> Self {
        Self::new(T::one(), T::zero())
    }
}

impl<T: Scalar> Add for Dual<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl<T: Scalar> Div for Dual<T> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.val * rhs.val;
        Self::new(
            self.val / rhs.val,
            (self.eps * rhs.val - self.val * rhs.eps) / denom,
        )
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl<T: Scalar> Rem for Dual<T> {
    type Output = Self;
    fn rem(self, rhs: Self) -> Self {
        // a % b = a - b * trunc(a / b), piecewise linear in both arguments.
        let quotient = (self.val / rhs.val).trunc();
        Self::new(self.val % rhs.val, self.eps - quotient * rhs.eps)
    }
}

impl<T: Scalar> AddAssign for Dual<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl<T: Scalar> SubAssign for Dual<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl<T: Scalar> MulAssign for Dual<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl<T: Scalar> DivAssign for Dual<T> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}
impl<T: Scalar> RemAssign for Dual<T> {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl<T: Scalar> Num for Dual<T> {
    type FromStrRadixErr = ();
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        T::from_str_radix(str, radix)
            .map(Self::constant)
            .map_err(|_| ())
    }
}

impl<T: Scalar> ToPrimitive for Dual<T> {
    fn to_i64(&self) -> Option<i64> {
        self.val.to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.val.to_u64()
    }
    fn to_f64(&self) -> Option<f64> {
        self.val.to_f64()
    }
}

impl<T: Scalar> FromPrimitive for Dual<T> {
    fn from_i64(n: i64) -> Option<Self> {
        T::from_i64(n).map(Self::constant)
    }
    fn from_u64(n: u64) -> Option<Self> {
        T::from_u64(n).map(Self::constant)
    }
    fn from_f64(n: f64) -> Option<Self> {
        T::from_f64(n).map(Self::constant)
    }
}

impl<T: Scalar> NumCast for Dual<T> {
    fn from<N: ToPrimitive>(n: N) -> Option<Self> {
        n.to_f64().and_then(T::from_f64).map(Self::constant)
    }
}

impl<T: Scalar> Float for Dual<T> {
    fn nan() -> Self {
        Self::constant(T::nan())
    }
    fn infinity() -> Self {
        Self::constant(T::infinity())
    }
    fn neg_infinity() -> Self {
        Self::constant(T::neg_infinity())
    }
    fn neg_zero() -> Self {
        Self::constant(T::neg_zero())
    }
    fn min_value() -> Self {
        Self::constant(T::min_value())
    }
    fn min_positive_value() -> Self {
        Self::constant(T::min_positive_value())
    }
    fn epsilon() -> Self {
        Self::constant(T::epsilon())
    }
    fn max_value() -> Self {
        Self::constant(T::max_value())
    }
    fn is_nan(self) -> bool {
        self.val.is_nan()
    }
    fn is_infinite(self) -> bool {
        self.val.is_infinite()
    }
    fn is_finite(self) -> bool {
        self.val.is_finite()
    }
    fn is_normal(self) -> bool {
        self.val.is_normal()
    }
    fn classify(self) -> std::num::FpCategory {
        self.val.classify()
    }
    fn floor(self) -> Self {
        Self::constant(self.val.floor())
    }
    fn ceil(self) -> Self {
        Self::constant(self.val.ceil())
    }
    fn round(self) -> Self {
        Self::constant(self.val.round())
    }
    fn trunc(self) -> Self {
        Self::constant(self.val.trunc())
    }
    fn fract(self) -> Self {
        Self::new(self.val.fract(), self.eps)
    }
    fn abs(self) -> Self {
        if self.val >= T::zero() {
            self
        } else {
            -self
        }
    }
    fn signum(self) -> Self {
        Self::constant(self.val.signum())
    }
    fn is_sign_positive(self) -> bool {
        self.val.is_sign_positive()
    }
    fn is_sign_negative(self) -> bool {
        self.val.is_sign_negative()
    }
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
    fn recip(self) -> Self {
        Self::one() / self
    }

    fn powi(self, n: i32) -> Self {
        let val_pow = self.val.powi(n);
        Self::new(val_pow, T::c(n as f64) * self.val.powi(n - 1) * self.eps)
    }

    fn powf(self, n: Self) -> Self {
        let val_pow = self.val.powf(n.val);
        if n.eps.is_zero() {
            // Constant exponent: avoid ln(x) for non-positive bases.
            return Self::new(
                val_pow,
                n.val * self.val.powf(n.val - T::one()) * self.eps,
            );
        }
        // x^y = exp(y * ln(x))
        let eps_new = val_pow * (n.eps * self.val.ln() + n.val * self.eps / self.val);
        Self::new(val_pow, eps_new)
    }

    fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self::new(s, self.eps / (T::c(2.0) * s))
    }

    fn exp(self) -> Self {
        let e = self.val.exp();
        Self::new(e, e * self.eps)
    }

    fn exp2(self) -> Self {
        let e = self.val.exp2();
        Self::new(e, e * T::c(std::f64::consts::LN_2) * self.eps)
    }
    fn ln(self) -> Self {
        Self::new(self.val.ln(), self.eps / self.val)
    }
    fn log(self, base: Self) -> Self {
        self.ln() / base.ln()
    }
    fn log2(self) -> Self {
        Self::new(
            self.val.log2(),
            self.eps / (self.val * T::c(std::f64::consts::LN_2)),
        )
    }
    fn log10(self) -> Self {
        Self::new(
            self.val.log10(),
            self.eps / (self.val * T::c(std::f64::consts::LN_10)),
        )
    }

    fn max(self, other: Self) -> Self {
        if self.val > other.val {
            self
        } else {
            other
        }
    }
    fn min(self, other: Self) -> Self {
        if self.val < other.val {
            self
        } else {
            other
        }
    }

    fn abs_sub(self, other: Self) -> Self {
        if self.val > other.val {
            self - other
        } else {
            Self::zero()
        }
    }

    fn cbrt(self) -> Self {
        let c = self.val.cbrt();
        Self::new(c, self.eps / (T::c(3.0) * c * c))
    }
    fn hypot(self, other: Self) -> Self {
        let h = self.val.hypot(other.val);
        Self::new(h, (self.val * self.eps + other.val * other.eps) / h)
    }

    fn sin(self) -> Self {
        Self::new(self.val.sin(), self.eps * self.val.cos())
    }
    fn cos(self) -> Self {
        Self::new(self.val.cos(), -self.eps * self.val.sin())
    }
    fn tan(self) -> Self {
        let t = self.val.tan();
        Self::new(t, self.eps * (T::one() + t * t))
    }
    fn asin(self) -> Self {
        let root = (T::one() - self.val * self.val).sqrt();
        Self::new(self.val.asin(), self.eps / root)
    }
    fn acos(self) -> Self {
        let root = (T::one() - self.val * self.val).sqrt();
        Self::new(self.val.acos(), -self.eps / root)
    }
    fn atan(self) -> Self {
        Self::new(self.val.atan(), self.eps / (T::one() + self.val * self.val))
    }
    fn atan2(self, other: Self) -> Self {
        // self = y, other = x
        let denom = self.val * self.val + other.val * other.val;
        Self::new(
            self.val.atan2(other.val),
            (other.val * self.eps - self.val * other.eps) / denom,
        )
    }
    fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }

    fn exp_m1(self) -> Self {
        Self::new(self.val.exp_m1(), self.val.exp() * self.eps)
    }
    fn ln_1p(self) -> Self {
        Self::new(self.val.ln_1p(), self.eps / (T::one() + self.val))
    }
    fn sinh(self) -> Self {
        Self::new(self.val.sinh(), self.val.cosh() * self.eps)
    }
    fn cosh(self) -> Self {
        Self::new(self.val.cosh(), self.val.sinh() * self.eps)
    }
    fn tanh(self) -> Self {
        let t = self.val.tanh();
        Self::new(t, (T::one() - t * t) * self.eps)
    }
    fn asinh(self) -> Self {
        let root = (self.val * self.val + T::one()).sqrt();
        Self::new(self.val.asinh(), self.eps / root)
    }
    fn acosh(self) -> Self {
        let root = (self.val * self.val - T::one()).sqrt();
        Self::new(self.val.acosh(), self.eps / root)
    }
    fn atanh(self) -> Self {
        Self::new(self.val.atanh(), self.eps / (T::one() - self.val * self.val))
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        self.val.integer_decode()
    }
}
