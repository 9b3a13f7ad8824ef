//! Medium, dip and station-geometry constants shared by the kernels.
//!
//! Every bundle here is an immutable value built fresh for one
//! (observation point, source) pair. Nothing is cached between calls, so the
//! kernels can be mapped over a batch in parallel.

use crate::error::{OkadaError, OkadaResult, Singularity};
use crate::frame::AngleUnit;
use crate::traits::Scalar;

/// Coordinates and dip cosines smaller than this are snapped to exactly zero.
pub const EPS: f64 = 1.0e-6;

/// Value substituted for 1/(R(R+ξ)) when its denominator vanishes.
pub const NEAR_FIELD_SENTINEL: f64 = 1.0e6;

pub(crate) const PI2: f64 = 2.0 * std::f64::consts::PI;

/// Returns exactly zero for `|value| < EPS`, `value` otherwise.
pub fn snap<T: Scalar>(value: T) -> T {
    if value.abs() < T::c(EPS) {
        T::zero()
    } else {
        value
    }
}

/// `1 / value`, or [`NEAR_FIELD_SENTINEL`] when `|value| < EPS`.
pub fn regularized_reciprocal<T: Scalar>(value: T) -> T {
    if value.abs() < T::c(EPS) {
        T::c(NEAR_FIELD_SENTINEL)
    } else {
        value.recip()
    }
}

/// Snaps a nearly vertical dip: when `|cos| < EPS` the pair becomes
/// `(signum(sin), 0)`.
pub fn snap_dip<T: Scalar>(sin_dip: T, cos_dip: T) -> (T, T) {
    if cos_dip.abs() < T::c(EPS) {
        (sin_dip.signum(), T::zero())
    } else {
        (sin_dip, cos_dip)
    }
}

/// Both parameterizations of the elastic medium, derived from Poisson's ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediumConstants<T> {
    pub poisson_ratio: T,
    /// μ / (λ + μ) = 1 - 2ν, used by the surface kernels.
    pub alpha_1985: T,
    /// (λ + μ) / (λ + 2μ) = 1 / (2(1 - ν)), used by the buried kernels.
    pub alpha_1992: T,
}

impl<T: Scalar> MediumConstants<T> {
    pub fn from_poisson_ratio(poisson_ratio: T) -> OkadaResult<Self> {
        let nu = poisson_ratio.value();
        if !nu.is_finite() || nu <= -1.0 || nu > 0.5 {
            return Err(OkadaError::invalid_argument(format!(
                "poisson_ratio must lie in (-1, 0.5], got {nu}"
            )));
        }
        let one = T::one();
        Ok(Self {
            poisson_ratio,
            alpha_1985: one - T::c(2.0) * poisson_ratio,
            alpha_1992: one / (T::c(2.0) * (one - poisson_ratio)),
        })
    }
}

/// Medium and fault-dip constants of the buried formulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipConstants<T> {
    pub alp1: T,
    pub alp2: T,
    pub alp3: T,
    pub alp4: T,
    pub alp5: T,
    pub sd: T,
    pub cd: T,
    pub sdsd: T,
    pub cdcd: T,
    pub sdcd: T,
    pub s2d: T,
    pub c2d: T,
}

impl<T: Scalar> DipConstants<T> {
    /// `alpha` is the 1992 medium constant (λ + μ) / (λ + 2μ).
    pub fn new(alpha: T, dip: T, unit: AngleUnit) -> Self {
        let dip = unit.to_radians(dip);
        let (sd, cd) = snap_dip(dip.sin(), dip.cos());
        let one = T::one();
        let half = T::c(0.5);
        let sdcd = sd * cd;
        Self {
            alp1: (one - alpha) * half,
            alp2: alpha * half,
            alp3: (one - alpha) / alpha,
            alp4: one - alpha,
            alp5: alpha,
            sd,
            cd,
            sdsd: sd * sd,
            cdcd: cd * cd,
            sdcd,
            s2d: T::c(2.0) * sdcd,
            c2d: cd * cd - sd * sd,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.cd == T::zero()
    }
}

/// Station geometry relative to a buried point source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGeometry<T> {
    pub x: T,
    pub y: T,
    pub d: T,
    pub p: T,
    pub q: T,
    pub s: T,
    pub t: T,
    pub xy: T,
    pub x2: T,
    pub y2: T,
    pub d2: T,
    pub r: T,
    pub r2: T,
    pub r3: T,
    pub r5: T,
    pub a3: T,
    pub a5: T,
    pub b3: T,
    pub c3: T,
    pub qr: T,
    pub qrx: T,
    pub uy: T,
    pub uz: T,
    pub vy: T,
    pub vz: T,
    pub wy: T,
    pub wz: T,
}

impl<T: Scalar> PointGeometry<T> {
    /// `d` is the depth of the source below the station. The snapped
    /// `x`, `y` and `d` are kept so that the term functions see the same
    /// coordinates as the constants.
    pub fn new(x: T, y: T, d: T, dip: &DipConstants<T>) -> OkadaResult<Self> {
        let (x, y, d) = (snap(x), snap(y), snap(d));
        let (sd, cd) = (dip.sd, dip.cd);

        let p = y * cd + d * sd;
        let q = y * sd - d * cd;
        let x2 = x * x;
        let y2 = y * y;
        let d2 = d * d;
        let r2 = x2 + y2 + d2;
        if r2 == T::zero() {
            return Err(OkadaError::SingularGeometry(Singularity::SourceCoincident));
        }
        let r = r2.sqrt();
        let r3 = r2 * r;
        let r5 = r3 * r2;

        let three = T::c(3.0);
        let five = T::c(5.0);
        let one = T::one();
        let qr = three * q / r5;
        let uy = sd - five * y * q / r2;
        let uz = cd + five * d * q / r2;
        let s = p * sd + q * cd;
        let t = p * cd - q * sd;

        Ok(Self {
            x,
            y,
            d,
            p,
            q,
            s,
            t,
            xy: x * y,
            x2,
            y2,
            d2,
            r,
            r2,
            r3,
            r5,
            a3: one - three * x2 / r2,
            a5: one - five * x2 / r2,
            b3: one - three * y2 / r2,
            c3: one - three * d2 / r2,
            qr,
            qrx: five * qr * x / r2,
            uy,
            uz,
            vy: s - five * y * p * q / r2,
            vz: t + five * d * p * q / r2,
            wy: uy + sd,
            wz: uz + cd,
        })
    }
}

/// Station geometry relative to one corner (ξ, η) of a buried rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteGeometry<T> {
    pub xi: T,
    pub et: T,
    pub q: T,
    pub xi2: T,
    pub et2: T,
    pub q2: T,
    pub r: T,
    pub r2: T,
    pub r3: T,
    pub r5: T,
    pub y: T,
    pub d: T,
    pub tt: T,
    pub alx: T,
    pub ale: T,
    pub x11: T,
    pub y11: T,
    pub x32: T,
    pub y32: T,
    pub ey: T,
    pub ez: T,
    pub fy: T,
    pub fz: T,
    pub gy: T,
    pub gz: T,
    pub hy: T,
    pub hz: T,
}

impl<T: Scalar> FiniteGeometry<T> {
    /// `kxi` / `ket` mark a station on the negative extension of a fault
    /// edge (R + ξ < EPS or R + η < EPS); the logarithms then switch to their
    /// reflected form and the matching reciprocals vanish.
    pub fn new(xi: T, et: T, q: T, sd: T, cd: T, kxi: bool, ket: bool) -> OkadaResult<Self> {
        let (xi, et, q) = (snap(xi), snap(et), snap(q));
        let zero = T::zero();
        let two = T::c(2.0);

        let xi2 = xi * xi;
        let et2 = et * et;
        let q2 = q * q;
        let r2 = xi2 + et2 + q2;
        if r2 == zero {
            return Err(OkadaError::SingularGeometry(Singularity::FaultEdge));
        }
        let r = r2.sqrt();
        let r3 = r2 * r;
        let r5 = r3 * r2;
        let y = et * cd + q * sd;
        let d = et * sd - q * cd;

        let tt = if q != zero {
            (xi * et / (q * r)).atan()
        } else {
            zero
        };

        let (alx, x11, x32) = if kxi {
            (-(r - xi).ln(), zero, zero)
        } else {
            let rxi = r + xi;
            let x11 = (r * rxi).recip();
            (rxi.ln(), x11, (r + rxi) * x11 * x11 / r)
        };
        let (ale, y11, y32) = if ket {
            (-(r - et).ln(), zero, zero)
        } else {
            let ret = r + et;
            let y11 = (r * ret).recip();
            (ret.ln(), y11, (r + ret) * y11 * y11 / r)
        };

        Ok(Self {
            xi,
            et,
            q,
            xi2,
            et2,
            q2,
            r,
            r2,
            r3,
            r5,
            y,
            d,
            tt,
            alx,
            ale,
            x11,
            y11,
            x32,
            y32,
            ey: sd / r - y * q / r3,
            ez: cd / r + d * q / r3,
            fy: d / r3 + xi2 * y32 * sd,
            fz: y / r3 + xi2 * y32 * cd,
            gy: two * x11 * sd - y * q * x32,
            gz: two * x11 * cd + d * q * x32,
            hy: d * q * x32 + xi * q * y32 * sd,
            hz: y * q * x32 + xi * q * y32 * cd,
        })
    }
}
