//! Closed-form response to a point dislocation or potency source.
//!
//! [`spoint`] is the surface-only formulation of Okada (1985); [`dc3d0`] is
//! the buried formulation of Okada (1992), which evaluates at any z ≤ 0 by
//! superposing the real source, its image and a depth-gradient correction.

mod terms;

use crate::constants::{DipConstants, PointGeometry, PI2};
use crate::error::{OkadaError, OkadaResult, Singularity, Status};
use crate::field::{Dislocation, FieldResult, Partials, Potency, SurfaceField, SurfaceStrain};
use crate::frame::AngleUnit;
use crate::traits::Scalar;
use log::trace;
use nalgebra::Vector3;

/// Surface displacement, strain and tilt due to a buried point source.
///
/// `alpha` is μ/(λ+μ). `x`, `y` are station coordinates in the fault frame,
/// `depth` the source depth and `sd`, `cd` the (already snapped) sine and
/// cosine of dip. The result is per unit area of dislocation.
pub fn spoint<T: Scalar>(
    alpha: T,
    x: T,
    y: T,
    depth: T,
    sd: T,
    cd: T,
    disl: &Dislocation<T>,
    compute_strain: bool,
) -> OkadaResult<SurfaceField<T>> {
    let d = depth;
    let one = T::one();
    let two = T::c(2.0);
    let three = T::c(3.0);
    let five = T::c(5.0);

    let p = y * cd + d * sd;
    let q = y * sd - d * cd;
    let x2 = x * x;
    let y2 = y * y;
    let xy = x * y;
    let d2 = d * d;
    let r2 = x2 + y2 + d2;
    if r2 == T::zero() {
        return Err(OkadaError::SingularGeometry(Singularity::SourceCoincident));
    }
    let r = r2.sqrt();
    let r3 = r2 * r;
    let r5 = r3 * r2;
    let qr = three * q / r5;
    let rd = r + d;
    let r12 = (r * rd * rd).recip();
    let r32 = r12 * (two * r + d) / r2;
    let r33 = r12 * (three * r + d) / (r2 * rd);

    let a1 = alpha * y * (r12 - x2 * r33);
    let a2 = alpha * x * (r12 - y2 * r33);
    let a3 = alpha * x / r3 - a2;
    let a4 = -alpha * xy * r32;
    let a5 = alpha * ((r * rd).recip() - x2 * r32);

    let r4 = r2 * r2;
    let s = p * sd + q * cd;
    let xr = five * x2 / r2;
    let yr = five * y2 / r2;
    let xyr = five * xy / r2;
    let dr = five * d / r2;
    let r53 = r12 * (T::c(8.0) * r2 + T::c(9.0) * r * d + three * d2) / (r4 * rd);
    let r54 = r12 * (five * r2 + T::c(4.0) * r * d + d2) / r3 * r12;

    let b1 = alpha * (-three * xy * r33 + three * x2 * xy * r54);
    let b2 = alpha * (r3.recip() - three * r12 + three * x2 * y2 * r54);
    let b3 = alpha * (r3.recip() - three * x2 / r5) - b2;
    let b4 = -alpha * three * xy / r5 - b1;
    let c1 = -alpha * y * (r32 - x2 * r53);
    let c2 = -alpha * x * (r32 - y2 * r53);
    let c3 = -alpha * three * x * d / r5 - c2;

    let mut field = SurfaceField::zero(compute_strain);
    let pi2 = T::c(PI2);

    if !disl.strike.is_zero() {
        let qrx = qr * x;
        let fx = three * x / r5 * sd;
        field.add_scaled(
            -disl.strike / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    qrx * x + a1 * sd,
                    qrx * y + a2 * sd,
                    qrx * d + a4 * sd,
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: qrx * (two - xr) + b1 * sd,
                    uxy: -qrx * xyr + fx * x + b2 * sd,
                    uyx: qr * y * (one - xr) + b2 * sd,
                    uyy: qrx * (one - yr) + fx * y + b4 * sd,
                    uzx: qr * d * (one - xr) + c1 * sd,
                    uzy: -qrx * dr * y + fx * d + c2 * sd,
                }),
            },
        );
    }

    if !disl.dip.is_zero() {
        let sdcd = sd * cd;
        let qrp = qr * p;
        let fs = three * s / r5;
        field.add_scaled(
            -disl.dip / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    qrp * x - a3 * sdcd,
                    qrp * y - a1 * sdcd,
                    qrp * d - a5 * sdcd,
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: qrp * (one - xr) - b3 * sdcd,
                    uxy: -qrp * xyr + fs * x - b1 * sdcd,
                    uyx: -qrp * xyr - b1 * sdcd,
                    uyy: qrp * (one - yr) + fs * y - b2 * sdcd,
                    uzx: -qrp * dr * x - c3 * sdcd,
                    uzy: -qrp * dr * y + fs * d - c1 * sdcd,
                }),
            },
        );
    }

    if !disl.tensile.is_zero() {
        let sdsd = sd * sd;
        let qrq = qr * q;
        let fq = two * qr * sd;
        field.add_scaled(
            disl.tensile / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    qrq * x - a3 * sdsd,
                    qrq * y - a1 * sdsd,
                    qrq * d - a5 * sdsd,
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: qrq * (one - xr) - b3 * sdsd,
                    uxy: -qrq * xyr + fq * x - b1 * sdsd,
                    uyx: -qrq * xyr - b1 * sdsd,
                    uyy: qrq * (one - yr) + fq * y - b2 * sdsd,
                    uzx: -qrq * dr * x - c3 * sdsd,
                    uzy: -qrq * dr * y + fq * d - c1 * sdsd,
                }),
            },
        );
    }

    Ok(field)
}

/// Displacement and its gradient at depth due to a buried point source.
///
/// `alpha` is (λ+μ)/(λ+2μ), `z ≤ 0` the station depth coordinate, `depth`
/// the source depth and `dip` the dip angle in `unit`. The potencies are
/// moment/μ for the double-couple parts, isotropic intensity/λ for the
/// tensile part and linear-dipole intensity/μ for inflation.
///
/// A non-normal status comes with an all-zero field.
pub fn dc3d0<T: Scalar>(
    alpha: T,
    x: T,
    y: T,
    z: T,
    depth: T,
    dip: T,
    unit: AngleUnit,
    pot: &Potency<T>,
    compute_strain: bool,
) -> (FieldResult<T>, Status) {
    if z > T::zero() {
        trace!("dc3d0: station above the free surface (z = {})", z.value());
        return (FieldResult::zero(compute_strain), Status::PositiveZ);
    }

    let dip = DipConstants::new(alpha, dip, unit);

    let real = match PointGeometry::new(x, y, depth + z, &dip) {
        Ok(geometry) => geometry,
        Err(_) => {
            trace!("dc3d0: station coincides with the source");
            return (FieldResult::zero(compute_strain), Status::Singular);
        }
    };
    let image = match PointGeometry::new(x, y, depth - z, &dip) {
        Ok(geometry) => geometry,
        Err(_) => {
            trace!("dc3d0: station coincides with the image source");
            return (FieldResult::zero(compute_strain), Status::Singular);
        }
    };

    // Real source: the z-derivative of the infinite-medium term flips sign.
    let ua = terms::ua0(&real, &dip, pot, compute_strain);
    let mut total = Partials::zero();
    total.add_scaled(-T::one(), &ua);
    total.dz = ua.dz;

    let ua = terms::ua0(&image, &dip, pot, compute_strain);
    let ub = terms::ub0(&image, z, &dip, pot, compute_strain);
    let uc = terms::uc0(&image, z, &dip, pot, compute_strain);
    total.add_scaled(T::one(), &ua);
    total.add_scaled(T::one(), &ub);
    total.add_scaled(z, &uc);
    for (dz, u) in total.dz.iter_mut().zip(uc.u) {
        *dz = *dz + u;
    }

    (total.into_field(compute_strain), Status::Normal)
}
