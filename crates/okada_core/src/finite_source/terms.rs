//! Indefinite integrals evaluated at one corner (ξ, η) of a rectangular
//! fault: the surface kernel of the 1985 formulation and the three buried
//! sub-kernels (infinite medium, image, depth gradient) of the 1992 one.

use crate::constants::{regularized_reciprocal, DipConstants, FiniteGeometry, PI2};
use crate::error::{OkadaError, OkadaResult, Singularity};
use crate::field::{Dislocation, Partials, SurfaceField, SurfaceStrain};
use crate::traits::Scalar;
use nalgebra::Vector3;

/// Surface displacement, strain and tilt integrand of a finite fault.
pub(super) fn srectg<T: Scalar>(
    alpha: T,
    xi: T,
    et: T,
    q: T,
    sd: T,
    cd: T,
    disl: &Dislocation<T>,
    compute_strain: bool,
) -> OkadaResult<SurfaceField<T>> {
    let zero = T::zero();
    let one = T::one();
    let two = T::c(2.0);
    let half = T::c(0.5);

    let xi2 = xi * xi;
    let et2 = et * et;
    let q2 = q * q;
    let r2 = xi2 + et2 + q2;
    if r2 == zero {
        return Err(OkadaError::SingularGeometry(Singularity::FaultEdge));
    }
    let r = r2.sqrt();
    let d = et * sd - q * cd;
    let y = et * cd + q * sd;
    let ret = (r + et).max(zero);
    let rd = r + d;

    let tt = if q != zero {
        (xi * et / (q * r)).atan()
    } else {
        zero
    };
    let (re, dle) = if ret != zero {
        (ret.recip(), ret.ln())
    } else {
        (zero, -(r - et).ln())
    };
    let rrx = regularized_reciprocal(r * (r + xi));
    let rre = re / r;

    let vertical = cd == zero;
    let (a1, a3, a4, a5) = if !vertical {
        let td = sd / cd;
        let x = (xi2 + q2).sqrt();
        let a5 = if xi == zero {
            zero
        } else {
            alpha * two / cd
                * ((et * (x + q * cd) + x * (r + x) * sd) / (xi * (r + x) * cd)).atan()
        };
        let a4 = alpha / cd * (rd.ln() - sd * dle);
        let a3 = alpha * (y / rd / cd - dle) + td * a4;
        let a1 = -alpha / cd * xi / rd - td * a5;
        (a1, a3, a4, a5)
    } else {
        let rd2 = rd * rd;
        (
            -alpha * half * xi * q / rd2,
            alpha * half * (et / rd + y * q / rd2 - dle),
            -alpha * q / rd,
            -alpha * xi * sd / rd,
        )
    };
    let a2 = -alpha * dle - a3;

    let r3 = r2 * r;
    let rrd = (r * rd).recip();
    let axi = (two * r + xi) * rrx * rrx / r;
    let aet = (two * r + et) * rre * rre / r;
    let (b1, b2, c1, c3) = if !vertical {
        let td = sd / cd;
        let c1 = alpha / cd * xi * (rrd - sd * rre);
        let c3 = alpha / cd * (q * rre - y * rrd);
        (
            alpha / cd * (xi2 * rrd - one) / rd - td * c3,
            alpha / cd * xi * y * rrd / rd - td * c1,
            c1,
            c3,
        )
    } else {
        let rd2 = rd * rd;
        (
            alpha * half * q / rd2 * (two * xi2 * rrd - one),
            alpha * half * xi * sd / rd2 * (two * q2 * rrd - one),
            alpha * xi * q * rrd / rd,
            alpha * sd / rd * (xi2 * rrd - one),
        )
    };
    let b3 = -alpha * xi * rre - b2;
    let b4 = -alpha * (cd / r + q * sd * rre) - b1;
    let c2 = alpha * (-sd / r + q * cd * rre) - c3;

    let mut field = SurfaceField::zero(compute_strain);
    let pi2 = T::c(PI2);

    if !disl.strike.is_zero() {
        let req = rre * q;
        field.add_scaled(
            disl.strike / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    -(req * xi + tt + a1 * sd),
                    -(req * y + q * cd * re + a2 * sd),
                    -(req * d + q * sd * re + a4 * sd),
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: xi2 * q * aet - b1 * sd,
                    uxy: xi2 * xi * (d / (et2 + q2) / r3 - aet * sd) - b2 * sd,
                    uyx: xi * q / r3 * cd + (xi * q2 * aet - b2) * sd,
                    uyy: y * q / r3 * cd
                        + (q * sd * (q2 * aet - two * rre) - (xi2 + et2) / r3 * cd - b4) * sd,
                    uzx: -xi * q2 * aet * cd + (xi * q / r3 - c1) * sd,
                    uzy: d * q / r3 * cd
                        + (xi2 * q * aet * cd - sd / r + y * q / r3 - c2) * sd,
                }),
            },
        );
    }

    if !disl.dip.is_zero() {
        let sdcd = sd * cd;
        field.add_scaled(
            disl.dip / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    -(q / r - a3 * sdcd),
                    -(y * q * rrx + cd * tt - a1 * sdcd),
                    -(d * q * rrx + sd * tt - a5 * sdcd),
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: xi * q / r3 + b3 * sdcd,
                    uxy: y * q / r3 - sd / r + b1 * sdcd,
                    uyx: y * q / r3 + q * cd * rre + b1 * sdcd,
                    uyy: y * y * q * axi - (two * y * rrx + xi * cd * rre) * sd + b2 * sdcd,
                    uzx: d * q / r3 + q * sd * rre + c3 * sdcd,
                    uzy: y * d * q * axi - (two * d * rrx + xi * sd * rre) * sd + c1 * sdcd,
                }),
            },
        );
    }

    if !disl.tensile.is_zero() {
        let sdsd = sd * sd;
        field.add_scaled(
            disl.tensile / pi2,
            &SurfaceField {
                displacement: Vector3::new(
                    q2 * rre - a3 * sdsd,
                    -d * q * rrx - sd * (xi * q * rre - tt) - a1 * sdsd,
                    y * q * rrx + cd * (xi * q * rre - tt) - a5 * sdsd,
                ),
                strain: compute_strain.then(|| SurfaceStrain {
                    uxx: -(xi * q2 * aet + b3 * sdsd),
                    uxy: -(-d * q / r3 - xi2 * q * aet * sd + b1 * sdsd),
                    uyx: -(q2 * (cd / r3 + q * aet * sd) + b1 * sdsd),
                    uyy: -((y * cd - d * sd) * q2 * axi
                        - two * q * sd * cd * rrx
                        - (xi * q2 * aet - b2) * sdsd),
                    uzx: -(q2 * (sd / r3 - q * aet * cd) + c3 * sdsd),
                    uzy: -((y * sd + d * cd) * q2 * axi + xi * q2 * aet * sd * cd
                        - (two * q * rrx - c1) * sdsd),
                }),
            },
        );
    }

    Ok(field)
}

pub(super) fn ua<T: Scalar>(
    g: &FiniteGeometry<T>,
    c: &DipConstants<T>,
    disl: &Dislocation<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (xi, et, q) = (g.xi, g.et, g.q);
    let (xi2, q2, r, r3, y, d) = (g.xi2, g.q2, g.r, g.r3, g.y, g.d);
    let (tt, alx, ale, x11, y11, y32) = (g.tt, g.alx, g.ale, g.x11, g.y11, g.y32);
    let (ey, ez, fy, fz, gy, gz, hy, hz) = (g.ey, g.ez, g.fy, g.fz, g.gy, g.gz, g.hy, g.hz);
    let (alp1, alp2, sd, cd) = (c.alp1, c.alp2, c.sd, c.cd);
    let half = T::c(0.5);

    let qx = q * x11;
    let qy = q * y11;
    let xy = xi * y11;

    let mut out = Partials::zero();

    out.add_source(disl.strike, || {
        Partials::new(
            [
                tt * half + alp2 * xi * qy,
                alp2 * q / r,
                alp1 * ale - alp2 * q * qy,
            ],
            with_gradient.then(|| {
                [
                    [
                        -alp1 * qy - alp2 * xi2 * q * y32,
                        -alp2 * xi * q / r3,
                        alp1 * xy + alp2 * xi * q2 * y32,
                    ],
                    [
                        alp1 * xy * sd + alp2 * xi * fy + d * half * x11,
                        alp2 * ey,
                        alp1 * (cd / r + qy * sd) - alp2 * q * fy,
                    ],
                    [
                        alp1 * xy * cd + alp2 * xi * fz + y * half * x11,
                        alp2 * ez,
                        -alp1 * (sd / r - qy * cd) - alp2 * q * fz,
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.dip, || {
        Partials::new(
            [
                alp2 * q / r,
                tt * half + alp2 * et * qx,
                alp1 * alx - alp2 * q * qx,
            ],
            with_gradient.then(|| {
                [
                    [
                        -alp2 * xi * q / r3,
                        -qy * half - alp2 * et * q / r3,
                        alp1 / r + alp2 * q2 / r3,
                    ],
                    [
                        alp2 * ey,
                        alp1 * d * x11 + xy * half * sd + alp2 * et * gy,
                        alp1 * y * x11 - alp2 * q * gy,
                    ],
                    [
                        alp2 * ez,
                        alp1 * y * x11 + xy * half * cd + alp2 * et * gz,
                        -alp1 * d * x11 - alp2 * q * gz,
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.tensile, || {
        Partials::new(
            [
                -alp1 * ale - alp2 * q * qy,
                -alp1 * alx - alp2 * q * qx,
                tt * half - alp2 * (et * qx + xi * qy),
            ],
            with_gradient.then(|| {
                [
                    [
                        -alp1 * xy + alp2 * xi * q2 * y32,
                        -alp1 / r + alp2 * q2 / r3,
                        -alp1 * qy - alp2 * q * q2 * y32,
                    ],
                    [
                        -alp1 * (cd / r + qy * sd) - alp2 * q * fy,
                        -alp1 * y * x11 - alp2 * q * gy,
                        alp1 * (d * x11 + xy * sd) + alp2 * q * hy,
                    ],
                    [
                        alp1 * (sd / r - qy * cd) - alp2 * q * fz,
                        alp1 * d * x11 - alp2 * q * gz,
                        alp1 * (y * x11 + xy * cd) + alp2 * q * hz,
                    ],
                ]
            }),
        )
    });

    out
}

pub(super) fn ub<T: Scalar>(
    g: &FiniteGeometry<T>,
    c: &DipConstants<T>,
    disl: &Dislocation<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (xi, et, q) = (g.xi, g.et, g.q);
    let (xi2, q2, r, r3, y, d) = (g.xi2, g.q2, g.r, g.r3, g.y, g.d);
    let (tt, ale, x11, y11, y32) = (g.tt, g.ale, g.x11, g.y11, g.y32);
    let (ey, ez, fy, fz, gy, gz, hy, hz) = (g.ey, g.ez, g.fy, g.fz, g.gy, g.gz, g.hy, g.hz);
    let (alp3, sd, cd) = (c.alp3, c.sd, c.cd);
    let (sdsd, cdcd, sdcd) = (c.sdsd, c.cdcd, c.sdcd);
    let zero = T::zero();
    let one = T::one();
    let two = T::c(2.0);
    let half = T::c(0.5);

    let rd = r + d;
    let rd2 = rd * rd;
    let vertical = c.is_vertical();

    let (ai3, ai4) = if !vertical {
        let x = (xi2 + q2).sqrt();
        let ai4 = if xi == zero {
            zero
        } else {
            (xi / rd * sdcd
                + two * ((et * (x + q * cd) + x * (r + x) * sd) / (xi * (r + x) * cd)).atan())
                / cdcd
        };
        let ai3 = (y * cd / rd - ale + sd * rd.ln()) / cdcd;
        (ai3, ai4)
    } else {
        ((et / rd + y * q / rd2 - ale) * half, xi * y / rd2 * half)
    };
    let ai1 = -xi / rd * cd - ai4 * sd;
    let ai2 = rd.ln() + ai3 * sd;
    let qx = q * x11;
    let qy = q * y11;
    let xy = xi * y11;

    let d11 = (r * rd).recip();
    let aj2 = xi * y / rd * d11;
    let aj5 = -(d + y * y / rd) * d11;
    let (ak1, ak3, aj3, aj6) = if !vertical {
        let ak1 = xi * (d11 - y11 * sd) / cd;
        let ak3 = (q * y11 - y * d11) / cd;
        (ak1, ak3, (ak1 - aj2 * sd) / cd, (ak3 - aj5 * sd) / cd)
    } else {
        (
            xi * q / rd * d11,
            sd / rd * (xi2 * d11 - one),
            -xi / rd2 * (q2 * d11 - half),
            -y / rd2 * (xi2 * d11 - half),
        )
    };
    let ak2 = r.recip() + ak3 * sd;
    let ak4 = xy * cd - ak1 * sd;
    let aj1 = aj5 * cd - aj6 * sd;
    let aj4 = -xy - aj2 * cd + aj3 * sd;

    let mut out = Partials::zero();

    out.add_source(disl.strike, || {
        Partials::new(
            [
                -xi * qy - tt - alp3 * ai1 * sd,
                -q / r + alp3 * y / rd * sd,
                q * qy - alp3 * ai2 * sd,
            ],
            with_gradient.then(|| {
                [
                    [
                        xi2 * q * y32 - alp3 * aj1 * sd,
                        xi * q / r3 - alp3 * aj2 * sd,
                        -xi * q2 * y32 - alp3 * aj3 * sd,
                    ],
                    [
                        -xi * fy - d * x11 + alp3 * (xy + aj4) * sd,
                        -ey + alp3 * (r.recip() + aj5) * sd,
                        q * fy - alp3 * (qy - aj6) * sd,
                    ],
                    [
                        -xi * fz - y * x11 + alp3 * ak1 * sd,
                        -ez + alp3 * y * d11 * sd,
                        q * fz + alp3 * ak2 * sd,
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.dip, || {
        Partials::new(
            [
                -q / r + alp3 * ai3 * sdcd,
                -et * qx - tt - alp3 * xi / rd * sdcd,
                q * qx + alp3 * ai4 * sdcd,
            ],
            with_gradient.then(|| {
                [
                    [
                        xi * q / r3 + alp3 * aj4 * sdcd,
                        et * q / r3 + qy + alp3 * aj5 * sdcd,
                        -q2 / r3 + alp3 * aj6 * sdcd,
                    ],
                    [
                        -ey + alp3 * aj1 * sdcd,
                        -et * gy - xy * sd + alp3 * aj2 * sdcd,
                        q * gy + alp3 * aj3 * sdcd,
                    ],
                    [
                        -ez - alp3 * ak3 * sdcd,
                        -et * gz - xy * cd - alp3 * xi * d11 * sdcd,
                        q * gz - alp3 * ak4 * sdcd,
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.tensile, || {
        Partials::new(
            [
                q * qy - alp3 * ai3 * sdsd,
                q * qx + alp3 * xi / rd * sdsd,
                et * qx + xi * qy - tt - alp3 * ai4 * sdsd,
            ],
            with_gradient.then(|| {
                [
                    [
                        -xi * q2 * y32 - alp3 * aj4 * sdsd,
                        -q2 / r3 - alp3 * aj5 * sdsd,
                        q * q2 * y32 - alp3 * aj6 * sdsd,
                    ],
                    [
                        q * fy - alp3 * aj1 * sdsd,
                        q * gy - alp3 * aj2 * sdsd,
                        -q * hy - alp3 * aj3 * sdsd,
                    ],
                    [
                        q * fz + alp3 * ak3 * sdsd,
                        q * gz + alp3 * xi * d11 * sdsd,
                        -q * hz + alp3 * ak4 * sdsd,
                    ],
                ]
            }),
        )
    });

    out
}

pub(super) fn uc<T: Scalar>(
    g: &FiniteGeometry<T>,
    z: T,
    c: &DipConstants<T>,
    disl: &Dislocation<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (xi, et, q) = (g.xi, g.et, g.q);
    let (xi2, et2, q2, r, r2, r3, r5) = (g.xi2, g.et2, g.q2, g.r, g.r2, g.r3, g.r5);
    let (y, d, x11, y11, x32, y32) = (g.y, g.d, g.x11, g.y11, g.x32, g.y32);
    let (alp4, alp5, sd, cd) = (c.alp4, c.alp5, c.sd, c.cd);
    let (sdsd, cdcd, sdcd) = (c.sdsd, c.cdcd, c.sdcd);
    let one = T::one();
    let two = T::c(2.0);
    let three = T::c(3.0);

    let cc = d + z;
    let h = q * cd - z;
    let z32 = sd / r3 - h * y32;
    let xy = xi * y11;
    let qy = q * y11;

    let x53 = (T::c(8.0) * r2 + T::c(9.0) * r * xi + three * xi2) * x11 * x11 * x11 / r2;
    let y53 = (T::c(8.0) * r2 + T::c(9.0) * r * et + three * et2) * y11 * y11 * y11 / r2;
    let z53 = three * sd / r5 - h * y53;
    let y0 = y11 - xi2 * y32;
    let z0 = z32 - xi2 * z53;
    let ppy = cd / r3 + q * y32 * sd;
    let ppz = sd / r3 - q * y32 * cd;
    let qq = z * y32 + z32 + z0;
    let qqy = three * cc * d / r5 - qq * sd;
    let qqz = three * cc * y / r5 - qq * cd + q * y32;
    let qr = three * q / r5;
    let cdr = (cc + d) / r3;
    let yy0 = y / r3 - y0 * cd;

    let mut out = Partials::zero();

    out.add_source(disl.strike, || {
        Partials::new(
            [
                alp4 * xy * cd - alp5 * xi * q * z32,
                alp4 * (cd / r + two * qy * sd) - alp5 * cc * q / r3,
                alp4 * qy * cd - alp5 * (cc * et / r3 - z * y11 + xi2 * z32),
            ],
            with_gradient.then(|| {
                [
                    [
                        alp4 * y0 * cd - alp5 * q * z0,
                        -alp4 * xi * (cd / r3 + two * q * y32 * sd) + alp5 * cc * xi * qr,
                        -alp4 * xi * q * y32 * cd + alp5 * xi * (three * cc * et / r5 - qq),
                    ],
                    [
                        -alp4 * xi * ppy * cd - alp5 * xi * qqy,
                        alp4 * two * (d / r3 - y0 * sd) * sd - y / r3 * cd
                            - alp5 * (cdr * sd - et / r3 - cc * y * qr),
                        -alp4 * q / r3
                            + yy0 * sd
                            + alp5 * (cdr * cd + cc * d * qr - (y0 * cd + q * z0) * sd),
                    ],
                    [
                        alp4 * xi * ppz * cd - alp5 * xi * qqz,
                        alp4 * two * (y / r3 - y0 * cd) * sd + d / r3 * cd
                            - alp5 * (cdr * cd + cc * d * qr),
                        yy0 * cd - alp5 * (cdr * sd - cc * y * qr - y0 * sdsd + q * z0 * cd),
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.dip, || {
        Partials::new(
            [
                alp4 * cd / r - qy * sd - alp5 * cc * q / r3,
                alp4 * y * x11 - alp5 * cc * et * q * x32,
                -d * x11 - xy * sd - alp5 * cc * (x11 - q2 * x32),
            ],
            with_gradient.then(|| {
                [
                    [
                        -alp4 * xi / r3 * cd + alp5 * cc * xi * qr + xi * q * y32 * sd,
                        -alp4 * y / r3 + alp5 * cc * et * qr,
                        d / r3 - y0 * sd + alp5 * cc / r3 * (one - three * q2 / r2),
                    ],
                    [
                        -alp4 * et / r3 + y0 * sdsd - alp5 * (cdr * sd - cc * y * qr),
                        alp4 * (x11 - y * y * x32)
                            - alp5 * cc * ((d + two * q * cd) * x32 - y * et * q * x53),
                        xi * ppy * sd
                            + y * d * x32
                            + alp5 * cc * ((y + two * q * sd) * x32 - y * q2 * x53),
                    ],
                    [
                        -q / r3 + y0 * sdcd - alp5 * (cdr * cd + cc * d * qr),
                        alp4 * y * d * x32
                            - alp5 * cc * ((y - two * q * sd) * x32 + d * et * q * x53),
                        -xi * ppz * sd + x11 - d * d * x32
                            - alp5 * cc * ((d - two * q * cd) * x32 - d * q2 * x53),
                    ],
                ]
            }),
        )
    });

    out.add_source(disl.tensile, || {
        Partials::new(
            [
                -alp4 * (sd / r + qy * cd) - alp5 * (z * y11 - q2 * z32),
                alp4 * two * xy * sd + d * x11 - alp5 * cc * (x11 - q2 * x32),
                alp4 * (y * x11 + xy * cd) + alp5 * q * (cc * et * x32 + xi * z32),
            ],
            with_gradient.then(|| {
                [
                    [
                        alp4 * xi / r3 * sd
                            + xi * q * y32 * cd
                            + alp5 * xi * (three * cc * et / r5 - two * z32 - z0),
                        alp4 * two * y0 * sd - d / r3
                            + alp5 * cc / r3 * (one - three * q2 / r2),
                        -alp4 * yy0 - alp5 * (cc * et * qr - q * z0),
                    ],
                    [
                        alp4 * (q / r3 + y0 * sdcd)
                            + alp5 * (z / r3 * cd + cc * d * qr - q * z0 * sd),
                        -alp4 * two * xi * ppy * sd - y * d * x32
                            + alp5 * cc * ((y + two * q * sd) * x32 - y * q2 * x53),
                        -alp4 * (xi * ppy * cd - x11 + y * y * x32)
                            + alp5
                                * (cc * ((d + two * q * cd) * x32 - y * et * q * x53)
                                    + xi * qqy),
                    ],
                    [
                        -et / r3 + y0 * cdcd
                            - alp5 * (z / r3 * sd - cc * y * qr - y0 * sdsd + q * z0 * cd),
                        alp4 * two * xi * ppz * sd - x11 + d * d * x32
                            - alp5 * cc * ((d - two * q * cd) * x32 - d * q2 * x53),
                        alp4 * (xi * ppz * cd + y * d * x32)
                            + alp5
                                * (cc * ((y - two * q * sd) * x32 + d * et * q * x53)
                                    + xi * qqz),
                    ],
                ]
            }),
        )
    });

    out
}
