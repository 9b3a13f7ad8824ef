//! Sub-kernels of the buried point source: the infinite-medium term (A),
//! the image-source correction (B) and the depth-gradient correction (C).
//!
//! Each returns the displacement and its x-, y-, z-derivatives in the fault
//! frame, already multiplied by potency / 2π and summed over the four source
//! types.

use crate::constants::{DipConstants, PointGeometry};
use crate::field::{Partials, Potency};
use crate::traits::Scalar;

pub(super) fn ua0<T: Scalar>(
    g: &PointGeometry<T>,
    c: &DipConstants<T>,
    pot: &Potency<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (x, y, d) = (g.x, g.y, g.d);
    let (p, q, s, t) = (g.p, g.q, g.s, g.t);
    let (xy, x2, r3, r5, qr, qrx) = (g.xy, g.x2, g.r3, g.r5, g.qr, g.qrx);
    let (a3, a5, b3, c3) = (g.a3, g.a5, g.b3, g.c3);
    let (alp1, alp2, sd, cd, s2d, c2d) = (c.alp1, c.alp2, c.sd, c.cd, c.s2d, c.c2d);
    let one = T::one();
    let three = T::c(3.0);

    let mut out = Partials::zero();

    out.add_source(pot.strike, || {
        let (uy, uz) = (g.uy, g.uz);
        Partials::new(
            [
                alp1 * q / r3 + alp2 * x2 * qr,
                alp1 * x / r3 * sd + alp2 * xy * qr,
                -alp1 * x / r3 * cd + alp2 * x * d * qr,
            ],
            with_gradient.then(|| {
                let f = three * x / r5;
                [
                    [
                        x * qr * (-alp1 + alp2 * (one + a5)),
                        alp1 * a3 / r3 * sd + alp2 * y * qr * a5,
                        -alp1 * a3 / r3 * cd + alp2 * d * qr * a5,
                    ],
                    [
                        alp1 * (sd / r3 - y * qr) + alp2 * three * x2 / r5 * uy,
                        f * (-alp1 * y * sd + alp2 * (y * uy + q)),
                        f * (alp1 * y * cd + alp2 * d * uy),
                    ],
                    [
                        alp1 * (cd / r3 + d * qr) + alp2 * three * x2 / r5 * uz,
                        f * (alp1 * d * sd + alp2 * y * uz),
                        f * (-alp1 * d * cd + alp2 * (d * uz - q)),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.dip, || {
        let (vy, vz) = (g.vy, g.vz);
        Partials::new(
            [
                alp2 * x * p * qr,
                alp1 * s / r3 + alp2 * y * p * qr,
                -alp1 * t / r3 + alp2 * d * p * qr,
            ],
            with_gradient.then(|| {
                [
                    [
                        alp2 * p * qr * a5,
                        -alp1 * three * x * s / r5 - alp2 * y * p * qrx,
                        alp1 * three * x * t / r5 - alp2 * d * p * qrx,
                    ],
                    [
                        alp2 * three * x / r5 * vy,
                        alp1 * (s2d / r3 - three * y * s / r5)
                            + alp2 * (three * y / r5 * vy + p * qr),
                        -alp1 * (c2d / r3 - three * y * t / r5) + alp2 * three * d / r5 * vy,
                    ],
                    [
                        alp2 * three * x / r5 * vz,
                        alp1 * (c2d / r3 + three * d * s / r5) + alp2 * three * y / r5 * vz,
                        alp1 * (s2d / r3 - three * d * t / r5)
                            + alp2 * (three * d / r5 * vz - p * qr),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.tensile, || {
        let (wy, wz) = (g.wy, g.wz);
        Partials::new(
            [
                alp1 * x / r3 - alp2 * x * q * qr,
                alp1 * t / r3 - alp2 * y * q * qr,
                alp1 * s / r3 - alp2 * d * q * qr,
            ],
            with_gradient.then(|| {
                [
                    [
                        alp1 * a3 / r3 - alp2 * q * qr * a5,
                        -alp1 * three * x * t / r5 + alp2 * y * q * qrx,
                        -alp1 * three * x * s / r5 + alp2 * d * q * qrx,
                    ],
                    [
                        -alp1 * three * xy / r5 - alp2 * x * qr * wy,
                        alp1 * (c2d / r3 - three * y * t / r5) - alp2 * (y * wy + q) * qr,
                        alp1 * (s2d / r3 - three * y * s / r5) - alp2 * d * qr * wy,
                    ],
                    [
                        alp1 * three * x * d / r5 - alp2 * x * qr * wz,
                        -alp1 * (s2d / r3 - three * d * t / r5) - alp2 * y * qr * wz,
                        alp1 * (c2d / r3 + three * d * s / r5) - alp2 * (d * wz - q) * qr,
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.inflation, || {
        Partials::new(
            [-alp1 * x / r3, -alp1 * y / r3, -alp1 * d / r3],
            with_gradient.then(|| {
                let exy = alp1 * three * xy / r5;
                let exz = alp1 * three * x * d / r5;
                let eyz = alp1 * three * y * d / r5;
                [
                    [-alp1 * a3 / r3, exy, exz],
                    [exy, -alp1 * b3 / r3, eyz],
                    [-exz, -eyz, alp1 * c3 / r3],
                ]
            }),
        )
    });

    out
}

pub(super) fn ub0<T: Scalar>(
    g: &PointGeometry<T>,
    z: T,
    c: &DipConstants<T>,
    pot: &Potency<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (x, y, d) = (g.x, g.y, g.d);
    let (p, q, xy, x2, y2, d2) = (g.p, g.q, g.xy, g.x2, g.y2, g.d2);
    let (r, r2, r3, r5, qr, qrx) = (g.r, g.r2, g.r3, g.r5, g.qr, g.qrx);
    let (a3, a5, b3, c3) = (g.a3, g.a5, g.b3, g.c3);
    let (alp3, sd, sdsd, sdcd) = (c.alp3, c.sd, c.sdsd, c.sdcd);
    let one = T::one();
    let two = T::c(2.0);
    let three = T::c(3.0);

    let cc = d + z;
    let rd = r + d;
    let d12 = (r * rd * rd).recip();
    let d32 = d12 * (two * r + d) / r2;
    let d33 = d12 * (three * r + d) / (r2 * rd);

    let fi1 = y * (d12 - x2 * d33);
    let fi2 = x * (d12 - y2 * d33);
    let fi3 = x / r3 - fi2;
    let fi4 = -xy * d32;
    let fi5 = (r * rd).recip() - x2 * d32;

    let d53 = d12 * (T::c(8.0) * r2 + T::c(9.0) * r * d + three * d2) / (r2 * r2 * rd);
    let d54 = d12 * (T::c(5.0) * r2 + T::c(4.0) * r * d + d2) / r3 * d12;
    let fj1 = -three * xy * (d33 - x2 * d54);
    let fj2 = r3.recip() - three * d12 + three * x2 * y2 * d54;
    let fj3 = a3 / r3 - fj2;
    let fj4 = -three * xy / r5 - fj1;
    let fk1 = -y * (d32 - x2 * d53);
    let fk2 = -x * (d32 - y2 * d53);
    let fk3 = -three * x * d / r5 - fk2;

    let mut out = Partials::zero();

    out.add_source(pot.strike, || {
        let (uy, uz) = (g.uy, g.uz);
        Partials::new(
            [
                -x2 * qr - alp3 * fi1 * sd,
                -xy * qr - alp3 * fi2 * sd,
                -cc * x * qr - alp3 * fi4 * sd,
            ],
            with_gradient.then(|| {
                [
                    [
                        -x * qr * (one + a5) - alp3 * fj1 * sd,
                        -y * qr * a5 - alp3 * fj2 * sd,
                        -cc * qr * a5 - alp3 * fk1 * sd,
                    ],
                    [
                        -three * x2 / r5 * uy - alp3 * fj2 * sd,
                        -three * xy / r5 * uy - x * qr - alp3 * fj4 * sd,
                        -three * cc * x / r5 * uy - alp3 * fk2 * sd,
                    ],
                    [
                        -three * x2 / r5 * uz + alp3 * fk1 * sd,
                        -three * xy / r5 * uz + alp3 * fk2 * sd,
                        three * x / r5 * (-cc * uz + alp3 * y * sd),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.dip, || {
        let (vy, vz) = (g.vy, g.vz);
        Partials::new(
            [
                -x * p * qr + alp3 * fi3 * sdcd,
                -y * p * qr + alp3 * fi1 * sdcd,
                -cc * p * qr + alp3 * fi5 * sdcd,
            ],
            with_gradient.then(|| {
                [
                    [
                        -p * qr * a5 + alp3 * fj3 * sdcd,
                        y * p * qrx + alp3 * fj1 * sdcd,
                        cc * p * qrx + alp3 * fk3 * sdcd,
                    ],
                    [
                        -three * x / r5 * vy + alp3 * fj1 * sdcd,
                        -three * y / r5 * vy - p * qr + alp3 * fj2 * sdcd,
                        -three * cc / r5 * vy + alp3 * fk1 * sdcd,
                    ],
                    [
                        -three * x / r5 * vz - alp3 * fk3 * sdcd,
                        -three * y / r5 * vz - alp3 * fk1 * sdcd,
                        -three * cc / r5 * vz + alp3 * a3 / r3 * sdcd,
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.tensile, || {
        let (wy, wz) = (g.wy, g.wz);
        Partials::new(
            [
                x * q * qr - alp3 * fi3 * sdsd,
                y * q * qr - alp3 * fi1 * sdsd,
                cc * q * qr - alp3 * fi5 * sdsd,
            ],
            with_gradient.then(|| {
                [
                    [
                        q * qr * a5 - alp3 * fj3 * sdsd,
                        -y * q * qrx - alp3 * fj1 * sdsd,
                        -cc * q * qrx - alp3 * fk3 * sdsd,
                    ],
                    [
                        x * qr * wy - alp3 * fj1 * sdsd,
                        qr * (y * wy + q) - alp3 * fj2 * sdsd,
                        cc * qr * wy - alp3 * fk1 * sdsd,
                    ],
                    [
                        x * qr * wz + alp3 * fk3 * sdsd,
                        y * qr * wz + alp3 * fk1 * sdsd,
                        cc * qr * wz - alp3 * a3 / r3 * sdsd,
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.inflation, || {
        Partials::new(
            [alp3 * x / r3, alp3 * y / r3, alp3 * d / r3],
            with_gradient.then(|| {
                let exy = -alp3 * three * xy / r5;
                let exz = -alp3 * three * x * d / r5;
                let eyz = -alp3 * three * y * d / r5;
                [
                    [alp3 * a3 / r3, exy, exz],
                    [exy, alp3 * b3 / r3, eyz],
                    [-exz, -eyz, -alp3 * c3 / r3],
                ]
            }),
        )
    });

    out
}

pub(super) fn uc0<T: Scalar>(
    g: &PointGeometry<T>,
    z: T,
    c: &DipConstants<T>,
    pot: &Potency<T>,
    with_gradient: bool,
) -> Partials<T> {
    let (x, y, d) = (g.x, g.y, g.d);
    let (p, q, s, t) = (g.p, g.q, g.s, g.t);
    let (xy, x2, y2, d2) = (g.xy, g.x2, g.y2, g.d2);
    let (r2, r3, r5, qr, qrx) = (g.r2, g.r3, g.r5, g.qr, g.qrx);
    let (a3, a5, c3) = (g.a3, g.a5, g.c3);
    let (alp4, alp5, sd, cd) = (c.alp4, c.alp5, c.sd, c.cd);
    let (sdsd, sdcd, s2d, c2d) = (c.sdsd, c.sdcd, c.s2d, c.c2d);
    let one = T::one();
    let two = T::c(2.0);
    let three = T::c(3.0);
    let five = T::c(5.0);
    let seven = T::c(7.0);
    let ten = T::c(10.0);
    let fifteen = T::c(15.0);

    let cc = d + z;
    let qr5 = five * q / r2;

    let r7 = r5 * r2;
    let q2 = q * q;
    let a7 = one - seven * x2 / r2;
    let b5 = one - five * y2 / r2;
    let b7 = one - seven * y2 / r2;
    let c5 = one - five * d2 / r2;
    let c7 = one - seven * d2 / r2;
    let d7 = two - seven * q2 / r2;
    let qr7 = seven * q / r2;
    let dr5 = five * d / r2;

    let mut out = Partials::zero();

    out.add_source(pot.strike, || {
        Partials::new(
            [
                -alp4 * a3 / r3 * cd + alp5 * cc * qr * a5,
                three * x / r5 * (alp4 * y * cd + alp5 * cc * (sd - y * qr5)),
                three * x / r5 * (-alp4 * y * sd + alp5 * cc * (cd + d * qr5)),
            ],
            with_gradient.then(|| {
                let uyx = three / r5 * (alp4 * y * a5 * cd + alp5 * cc * (a5 * sd - y * qr5 * a7));
                [
                    [
                        alp4 * three * x / r5 * (two + a5) * cd - alp5 * cc * qrx * (two + a7),
                        uyx,
                        three / r5
                            * (-alp4 * y * a5 * sd + alp5 * cc * (a5 * cd + d * qr5 * a7)),
                    ],
                    [
                        uyx,
                        three * x / r5
                            * (alp4 * b5 * cd - alp5 * five * cc / r2 * (two * y * sd + q * b7)),
                        three * x / r5
                            * (-alp4 * b5 * sd
                                + alp5 * five * cc / r2 * (d * b7 * sd - y * c7 * cd)),
                    ],
                    [
                        three / r5
                            * (-alp4 * d * a5 * cd + alp5 * cc * (a5 * cd + d * qr5 * a7)),
                        fifteen * x / r7
                            * (alp4 * y * d * cd + alp5 * cc * (d * b7 * sd - y * c7 * cd)),
                        fifteen * x / r7
                            * (-alp4 * y * d * sd + alp5 * cc * (two * d * cd - q * c7)),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.dip, || {
        Partials::new(
            [
                alp4 * three * x * t / r5 - alp5 * cc * p * qrx,
                -alp4 / r3 * (c2d - three * y * t / r2)
                    + alp5 * three * cc / r5 * (s - y * p * qr5),
                -alp4 * a3 / r3 * sdcd + alp5 * three * cc / r5 * (t + d * p * qr5),
            ],
            with_gradient.then(|| {
                let uyx = three * x / r5
                    * (alp4 * (c2d - five * y * t / r2)
                        - alp5 * five * cc / r2 * (s - y * p * qr7));
                let mixed = alp5 * cc * ((three + a5) * c2d + y * p * dr5 * qr7);
                [
                    [
                        alp4 * three * t / r5 * a5 - alp5 * five * cc * p * qr / r2 * a7,
                        uyx,
                        three * x / r5
                            * (alp4 * (two + a5) * sdcd
                                - alp5 * five * cc / r2 * (t + d * p * qr7)),
                    ],
                    [
                        uyx,
                        three / r5
                            * (alp4 * (two * y * c2d + t * b5)
                                + alp5 * cc * (s2d - ten * y * s / r2 - p * qr5 * b7)),
                        three / r5 * (alp4 * y * a5 * sdcd - mixed),
                    ],
                    [
                        three * x / r5
                            * (-alp4 * (s2d - t * dr5)
                                - alp5 * five * cc / r2 * (t + d * p * qr7)),
                        three / r5 * (-alp4 * (d * b5 * c2d + y * c5 * s2d) - mixed),
                        three / r5
                            * (-alp4 * d * a5 * sdcd
                                - alp5 * cc * (s2d - ten * d * t / r2 + p * qr5 * c7)),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.tensile, || {
        Partials::new(
            [
                three * x / r5 * (-alp4 * s + alp5 * (cc * q * qr5 - z)),
                alp4 / r3 * (s2d - three * y * s / r2)
                    + alp5 * three / r5 * (cc * (t - y + y * q * qr5) - y * z),
                -alp4 / r3 * (one - a3 * sdsd)
                    - alp5 * three / r5 * (cc * (s - d + d * q * qr5) - d * z),
            ],
            with_gradient.then(|| {
                let uyx = three * x / r5
                    * (-alp4 * (s2d - five * y * s / r2)
                        - alp5 * five / r2 * (cc * (t - y + y * q * qr7) - y * z));
                [
                    [
                        -alp4 * three * s / r5 * a5
                            + alp5 * (cc * qr * qr5 * a7 - three * z / r5 * a5),
                        uyx,
                        three * x / r5
                            * (alp4 * (one - (two + a5) * sdsd)
                                + alp5 * five / r2 * (cc * (s - d + d * q * qr7) - d * z)),
                    ],
                    [
                        uyx,
                        three / r5
                            * (-alp4 * (two * y * s2d + s * b5)
                                - alp5
                                    * (cc
                                        * (two * sdsd + ten * y * (t - y) / r2 - q * qr5 * b7)
                                        + z * b5)),
                        three / r5
                            * (alp4 * y * (one - a5 * sdsd)
                                + alp5 * (cc * (three + a5) * s2d - y * dr5 * (cc * d7 + z))),
                    ],
                    [
                        three * x / r5
                            * (-alp4 * (c2d + s * dr5)
                                + alp5
                                    * (five * cc / r2 * (s - d + d * q * qr7) - one - z * dr5)),
                        three / r5
                            * (alp4 * (d * b5 * s2d - y * c5 * c2d)
                                + alp5
                                    * (cc * ((three + a5) * s2d - y * dr5 * d7)
                                        - y * (one + z * dr5))),
                        three / r5
                            * (-alp4 * d * (one - a5 * sdsd)
                                - alp5
                                    * (cc * (c2d + ten * d * (s - d) / r2 - q * qr5 * c7)
                                        + z * (one + c5))),
                    ],
                ]
            }),
        )
    });

    out.add_source(pot.inflation, || {
        Partials::new(
            [
                alp4 * three * x * d / r5,
                alp4 * three * y * d / r5,
                alp4 * c3 / r3,
            ],
            with_gradient.then(|| {
                let uyx = -alp4 * fifteen * xy * d / r7;
                let uzx = -alp4 * three * x / r5 * c5;
                let uzy = -alp4 * three * y / r5 * c5;
                [
                    [alp4 * three * d / r5 * a5, uyx, uzx],
                    [uyx, alp4 * three * d / r5 * b5, uzy],
                    [uzx, uzy, alp4 * three * d / r5 * (two + c5)],
                ]
            }),
        )
    });

    out
}
