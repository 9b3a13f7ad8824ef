//! Closed-form response to a uniform dislocation on a rectangular fault.
//!
//! Both formulations integrate a corner kernel over the rectangle as
//! `f(ξ₁, η₁) - f(ξ₂, η₁) - f(ξ₁, η₂) + f(ξ₂, η₂)`.

mod terms;

use crate::constants::{snap, DipConstants, FiniteGeometry, EPS};
use crate::error::{OkadaError, OkadaResult, Singularity, Status};
use crate::field::{Dislocation, FieldResult, Partials, SurfaceField};
use crate::frame::AngleUnit;
use crate::traits::Scalar;
use log::trace;

/// Surface displacement, strain and tilt due to a rectangular fault.
///
/// The fault spans `[0, length]` along strike and `[0, width]` up dip from
/// its deepest reference corner, located at `depth`. `alpha` is μ/(λ+μ).
pub fn srectf<T: Scalar>(
    alpha: T,
    x: T,
    y: T,
    depth: T,
    length: T,
    width: T,
    sd: T,
    cd: T,
    disl: &Dislocation<T>,
    compute_strain: bool,
) -> OkadaResult<SurfaceField<T>> {
    let p = y * cd + depth * sd;
    let q = y * sd - depth * cd;

    let mut field = SurfaceField::zero(compute_strain);
    for (k, et) in [p, p - width].into_iter().enumerate() {
        for (j, xi) in [x, x - length].into_iter().enumerate() {
            let corner = terms::srectg(alpha, xi, et, q, sd, cd, disl, compute_strain)?;
            field.add_scaled(corner_sign(j + k), &corner);
        }
    }
    Ok(field)
}

/// Displacement and its gradient at depth due to a rectangular fault.
///
/// `alpha` is (λ+μ)/(λ+2μ). The fault occupies `al.0 ≤ ξ ≤ al.1` along
/// strike and `aw.0 ≤ η ≤ aw.1` up dip, measured from the reference point at
/// `depth` below the origin. A non-normal status comes with an all-zero
/// field.
pub fn dc3d<T: Scalar>(
    alpha: T,
    x: T,
    y: T,
    z: T,
    depth: T,
    dip: T,
    unit: AngleUnit,
    al: (T, T),
    aw: (T, T),
    disl: &Dislocation<T>,
    compute_strain: bool,
) -> (FieldResult<T>, Status) {
    if z > T::zero() {
        trace!("dc3d: station above the free surface (z = {})", z.value());
        return (FieldResult::zero(compute_strain), Status::PositiveZ);
    }

    let c = DipConstants::new(alpha, dip, unit);
    let xi = [snap(x - al.0), snap(x - al.1)];

    match superpose(&c, xi, y, z, depth, aw, disl, compute_strain) {
        Ok(total) => (total.into_field(compute_strain), Status::Normal),
        Err(err) => {
            trace!("dc3d: {err}");
            (FieldResult::zero(compute_strain), Status::Singular)
        }
    }
}

fn superpose<T: Scalar>(
    c: &DipConstants<T>,
    xi: [T; 2],
    y: T,
    z: T,
    depth: T,
    aw: (T, T),
    disl: &Dislocation<T>,
    compute_strain: bool,
) -> OkadaResult<Partials<T>> {
    let mut total = Partials::zero();

    let real = Corners::new(xi, y, depth + z, aw, c)?;
    real.for_each(c, |sign, g| {
        let ua = terms::ua(g, c, disl, compute_strain);
        total.add_scaled(sign, &real_to_fault_frame(&ua, c.sd, c.cd));
    })?;

    let image = Corners::new(xi, y, depth - z, aw, c)?;
    image.for_each(c, |sign, g| {
        let ua = terms::ua(g, c, disl, compute_strain);
        let ub = terms::ub(g, c, disl, compute_strain);
        let uc = terms::uc(g, z, c, disl, compute_strain);
        total.add_scaled(sign, &image_to_fault_frame(&ua, &ub, &uc, z, c.sd, c.cd));
    })?;

    Ok(total)
}

fn corner_sign<T: Scalar>(index_sum: usize) -> T {
    if index_sum == 1 {
        -T::one()
    } else {
        T::one()
    }
}

/// Fault-plane coordinates of the four corners seen from one source
/// (real or image), with the negative-extension flags of each edge.
struct Corners<T> {
    xi: [T; 2],
    et: [T; 2],
    q: T,
    kxi: [bool; 2],
    ket: [bool; 2],
}

impl<T: Scalar> Corners<T> {
    fn new(xi: [T; 2], y: T, d: T, aw: (T, T), c: &DipConstants<T>) -> OkadaResult<Self> {
        let zero = T::zero();
        let eps = T::c(EPS);
        let p = y * c.cd + d * c.sd;
        let q = snap(y * c.sd - d * c.cd);
        let et = [snap(p - aw.0), snap(p - aw.1)];

        let xi_span = xi[0] * xi[1];
        let et_span = et[0] * et[1];
        if q == zero
            && ((xi_span <= zero && et_span == zero) || (et_span <= zero && xi_span == zero))
        {
            return Err(OkadaError::SingularGeometry(Singularity::FaultEdge));
        }

        let q2 = q * q;
        let r12 = (xi[0] * xi[0] + et[1] * et[1] + q2).sqrt();
        let r21 = (xi[1] * xi[1] + et[0] * et[0] + q2).sqrt();
        let r22 = (xi[1] * xi[1] + et[1] * et[1] + q2).sqrt();

        let kxi = [
            xi[0] < zero && r21 + xi[1] < eps,
            xi[0] < zero && r22 + xi[1] < eps,
        ];
        let ket = [
            et[0] < zero && r12 + et[1] < eps,
            et[0] < zero && r22 + et[1] < eps,
        ];

        Ok(Self {
            xi,
            et,
            q,
            kxi,
            ket,
        })
    }

    fn for_each(
        &self,
        c: &DipConstants<T>,
        mut visit: impl FnMut(T, &FiniteGeometry<T>),
    ) -> OkadaResult<()> {
        for k in 0..2 {
            for j in 0..2 {
                let g = FiniteGeometry::new(
                    self.xi[j], self.et[k], self.q, c.sd, c.cd, self.kxi[k], self.ket[j],
                )?;
                visit(corner_sign(j + k), &g);
            }
        }
        Ok(())
    }
}

/// Real-source term in (strike, dip) axes turned into the x, y, z frame.
fn real_to_fault_frame<T: Scalar>(a: &Partials<T>, sd: T, cd: T) -> Partials<T> {
    let rotate = |b: [T; 3]| [-b[0], -b[1] * cd + b[2] * sd, -b[1] * sd - b[2] * cd];
    Partials {
        u: rotate(a.u),
        dx: rotate(a.dx),
        dy: rotate(a.dy),
        dz: rotate(a.dz).map(|v| -v),
    }
}

/// Image-source terms in (strike, dip) axes turned into the x, y, z frame.
fn image_to_fault_frame<T: Scalar>(
    a: &Partials<T>,
    b: &Partials<T>,
    c: &Partials<T>,
    z: T,
    sd: T,
    cd: T,
) -> Partials<T> {
    let combine = |a: [T; 3], b: [T; 3], c: [T; 3]| {
        let plus = |i: usize| a[i] + b[i] + z * c[i];
        let minus = |i: usize| a[i] + b[i] - z * c[i];
        [
            plus(0),
            plus(1) * cd - plus(2) * sd,
            minus(1) * sd + minus(2) * cd,
        ]
    };

    let mut dz = combine(a.dz, b.dz, c.dz);
    dz[0] = dz[0] + c.u[0];
    dz[1] = dz[1] + c.u[1] * cd - c.u[2] * sd;
    dz[2] = dz[2] - c.u[1] * sd - c.u[2] * cd;

    Partials {
        u: combine(a.u, b.u, c.u),
        dx: combine(a.dx, b.dx, c.dx),
        dy: combine(a.dy, b.dy, c.dy),
        dz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autodiff::Dual;
    use crate::constants::MediumConstants;
    use crate::field::Potency;
    use crate::point_source::dc3d0;

    fn medium() -> MediumConstants<f64> {
        MediumConstants::from_poisson_ratio(0.25).expect("valid ratio")
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    const BURIED_REFERENCE: [f64; 12] = [
        0.04137979151696347,
        -0.03915737197654218,
        0.005747574961717572,
        -0.0034747769551075136,
        -0.004148766486100789,
        0.018830281505476668,
        0.0011466396243333806,
        0.011044300259194641,
        -0.012531443429666188,
        -0.02859154862199957,
        0.03900097014222169,
        -0.014656002993380405,
    ];

    #[test]
    fn buried_station_matches_reference_values() {
        let (field, status) = dc3d(
            medium().alpha_1992,
            2.2,
            -1.4,
            -3.1,
            5.0,
            63.0,
            AngleUnit::Degrees,
            (-1.5, 2.5),
            (-2.0, 1.0),
            &Dislocation::new(0.8, -0.6, 0.3),
            true,
        );
        assert_eq!(status, Status::Normal);
        for (actual, expected) in field.components().into_iter().zip(BURIED_REFERENCE) {
            assert_close(actual, expected, 1e-14);
        }
    }

    #[test]
    fn surface_station_agrees_with_surface_formulation() {
        let m = medium();
        let dip = 40.0f64;
        let (sd, cd) = dip.to_radians().sin_cos();
        let (x, y, depth, length, width) = (1.7, -2.3, 4.0, 3.0, 2.5);

        for disl in [
            Dislocation::new(1.0, 0.0, 0.0),
            Dislocation::new(0.0, 1.0, 0.0),
            Dislocation::new(0.0, 0.0, 1.0),
        ] {
            let surface = srectf(m.alpha_1985, x, y, depth, length, width, sd, cd, &disl, true)
                .expect("regular station");
            let (buried, status) = dc3d(
                m.alpha_1992,
                x,
                y,
                0.0,
                depth,
                dip,
                AngleUnit::Degrees,
                (0.0, length),
                (0.0, width),
                &disl,
                true,
            );
            assert_eq!(status, Status::Normal);
            for i in 0..3 {
                assert_close(buried.displacement[i], surface.displacement[i], 1e-14);
            }
            let strain = surface.strain.expect("strain requested");
            let g = buried.gradient.expect("gradient requested");
            assert_close(g[(0, 0)], strain.uxx, 1e-14);
            assert_close(g[(0, 1)], strain.uxy, 1e-14);
            assert_close(g[(1, 0)], strain.uyx, 1e-14);
            assert_close(g[(1, 1)], strain.uyy, 1e-14);
            assert_close(g[(2, 0)], strain.uzx, 1e-14);
            assert_close(g[(2, 1)], strain.uzy, 1e-14);
        }
    }

    #[test]
    fn surface_tensile_opening_reference() {
        let (sd, cd) = 40.0f64.to_radians().sin_cos();
        let field = srectf(
            0.5,
            1.7,
            -2.3,
            4.0,
            3.0,
            2.5,
            sd,
            cd,
            &Dislocation::new(0.0, 0.0, 1.0),
            true,
        )
        .expect("regular station");
        assert_close(field.displacement[0], 0.005030926054675006, 1e-14);
        assert_close(field.displacement[1], -0.10162730841365705, 1e-14);
        assert_close(field.displacement[2], 0.09817192221296794, 1e-14);
        let strain = field.strain.expect("strain requested");
        assert_close(strain.uzy, 0.04379580216882549, 1e-14);
    }

    #[test]
    fn surface_gradient_satisfies_free_surface_conditions() {
        let nu = 0.25;
        let (field, _) = dc3d(
            medium().alpha_1992,
            1.7,
            -2.3,
            0.0,
            4.0,
            40.0,
            AngleUnit::Degrees,
            (0.0, 3.0),
            (0.0, 2.5),
            &Dislocation::new(0.3, 1.1, -0.4),
            true,
        );
        let g = field.gradient.expect("gradient requested");
        assert_close(g[(0, 2)], -g[(2, 0)], 1e-15);
        assert_close(g[(1, 2)], -g[(2, 1)], 1e-15);
        assert_close(g[(2, 2)], -(g[(0, 0)] + g[(1, 1)]) * nu / (1.0 - nu), 1e-15);
    }

    #[test]
    fn small_fault_converges_to_point_source() {
        let alpha = medium().alpha_1992;
        let h = 0.01;
        let (finite, _) = dc3d(
            alpha,
            1.5,
            -0.8,
            -1.2,
            3.0,
            50.0,
            AngleUnit::Degrees,
            (-h / 2.0, h / 2.0),
            (-h / 2.0, h / 2.0),
            &Dislocation::new(0.7, -0.4, 0.25),
            true,
        );
        let potency = Potency::from(Dislocation::new(0.7, -0.4, 0.25).scaled(h * h));
        let (point, status) = dc3d0(
            alpha,
            1.5,
            -0.8,
            -1.2,
            3.0,
            50.0,
            AngleUnit::Degrees,
            &potency,
            true,
        );
        assert_eq!(status, Status::Normal);
        for (a, b) in finite.components().into_iter().zip(point.components()) {
            assert_close(a / (h * h), b / (h * h), 1e-6);
        }
    }

    #[test]
    fn nearly_vertical_dip_is_continuous_with_vertical() {
        let alpha = medium().alpha_1992;
        let disl = Dislocation::new(1.0, 0.5, 0.2);
        let eval = |dip: f64| {
            dc3d(
                alpha,
                0.6,
                1.1,
                -0.5,
                2.0,
                dip,
                AngleUnit::Degrees,
                (0.0, 2.0),
                (-1.0, 0.0),
                &disl,
                true,
            )
        };
        let (vertical, s1) = eval(90.0);
        let (nearly, s2) = eval(89.9999);
        assert_eq!((s1, s2), (Status::Normal, Status::Normal));
        for (a, b) in vertical.components().into_iter().zip(nearly.components()) {
            assert_close(a, b, 1e-4);
        }
    }

    #[test]
    fn station_on_fault_edge_is_singular() {
        let (field, status) = dc3d(
            medium().alpha_1992,
            0.0,
            0.0,
            -10.0,
            10.0,
            90.0,
            AngleUnit::Degrees,
            (0.0, 4.0),
            (-5.0, 5.0),
            &Dislocation::strike_slip(1.0),
            true,
        );
        assert_eq!(status, Status::Singular);
        assert!(field.components().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn positive_z_is_reported_before_geometry() {
        let (field, status) = dc3d(
            medium().alpha_1992,
            0.0,
            0.0,
            0.5,
            10.0,
            90.0,
            AngleUnit::Degrees,
            (0.0, 4.0),
            (-5.0, 5.0),
            &Dislocation::strike_slip(1.0),
            false,
        );
        assert_eq!(status, Status::PositiveZ);
        assert_eq!(field.components(), vec![0.0; 3]);
    }

    #[test]
    fn dual_tangent_tracks_x_derivative() {
        let alpha = medium().alpha_1992;
        let disl = Dislocation::new(0.8, -0.6, 0.3);
        let (field, _) = dc3d(
            Dual::constant(alpha),
            Dual::variable(2.2),
            Dual::constant(-1.4),
            Dual::constant(-3.1),
            Dual::constant(5.0),
            Dual::constant(63.0),
            AngleUnit::Degrees,
            (Dual::constant(-1.5), Dual::constant(2.5)),
            (Dual::constant(-2.0), Dual::constant(1.0)),
            &Dislocation::new(
                Dual::constant(disl.strike),
                Dual::constant(disl.dip),
                Dual::constant(disl.tensile),
            ),
            true,
        );
        let g = field.gradient.expect("gradient requested");
        for i in 0..3 {
            assert_close(field.displacement[i].eps, g[(i, 0)].val, 1e-12);
        }
    }
}
