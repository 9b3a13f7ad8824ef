//! Exact first and second derivatives of the field with respect to any
//! observation coordinate or fault parameter.
//!
//! The evaluator is generic over [`Scalar`](crate::traits::Scalar), so it is
//! simply re-run on dual numbers: [`Dual`] for gradients and
//! `Dual<Dual>` for Hessians. Angle derivatives are per unit of
//! [`EvaluationOptions::angle_unit`].

use crate::autodiff::Dual;
use crate::error::{OkadaError, OkadaResult};
use crate::model::{
    check_batch, evaluate_with_status, map_points, report_masked, EvaluationOptions,
    FaultParams, ObservationPoint, PointEvaluation,
};
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A differentiable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    X,
    Y,
    Z,
    XFault,
    YFault,
    Depth,
    Strike,
    Dip,
    Rake,
    Slip,
    Length,
    Width,
    Tensile,
    Inflation,
}

impl Variable {
    pub const ALL: [Variable; 14] = [
        Variable::X,
        Variable::Y,
        Variable::Z,
        Variable::XFault,
        Variable::YFault,
        Variable::Depth,
        Variable::Strike,
        Variable::Dip,
        Variable::Rake,
        Variable::Slip,
        Variable::Length,
        Variable::Width,
        Variable::Tensile,
        Variable::Inflation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
            Variable::Z => "z",
            Variable::XFault => "x_fault",
            Variable::YFault => "y_fault",
            Variable::Depth => "depth",
            Variable::Strike => "strike",
            Variable::Dip => "dip",
            Variable::Rake => "rake",
            Variable::Slip => "slip",
            Variable::Length => "length",
            Variable::Width => "width",
            Variable::Tensile => "tensile",
            Variable::Inflation => "inflation",
        }
    }

    pub fn is_coordinate(self) -> bool {
        matches!(self, Variable::X | Variable::Y | Variable::Z)
    }

    /// The input this variable names. Absent optional inputs (`z` at the
    /// surface, `length`/`width` of a point source) cannot be
    /// differentiated; absent source strengths are taken as zero.
    fn slot<'a, T: Scalar>(
        self,
        point: &'a mut ObservationPoint<T>,
        fault: &'a mut FaultParams<T>,
    ) -> OkadaResult<&'a mut T> {
        let slot = match self {
            Variable::X => Some(&mut point.x),
            Variable::Y => Some(&mut point.y),
            Variable::Z => point.z.as_mut(),
            Variable::XFault => Some(&mut fault.x_fault),
            Variable::YFault => Some(&mut fault.y_fault),
            Variable::Depth => Some(&mut fault.depth),
            Variable::Strike => Some(&mut fault.strike),
            Variable::Dip => Some(&mut fault.dip),
            Variable::Rake => Some(&mut fault.rake),
            Variable::Slip => Some(&mut fault.slip),
            Variable::Length => fault.length.as_mut(),
            Variable::Width => fault.width.as_mut(),
            Variable::Tensile => Some(fault.tensile.get_or_insert(T::zero())),
            Variable::Inflation => Some(fault.inflation.get_or_insert(T::zero())),
        };
        slot.ok_or_else(|| {
            let reason = if self.is_coordinate() {
                "surface observations have no z"
            } else {
                "a point source has no length or width"
            };
            OkadaError::invalid_argument(format!("cannot differentiate by '{self}': {reason}"))
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = OkadaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| OkadaError::invalid_argument(format!("unknown variable '{s}'")))
    }
}

/// ∂(field)/∂`variable` at every point.
pub fn gradient(
    points: &[ObservationPoint<f64>],
    fault: &FaultParams<f64>,
    variable: Variable,
    options: &EvaluationOptions,
) -> OkadaResult<Vec<PointEvaluation<f64>>> {
    check_batch(points, fault, options)?;
    let evaluations = map_points(points, |point| {
        let mut point = point.map(Dual::constant);
        let mut fault = fault.map(Dual::constant);
        variable.slot(&mut point, &mut fault)?.eps = 1.0;

        let (field, status) = evaluate_with_status(&point, &fault, options)?;
        Ok(PointEvaluation::new(field.map(|v| v.eps), status))
    })?;
    report_masked(&evaluations);
    Ok(evaluations)
}

/// ∂²(field)/∂`first`∂`second` at every point. The two variables may be any
/// mix of coordinates and fault parameters.
pub fn hessian(
    points: &[ObservationPoint<f64>],
    fault: &FaultParams<f64>,
    first: Variable,
    second: Variable,
    options: &EvaluationOptions,
) -> OkadaResult<Vec<PointEvaluation<f64>>> {
    check_batch(points, fault, options)?;
    let constant = |v: f64| Dual::constant(Dual::constant(v));
    let evaluations = map_points(points, |point| {
        let mut point = point.map(constant);
        let mut fault = fault.map(constant);
        // Outer tangent follows `first`, inner tangent `second`.
        first.slot(&mut point, &mut fault)?.eps.val = 1.0;
        second.slot(&mut point, &mut fault)?.val.eps = 1.0;

        let (field, status) = evaluate_with_status(&point, &fault, options)?;
        Ok(PointEvaluation::new(field.map(|v| v.eps.eps), status))
    })?;
    report_masked(&evaluations);
    Ok(evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;
    use crate::field::FieldResult;
    use crate::model::evaluate;

    fn assert_err_contains<T: std::fmt::Debug>(result: OkadaResult<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    fn rectangle() -> FaultParams<f64> {
        FaultParams::point(0.5, -1.0, 4.0, 25.0, 60.0, 70.0, 1.2).with_extent(3.0, 2.0)
    }

    fn only_field(evaluations: Vec<PointEvaluation<f64>>) -> FieldResult<f64> {
        assert_eq!(evaluations.len(), 1);
        assert_eq!(evaluations[0].status, Status::Normal);
        evaluations[0].field.expect("normal status")
    }

    #[test]
    fn variables_round_trip_through_their_names() {
        for variable in Variable::ALL {
            assert_eq!(variable.name().parse::<Variable>().ok(), Some(variable));
        }
        assert_err_contains("moment".parse::<Variable>(), "unknown variable 'moment'");
    }

    #[test]
    fn coordinate_gradient_matches_analytic_displacement_gradient() {
        let fault = rectangle();
        let options = EvaluationOptions::default();
        let point = ObservationPoint::buried(2.0, 1.5, -1.3);
        let analytic = evaluate(&point, &fault, &options)
            .expect("regular point")
            .gradient
            .expect("gradient requested");

        for (column, variable) in [Variable::X, Variable::Y, Variable::Z].into_iter().enumerate() {
            let field = only_field(gradient(&[point], &fault, variable, &options).expect("valid"));
            for i in 0..3 {
                assert_close(field.displacement[i], analytic[(i, column)], 1e-12);
            }
        }
    }

    #[test]
    fn surface_gradient_matches_in_plane_strain() {
        let fault = FaultParams::point(0.0, 0.0, 2.0, 40.0, 35.0, -60.0, 1.0);
        let options = EvaluationOptions::default();
        let point = ObservationPoint::surface(1.2, -0.4);
        let analytic = evaluate(&point, &fault, &options)
            .expect("regular point")
            .gradient
            .expect("gradient requested");
        let dx = only_field(gradient(&[point], &fault, Variable::X, &options).expect("valid"));
        let dy = only_field(gradient(&[point], &fault, Variable::Y, &options).expect("valid"));
        for i in 0..3 {
            assert_close(dx.displacement[i], analytic[(i, 0)], 1e-12);
            assert_close(dy.displacement[i], analytic[(i, 1)], 1e-12);
        }
    }

    #[test]
    fn parameter_gradients_match_finite_differences() {
        let fault = rectangle();
        let options = EvaluationOptions::default();
        let point = ObservationPoint::buried(2.0, 1.5, -1.3);
        let h = 1e-6;

        for variable in [
            Variable::Strike,
            Variable::Dip,
            Variable::Depth,
            Variable::Length,
            Variable::Tensile,
        ] {
            let ad = only_field(gradient(&[point], &fault, variable, &options).expect("valid"));
            let shifted = |delta: f64| {
                let mut point = point;
                let mut fault = fault;
                *variable.slot(&mut point, &mut fault).expect("present") += delta;
                evaluate(&point, &fault, &options).expect("regular point")
            };
            let plus = shifted(h).components();
            let minus = shifted(-h).components();
            for (i, value) in ad.components().into_iter().enumerate() {
                assert_close(value, (plus[i] - minus[i]) / (2.0 * h), 1e-7);
            }
        }
    }

    #[test]
    fn mixed_hessian_is_symmetric() {
        let fault = rectangle();
        let options = EvaluationOptions::default();
        let points = [ObservationPoint::buried(-1.0, 3.0, -0.5)];
        let a = only_field(
            hessian(&points, &fault, Variable::X, Variable::Depth, &options).expect("valid"),
        );
        let b = only_field(
            hessian(&points, &fault, Variable::Depth, Variable::X, &options).expect("valid"),
        );
        for (a, b) in a.components().into_iter().zip(b.components()) {
            assert_close(a, b, 1e-12);
        }
    }

    #[test]
    fn diagonal_hessian_matches_differenced_gradient() {
        let fault = FaultParams::point(0.0, 0.0, 3.0, 10.0, 45.0, 90.0, 1.0);
        let options = EvaluationOptions::default();
        let point = ObservationPoint::buried(1.0, 2.0, -0.5);
        let h = 1e-5;

        let hess = only_field(
            hessian(&[point], &fault, Variable::Y, Variable::Y, &options).expect("valid"),
        );
        let grad_at = |y: f64| {
            let p = ObservationPoint::buried(1.0, y, -0.5);
            only_field(gradient(&[p], &fault, Variable::Y, &options).expect("valid")).components()
        };
        let plus = grad_at(2.0 + h);
        let minus = grad_at(2.0 - h);
        for (i, value) in hess.components().into_iter().enumerate() {
            assert_close(value, (plus[i] - minus[i]) / (2.0 * h), 1e-6);
        }
    }

    #[test]
    fn displacement_is_linear_in_slip() {
        let fault = rectangle();
        let options = EvaluationOptions::default();
        let points = [ObservationPoint::surface(2.0, 2.0)];
        let second = only_field(
            hessian(&points, &fault, Variable::Slip, Variable::Slip, &options).expect("valid"),
        );
        assert!(second.components().iter().all(|v| v.abs() < 1e-15));
    }

    #[test]
    fn unavailable_variables_are_rejected() {
        let options = EvaluationOptions::default();
        let surface = [ObservationPoint::surface(1.0, 1.0)];
        assert_err_contains(
            gradient(&surface, &rectangle(), Variable::Z, &options),
            "cannot differentiate by 'z'",
        );
        let point_source = FaultParams::point(0.0, 0.0, 2.0, 0.0, 45.0, 0.0, 1.0);
        assert_err_contains(
            hessian(&surface, &point_source, Variable::X, Variable::Width, &options),
            "cannot differentiate by 'width'",
        );
    }

    #[test]
    fn masked_points_carry_no_derivative() {
        let fault = FaultParams::point(0.0, 0.0, 2.0, 0.0, 90.0, 0.0, 1.0);
        let points = [
            ObservationPoint::buried(0.0, 0.0, -2.0),
            ObservationPoint::buried(1.0, 0.0, 0.2),
            ObservationPoint::buried(1.0, 1.0, -1.0),
        ];
        let evaluations =
            gradient(&points, &fault, Variable::X, &EvaluationOptions::default()).expect("valid");
        let statuses: Vec<Status> = evaluations.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![Status::Singular, Status::PositiveZ, Status::Normal]
        );
        assert!(evaluations[0].field.is_none());
        assert!(evaluations[2].field.is_some());
    }
}
