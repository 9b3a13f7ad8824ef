//! Evaluation in geographic coordinates.
//!
//! A [`FaultParams`] describes one source in (east, north, up) with strike,
//! dip, rake and slip. [`evaluate`] rotates each observation point into the
//! fault frame, selects one of the four kernels and rotates the result back.
//!
//! Kernel selection:
//! - `length` and `width` present: rectangular fault, otherwise point source.
//! - `z` present: buried (1992) formulation, otherwise surface (1985).

use crate::constants::MediumConstants;
use crate::error::{OkadaError, OkadaResult, Singularity, Status};
use crate::field::{Dislocation, FieldResult, Potency};
use crate::finite_source::{dc3d, srectf};
use crate::frame::{setup, AngleUnit, FaultFrame, FaultOrigin};
use crate::point_source::{dc3d0, spoint};
use crate::traits::Scalar;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    /// Also return the displacement gradient.
    pub compute_strain: bool,
    /// Unit of strike, dip and rake.
    pub angle_unit: AngleUnit,
    /// Which point of a rectangular fault `x_fault`, `y_fault` and `depth`
    /// refer to. Ignored for point sources.
    pub fault_origin: FaultOrigin,
    pub poisson_ratio: f64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            compute_strain: true,
            angle_unit: AngleUnit::Degrees,
            fault_origin: FaultOrigin::TopLeft,
            poisson_ratio: 0.25,
        }
    }
}

impl EvaluationOptions {
    pub fn validate(&self) -> OkadaResult<()> {
        MediumConstants::from_poisson_ratio(self.poisson_ratio).map(|_| ())
    }

    fn medium<T: Scalar>(&self) -> OkadaResult<MediumConstants<T>> {
        MediumConstants::from_poisson_ratio(T::c(self.poisson_ratio))
    }
}

/// Observation point in (east, north, up). `z` is `None` for surface
/// observations and must be ≤ 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint<T> {
    pub x: T,
    pub y: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<T>,
}

impl<T: Scalar> ObservationPoint<T> {
    pub fn surface(x: T, y: T) -> Self {
        Self { x, y, z: None }
    }

    pub fn buried(x: T, y: T, z: T) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> ObservationPoint<U> {
        ObservationPoint {
            x: f(self.x),
            y: f(self.y),
            z: self.z.map(&f),
        }
    }
}

/// Source description. `depth` is positive downward; `slip` is split into
/// strike- and dip-slip by `rake`. `tensile` (opening) and `inflation`
/// (buried point sources only) default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultParams<T> {
    pub x_fault: T,
    pub y_fault: T,
    pub depth: T,
    pub strike: T,
    pub dip: T,
    pub rake: T,
    pub slip: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<T>,
}

impl<T: Scalar> FaultParams<T> {
    /// Point source at (`x_fault`, `y_fault`, `depth`).
    pub fn point(x_fault: T, y_fault: T, depth: T, strike: T, dip: T, rake: T, slip: T) -> Self {
        Self {
            x_fault,
            y_fault,
            depth,
            strike,
            dip,
            rake,
            slip,
            length: None,
            width: None,
            tensile: None,
            inflation: None,
        }
    }

    pub fn with_extent(mut self, length: T, width: T) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> FaultParams<U> {
        FaultParams {
            x_fault: f(self.x_fault),
            y_fault: f(self.y_fault),
            depth: f(self.depth),
            strike: f(self.strike),
            dip: f(self.dip),
            rake: f(self.rake),
            slip: f(self.slip),
            length: self.length.map(&f),
            width: self.width.map(&f),
            tensile: self.tensile.map(&f),
            inflation: self.inflation.map(&f),
        }
    }

    /// `(length, width)` of a rectangular fault, `None` for a point source.
    pub fn extent(&self) -> OkadaResult<Option<(T, T)>> {
        match (self.length, self.width) {
            (Some(length), Some(width)) => Ok(Some((length, width))),
            (None, None) => Ok(None),
            _ => Err(OkadaError::invalid_argument(
                "length and width must be given together",
            )),
        }
    }
}

/// The closed-form solution used for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    SurfacePoint,
    BuriedPoint,
    SurfaceRectangle,
    BuriedRectangle,
}

impl Kernel {
    pub fn select(buried: bool, rectangular: bool) -> Self {
        match (buried, rectangular) {
            (false, false) => Kernel::SurfacePoint,
            (true, false) => Kernel::BuriedPoint,
            (false, true) => Kernel::SurfaceRectangle,
            (true, true) => Kernel::BuriedRectangle,
        }
    }

    pub fn singularity(self) -> Singularity {
        match self {
            Kernel::SurfacePoint | Kernel::BuriedPoint => Singularity::SourceCoincident,
            Kernel::SurfaceRectangle | Kernel::BuriedRectangle => Singularity::FaultEdge,
        }
    }
}

/// Result for one point of a batch; `field` is `None` unless the status is
/// normal.
#[derive(Debug, Clone, PartialEq)]
pub struct PointEvaluation<T> {
    pub status: Status,
    pub field: Option<FieldResult<T>>,
}

impl<T: Scalar> PointEvaluation<T> {
    pub fn new(field: FieldResult<T>, status: Status) -> Self {
        Self {
            status,
            field: status.is_normal().then_some(field),
        }
    }
}

/// Displacement (and gradient) at one point, failing on singular geometry or
/// a point above the free surface.
pub fn evaluate<T: Scalar>(
    point: &ObservationPoint<T>,
    fault: &FaultParams<T>,
    options: &EvaluationOptions,
) -> OkadaResult<FieldResult<T>> {
    let (field, status, kernel) = dispatch(point, fault, options)?;
    let z = point.z.map_or(0.0, |z| z.value());
    status.into_result(z, kernel.singularity())?;
    Ok(field)
}

/// Like [`evaluate`] but reports singular or invalid points through the
/// returned [`Status`] (with an all-zero field) instead of failing.
pub fn evaluate_with_status<T: Scalar>(
    point: &ObservationPoint<T>,
    fault: &FaultParams<T>,
    options: &EvaluationOptions,
) -> OkadaResult<(FieldResult<T>, Status)> {
    dispatch(point, fault, options).map(|(field, status, _)| (field, status))
}

/// Evaluates every point against one fault. Argument errors fail the whole
/// batch; singular points and points above the surface are only masked.
pub fn evaluate_batch<T: Scalar>(
    points: &[ObservationPoint<T>],
    fault: &FaultParams<T>,
    options: &EvaluationOptions,
) -> OkadaResult<Vec<PointEvaluation<T>>> {
    check_batch(points, fault, options)?;
    let evaluations = map_points(points, |point| {
        evaluate_with_status(point, fault, options)
            .map(|(field, status)| PointEvaluation::new(field, status))
    })?;
    report_masked(&evaluations);
    Ok(evaluations)
}

pub(crate) fn check_batch<T: Scalar>(
    points: &[ObservationPoint<T>],
    fault: &FaultParams<T>,
    options: &EvaluationOptions,
) -> OkadaResult<()> {
    options.validate()?;
    fault.extent()?;
    if let Some(first) = points.first() {
        let buried = first.z.is_some();
        if points.iter().any(|p| p.z.is_some() != buried) {
            return Err(OkadaError::invalid_argument(
                "z must be given for every observation point or for none",
            ));
        }
    }
    Ok(())
}

pub(crate) fn map_points<T, U, F>(points: &[ObservationPoint<T>], f: F) -> OkadaResult<Vec<U>>
where
    T: Scalar,
    U: Send,
    F: Fn(&ObservationPoint<T>) -> OkadaResult<U> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if points.len() >= PARALLEL_THRESHOLD {
            return points.par_iter().map(&f).collect();
        }
    }

    points.iter().map(f).collect()
}

pub(crate) fn report_masked<T>(evaluations: &[PointEvaluation<T>]) {
    let masked = evaluations
        .iter()
        .filter(|e| !e.status.is_normal())
        .count();
    if masked > 0 {
        warn!(
            "{masked} of {} observation points were masked (singular or above the free surface)",
            evaluations.len()
        );
    }
}

fn dispatch<T: Scalar>(
    point: &ObservationPoint<T>,
    fault: &FaultParams<T>,
    options: &EvaluationOptions,
) -> OkadaResult<(FieldResult<T>, Status, Kernel)> {
    let medium = options.medium::<T>()?;
    let extent = fault.extent()?;
    let kernel = Kernel::select(point.z.is_some(), extent.is_some());

    let zero = T::zero();
    let tensile = fault.tensile.unwrap_or(zero);
    let inflation = fault.inflation.unwrap_or(zero);
    if !inflation.is_zero() && kernel != Kernel::BuriedPoint {
        return Err(OkadaError::invalid_argument(
            "inflation is only supported for a buried point source (z given, no length/width)",
        ));
    }

    let frame = setup(
        fault.strike,
        fault.dip,
        fault.rake,
        fault.slip,
        options.angle_unit,
    );
    let (xx, yy) = frame.to_local(point.x - fault.x_fault, point.y - fault.y_fault);
    let disl = Dislocation::new(frame.strike_slip, frame.dip_slip, tensile);
    let strain = options.compute_strain;

    debug!(
        "evaluating {kernel:?} at local ({}, {})",
        xx.value(),
        yy.value()
    );

    let (local, status) = match (point.z, extent) {
        (None, None) => surface_result(
            spoint(
                medium.alpha_1985,
                xx,
                yy,
                fault.depth,
                frame.sin_dip,
                frame.cos_dip,
                &disl,
                strain,
            )
            .map(|field| field.into_field(medium.poisson_ratio)),
            strain,
        )?,
        (Some(z), None) => dc3d0(
            medium.alpha_1992,
            xx,
            yy,
            z,
            fault.depth,
            fault.dip,
            options.angle_unit,
            &Potency::new(disl.strike, disl.dip, disl.tensile, inflation),
            strain,
        ),
        (None, Some((length, width))) => {
            let (xx, yy, depth) = surface_reference(
                &frame,
                options.fault_origin,
                xx,
                yy,
                fault.depth,
                length,
                width,
            );
            surface_result(
                srectf(
                    medium.alpha_1985,
                    xx,
                    yy,
                    depth,
                    length,
                    width,
                    frame.sin_dip,
                    frame.cos_dip,
                    &disl,
                    strain,
                )
                .map(|field| field.into_field(medium.poisson_ratio)),
                strain,
            )?
        }
        (Some(z), Some((length, width))) => {
            let (al, aw) = buried_extent(options.fault_origin, length, width);
            dc3d(
                medium.alpha_1992,
                xx,
                yy,
                z,
                fault.depth,
                fault.dip,
                options.angle_unit,
                al,
                aw,
                &disl,
                strain,
            )
        }
    };

    let field = FieldResult {
        displacement: frame.vector_to_global(&local.displacement),
        gradient: local.gradient.map(|g| frame.tensor_to_global(&g)),
    };
    Ok((field, status, kernel))
}

/// Surface kernels fail outright on a singular point; fold that into the
/// status the buried kernels report.
fn surface_result<T: Scalar>(
    result: OkadaResult<FieldResult<T>>,
    compute_strain: bool,
) -> OkadaResult<(FieldResult<T>, Status)> {
    match result {
        Ok(field) => Ok((field, Status::Normal)),
        Err(OkadaError::SingularGeometry(_)) => {
            Ok((FieldResult::zero(compute_strain), Status::Singular))
        }
        Err(err) => Err(err),
    }
}

/// Station coordinates and depth relative to the deepest strike-start
/// corner, which the surface rectangle kernel integrates from.
fn surface_reference<T: Scalar>(
    frame: &FaultFrame<T>,
    origin: FaultOrigin,
    xx: T,
    yy: T,
    depth: T,
    length: T,
    width: T,
) -> (T, T, T) {
    let (sd, cd) = (frame.sin_dip, frame.cos_dip);
    match origin {
        FaultOrigin::TopLeft => (xx, yy + width * cd, depth + width * sd),
        FaultOrigin::Center => {
            let half = T::c(0.5);
            (
                xx + length * half,
                yy + width * cd * half,
                depth + width * sd * half,
            )
        }
    }
}

/// Along-strike and down-dip ranges of the rectangle around its reference
/// point.
fn buried_extent<T: Scalar>(origin: FaultOrigin, length: T, width: T) -> ((T, T), (T, T)) {
    let zero = T::zero();
    match origin {
        FaultOrigin::TopLeft => ((zero, length), (-width, zero)),
        FaultOrigin::Center => {
            let half = T::c(0.5);
            (
                (-length * half, length * half),
                (-width * half, width * half),
            )
        }
    }
}

/// Observation coordinates as separate columns, the layout array-oriented
/// callers work with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBatch {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub z: Option<Vec<f64>>,
}

impl CoordinateBatch {
    pub fn points(&self) -> OkadaResult<Vec<ObservationPoint<f64>>> {
        let n = self.x.len();
        if self.y.len() != n || self.z.as_ref().is_some_and(|z| z.len() != n) {
            return Err(OkadaError::invalid_argument(
                "x, y and z must have the same length",
            ));
        }
        Ok(match &self.z {
            Some(z) => (0..n)
                .map(|i| ObservationPoint::buried(self.x[i], self.y[i], z[i]))
                .collect(),
            None => (0..n)
                .map(|i| ObservationPoint::surface(self.x[i], self.y[i]))
                .collect(),
        })
    }
}

/// Output components as columns in the order of
/// [`FieldResult::components`], plus the status code of every point.
/// Masked points hold zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldColumns {
    pub components: Vec<Vec<f64>>,
    pub status: Vec<i32>,
}

impl FieldColumns {
    pub fn from_evaluations(evaluations: &[PointEvaluation<f64>], compute_strain: bool) -> Self {
        let width = if compute_strain { 12 } else { 3 };
        let mut components = vec![Vec::with_capacity(evaluations.len()); width];
        let mut status = Vec::with_capacity(evaluations.len());
        for evaluation in evaluations {
            let values = evaluation
                .field
                .as_ref()
                .map(FieldResult::components)
                .unwrap_or_default();
            for (i, column) in components.iter_mut().enumerate() {
                column.push(values.get(i).copied().unwrap_or(0.0));
            }
            status.push(evaluation.status.code());
        }
        Self { components, status }
    }

    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::rotate_tensor;

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

    fn thrust() -> FaultParams<f64> {
        FaultParams::point(1.0, -2.0, 3.0, 35.0, 40.0, 90.0, 1.5)
    }

    #[test]
    fn options_default_to_poisson_solid_in_degrees() {
        let options = EvaluationOptions::default();
        assert!(options.compute_strain);
        assert_eq!(options.angle_unit, AngleUnit::Degrees);
        assert_eq!(options.fault_origin, FaultOrigin::TopLeft);
        assert_eq!(options.poisson_ratio, 0.25);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn invalid_poisson_ratio_is_rejected() {
        let options = EvaluationOptions {
            poisson_ratio: 0.7,
            ..Default::default()
        };
        assert_err_contains(options.validate(), "poisson_ratio");
        assert_err_contains(
            evaluate(&ObservationPoint::surface(0.0, 1.0), &thrust(), &options),
            "poisson_ratio",
        );
    }

    #[test]
    fn north_striking_fault_matches_kernel_directly() {
        let fault = FaultParams::point(0.0, 0.0, 2.0, 0.0, 90.0, 0.0, 1.0);
        let field = evaluate(
            &ObservationPoint::surface(0.0, 3.0),
            &fault,
            &EvaluationOptions::default(),
        )
        .expect("regular point");
        let local = spoint(
            0.5,
            3.0,
            0.0,
            2.0,
            1.0,
            0.0,
            &Dislocation::strike_slip(1.0),
            false,
        )
        .expect("regular point");
        // Local x (along strike) is global north.
        assert_close(field.displacement[1], local.displacement[0], 1e-15);
        assert_close(field.displacement[0], -local.displacement[1], 1e-15);
        assert_close(field.displacement[2], local.displacement[2], 1e-15);
    }

    #[test]
    fn rotated_evaluation_matches_local_kernel_with_rotation() {
        let fault = thrust();
        let options = EvaluationOptions::default();
        let point = ObservationPoint::buried(2.5, 0.5, -1.0);
        let field = evaluate(&point, &fault, &options).expect("regular point");

        let frame = setup(35.0, 40.0, 90.0, 1.5, AngleUnit::Degrees);
        let (xx, yy) = frame.to_local(2.5 - 1.0, 0.5 + 2.0);
        let (local, status) = dc3d0(
            2.0 / 3.0,
            xx,
            yy,
            -1.0,
            3.0,
            40.0,
            AngleUnit::Degrees,
            &Potency::new(frame.strike_slip, frame.dip_slip, 0.0, 0.0),
            true,
        );
        assert_eq!(status, Status::Normal);
        let expected = rotate_tensor(
            &local.gradient.expect("gradient requested"),
            frame.sin_strike,
            frame.cos_strike,
        );
        let g = field.gradient.expect("gradient requested");
        for (a, b) in g.iter().zip(expected.iter()) {
            assert_close(*a, *b, 1e-15);
        }
    }

    #[test]
    fn surface_and_buried_point_source_agree_at_z_zero() {
        let fault = thrust();
        let options = EvaluationOptions::default();
        let surface = evaluate(&ObservationPoint::surface(-1.0, 2.0), &fault, &options)
            .expect("regular point");
        let buried = evaluate(&ObservationPoint::buried(-1.0, 2.0, 0.0), &fault, &options)
            .expect("regular point");
        for (a, b) in surface.components().iter().zip(buried.components()) {
            assert_close(*a, b, 1e-13);
        }
    }

    #[test]
    fn surface_and_buried_rectangles_agree_for_both_origins() {
        let fault =
            FaultParams::point(0.5, 1.0, 2.0, 120.0, 55.0, 30.0, 2.0).with_extent(4.0, 1.5);
        for origin in [FaultOrigin::TopLeft, FaultOrigin::Center] {
            let options = EvaluationOptions {
                fault_origin: origin,
                ..Default::default()
            };
            let surface = evaluate(&ObservationPoint::surface(3.0, -2.0), &fault, &options)
                .expect("regular point");
            let buried = evaluate(&ObservationPoint::buried(3.0, -2.0, 0.0), &fault, &options)
                .expect("regular point");
            for (a, b) in surface.components().iter().zip(buried.components()) {
                assert_close(*a, b, 1e-13);
            }
        }
    }

    #[test]
    fn center_origin_is_top_left_shifted_by_half_extent() {
        let (strike, dip, length, width) = (0.0f64, 30.0f64, 4.0, 2.0);
        let (sd, cd) = dip.to_radians().sin_cos();
        let top_left = FaultParams::point(0.0, 0.0, 1.0, strike, dip, 0.0, 1.0)
            .with_extent(length, width);
        // Centroid: half the length north, half the width down dip.
        let center = FaultParams::point(
            width / 2.0 * cd,
            length / 2.0,
            1.0 + width / 2.0 * sd,
            strike,
            dip,
            0.0,
            1.0,
        )
        .with_extent(length, width);
        let point = ObservationPoint::buried(2.0, 5.0, -0.3);
        let a = evaluate(&point, &top_left, &EvaluationOptions::default()).expect("regular");
        let b = evaluate(
            &point,
            &center,
            &EvaluationOptions {
                fault_origin: FaultOrigin::Center,
                ..Default::default()
            },
        )
        .expect("regular");
        for (a, b) in a.components().iter().zip(b.components()) {
            assert_close(*a, b, 1e-13);
        }
    }

    #[test]
    fn partial_extent_is_rejected() {
        let mut fault = thrust();
        fault.length = Some(2.0);
        assert_err_contains(
            evaluate(
                &ObservationPoint::surface(0.0, 0.0),
                &fault,
                &EvaluationOptions::default(),
            ),
            "length and width",
        );
    }

    #[test]
    fn inflation_requires_buried_point_source() {
        let mut fault = thrust();
        fault.inflation = Some(0.1);
        let options = EvaluationOptions::default();
        assert_err_contains(
            evaluate(&ObservationPoint::surface(0.0, 0.0), &fault, &options),
            "inflation",
        );
        assert!(evaluate(&ObservationPoint::buried(0.0, 0.0, -1.0), &fault, &options).is_ok());
    }

    #[test]
    fn single_point_failures_are_errors() {
        let fault = thrust();
        let options = EvaluationOptions::default();
        let above = evaluate(&ObservationPoint::buried(0.0, 0.0, 1.0), &fault, &options);
        assert_eq!(
            above.expect_err("z > 0"),
            OkadaError::InvalidObservationPoint { z: 1.0 }
        );
        let on_source = evaluate(&ObservationPoint::buried(1.0, -2.0, -3.0), &fault, &options);
        assert_eq!(
            on_source.expect_err("on source"),
            OkadaError::SingularGeometry(Singularity::SourceCoincident)
        );
    }

    #[test]
    fn batch_masks_bad_points_and_keeps_good_ones() {
        let fault = thrust();
        let points = vec![
            ObservationPoint::buried(0.0, 0.0, -1.0),
            ObservationPoint::buried(1.0, -2.0, -3.0),
            ObservationPoint::buried(0.0, 0.0, 0.5),
            ObservationPoint::buried(4.0, 1.0, 0.0),
        ];
        let options = EvaluationOptions::default();
        let evaluations = evaluate_batch(&points, &fault, &options).expect("valid batch");
        let statuses: Vec<Status> = evaluations.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                Status::Normal,
                Status::Singular,
                Status::PositiveZ,
                Status::Normal
            ]
        );
        assert!(evaluations[1].field.is_none());
        let single = evaluate(&points[3], &fault, &options).expect("regular point");
        assert_eq!(evaluations[3].field, Some(single));

        let columns = FieldColumns::from_evaluations(&evaluations, true);
        assert_eq!(columns.components.len(), 12);
        assert_eq!(columns.status, vec![0, 1, 2, 0]);
        assert_eq!(columns.components[0][1], 0.0);
        assert_eq!(columns.components[2][3], single.displacement[2]);
    }

    #[test]
    fn batch_rejects_mixed_depth_information() {
        let points = vec![
            ObservationPoint::surface(0.0, 1.0),
            ObservationPoint::buried(0.0, 1.0, -1.0),
        ];
        assert_err_contains(
            evaluate_batch(&points, &thrust(), &EvaluationOptions::default()),
            "z must be given",
        );
    }

    #[test]
    fn large_batch_matches_pointwise_evaluation() {
        let fault = thrust().with_extent(3.0, 2.0);
        let options = EvaluationOptions::default();
        let points: Vec<_> = (0..400)
            .map(|i| {
                let t = i as f64 * 0.05;
                ObservationPoint::buried(t.cos() * 6.0, t.sin() * 6.0, -0.1 * (i % 7) as f64)
            })
            .collect();
        let evaluations = evaluate_batch(&points, &fault, &options).expect("valid batch");
        assert_eq!(evaluations.len(), points.len());
        for (point, evaluation) in points.iter().zip(&evaluations).step_by(37) {
            let single = evaluate(point, &fault, &options).expect("regular point");
            assert_eq!(evaluation.field, Some(single));
        }
    }

    #[test]
    fn coordinate_batch_checks_lengths() {
        let batch = CoordinateBatch {
            x: vec![0.0, 1.0],
            y: vec![0.0],
            z: None,
        };
        assert_err_contains(batch.points(), "same length");

        let batch = CoordinateBatch {
            x: vec![0.0, 1.0],
            y: vec![2.0, 3.0],
            z: Some(vec![-1.0, -2.0]),
        };
        let points = batch.points().expect("consistent lengths");
        assert_eq!(points[1], ObservationPoint::buried(1.0, 3.0, -2.0));
    }

    #[test]
    fn displacement_only_columns_have_three_components() {
        let points = vec![ObservationPoint::surface(1.0, 1.0)];
        let options = EvaluationOptions {
            compute_strain: false,
            ..Default::default()
        };
        let evaluations = evaluate_batch(&points, &thrust(), &options).expect("valid batch");
        let columns = FieldColumns::from_evaluations(&evaluations, false);
        assert_eq!(columns.components.len(), 3);
        assert_eq!(columns.len(), 1);
    }
}
