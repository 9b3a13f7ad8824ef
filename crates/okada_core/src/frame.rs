//! Conversion between the geographic frame (east, north, up) and the
//! fault-local frame (along strike, across strike, up) of the kernels.

use crate::constants::snap_dip;
use crate::error::OkadaError;
use crate::traits::Scalar;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn to_radians<T: Scalar>(self, angle: T) -> T {
        match self {
            AngleUnit::Degrees => angle * T::c(std::f64::consts::PI / 180.0),
            AngleUnit::Radians => angle,
        }
    }
}

/// Which point of a rectangular fault the fault position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultOrigin {
    /// Shallow corner at the start of the strike direction.
    #[default]
    TopLeft,
    /// Centroid of the rectangle.
    Center,
}

impl FromStr for FaultOrigin {
    type Err = OkadaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topleft" => Ok(FaultOrigin::TopLeft),
            "center" => Ok(FaultOrigin::Center),
            other => Err(OkadaError::invalid_argument(format!(
                "fault_origin must be either 'topleft' or 'center', got '{other}'"
            ))),
        }
    }
}

/// Trigonometry of a fault plus its slip split into strike and dip parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultFrame<T> {
    pub sin_strike: T,
    pub cos_strike: T,
    pub sin_dip: T,
    pub cos_dip: T,
    pub strike_slip: T,
    pub dip_slip: T,
}

impl<T: Scalar> FaultFrame<T> {
    /// Rotates a horizontal offset from the fault reference point into
    /// (along strike, across strike).
    pub fn to_local(&self, dx: T, dy: T) -> (T, T) {
        let (ss, cs) = (self.sin_strike, self.cos_strike);
        (dx * ss + dy * cs, -dx * cs + dy * ss)
    }

    pub fn vector_to_global(&self, local: &Vector3<T>) -> Vector3<T> {
        rotate_vector(local, self.sin_strike, self.cos_strike)
    }

    pub fn tensor_to_global(&self, local: &Matrix3<T>) -> Matrix3<T> {
        rotate_tensor(local, self.sin_strike, self.cos_strike)
    }
}

/// Sines and cosines of strike and dip (dip snapped near ±90°) and the
/// slip decomposition `slip·cos(rake)`, `slip·sin(rake)`.
pub fn setup<T: Scalar>(strike: T, dip: T, rake: T, slip: T, unit: AngleUnit) -> FaultFrame<T> {
    let strike = unit.to_radians(strike);
    let dip = unit.to_radians(dip);
    let rake = unit.to_radians(rake);
    let (sin_dip, cos_dip) = snap_dip(dip.sin(), dip.cos());
    FaultFrame {
        sin_strike: strike.sin(),
        cos_strike: strike.cos(),
        sin_dip,
        cos_dip,
        strike_slip: slip * rake.cos(),
        dip_slip: slip * rake.sin(),
    }
}

/// Rotates a displacement from the fault frame to (east, north, up).
/// Passing `-c` applies the inverse rotation.
pub fn rotate_vector<T: Scalar>(u: &Vector3<T>, s: T, c: T) -> Vector3<T> {
    Vector3::new(u[0] * s - u[1] * c, u[0] * c + u[1] * s, u[2])
}

/// Rotates a displacement-gradient tensor `g[(i, j)] = ∂u_i/∂x_j` as
/// R g Rᵀ with R = [[s, -c, 0], [c, s, 0], [0, 0, 1]]. Passing `-c` applies
/// the inverse rotation.
pub fn rotate_tensor<T: Scalar>(g: &Matrix3<T>, s: T, c: T) -> Matrix3<T> {
    let (uxx, uxy, uxz) = (g[(0, 0)], g[(0, 1)], g[(0, 2)]);
    let (uyx, uyy, uyz) = (g[(1, 0)], g[(1, 1)], g[(1, 2)]);
    let (uzx, uzy, uzz) = (g[(2, 0)], g[(2, 1)], g[(2, 2)]);

    let row_x = (s * uxx - c * uxy, c * uxx + s * uxy);
    let row_y = (s * uyx - c * uyy, c * uyx + s * uyy);

    Matrix3::new(
        s * row_x.0 - c * row_y.0,
        s * row_x.1 - c * row_y.1,
        s * uxz - c * uyz,
        c * row_x.0 + s * row_y.0,
        c * row_x.1 + s * row_y.1,
        c * uxz + s * uyz,
        s * uzx - c * uzy,
        c * uzx + s * uzy,
        uzz,
    )
}
