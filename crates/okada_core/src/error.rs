//! Error and status types shared by the kernels and the evaluation wrapper.
//!
//! The buried-source kernels report a per-point [`Status`] (the integer
//! return code of the reference routines), while single-point callers get an
//! [`OkadaError`] through [`Status::into_result`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type OkadaResult<T> = Result<T, OkadaError>;

/// Which closed-form expression has no defined value at the observation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Singularity {
    /// Observation point coincides with a point source (R = 0).
    SourceCoincident,
    /// Observation point lies on the perimeter of a finite fault.
    FaultEdge,
}

impl fmt::Display for Singularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Singularity::SourceCoincident => write!(f, "observation point coincides with the source"),
            Singularity::FaultEdge => write!(f, "observation point lies on the fault edge"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OkadaError {
    /// z > 0 was supplied to a buried-source kernel.
    #[error("observation point lies above the free surface (z = {z})")]
    InvalidObservationPoint { z: f64 },

    #[error("singular geometry: {0}")]
    SingularGeometry(Singularity),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl OkadaError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Per-point evaluation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Normal,
    Singular,
    PositiveZ,
}

impl Status {
    /// Return code of the reference routines: 0 normal, 1 singular, 2 positive z.
    pub fn code(self) -> i32 {
        match self {
            Status::Normal => 0,
            Status::Singular => 1,
            Status::PositiveZ => 2,
        }
    }

    pub fn is_normal(self) -> bool {
        self == Status::Normal
    }

    /// Converts a status into a hard failure. `z` and `singularity` describe
    /// the offending point for the error message.
    pub fn into_result(self, z: f64, singularity: Singularity) -> OkadaResult<()> {
        match self {
            Status::Normal => Ok(()),
            Status::Singular => Err(OkadaError::SingularGeometry(singularity)),
            Status::PositiveZ => Err(OkadaError::InvalidObservationPoint { z }),
        }
    }
}
