//! The `okada_core` crate evaluates the closed-form displacement and
//! displacement-gradient fields of a dislocation in an elastic half-space
//! (Okada 1985 for surface observations, Okada 1992 at depth).
//! Everything is generic over [`traits::Scalar`], supporting both standard
//! floating-point arithmetic (`f64`) and automatic differentiation via Dual
//! numbers.
//!
//! Key components:
//! - **Kernels**: `spoint` / `dc3d0` (point source) and `srectf` / `dc3d`
//!   (rectangular fault), in fault-local coordinates.
//! - **Frame**: strike/dip/rake setup and the rotations to and from
//!   (east, north, up).
//! - **Model**: parameter validation, kernel selection and batched
//!   evaluation with per-point status.
//! - **Sensitivity**: gradients and Hessians by re-running the model on
//!   dual numbers.
pub mod autodiff;
pub mod constants;
pub mod error;
pub mod field;
pub mod finite_source;
pub mod frame;
pub mod model;
pub mod point_source;
pub mod sensitivity;
pub mod traits;

pub use error::{OkadaError, OkadaResult, Singularity, Status};
pub use field::{Dislocation, FieldResult, Potency, SurfaceField, SurfaceStrain};
pub use frame::{AngleUnit, FaultOrigin};
pub use model::{
    evaluate, evaluate_batch, evaluate_with_status, CoordinateBatch, EvaluationOptions,
    FaultParams, FieldColumns, ObservationPoint, PointEvaluation,
};
pub use sensitivity::Variable;
