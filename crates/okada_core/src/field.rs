//! Source strengths and result containers.
//!
//! Gradients follow the convention `gradient[(i, j)] = ∂u_i / ∂x_j`.

use crate::constants::PI2;
use crate::traits::Scalar;
use nalgebra::{Matrix3, Vector3};

/// Strike-, dip- and tensile-dislocation of a fault (or point fault).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dislocation<T> {
    pub strike: T,
    pub dip: T,
    pub tensile: T,
}

impl<T: Scalar> Dislocation<T> {
    pub fn new(strike: T, dip: T, tensile: T) -> Self {
        Self {
            strike,
            dip,
            tensile,
        }
    }

    pub fn strike_slip(slip: T) -> Self {
        Self::new(slip, T::zero(), T::zero())
    }

    pub fn dip_slip(slip: T) -> Self {
        Self::new(T::zero(), slip, T::zero())
    }

    pub fn scaled(self, factor: T) -> Self {
        Self::new(self.strike * factor, self.dip * factor, self.tensile * factor)
    }
}

/// Strike-, dip-, tensile- and inflation-potency of a buried point source.
///
/// Potency is moment divided by rigidity for the double-couple parts,
/// intensity of the isotropic part divided by λ for `tensile`, and the
/// linear-dipole intensity divided by μ for `inflation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Potency<T> {
    pub strike: T,
    pub dip: T,
    pub tensile: T,
    pub inflation: T,
}

impl<T: Scalar> Potency<T> {
    pub fn new(strike: T, dip: T, tensile: T, inflation: T) -> Self {
        Self {
            strike,
            dip,
            tensile,
            inflation,
        }
    }
}

impl<T: Scalar> From<Dislocation<T>> for Potency<T> {
    fn from(value: Dislocation<T>) -> Self {
        Self::new(value.strike, value.dip, value.tensile, T::zero())
    }
}

/// In-plane strains and tilts available from the 1985 surface formulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStrain<T> {
    pub uxx: T,
    pub uxy: T,
    pub uyx: T,
    pub uyy: T,
    pub uzx: T,
    pub uzy: T,
}

impl<T: Scalar> SurfaceStrain<T> {
    pub fn zero() -> Self {
        let z = T::zero();
        Self {
            uxx: z,
            uxy: z,
            uyx: z,
            uyy: z,
            uzx: z,
            uzy: z,
        }
    }

    fn add_scaled(&mut self, sign: T, other: &Self) {
        self.uxx = self.uxx + sign * other.uxx;
        self.uxy = self.uxy + sign * other.uxy;
        self.uyx = self.uyx + sign * other.uyx;
        self.uyy = self.uyy + sign * other.uyy;
        self.uzx = self.uzx + sign * other.uzx;
        self.uzy = self.uzy + sign * other.uzy;
    }

    /// Completes the gradient with the free-surface boundary condition
    /// (σxz = σyz = σzz = 0): uxz = -uzx, uyz = -uzy,
    /// uzz = -(uxx + uyy) ν / (1 - ν). Only valid at z = 0.
    pub fn free_surface_gradient(&self, poisson_ratio: T) -> Matrix3<T> {
        let uzz = -(self.uxx + self.uyy) * poisson_ratio / (T::one() - poisson_ratio);
        Matrix3::new(
            self.uxx, self.uxy, -self.uzx, //
            self.uyx, self.uyy, -self.uzy, //
            self.uzx, self.uzy, uzz,
        )
    }
}

/// Output of the surface (1985) kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceField<T> {
    pub displacement: Vector3<T>,
    pub strain: Option<SurfaceStrain<T>>,
}

impl<T: Scalar> SurfaceField<T> {
    pub fn zero(with_strain: bool) -> Self {
        Self {
            displacement: Vector3::new(T::zero(), T::zero(), T::zero()),
            strain: with_strain.then(SurfaceStrain::zero),
        }
    }

    pub(crate) fn add_scaled(&mut self, sign: T, other: &Self) {
        for i in 0..3 {
            self.displacement[i] = self.displacement[i] + sign * other.displacement[i];
        }
        if let (Some(strain), Some(other)) = (self.strain.as_mut(), other.strain.as_ref()) {
            strain.add_scaled(sign, other);
        }
    }

    /// Full field at z = 0, with the z-derivatives taken from the
    /// free-surface conditions for a medium of the given Poisson ratio.
    pub fn into_field(self, poisson_ratio: T) -> FieldResult<T> {
        FieldResult {
            displacement: self.displacement,
            gradient: self
                .strain
                .map(|strain| strain.free_surface_gradient(poisson_ratio)),
        }
    }
}

/// Displacement and, optionally, the full displacement-gradient tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldResult<T> {
    pub displacement: Vector3<T>,
    pub gradient: Option<Matrix3<T>>,
}

impl<T: Scalar> FieldResult<T> {
    pub fn zero(with_gradient: bool) -> Self {
        Self {
            displacement: Vector3::new(T::zero(), T::zero(), T::zero()),
            gradient: with_gradient.then(|| Matrix3::from_element(T::zero())),
        }
    }

    /// Components in output order: ux, uy, uz, then (if present)
    /// uxx, uyx, uzx, uxy, uyy, uzy, uxz, uyz, uzz.
    pub fn components(&self) -> Vec<T> {
        let mut out: Vec<T> = self.displacement.iter().copied().collect();
        if let Some(gradient) = &self.gradient {
            // Column-major storage yields the x-, y-, then z-derivative blocks.
            out.extend(gradient.iter().copied());
        }
        out
    }

    /// Applies `f` to every component, e.g. to extract a dual tangent.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> FieldResult<U> {
        FieldResult {
            displacement: self.displacement.map(&f),
            gradient: self.gradient.map(|g| g.map(&f)),
        }
    }
}

/// Displacement and its x-, y- and z-derivatives as produced by one
/// sub-kernel of the buried (1992) formulation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Partials<T> {
    pub u: [T; 3],
    pub dx: [T; 3],
    pub dy: [T; 3],
    pub dz: [T; 3],
}

impl<T: Scalar> Partials<T> {
    pub fn zero() -> Self {
        let z = [T::zero(); 3];
        Self {
            u: z,
            dx: z,
            dy: z,
            dz: z,
        }
    }

    /// One source contribution: displacement plus, when requested, its
    /// x-, y- and z-derivative blocks.
    pub fn new(u: [T; 3], derivatives: Option<[[T; 3]; 3]>) -> Self {
        let zero = [T::zero(); 3];
        let [dx, dy, dz] = derivatives.unwrap_or([zero; 3]);
        Self { u, dx, dy, dz }
    }

    pub fn blocks(&self) -> [[T; 3]; 4] {
        [self.u, self.dx, self.dy, self.dz]
    }

    pub fn from_blocks(blocks: [[T; 3]; 4]) -> Self {
        let [u, dx, dy, dz] = blocks;
        Self { u, dx, dy, dz }
    }

    pub fn add_scaled(&mut self, scale: T, other: &Self) {
        let mut blocks = self.blocks();
        for (block, other) in blocks.iter_mut().zip(other.blocks()) {
            for (value, delta) in block.iter_mut().zip(other) {
                *value = *value + scale * delta;
            }
        }
        *self = Self::from_blocks(blocks);
    }

    /// Adds `strength / 2π` times the contribution built by `term`. The
    /// term is not evaluated when `strength` is exactly zero.
    pub fn add_source(&mut self, strength: T, term: impl FnOnce() -> Self) {
        if !strength.is_zero() {
            self.add_scaled(strength / T::c(PI2), &term());
        }
    }

    pub fn into_field(self, with_gradient: bool) -> FieldResult<T> {
        let [ux, uy, uz] = self.u;
        FieldResult {
            displacement: Vector3::new(ux, uy, uz),
            gradient: with_gradient.then(|| {
                Matrix3::new(
                    self.dx[0], self.dy[0], self.dz[0], //
                    self.dx[1], self.dy[1], self.dz[1], //
                    self.dx[2], self.dy[2], self.dz[2],
                )
            }),
        }
    }
}
