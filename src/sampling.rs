//! Scalar and 2D sample generators.
//!
//! Every function draws from a caller-owned generator, so each worker thread
//! keeps its own random state. Vector generators live on [`crate::vec3::Vec3Ext`].

use crate::{
    error::{Error, Result},
    vec3::{Float, Vec2},
};
use itertools::Itertools;
use rand::Rng;

/// Returns a value in `[0, 1)`
pub fn uniform01<R: Rng + ?Sized>(rng: &mut R) -> Float {
    rng.gen::<Float>()
}

pub fn uniform_range<R: Rng + ?Sized>(rng: &mut R, min: Float, max: Float) -> Float {
    min + (max - min) * uniform01(rng)
}

/// Offset to a random point in the `[-0.5, 0.5]²` square around a pixel center
pub fn random_in_square<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(uniform01(rng) - 0.5, uniform01(rng) - 0.5)
}

/// Offset to a random point inside stratum `(i, j)` of the unit square,
/// re-centered to `[-0.5, 0.5]²`.
///
/// `region_size` times the grid dimension must be 1 for the strata to tile the square.
pub fn random_in_stratified_square<R: Rng + ?Sized>(
    rng: &mut R,
    i: u32,
    j: u32,
    region_size: Float,
) -> Vec2 {
    Vec2::new(
        (i as Float + uniform01(rng)) * region_size - 0.5,
        (j as Float + uniform01(rng)) * region_size - 0.5,
    )
}

/// Schlick's approximation of Fresnel reflectance
pub fn schlick_reflectance(cosine: Float, refraction_index: Float) -> Float {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Square grid of strata covering one pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StratifiedGrid {
    dim: u32,
    region_size: Float,
}

impl StratifiedGrid {
    /// Non-square sample counts round down to the nearest square.
    pub fn new(samples_per_pixel: u32) -> Result<Self> {
        if samples_per_pixel == 0 {
            return Err(Error::NoSamples);
        }
        let dim = ((samples_per_pixel as f64).sqrt() as u32).max(1);
        Ok(StratifiedGrid {
            dim,
            region_size: 1.0 / dim as Float,
        })
    }

    pub fn dim(&self) -> u32 {
        self.dim
    }

    pub fn region_size(&self) -> Float {
        self.region_size
    }

    /// Actual samples per pixel after rounding
    pub fn len(&self) -> usize {
        (self.dim * self.dim) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        (0..self.dim).cartesian_product(0..self.dim)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, i: u32, j: u32) -> Vec2 {
        random_in_stratified_square(rng, i, j, self.region_size)
    }
}
