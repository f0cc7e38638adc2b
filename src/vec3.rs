use nalgebra::{Vector2, Vector3};
use rand::Rng;

pub type Float = f32;

/// x: right
///
/// y: up
///
/// z: toward the viewer
pub type Vec3 = Vector3<Float>;
pub type Point3 = Vec3;
pub type Vec2 = Vector2<Float>;

/// Components below this magnitude count as zero.
pub const NEAR_ZERO: Float = 1e-8;

pub trait Vec3Ext {
    fn near_zero(&self) -> bool;
    fn random<R: Rng + ?Sized>(rng: &mut R, min: Float, max: Float) -> Self;
    fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self;
    fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: &Vec3) -> Self;
    fn random_on_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self;
    fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }

    fn random<R: Rng + ?Sized>(rng: &mut R, min: Float, max: Float) -> Self {
        let span = max - min;
        Vec3::new(
            min + span * rng.gen::<Float>(),
            min + span * rng.gen::<Float>(),
            min + span * rng.gen::<Float>(),
        )
    }

    /// Normalizes a zero-centered random vector. The direction is biased
    /// toward the cube's corners, which is fine for diffuse jitter.
    fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Self::random(rng, -0.5, 0.5);
            // Exactly zero only happens when all three draws land on 0.5
            if !v.near_zero() {
                return v.normalize();
            }
        }
    }

    /// Uniform over the hemisphere around `normal` (not cosine weighted)
    fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: &Vec3) -> Self {
        let unit_vector = Self::random_unit(rng);
        if unit_vector.dot(normal) > 0.0 {
            return unit_vector; // same side as the normal
        }
        -unit_vector
    }

    /// Returns a point on the x-y unit circle, i.e. the *boundary* of the disk.
    /// Use [`Vec3Ext::random_in_unit_disk`] when interior samples are needed.
    fn random_on_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Vec3::new(rng.gen::<Float>() - 0.5, rng.gen::<Float>() - 0.5, 0.0);
            if !v.near_zero() {
                return v.normalize();
            }
        }
    }

    /// Returns random point in the x-y unit disk
    fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            if v.norm_squared() < 1.0 {
                return v;
            }
        }
    }
}
