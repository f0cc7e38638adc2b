pub mod error;
pub mod hittable;
pub mod interval;
pub mod intersection;
pub mod planar;
pub mod probe;
pub mod ray;
pub mod sampling;
pub mod sphere;
pub mod vec3;
