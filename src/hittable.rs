use crate::{
    interval::Interval,
    intersection::HitInfo,
    planar::{Disk, Quad, Triangle},
    ray::Ray,
    sphere::Sphere,
};
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub trait Hit: Send + Sync {
    /// Returns the hit with `t` inside `t_span`, or `None` when the ray misses.
    fn hit(&self, ray: &Ray, t_span: Interval) -> Option<HitInfo>;
}

#[enum_dispatch(Hit)]
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Quad(Quad),
    Triangle(Triangle),
    Disk(Disk),
}

/// Flat list of shapes, tested one by one.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub shapes: Vec<Shape>,
}

impl World {
    pub fn new(shapes: Vec<Shape>) -> Self {
        World { shapes }
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Hit for World {
    /// Returns nearest hit to the ray origin within `t_span`
    fn hit(&self, ray: &Ray, t_span: Interval) -> Option<HitInfo> {
        // Shrink the span as we go so anything behind the nearest hit is skipped
        let mut nearest_hit = None;
        let mut nearest_t = t_span.max;

        for shape in self.shapes.iter() {
            if let Some(hit) = shape.hit(ray, t_span.with_max(nearest_t)) {
                nearest_t = hit.t;
                nearest_hit = Some(hit);
            }
        }

        nearest_hit
    }
}
