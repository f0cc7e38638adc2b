//! Flat primitives sharing one plane intersection routine.
//!
//! A [`Planar`] shape is a corner `Q` plus two edge vectors `u` and `v`. A hit
//! point is expressed in the `(alpha, beta)` coordinates of that frame and the
//! shape's [`Footprint`] decides whether those coordinates lie on the surface.

use crate::{
    error::{Error, Result},
    hittable::Hit,
    interval::Interval,
    intersection::{HitInfo, MaterialId},
    ray::Ray,
    vec3::{Float, Point3, Vec3, Vec3Ext},
};
use std::fmt::Debug;

/// Rays with `|dot(normal, direction)|` below this are treated as parallel
const PARALLEL_EPSILON: Float = 1e-8;

pub trait Footprint: Clone + Debug + Send + Sync {
    /// Returns the surface `(u, v)` for planar coordinates on the shape, `None` off it.
    fn uv(&self, alpha: Float, beta: Float) -> Option<(Float, Float)>;
}

/// The whole `[0, 1]²` span of the edges
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Parallelogram;

impl Footprint for Parallelogram {
    fn uv(&self, alpha: Float, beta: Float) -> Option<(Float, Float)> {
        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return None;
        }
        Some((alpha, beta))
    }
}

/// The half of the parallelogram on the corner's side of the `u + v` diagonal
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TriangleFootprint;

impl Footprint for TriangleFootprint {
    fn uv(&self, alpha: Float, beta: Float) -> Option<(Float, Float)> {
        if alpha < 0.0 || beta < 0.0 || alpha + beta > 1.0 {
            return None;
        }
        Some((alpha, beta))
    }
}

/// Ellipse inscribed in the parallelogram
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ellipse;

impl Footprint for Ellipse {
    fn uv(&self, alpha: Float, beta: Float) -> Option<(Float, Float)> {
        let (da, db) = (alpha - 0.5, beta - 0.5);
        if da * da + db * db > 0.25 {
            return None;
        }
        Some((alpha, beta))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Planar<F> {
    corner: Point3,
    edge_u: Vec3,
    edge_v: Vec3,
    pub material: MaterialId,
    one_sided: bool,
    footprint: F,

    // Cached plane data
    normal: Vec3,
    offset: Float,
    w: Vec3,
}

pub type Quad = Planar<Parallelogram>;
pub type Triangle = Planar<TriangleFootprint>;
pub type Disk = Planar<Ellipse>;

impl<F: Footprint + Default> Planar<F> {
    /// `edge_u` and `edge_v` must not be parallel; use [`Planar::try_new`] to check.
    pub fn new(
        corner: Point3,
        edge_u: Vec3,
        edge_v: Vec3,
        material: MaterialId,
        one_sided: bool,
    ) -> Self {
        Self::with_footprint(corner, edge_u, edge_v, material, one_sided, F::default())
    }

    pub fn try_new(
        corner: Point3,
        edge_u: Vec3,
        edge_v: Vec3,
        material: MaterialId,
        one_sided: bool,
    ) -> Result<Self> {
        if edge_u.cross(&edge_v).near_zero() {
            log::warn!("rejecting planar shape at {corner:?} with parallel edges");
            return Err(Error::DegenerateEdges {
                u: edge_u,
                v: edge_v,
            });
        }
        Ok(Self::new(corner, edge_u, edge_v, material, one_sided))
    }
}

impl<F: Footprint> Planar<F> {
    pub fn with_footprint(
        corner: Point3,
        edge_u: Vec3,
        edge_v: Vec3,
        material: MaterialId,
        one_sided: bool,
        footprint: F,
    ) -> Self {
        let n = edge_u.cross(&edge_v);
        let normal = n.normalize();
        Planar {
            corner,
            edge_u,
            edge_v,
            material,
            one_sided,
            footprint,
            normal,
            offset: normal.dot(&corner),
            w: n / n.dot(&n),
        }
    }

    pub fn corner(&self) -> Point3 {
        self.corner
    }

    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.edge_u, self.edge_v)
    }

    /// Unit normal on the side `cross(u, v)` points to
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn is_one_sided(&self) -> bool {
        self.one_sided
    }

    /// `(alpha, beta)` such that `point = Q + alpha * u + beta * v`, for a point on the plane
    pub fn planar_coords(&self, point: &Point3) -> (Float, Float) {
        let planar_hit = point - self.corner;
        let alpha = self.w.dot(&planar_hit.cross(&self.edge_v));
        let beta = self.w.dot(&self.edge_u.cross(&planar_hit));
        (alpha, beta)
    }
}

impl Disk {
    /// Ellipse around `center` with semi-axes `u_radius` and `v_radius`
    pub fn centered(
        center: Point3,
        u_radius: Vec3,
        v_radius: Vec3,
        material: MaterialId,
        one_sided: bool,
    ) -> Self {
        let corner = center - u_radius - v_radius;
        Self::new(corner, u_radius * 2.0, v_radius * 2.0, material, one_sided)
    }
}

impl<F: Footprint> Hit for Planar<F> {
    fn hit(&self, ray: &Ray, t_span: Interval) -> Option<HitInfo> {
        let denom = self.normal.dot(&ray.direction);

        if denom.abs() < PARALLEL_EPSILON {
            return None; // parallel to the plane
        }
        if self.one_sided && denom > -PARALLEL_EPSILON {
            return None; // approaching from behind
        }

        // Inclusive on both ends, unlike the sphere
        let t = (self.offset - self.normal.dot(&ray.origin)) / denom;
        if !t_span.contains(t) {
            return None;
        }

        let point = ray.at(t);
        let (alpha, beta) = self.planar_coords(&point);
        let (u, v) = self.footprint.uv(alpha, beta)?;

        let mut hit = HitInfo::new(ray, t, point, self.normal, self.material);
        hit.u = u;
        hit.v = v;
        hit.set_tangent_frame(self.edge_u.normalize());

        Some(hit)
    }
}
