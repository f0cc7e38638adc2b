use crate::{
    hittable::Hit,
    interval::Interval,
    intersection::{HitInfo, MaterialId},
    ray::Ray,
    vec3::{Float, Point3, Vec3, Vec3Ext},
};
use std::f32::consts::PI;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    radius: Float,
    pub material: MaterialId,
}

impl Sphere {
    /// Negative radii are clamped to zero
    pub fn new(center: Point3, radius: Float, material: MaterialId) -> Self {
        Sphere {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Maps a unit outward normal to `(u, v)`.
    ///
    /// `u` runs around the y axis starting (and wrapping) at -x, `v` runs from
    /// the -y pole (0) to the +y pole (1).
    pub fn uv(outward_normal: &Vec3) -> (Float, Float) {
        let theta = (-outward_normal.y).clamp(-1.0, 1.0).acos();
        let phi = Self::phi(outward_normal);
        (phi / (2.0 * PI), theta / PI)
    }

    /// Unit tangent along increasing `phi` (and so increasing `u`)
    pub fn tangent(outward_normal: &Vec3) -> Vec3 {
        let phi = Self::phi(outward_normal);
        Vec3::new(phi.sin(), 0.0, phi.cos())
    }

    fn phi(outward_normal: &Vec3) -> Float {
        (-outward_normal.z).atan2(outward_normal.x) + PI
    }
}

impl Hit for Sphere {
    fn hit(&self, ray: &Ray, t_span: Interval) -> Option<HitInfo> {
        // A point sphere has no surface and a zero direction has no roots
        if self.radius <= 0.0 || ray.direction.near_zero() {
            return None;
        }

        let oc = self.center - ray.origin;
        let a = ray.direction.norm_squared();
        let h = ray.direction.dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None; // no point hit on the sphere
        }

        let sqrt_disc = discriminant.sqrt();
        // Nearest root strictly inside the span, falling back to the far one
        let mut t = (h - sqrt_disc) / a;
        if !t_span.surrounds(t) {
            t = (h + sqrt_disc) / a;
            if !t_span.surrounds(t) {
                return None;
            }
        }

        let point = ray.at(t);
        let outward_normal = (point - self.center) / self.radius;
        let mut hit = HitInfo::new(ray, t, point, outward_normal, self.material);

        (hit.u, hit.v) = Self::uv(&outward_normal);
        hit.set_tangent_frame(Self::tangent(&outward_normal));

        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{rngs::StdRng, SeedableRng};

    const FORWARD: Interval = Interval::new(0.001, Float::INFINITY);

    fn sphere_at(center: Vec3, radius: Float) -> Sphere {
        Sphere::new(center, radius, MaterialId(0))
    }

    #[test]
    fn test_head_on_hit() {
        let center = Vec3::new(1.0, 2.0, -6.0);
        let sphere = sphere_at(center, 1.5);
        let origin = Vec3::new(-1.0, 0.5, 2.0);
        let ray = Ray::new(origin, center - origin);

        let hit = sphere.hit(&ray, FORWARD).unwrap();
        let distance = (center - origin).norm();
        let hit_distance = (hit.point - origin).norm();
        assert_relative_eq!(hit_distance, distance - 1.5, epsilon = 1e-4);
        assert!(hit.is_front_face);

        let expected = (hit.point - center).normalize();
        assert_abs_diff_eq!(hit.normal.normalize(), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.normal.norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unit_direction_reports_distance() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        let hit = sphere.hit(&ray, FORWARD).unwrap();
        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.normal, Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_tangent_ray_single_root() {
        let sphere = sphere_at(Vec3::zeros(), 1.0);
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::x());

        let oc = sphere.center - ray.origin;
        let h = ray.direction.dot(&oc);
        let discriminant = h * h - ray.direction.norm_squared() * (oc.norm_squared() - 1.0);
        assert_abs_diff_eq!(discriminant, 0.0, epsilon = 1e-5);

        let hit = sphere.hit(&ray, FORWARD).unwrap();
        assert_abs_diff_eq!(hit.t, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.point, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert!(ray.direction.dot(&hit.normal) <= 0.0);
    }

    #[test]
    fn test_miss() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let past = Ray::new(Vec3::new(0.0, 1.01, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let away = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.hit(&past, FORWARD).is_none());
        assert!(sphere.hit(&away, FORWARD).is_none());
    }

    #[test]
    fn test_far_root_when_near_root_excluded() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));

        // The span is strict: a root sitting on the lower bound is rejected
        let hit = sphere.hit(&ray, Interval::new(4.0, 100.0)).unwrap();
        assert_abs_diff_eq!(hit.t, 6.0, epsilon = 1e-5);
        assert!(!hit.is_front_face);
        assert_abs_diff_eq!(hit.normal, Vec3::z(), epsilon = 1e-6);

        assert!(sphere.hit(&ray, Interval::new(4.0, 6.0)).is_none());
        assert!(sphere.hit(&ray, Interval::EMPTY).is_none());
    }

    #[test]
    fn test_hit_from_inside() {
        let sphere = sphere_at(Vec3::new(2.0, 0.0, 0.0), 2.0);
        let ray = Ray::new(sphere.center, Vec3::new(0.0, 3.0, 0.0));
        let hit = sphere.hit(&ray, FORWARD).unwrap();
        assert_abs_diff_eq!(hit.point, Vec3::new(2.0, 2.0, 0.0), epsilon = 1e-5);
        assert!(!hit.is_front_face);
        assert_abs_diff_eq!(hit.normal, -Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), -2.0);
        assert_eq!(sphere.radius(), 0.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_zero_direction_misses() {
        let sphere = sphere_at(Vec3::zeros(), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.5), Vec3::zeros());
        assert!(sphere.hit(&ray, Interval::FULL).is_none());
    }

    #[test]
    fn test_uv_landmarks() {
        let cases = [
            (Vec3::new(0.0, 0.0, 1.0), 0.25, 0.5),
            (Vec3::new(1.0, 0.0, 0.0), 0.5, 0.5),
            (Vec3::new(0.0, 0.0, -1.0), 0.75, 0.5),
            (Vec3::new(0.0, -1.0, 0.0), 0.5, 0.0),
            (Vec3::new(0.0, 1.0, 0.0), 0.5, 1.0),
        ];
        for (normal, u, v) in cases {
            let (su, sv) = Sphere::uv(&normal);
            assert_abs_diff_eq!(su, u, epsilon = 1e-6);
            assert_abs_diff_eq!(sv, v, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_hit_uv_in_unit_square() {
        let mut rng = StdRng::seed_from_u64(12);
        let sphere = sphere_at(Vec3::new(0.5, -1.0, 2.0), 0.75);
        for _ in 0..1000 {
            let origin = sphere.center + Vec3::random_unit(&mut rng) * 4.0;
            let target = sphere.center + Vec3::random_unit(&mut rng) * 0.5;
            let hit = sphere.hit(&Ray::new(origin, target - origin), FORWARD).unwrap();
            assert!(Interval::UNIT.contains(hit.u));
            assert!(Interval::UNIT.contains(hit.v));
        }
    }

    #[test]
    fn test_tangent_follows_increasing_u() {
        let normals = [
            Vec3::new(0.3, 0.4, 0.866),
            Vec3::new(0.9, -0.2, 0.1),
            Vec3::new(0.2, 0.5, -0.8),
            Vec3::new(-0.5, 0.1, 0.7),
        ];
        for normal in normals {
            let normal = normal.normalize();
            let tangent = Sphere::tangent(&normal);
            assert_abs_diff_eq!(tangent.norm(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(tangent.dot(&normal), 0.0, epsilon = 1e-5);

            let (u0, v0) = Sphere::uv(&normal);
            let (u1, v1) = Sphere::uv(&(normal + tangent * 1e-2).normalize());
            assert!(u1 > u0, "u did not increase at {normal:?}");
            assert_abs_diff_eq!(v1, v0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_tangent_frame_on_offset_sphere() {
        let sphere = sphere_at(Vec3::new(5.0, 5.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::new(5.0, 5.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = sphere.hit(&ray, FORWARD).unwrap();
        assert_abs_diff_eq!(hit.normal, Vec3::z(), epsilon = 1e-6);
        assert_abs_diff_eq!(hit.tangent, Vec3::x(), epsilon = 1e-6);
        // bitangent points toward increasing v (the +y pole)
        assert_abs_diff_eq!(hit.bitangent, Vec3::y(), epsilon = 1e-6);
    }
}
