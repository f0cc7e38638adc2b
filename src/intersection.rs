use crate::{
    ray::Ray,
    vec3::{Float, Point3, Vec3},
};

/// Index into the caller's material table. Carried through to shading untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitInfo {
    pub point: Point3,
    /// Always points against the incoming ray, see [`HitInfo::set_face_normal`]
    pub normal: Vec3,
    /// Unit tangent along increasing `u`
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub material: MaterialId,
    pub t: Float,
    pub u: Float,
    pub v: Float,
    pub is_front_face: bool,
}

impl HitInfo {
    /// Starts a record at `t` along `ray` facing `outward_normal`.
    /// Surface coordinates and the tangent frame are filled in by the primitive.
    pub fn new(
        ray: &Ray,
        t: Float,
        point: Point3,
        outward_normal: Vec3,
        material: MaterialId,
    ) -> Self {
        let mut hit = HitInfo {
            point,
            normal: outward_normal,
            tangent: Vec3::zeros(),
            bitangent: Vec3::zeros(),
            material,
            t,
            u: 0.0,
            v: 0.0,
            is_front_face: true,
        };
        hit.set_face_normal(ray, outward_normal);
        hit
    }

    pub fn is_front_face(ray: &Ray, outward_normal: &Vec3) -> bool {
        ray.direction.dot(outward_normal) < 0.0
    }

    /// `outward_normal` must be unit length
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.is_front_face = Self::is_front_face(ray, &outward_normal);
        self.normal = if self.is_front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// Sets the tangent and derives the bitangent from the stored normal,
    /// so `(tangent, bitangent, normal)` is right-handed.
    pub fn set_tangent_frame(&mut self, tangent: Vec3) {
        self.tangent = tangent;
        self.bitangent = self.normal.cross(&tangent);
    }
}
