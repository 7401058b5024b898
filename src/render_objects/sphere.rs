use ultraviolet::Vec3;

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

use super::{Hit, Hittable};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }

    /// Nearest root of the ray/sphere quadratic beyond `min_t`.
    pub fn ray_sphere_intersect(&self, ray: &Ray, min_t: f32) -> Option<f32> {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.mag_sq() - self.radius * self.radius;
        let descrim = b * b - c;

        // NaN falls through here too.
        if !(descrim >= 0.0) {
            return None;
        }
        let desc_sqrt = descrim.sqrt();

        let t1 = -b - desc_sqrt;
        if t1 > min_t {
            return Some(t1);
        }
        let t2 = -b + desc_sqrt;
        if t2 > min_t {
            Some(t2)
        } else {
            None
        }
    }

    fn normal(&self, pos: Vec3) -> Vec3 {
        (pos - self.center).normalized()
    }
}

impl Hittable for Sphere {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        match self.ray_sphere_intersect(ray, tol.epsilon) {
            Some(t) => {
                let point = ray.at(t);
                Hit::new(point, t, self.normal(point), self.get_material(point))
            }
            None => Hit::miss(),
        }
    }

    fn dist(&self, point: Vec3) -> f32 {
        (point - self.center).mag() - self.radius
    }

    fn get_material(&self, _point: Vec3) -> Material {
        self.material
    }
}
