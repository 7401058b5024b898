use ultraviolet::Vec3;

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

/// The capability set every scene shape provides.
pub trait Hittable: Send + Sync {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit;

    fn ray_intersect(&self, ray: &Ray) -> Hit {
        self.ray_intersect_with(ray, &Tolerances::default())
    }

    /// Signed distance from `point` to the surface, negative inside.
    fn dist(&self, point: Vec3) -> f32;

    fn get_material(&self, point: Vec3) -> Material;
}

/// Outcome of one (ray, shape) query.
///
/// Only `hit` is meaningful when it is false.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub hit: bool,
    pub point: Vec3,
    pub dist: f32,
    pub normal: Vec3,
    pub material: Material,
}

impl Hit {
    pub fn new(point: Vec3, dist: f32, normal: Vec3, material: Material) -> Self {
        Hit {
            hit: true,
            point,
            dist,
            normal,
            material,
        }
    }

    pub fn miss() -> Self {
        Hit {
            hit: false,
            point: Vec3::zero(),
            dist: f32::MAX,
            normal: Vec3::zero(),
            material: Material::default(),
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn into_option(self) -> Option<Hit> {
        self.hit.then_some(self)
    }

    /// The closer of two hits, ignoring misses.
    pub fn nearer(self, other: Hit) -> Hit {
        match (self.hit, other.hit) {
            (true, true) if other.dist < self.dist => other,
            (true, _) => self,
            (false, _) => other,
        }
    }
}

impl Default for Hit {
    fn default() -> Self {
        Hit::miss()
    }
}

impl From<Hit> for bool {
    fn from(hit: Hit) -> bool {
        hit.hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(dist: f32) -> Hit {
        Hit::new(Vec3::zero(), dist, Vec3::unit_y(), Material::default())
    }

    #[test]
    fn miss_is_false() {
        let miss = Hit::miss();
        assert!(!bool::from(miss));
        assert!(miss.into_option().is_none());
        assert!(bool::from(at(1.0)));
    }

    #[test]
    fn nearer_skips_misses() {
        assert_eq!(at(2.0).nearer(at(1.0)).dist, 1.0);
        assert_eq!(at(1.0).nearer(at(2.0)).dist, 1.0);
        assert_eq!(Hit::miss().nearer(at(3.0)).dist, 3.0);
        assert_eq!(at(3.0).nearer(Hit::miss()).dist, 3.0);
        assert!(!Hit::miss().nearer(Hit::miss()).hit);
    }
}
