use std::sync::Arc;

use ultraviolet::Vec3;

use crate::{
    constants::Tolerances,
    materials::{Material, Texture},
    primatives::Ray,
};

use super::{Hit, Hittable};

/// Infinite plane `y = const`, always facing up.
#[derive(Clone, Debug, PartialEq)]
pub struct HorPlane {
    pub y: f32,
    pub material: Material,
    texture: Option<Arc<Texture>>,
    texels_per_unit: f32,
}

impl HorPlane {
    pub fn new(y: f32, material: Material) -> Self {
        HorPlane {
            y,
            material,
            texture: None,
            texels_per_unit: 1.0,
        }
    }

    /// Plane whose color is looked up in `texture` at `(x, z)`, scaled by
    /// `texels_per_unit` and wrapped.
    pub fn textured(
        y: f32,
        material: Material,
        texture: Arc<Texture>,
        texels_per_unit: f32,
    ) -> Self {
        HorPlane {
            y,
            material,
            texture: Some(texture),
            texels_per_unit,
        }
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }
}

impl Hittable for HorPlane {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        if !ray.is_finite() {
            return Hit::miss();
        }
        // This ray is parallel to the plane.
        if !(ray.direction.y.abs() > tol.epsilon) {
            return Hit::miss();
        }
        let t = (self.y - ray.origin.y) / ray.direction.y;
        if !(t > 0.0 && t <= tol.max_dist) {
            return Hit::miss();
        }
        let point = ray.at(t);
        if !(point.x.is_finite() && point.z.is_finite()) {
            return Hit::miss();
        }
        Hit::new(point, t, Vec3::unit_y(), self.get_material(point))
    }

    fn dist(&self, point: Vec3) -> f32 {
        point.y - self.y
    }

    fn get_material(&self, point: Vec3) -> Material {
        match &self.texture {
            Some(texture) => {
                let u = (point.x * self.texels_per_unit).floor() as i64;
                let v = (point.z * self.texels_per_unit).floor() as i64;
                self.material.with_color(texture.sample(u, v))
            }
            None => self.material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> HorPlane {
        HorPlane::new(-4.0, Material::default())
    }

    #[test]
    fn hit_from_above() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 2.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = floor().ray_intersect(&ray);
        assert!(hit.hit);
        assert!((hit.dist - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::unit_y());
        assert!((hit.point - Vec3::new(1.0, -4.0, 2.0)).mag() < 1e-5);
    }

    #[test]
    fn parallel_ray_misses() {
        let mut rng = fastrand::Rng::with_seed(21);
        for _ in 0..50 {
            let origin = Vec3::new(rng.f32() * 10.0, rng.f32() * 10.0 - 5.0, rng.f32() * 10.0);
            let dir = Vec3::new(rng.f32() - 0.5, 0.0, rng.f32() - 0.5);
            let ray = Ray::new(origin, dir);
            assert!(!floor().ray_intersect(&ray).hit);
        }
    }

    #[test]
    fn behind_and_far_miss() {
        let up = Ray::new(Vec3::zero(), Vec3::unit_y());
        assert!(!floor().ray_intersect(&up).hit);

        let grazing = Ray::new(Vec3::zero(), Vec3::new(1.0, -0.01, 0.0));
        assert!(!floor().ray_intersect(&grazing).hit);
    }

    #[test]
    fn from_below_still_faces_up() {
        let ray = Ray::new(Vec3::new(0.0, -10.0, 0.0), Vec3::unit_y());
        let hit = floor().ray_intersect(&ray);
        assert!(hit.hit);
        assert_eq!(hit.normal, Vec3::unit_y());
    }

    #[test]
    fn textured_plane_samples_checker() {
        let white = Vec3::one();
        let black = Vec3::zero();
        let tex = Arc::new(Texture::checkerboard(2, 2, 1, white, black).unwrap());
        let mut base = Material::default();
        base.specular_exponent = 10.0;
        let plane = HorPlane::textured(0.0, base, tex, 1.0);

        assert_eq!(plane.get_material(Vec3::new(0.5, 0.0, 0.5)).color, white);
        assert_eq!(plane.get_material(Vec3::new(1.5, 0.0, 0.5)).color, black);
        // negative coordinates wrap like positive ones
        assert_eq!(plane.get_material(Vec3::new(-0.5, 0.0, 0.5)).color, black);
        assert_eq!(plane.get_material(Vec3::new(2.5, 0.0, 2.5)).color, white);
        assert_eq!(plane.get_material(Vec3::zero()).specular_exponent, 10.0);

        let ray = Ray::new(Vec3::new(1.5, 3.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(plane.ray_intersect(&ray).material.color, black);
    }

    #[test]
    fn non_finite_rays_miss() {
        let nan_origin = Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(!floor().ray_intersect(&nan_origin).hit);
        let zero = Ray::new(Vec3::zero(), Vec3::zero());
        assert!(!floor().ray_intersect(&zero).hit);
        let mut rng = fastrand::Rng::with_seed(8);
        for _ in 0..50 {
            let mut origin = Vec3::new(rng.f32(), rng.f32() * 10.0, rng.f32());
            match rng.usize(0..3) {
                0 => origin.x = f32::NAN,
                1 => origin.z = f32::INFINITY,
                _ => origin.y = f32::NEG_INFINITY,
            }
            let ray = Ray::new(origin, Vec3::new(rng.f32() - 0.5, -1.0, rng.f32() - 0.5));
            assert!(!floor().ray_intersect(&ray).hit);
        }
    }

    #[test]
    fn signed_dist() {
        assert_eq!(floor().dist(Vec3::new(0.0, 1.0, 0.0)), 5.0);
        assert!(floor().dist(Vec3::new(0.0, -5.0, 0.0)) < 0.0);
    }
}
