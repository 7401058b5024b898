use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use ultraviolet::Vec3;

use crate::{materials::Material, materials::Texture, primatives::Ray};

use super::Sphere;

/// Environment shell: a large sphere around the origin wrapped in an
/// equirectangular texture.
#[derive(Clone, Debug)]
pub struct Background {
    env: Sphere,
    texture: Arc<Texture>,
}

impl Background {
    pub fn new(radius: f32, texture: Arc<Texture>) -> Self {
        Background {
            env: Sphere::new(Vec3::zero(), radius, Material::default()),
            texture,
        }
    }

    pub fn radius(&self) -> f32 {
        self.env.radius
    }

    pub fn get_color(&self, ray: &Ray) -> Vec3 {
        // Rays starting outside the shell fall back to their own direction.
        let direction = match self.env.ray_sphere_intersect(ray, 0.0) {
            Some(t) => ray.at(t) - self.env.center,
            None => ray.direction,
        };
        let (u, v) = self.direction_to_texel(direction);
        self.texture.sample_clamped(u, v)
    }

    /// Longitude wraps around the texture width, latitude clamps to its
    /// height. Degenerate directions land on texel (0, 0).
    pub fn direction_to_texel(&self, direction: Vec3) -> (i64, i64) {
        let mag = direction.mag();
        if !(mag > 0.0 && mag.is_finite()) {
            return (0, 0);
        }
        let d = direction / mag;
        let width = self.texture.width() as f32;
        let height = self.texture.height() as f32;

        let longitude = d.z.atan2(d.x);
        let latitude = d.y.clamp(-1.0, 1.0).acos();

        let u = ((longitude / TAU + 0.5) * width).floor() as i64;
        let v = ((latitude / PI) * height).floor() as i64;
        (
            u.rem_euclid(self.texture.width() as i64),
            v.clamp(0, self.texture.height() as i64 - 1),
        )
    }
}
