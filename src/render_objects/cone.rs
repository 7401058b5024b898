use ultraviolet::{Vec2, Vec3};

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

use super::{march, Hit, Hittable};

/// Solid cone with its apex at `pos`, opening downwards along -y.
///
/// `c` is the (sin, cos) of the half angle and `h` the height from apex to
/// base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cone {
    pub pos: Vec3,
    pub h: f32,
    pub c: Vec2,
    pub material: Material,
}

impl Cone {
    pub fn new(pos: Vec3, h: f32, c: Vec2, material: Material) -> Self {
        Cone { pos, h, c, material }
    }

    pub fn from_angle(pos: Vec3, h: f32, half_angle: f32, material: Material) -> Self {
        Cone::new(pos, h, Vec2::new(half_angle.sin(), half_angle.cos()), material)
    }

    pub fn base_radius(&self) -> f32 {
        self.h * self.c.x / self.c.y
    }
}

fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Hittable for Cone {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        march(self, ray, tol)
    }

    fn dist(&self, point: Vec3) -> f32 {
        let p = point - self.pos;
        // Base corner in the (radial, height) plane.
        let q = Vec2::new(self.base_radius(), -self.h);
        let w = Vec2::new(Vec2::new(p.x, p.z).mag(), p.y);

        // Closest points on the slant segment and on the base segment.
        let a = w - q * (w.dot(q) / q.dot(q)).clamp(0.0, 1.0);
        let b = w - Vec2::new(q.x * (w.x / q.x).clamp(0.0, 1.0), q.y);

        let k = sign(q.y);
        let d = a.dot(a).min(b.dot(b));
        let s = (k * (w.x * q.y - w.y * q.x)).max(k * (w.y - q.y));
        d.sqrt() * sign(s)
    }

    fn get_material(&self, _point: Vec3) -> Material {
        self.material
    }
}
