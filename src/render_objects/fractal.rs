use ultraviolet::Vec3;

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

use super::{march, Hit, Hittable};

const POWER: f32 = 8.0;
const ITERATIONS: usize = 8;
const BAILOUT: f32 = 2.0;

/// The power 8 set lies inside radius 2^(1/7) ~ 1.104.
pub const BOUND_RADIUS: f32 = 1.2;

/// Past this distance from the bound, the bound itself is the step.
const BOUND_MARGIN: f32 = 0.1;

/// Mandelbulb of unit size centered on `pos`, scaled by `scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fractal {
    pub pos: Vec3,
    pub scale: f32,
    pub material: Material,
}

impl Fractal {
    pub fn new(pos: Vec3, material: Material) -> Self {
        Fractal {
            pos,
            scale: 1.0,
            material,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Escape-time distance estimate `0.5 * ln(r) * r / dr` in unit space.
pub fn mandelbulb_de(p: Vec3) -> f32 {
    let mut z = p;
    let mut dr = 1.0;
    let mut r = 0.0;
    for _ in 0..ITERATIONS {
        r = z.mag();
        if r > BAILOUT {
            break;
        }
        let theta = if r > 0.0 { (z.z / r).clamp(-1.0, 1.0).acos() } else { 0.0 };
        let phi = z.y.atan2(z.x);
        dr = r.powf(POWER - 1.0) * POWER * dr + 1.0;

        let zr = r.powf(POWER);
        let theta = theta * POWER;
        let phi = phi * POWER;
        z = Vec3::new(
            theta.sin() * phi.cos(),
            phi.sin() * theta.sin(),
            theta.cos(),
        ) * zr
            + p;
    }
    if r <= 0.0 {
        return 0.0;
    }
    0.5 * r.ln() * r / dr
}

impl Hittable for Fractal {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        march(self, ray, tol)
    }

    fn dist(&self, point: Vec3) -> f32 {
        let local = (point - self.pos) / self.scale;
        let bound = local.mag() - BOUND_RADIUS;
        if bound > BOUND_MARGIN {
            return bound * self.scale;
        }
        mandelbulb_de(local) * self.scale
    }

    fn get_material(&self, _point: Vec3) -> Material {
        self.material
    }
}
