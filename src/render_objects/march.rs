//! Sphere tracing over any shape's signed distance function.
//!
//! The march runs on the unsigned field, so rays that start inside a shape
//! walk out to the surface they exit through.

use ultraviolet::Vec3;

use crate::{constants::Tolerances, primatives::Ray};

use super::{Hit, Hittable};

/// Finite-difference step used for gradient normals.
pub const NORMAL_STEP: f32 = 1e-4;

/// March `ray` against `shape` until the distance drops under
/// `tol.epsilon`. Gives up past `tol.max_dist` or after `tol.max_steps`.
///
/// Hits closer than `tol.epsilon` to the origin are skipped, so a ray
/// leaving a surface does not report that same surface.
pub fn march<S: Hittable + ?Sized>(shape: &S, ray: &Ray, tol: &Tolerances) -> Hit {
    if !ray.is_finite() {
        return Hit::miss();
    }
    let mut t = 0.0;
    for _ in 0..tol.max_steps {
        if !(t <= tol.max_dist) {
            break;
        }
        let p = ray.at(t);
        let d = shape.dist(p).abs();
        if d.is_nan() {
            break;
        }
        if d < tol.epsilon && t > tol.epsilon {
            let normal = estimate_normal(shape, p, NORMAL_STEP);
            return Hit::new(p, t, normal, shape.get_material(p));
        }
        t += d.max(tol.epsilon);
    }
    Hit::miss()
}

/// Normalized central-difference gradient of `shape.dist` at `p`.
pub fn estimate_normal<S: Hittable + ?Sized>(shape: &S, p: Vec3, h: f32) -> Vec3 {
    let dx = Vec3::new(h, 0.0, 0.0);
    let dy = Vec3::new(0.0, h, 0.0);
    let dz = Vec3::new(0.0, 0.0, h);
    let gradient = Vec3::new(
        shape.dist(p + dx) - shape.dist(p - dx),
        shape.dist(p + dy) - shape.dist(p - dy),
        shape.dist(p + dz) - shape.dist(p - dz),
    );
    let mag = gradient.mag();
    if mag > 0.0 && mag.is_finite() {
        gradient / mag
    } else {
        Vec3::unit_y()
    }
}
