use ultraviolet::Vec3;

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

use super::{Hit, Hittable};

/// Axis-aligned box centered on `pos` with half extents `half`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub pos: Vec3,
    pub half: Vec3,
    pub material: Material,
}

fn axis(v: Vec3, i: usize) -> f32 {
    match i {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

fn unit_axis(i: usize, sign: f32) -> Vec3 {
    match i {
        0 => Vec3::new(sign, 0.0, 0.0),
        1 => Vec3::new(0.0, sign, 0.0),
        _ => Vec3::new(0.0, 0.0, sign),
    }
}

impl Cuboid {
    pub fn new(pos: Vec3, half: Vec3, material: Material) -> Self {
        Cuboid {
            pos,
            half,
            material,
        }
    }

    /// Slab test in box-local space. Returns `(t, normal)` of the nearest
    /// boundary in front of the ray.
    pub fn slab_intersect(&self, ray: &Ray, min_t: f32) -> Option<(f32, Vec3)> {
        // NaN slab bounds would drop out of every comparison below.
        if !ray.is_finite() {
            return None;
        }
        let origin = ray.origin - self.pos;
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        let mut enter = (0, 0.0);
        let mut exit = (0, 0.0);

        for i in 0..3 {
            let o = axis(origin, i);
            let d = axis(ray.direction, i);
            let b = axis(self.half, i);
            if d == 0.0 {
                // Parallel to this slab; must already be between its planes.
                if !(o.abs() <= b) {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let t1 = (-b - o) * inv;
            let t2 = (b - o) * inv;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            if near > t_min {
                t_min = near;
                enter = (i, -d.signum());
            }
            if far < t_max {
                t_max = far;
                exit = (i, d.signum());
            }
            if !(t_min <= t_max) {
                return None;
            }
        }

        if !(t_max > min_t) {
            return None;
        }
        if t_min > min_t {
            Some((t_min, unit_axis(enter.0, enter.1)))
        } else {
            Some((t_max, unit_axis(exit.0, exit.1)))
        }
    }
}

impl Hittable for Cuboid {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        match self.slab_intersect(ray, tol.epsilon) {
            Some((t, normal)) if t <= tol.max_dist => {
                let point = ray.at(t);
                if !(point.x.is_finite() && point.y.is_finite() && point.z.is_finite()) {
                    return Hit::miss();
                }
                Hit::new(point, t, normal, self.get_material(point))
            }
            _ => Hit::miss(),
        }
    }

    fn dist(&self, point: Vec3) -> f32 {
        let p = point - self.pos;
        let q = Vec3::new(p.x.abs(), p.y.abs(), p.z.abs()) - self.half;
        let outside = q.max_by_component(Vec3::zero()).mag();
        let inside = q.x.max(q.y).max(q.z).min(0.0);
        outside + inside
    }

    fn get_material(&self, _point: Vec3) -> Material {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_objects::march;

    fn cube() -> Cuboid {
        Cuboid::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.5, 2.0), Material::default())
    }

    #[test]
    fn dist_sign_on_inside_outside() {
        let c = cube();
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            // A random point on a random face.
            let face = rng.usize(0..3);
            let sign = if rng.bool() { 1.0 } else { -1.0 };
            let mut local = Vec3::new(
                (rng.f32() * 2.0 - 1.0) * c.half.x,
                (rng.f32() * 2.0 - 1.0) * c.half.y,
                (rng.f32() * 2.0 - 1.0) * c.half.z,
            );
            match face {
                0 => local.x = sign * c.half.x,
                1 => local.y = sign * c.half.y,
                _ => local.z = sign * c.half.z,
            }
            assert!(c.dist(c.pos + local).abs() < 1e-5);
            assert!(c.dist(c.pos + local * 0.9) < 0.0);
            assert!(c.dist(c.pos + local * 1.1) > 0.0);
        }
        assert!((c.dist(c.pos) + 0.5).abs() < 1e-6);
        assert!((c.dist(c.pos + Vec3::new(2.0, 0.0, 0.0)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slab_hit_front_face() {
        let c = cube();
        let ray = Ray::new(Vec3::new(1.0, 2.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = c.ray_intersect(&ray);
        assert!(hit.hit);
        assert!((hit.dist - 5.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn slab_from_inside_uses_exit() {
        let c = cube();
        let ray = Ray::new(c.pos, Vec3::new(-1.0, 0.0, 0.0));
        let hit = c.ray_intersect(&ray);
        assert!(hit.hit);
        assert!((hit.dist - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn slab_misses() {
        let c = cube();
        // Parallel to x, above the box.
        let over = Ray::new(Vec3::new(-5.0, 3.0, 3.0), Vec3::unit_x());
        assert!(!c.ray_intersect(&over).hit);
        // Pointing away.
        let away = Ray::new(Vec3::new(1.0, 2.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!c.ray_intersect(&away).hit);
        // Diagonal passing by a corner.
        let by = Ray::new(Vec3::new(-5.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(!c.ray_intersect(&by).hit);
    }

    #[test]
    fn slab_agrees_with_march() {
        let c = cube();
        let tol = Tolerances::default();
        let ray = Ray::new(Vec3::new(-4.0, 4.0, 0.0), c.pos - Vec3::new(-4.0, 4.0, 0.0));
        let slab = c.ray_intersect(&ray);
        let marched = march(&c, &ray, &tol);
        assert!(slab.hit && marched.hit);
        assert!((slab.dist - marched.dist).abs() < 0.01);
        assert!(slab.normal.dot(marched.normal) > 0.99);
        assert!(c.dist(marched.point).abs() < tol.epsilon);
    }

    #[test]
    fn marched_from_center_exits_at_face() {
        let c = Cuboid::new(Vec3::zero(), Vec3::new(5.0, 5.0, 5.0), Material::default());
        let tol = Tolerances::default();
        let ray = Ray::new(Vec3::zero(), Vec3::unit_x());
        let marched = march(&c, &ray, &tol);
        let slab = c.ray_intersect(&ray);
        assert!(slab.hit && marched.hit);
        assert!((slab.dist - 5.0).abs() < 1e-5);
        assert!((marched.dist - 5.0).abs() < 2.0 * tol.epsilon);
        assert!(marched.normal.x > 0.99);
    }

    #[test]
    fn marched_from_inside_never_passes_exit() {
        let c = cube();
        let tol = Tolerances::default();
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..100 {
            let local = Vec3::new(
                (rng.f32() - 0.5) * c.half.x,
                (rng.f32() - 0.5) * c.half.y,
                (rng.f32() - 0.5) * c.half.z,
            );
            let dir = Vec3::new(rng.f32() - 0.5, rng.f32() - 0.5, rng.f32() - 0.5);
            if dir.mag() < 1e-2 {
                continue;
            }
            let ray = Ray::new(c.pos + local, dir);
            let slab = c.ray_intersect(&ray);
            let marched = march(&c, &ray, &tol);
            assert!(slab.hit && marched.hit);
            assert!(marched.dist > tol.epsilon);
            assert!(marched.dist <= slab.dist + 1e-4);
            assert!(c.dist(marched.point).abs() < tol.epsilon);
        }
    }

    #[test]
    fn nan_origin_misses() {
        let c = Cuboid::new(Vec3::zero(), Vec3::one(), Material::default());
        let ray = Ray::new(Vec3::new(f32::NAN, 0.0, 5.0), Vec3::new(0.1, 0.0, -1.0));
        assert!(c.slab_intersect(&ray, 0.0).is_none());
        assert!(!c.ray_intersect(&ray).hit);
        let zero = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zero());
        assert!(!c.ray_intersect(&zero).hit);
    }
}
