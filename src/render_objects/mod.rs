use ultraviolet::Vec3;

use crate::{constants::Tolerances, materials::Material, primatives::Ray};

pub use self::background::Background;
pub use self::cone::Cone;
pub use self::cuboid::Cuboid;
pub use self::fractal::Fractal;
pub use self::hitable::{Hit, Hittable};
pub use self::march::{estimate_normal, march};
pub use self::plane::HorPlane;
pub use self::sphere::Sphere;

pub mod background;
pub mod cone;
pub mod cuboid;
pub mod fractal;
pub mod hitable;
pub mod march;
pub mod plane;
pub mod sphere;

/// Closed set of scene shapes, dispatched by match.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Cone(Cone),
    Box(Cuboid),
    Fractal(Fractal),
    HorPlane(HorPlane),
}

impl Primitive {
    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Primitive::Sphere(s) => s,
            Primitive::Cone(c) => c,
            Primitive::Box(b) => b,
            Primitive::Fractal(f) => f,
            Primitive::HorPlane(p) => p,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Cone(_) => "cone",
            Primitive::Box(_) => "box",
            Primitive::Fractal(_) => "fractal",
            Primitive::HorPlane(_) => "plane",
        }
    }
}

impl Hittable for Primitive {
    fn ray_intersect_with(&self, ray: &Ray, tol: &Tolerances) -> Hit {
        self.as_hittable().ray_intersect_with(ray, tol)
    }

    fn dist(&self, point: Vec3) -> f32 {
        self.as_hittable().dist(point)
    }

    fn get_material(&self, point: Vec3) -> Material {
        self.as_hittable().get_material(point)
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Cone> for Primitive {
    fn from(c: Cone) -> Self {
        Primitive::Cone(c)
    }
}

impl From<Cuboid> for Primitive {
    fn from(b: Cuboid) -> Self {
        Primitive::Box(b)
    }
}

impl From<Fractal> for Primitive {
    fn from(f: Fractal) -> Self {
        Primitive::Fractal(f)
    }
}

impl From<HorPlane> for Primitive {
    fn from(p: HorPlane) -> Self {
        Primitive::HorPlane(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_inner_shape() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 2.0, Material::default());
        let prim = Primitive::from(sphere);
        let ray = Ray::new(Vec3::zero(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(prim.ray_intersect(&ray), sphere.ray_intersect(&ray));
        assert_eq!(prim.dist(Vec3::zero()), sphere.dist(Vec3::zero()));
        assert_eq!(prim.kind(), "sphere");
    }

    #[test]
    fn flat_materials_are_unchanged() {
        let mat = Material::new(
            ultraviolet::Vec4::new(0.1, 0.2, 0.3, 0.4),
            Vec3::new(0.2, 0.4, 0.6),
            25.0,
            1.5,
        );
        let shapes: Vec<Primitive> = vec![
            Sphere::new(Vec3::zero(), 1.0, mat).into(),
            Cone::from_angle(Vec3::zero(), 1.0, 0.4, mat).into(),
            Cuboid::new(Vec3::zero(), Vec3::one(), mat).into(),
            Fractal::new(Vec3::zero(), mat).into(),
            HorPlane::new(0.0, mat).into(),
        ];
        for shape in shapes {
            assert_eq!(shape.get_material(Vec3::new(0.3, 0.0, 0.7)), mat);
        }
    }
}
