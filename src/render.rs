use ultraviolet::Vec3;

use crate::{primatives::Ray, render_objects::Hit, scene::Scene};

/// Mirror `direction` about `normal`.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Snell refraction through a surface with index `eta_t`, assuming the
/// outside medium is air. `None` on total internal reflection.
pub fn refract(direction: Vec3, normal: Vec3, eta_t: f32) -> Option<Vec3> {
    let mut cosi = -direction.dot(normal).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t, mut n) = (1.0, eta_t, normal);
    if cosi < 0.0 {
        // Leaving the object.
        cosi = -cosi;
        std::mem::swap(&mut eta_i, &mut eta_t);
        n = -normal;
    }
    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        None
    } else {
        Some((direction * eta + n * (eta * cosi - k.sqrt())).normalized())
    }
}

fn in_shadow(scene: &Scene, hit: &Hit, light_dir: Vec3, light_dist: f32) -> bool {
    let bias = 10.0 * scene.tolerances.epsilon;
    let shadow_ray = Ray::offset(hit.point, hit.normal, light_dir, bias);
    let blocker = scene.ray_intersect(&shadow_ray);
    blocker.hit && blocker.dist < light_dist
}

/// Whitted-style shading. Recursion stops after `depth` bounces and the
/// background takes over.
pub fn cast_ray(scene: &Scene, ray: &Ray, depth: u32) -> Vec3 {
    let hit = scene.ray_intersect(ray);
    if depth == 0 || !hit.hit {
        return scene.background_color(ray);
    }
    let material = hit.material;
    let bias = 10.0 * scene.tolerances.epsilon;

    let reflect_color = if material.reflect_weight() > 0.0 {
        let dir = reflect(ray.direction, hit.normal).normalized();
        cast_ray(scene, &Ray::offset(hit.point, hit.normal, dir, bias), depth - 1)
    } else {
        Vec3::zero()
    };

    let refract_color = if material.refract_weight() > 0.0 {
        match refract(ray.direction, hit.normal, material.refractive_index) {
            Some(dir) => cast_ray(scene, &Ray::offset(hit.point, hit.normal, dir, bias), depth - 1),
            None => reflect_color,
        }
    } else {
        Vec3::zero()
    };

    let mut diffuse = 0.0;
    let mut specular = 0.0;
    for light in &scene.lights {
        let to_light = light.position - hit.point;
        let light_dist = to_light.mag();
        let light_dir = to_light / light_dist;
        if in_shadow(scene, &hit, light_dir, light_dist) {
            continue;
        }
        diffuse += light.intensity * light_dir.dot(hit.normal).max(0.0);
        let mirrored = reflect(-light_dir, hit.normal);
        specular += light.intensity
            * (-mirrored.dot(ray.direction))
                .max(0.0)
                .powf(material.specular_exponent);
    }

    material.color * diffuse * material.diffuse_weight()
        + Vec3::one() * specular * material.specular_weight()
        + reflect_color * material.reflect_weight()
        + refract_color * material.refract_weight()
}
