use log::debug;
use ultraviolet::Vec3;

use crate::{
    constants::Tolerances,
    primatives::Ray,
    render_objects::{Background, Hit, Hittable, Primitive},
};

/// Point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Light {
            position,
            intensity,
        }
    }
}

/// Everything a ray can see. Read-only once assembled, so it can be shared
/// across render threads behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Scene {
    pub objects: Vec<Primitive>,
    pub lights: Vec<Light>,
    pub background: Option<Background>,
    pub sky: Vec3,
    pub tolerances: Tolerances,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            objects: Vec::new(),
            lights: Vec::new(),
            background: None,
            sky: Vec3::new(0.2, 0.7, 0.8),
            tolerances: Tolerances::default(),
        }
    }
}

impl Scene {
    pub fn new(tolerances: Tolerances) -> Self {
        Scene {
            tolerances,
            ..Default::default()
        }
    }

    pub fn push(&mut self, object: impl Into<Primitive>) -> &mut Self {
        let object = object.into();
        debug!("Adding {} to scene", object.kind());
        self.objects.push(object);
        self
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }

    pub fn set_background(&mut self, background: Background) -> &mut Self {
        self.background = Some(background);
        self
    }

    /// Nearest valid hit over every object.
    pub fn ray_intersect(&self, ray: &Ray) -> Hit {
        self.objects
            .iter()
            .map(|object| object.ray_intersect_with(ray, &self.tolerances))
            .fold(Hit::miss(), Hit::nearer)
    }

    /// Color for rays that strike nothing.
    pub fn background_color(&self, ray: &Ray) -> Vec3 {
        match &self.background {
            Some(background) => background.get_color(ray),
            None => self.sky,
        }
    }
}
