use std::path::Path;

use image::RgbImage;
use log::info;
use ultraviolet::{Vec3, Vec4};

use crate::error::{Result, TracerError};

/// Surface appearance handed to the shader.
///
/// `coefficients` holds the diffuse, specular, reflection and refraction
/// weights in that order. They are mix factors and need not sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub coefficients: Vec4,
    pub color: Vec3,
    pub specular_exponent: f32,
    pub refractive_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            coefficients: Vec4::new(1.0, 0.0, 0.0, 0.0),
            color: Vec3::new(1.0, 1.0, 1.0),
            specular_exponent: 1.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    pub fn new(
        coefficients: Vec4,
        color: Vec3,
        specular_exponent: f32,
        refractive_index: f32,
    ) -> Self {
        Material {
            coefficients,
            color,
            specular_exponent,
            refractive_index,
        }
    }

    pub fn diffuse_weight(&self) -> f32 {
        self.coefficients.x
    }

    pub fn specular_weight(&self) -> f32 {
        self.coefficients.y
    }

    pub fn reflect_weight(&self) -> f32 {
        self.coefficients.z
    }

    pub fn refract_weight(&self) -> f32 {
        self.coefficients.w
    }

    /// Same scalars, different albedo. Used when a texture resolves the color.
    pub fn with_color(self, color: Vec3) -> Self {
        Material { color, ..self }
    }
}

/// Flat, row-major pixel buffer. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pixels: Vec<Vec3>,
    width: usize,
    height: usize,
}

impl Texture {
    pub fn new(pixels: Vec<Vec3>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(TracerError::InvalidTexture {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Texture {
            pixels,
            width,
            height,
        })
    }

    pub fn from_rgb_image(image: &RgbImage) -> Result<Self> {
        let pixels = image
            .pixels()
            .map(|p| Vec3::new(p.0[0] as f32, p.0[1] as f32, p.0[2] as f32) / 255.0)
            .collect();
        Texture::new(pixels, image.width() as usize, image.height() as usize)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)?.to_rgb8();
        info!(
            "Loaded texture \"{}\" ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Texture::from_rgb_image(&image)
    }

    /// Two-color checkerboard with square cells `cell` pixels wide.
    pub fn checkerboard(
        width: usize,
        height: usize,
        cell: usize,
        a: Vec3,
        b: Vec3,
    ) -> Result<Self> {
        let cell = cell.max(1);
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((x / cell) + (y / cell)) % 2 == 0))
            .map(|even| if even { a } else { b })
            .collect();
        Texture::new(pixels, width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(u, v)` with both coordinates wrapped into range.
    pub fn sample(&self, u: i64, v: i64) -> Vec3 {
        let x = u.rem_euclid(self.width as i64) as usize;
        let y = v.rem_euclid(self.height as i64) as usize;
        self.pixels[x + y * self.width]
    }

    /// Pixel at `(u, v)` with both coordinates clamped to the edge.
    pub fn sample_clamped(&self, u: i64, v: i64) -> Vec3 {
        let x = u.clamp(0, self.width as i64 - 1) as usize;
        let y = v.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[x + y * self.width]
    }
}
