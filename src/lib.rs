//! Geometric core of a small ray tracer.
//!
//! Shapes answer three questions: where a ray first meets them, how far a
//! point is from their surface, and what their surface looks like there.
//! Spheres, planes and boxes are solved in closed form; cones and the
//! Mandelbulb are found by sphere tracing their distance fields. A textured
//! [`Background`] supplies the color of rays that hit nothing.

pub mod config;
pub mod constants;
pub mod error;
pub mod materials;
pub mod primatives;
pub mod render;
pub mod render_objects;
pub mod scene;

pub use config::Config;
pub use constants::{Tolerances, EPSILON, MAX_DIST, MAX_MARCH_STEPS};
pub use error::{Result, TracerError};
pub use materials::{Material, Texture};
pub use primatives::Ray;
pub use render_objects::{
    Background, Cone, Cuboid, Fractal, Hit, Hittable, HorPlane, Primitive, Sphere,
};
pub use scene::{Light, Scene};
