use ultraviolet::Vec3;

/// Query object for every intersection routine.
///
/// The direction is normalized on construction and never changes after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalized(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// False when any origin or direction component is NaN or infinite,
    /// as after normalizing a zero direction.
    pub fn is_finite(&self) -> bool {
        let (o, d) = (self.origin, self.direction);
        [o.x, o.y, o.z, d.x, d.y, d.z].iter().all(|c| c.is_finite())
    }

    /// Start a secondary ray slightly off a surface so it does not
    /// re-hit the point it left from.
    pub fn offset(point: Vec3, normal: Vec3, direction: Vec3, bias: f32) -> Ray {
        let origin = if direction.dot(normal) < 0.0 {
            point - normal * bias
        } else {
            point + normal * bias
        };
        Ray::new(origin, direction)
    }
}
