//! Ray queries against forcefield surfaces
//!
//! Analytic ray-shape intersection for the pointer impact source. Shapes are
//! deliberately simple: forcefield surfaces are spheres or axis-aligned
//! boxes in world space.

use glam::Vec3;

use crate::source::SurfaceId;

const T_MIN: f32 = 1e-4;

/// A world-space ray with unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point along the ray at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Outward surface normal at the hit point.
    pub normal: Vec3,
    /// Ray parameter at the hit.
    pub distance: f32,
}

/// Shape of one forcefield surface.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceShape {
    Sphere { center: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
}

impl SurfaceShape {
    /// Intersect a ray with this shape, returning the nearest hit in front
    /// of the origin. Rays starting inside a shape hit its far wall.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            SurfaceShape::Sphere { center, radius } => {
                intersect_sphere(ray, *center, *radius)
            }
            SurfaceShape::Box {
                center,
                half_extents,
            } => intersect_box(ray, *center, *half_extents),
        }
    }
}

fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<RayHit> {
    let to_origin = ray.origin - center;
    let b = to_origin.dot(ray.direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    let t = if t_near > T_MIN {
        t_near
    } else if t_far > T_MIN {
        t_far
    } else {
        return None;
    };

    let point = ray.at(t);
    Some(RayHit {
        point,
        normal: (point - center) / radius,
        distance: t,
    })
}

fn intersect_box(ray: &Ray, center: Vec3, half_extents: Vec3) -> Option<RayHit> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;

    for axis in 0..3 {
        let direction = ray.direction[axis];
        let origin = ray.origin[axis];
        if direction.abs() < 1e-8 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            enter_axis = axis;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    let t = if t_enter > T_MIN { t_enter } else { t_exit };
    if t <= T_MIN {
        return None;
    }

    let point = ray.at(t);
    let mut normal = Vec3::ZERO;
    normal[enter_axis] = if ray.direction[enter_axis] > 0.0 {
        -1.0
    } else {
        1.0
    };

    Some(RayHit {
        point,
        normal,
        distance: t,
    })
}

/// Collection of raycastable forcefield surfaces.
#[derive(Debug, Default)]
pub struct SurfaceSet {
    surfaces: Vec<(SurfaceId, SurfaceShape)>,
}

impl SurfaceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a surface.
    pub fn insert(&mut self, id: SurfaceId, shape: SurfaceShape) {
        self.remove(id);
        self.surfaces.push((id, shape));
    }

    /// Remove a surface.
    pub fn remove(&mut self, id: SurfaceId) {
        self.surfaces.retain(|(existing, _)| *existing != id);
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Find the nearest surface hit by the ray.
    pub fn raycast(&self, ray: &Ray) -> Option<(SurfaceId, RayHit)> {
        let mut nearest: Option<(SurfaceId, RayHit)> = None;
        for (id, shape) in &self.surfaces {
            if let Some(hit) = shape.intersect(ray) {
                let closer = nearest
                    .as_ref()
                    .is_none_or(|(_, best)| hit.distance < best.distance);
                if closer {
                    nearest = Some((*id, hit));
                }
            }
        }
        nearest
    }
}
