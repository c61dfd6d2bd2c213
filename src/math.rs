use bevy::math::bounding::{Aabb3d, BoundingSphere, IntersectsVolume, RayCast3d};
use bevy::prelude::*;

/// Layer that interaction targets live on.
pub const INTERACTION_LAYER: u32 = 1 << 0;
/// Static world geometry that blocks the scanner but is never interactable.
pub const WORLD_LAYER: u32 = 1 << 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Query volume centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub layers: u32,
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            layers: INTERACTION_LAYER,
        }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: Shape::Cuboid { half_extents },
            layers: INTERACTION_LAYER,
        }
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    pub fn on_layer(&self, mask: u32) -> bool {
        self.layers & mask != 0
    }

    /// Distance along the ray to the first intersection, if any.
    pub fn ray_distance(&self, center: Vec3, ray: &RayCast3d) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => {
                ray.sphere_intersection_at(&BoundingSphere::new(center, radius))
            }
            Shape::Cuboid { half_extents } => {
                ray.aabb_intersection_at(&Aabb3d::new(center, half_extents))
            }
        }
    }

    pub fn touches(&self, center: Vec3, body: &BoundingSphere) -> bool {
        match self.shape {
            Shape::Sphere { radius } => body.intersects(&BoundingSphere::new(center, radius)),
            Shape::Cuboid { half_extents } => body.intersects(&Aabb3d::new(center, half_extents)),
        }
    }
}

/// Builds the scanner ray: `length` units from `origin` along `direction`.
pub fn interaction_ray(origin: Vec3, direction: Dir3, length: f32) -> RayCast3d {
    RayCast3d::from_ray(
        Ray3d {
            origin,
            direction,
        },
        length,
    )
}

/// Nearest collider on `mask` hit by `ray` (pure function for testing).
pub fn nearest_hit<'a>(
    ray: &RayCast3d,
    mask: u32,
    candidates: impl IntoIterator<Item = (Entity, Vec3, &'a Collider)>,
) -> Option<(Entity, f32)> {
    candidates
        .into_iter()
        .filter(|(_, _, collider)| collider.on_layer(mask))
        .filter_map(|(entity, center, collider)| {
            collider
                .ray_distance(center, ray)
                .map(|distance| (entity, distance))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
