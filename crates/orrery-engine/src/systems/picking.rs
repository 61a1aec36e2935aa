use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::renderer::camera::Ray;

/// Distance along a normalised ray to the first hit on a sphere.
/// Returns None when the ray misses or the sphere is behind the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest active, pickable entity hit by `ray`.
///
/// Each entity is tested as a sphere of its mesh radius plus `extra_radius`,
/// which keeps small bodies clickable from far away.
pub fn pick<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    ray: &Ray,
    extra_radius: f32,
) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for entity in entities {
        if !entity.active || !entity.pickable {
            continue;
        }
        let radius = entity.radius() + extra_radius;
        if radius <= 0.0 {
            continue;
        }
        if let Some(t) = ray_sphere(ray.origin, ray.dir, entity.pos, radius) {
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((entity.id, t));
            }
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Color, MeshComponent};

    fn body(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, Color::WHITE))
            .pickable()
    }

    #[test]
    fn ray_sphere_hit_and_miss() {
        let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
        assert!((hit.unwrap() - 3.0).abs() < 1e-5);

        assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
        // Sphere behind the ray origin.
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
    }

    #[test]
    fn pick_returns_nearest() {
        let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
        let entities = vec![
            body(1, Vec3::new(0.0, 0.0, 20.0), 1.0),
            body(2, Vec3::new(0.0, 0.0, 10.0), 1.0),
            body(3, Vec3::new(5.0, 0.0, 5.0), 1.0),
        ];
        assert_eq!(pick(entities.iter(), &ray, 0.0), Some(EntityId(2)));
    }

    #[test]
    fn pick_skips_inactive_and_unpickable() {
        let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
        let mut hidden = body(1, Vec3::new(0.0, 0.0, 5.0), 1.0);
        hidden.active = false;
        let mut star = body(2, Vec3::new(0.0, 0.0, 8.0), 1.0);
        star.pickable = false;
        let far = body(3, Vec3::new(0.0, 0.0, 30.0), 1.0);

        let entities = vec![hidden, star, far];
        assert_eq!(pick(entities.iter(), &ray, 0.0), Some(EntityId(3)));
    }

    #[test]
    fn extra_radius_widens_target() {
        let ray = Ray { origin: Vec3::ZERO, dir: Vec3::Z };
        let entities = vec![body(1, Vec3::new(1.5, 0.0, 10.0), 0.2)];
        assert!(pick(entities.iter(), &ray, 0.0).is_none());
        assert_eq!(pick(entities.iter(), &ray, 2.0), Some(EntityId(1)));
    }
}
