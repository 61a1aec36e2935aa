use crate::assets::registry::ModelRegistry;
use crate::components::entity::Entity;
use crate::renderer::body_instance::{BodyBuffer, BodyInstance};

/// Build the body instance buffer from entities with mesh components.
/// Model names are resolved through the registry; unknown names draw as spheres.
pub fn build_body_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    models: &ModelRegistry,
    buffer: &mut BodyBuffer,
) {
    buffer.clear();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let model = mesh
            .model
            .as_deref()
            .and_then(|name| models.id_of(name))
            .map(|id| id.0 as f32)
            .unwrap_or(BodyInstance::NO_MODEL);
        let pushed = buffer.push(BodyInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: mesh.radius,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            emissive: mesh.emissive,
            rotation: entity.rotation,
            model,
            _pad0: 0.0,
            _pad1: 0.0,
        });
        if !pushed {
            log::warn!("body buffer full, remaining entities not drawn");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::assets::manifest::ModelManifest;
    use crate::components::mesh::{Color, MeshComponent};
    use glam::Vec3;

    #[test]
    fn builds_instance_from_entity_with_mesh() {
        let manifest = ModelManifest::from_json(r#"{ "models": [ { "name": "Earth" } ] }"#).unwrap();
        let models = ModelRegistry::from_manifest(&manifest);

        let entity = Entity::new(EntityId(1))
            .with_pos(Vec3::new(40.0, 0.0, -3.0))
            .with_rotation(0.25)
            .with_mesh(
                MeshComponent::sphere(1.0, Color::new(0.0, 0.0, 1.0))
                    .with_emissive(0.5)
                    .with_model("Earth"),
            );

        let entities = vec![entity];
        let mut buffer = BodyBuffer::new();
        build_body_buffer(entities.iter(), &models, &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.instances()[0];
        assert_eq!((inst.x, inst.y, inst.z), (40.0, 0.0, -3.0));
        assert_eq!(inst.radius, 1.0);
        assert_eq!(inst.b, 1.0);
        assert_eq!(inst.emissive, 0.5);
        assert_eq!(inst.rotation, 0.25);
        assert_eq!(inst.model, 0.0);
    }

    #[test]
    fn unknown_model_draws_sphere() {
        let entity = Entity::new(EntityId(1))
            .with_mesh(MeshComponent::default().with_model("Vulcan"));
        let entities = vec![entity];
        let mut buffer = BodyBuffer::new();
        build_body_buffer(entities.iter(), &ModelRegistry::new(), &mut buffer);
        assert_eq!(buffer.instances()[0].model, BodyInstance::NO_MODEL);
    }

    #[test]
    fn skips_inactive_and_no_mesh() {
        let e1 = Entity::new(EntityId(1));
        let mut e2 = Entity::new(EntityId(2)).with_mesh(MeshComponent::default());
        e2.active = false;
        let e3 = Entity::new(EntityId(3)).with_mesh(MeshComponent::default());

        let entities = vec![e1, e2, e3];
        let mut buffer = BodyBuffer::new();
        build_body_buffer(entities.iter(), &ModelRegistry::new(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }

    #[test]
    fn stops_at_capacity() {
        let entities: Vec<Entity> = (0..5)
            .map(|i| Entity::new(EntityId(i)).with_mesh(MeshComponent::default()))
            .collect();
        let mut buffer = BodyBuffer::with_capacity(3);
        build_body_buffer(entities.iter(), &ModelRegistry::new(), &mut buffer);
        assert_eq!(buffer.instance_count(), 3);
    }
}
