use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Spin about the local Y axis, in radians.
    pub rotation: f32,
    /// Whether pointer picking may select this entity.
    pub pickable: bool,
    /// Sphere mesh (entities without a mesh are invisible).
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: 0.0,
            pickable: false,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn pickable(mut self) -> Self {
        self.pickable = true;
        self
    }

    /// Radius of the entity's sphere, or zero when it has no mesh.
    pub fn radius(&self) -> f32 {
        self.mesh.as_ref().map(|m| m.radius).unwrap_or(0.0)
    }
}
