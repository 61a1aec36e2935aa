use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage kept sorted by id.
///
/// Ids come from `EngineContext::next_id`, so spawning is normally a push and
/// lookups are a binary search. A star field adds about a thousand entities
/// that are never touched after init, which rules out a linear scan per body.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    fn index_of(&self, id: EntityId) -> Result<usize, usize> {
        self.entities.binary_search_by_key(&id, |e| e.id)
    }

    /// Add an entity. An entity with the same id is replaced.
    pub fn spawn(&mut self, entity: Entity) {
        match self.index_of(entity.id) {
            Ok(idx) => {
                log::warn!("entity {:?} spawned twice, replacing", entity.id);
                self.entities[idx] = entity;
            }
            Err(idx) => self.entities.insert(idx, entity),
        }
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id).ok()?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).ok().map(|idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = self.index_of(id).ok()?;
        Some(&mut self.entities[idx])
    }

    /// Entities in id (spawn) order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// First entity with the given tag, by id.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn count_tagged(&self, tag: &str) -> usize {
        self.entities.iter().filter(|e| e.tag == tag).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 0.0, 20.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 0.0, 20.0));
        assert!(scene.get(EntityId(2)).is_none());
    }

    #[test]
    fn out_of_order_spawns_stay_sorted() {
        let mut scene = Scene::new();
        for id in [5, 1, 9, 3] {
            scene.spawn(Entity::new(EntityId(id)));
        }
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5, 9]);
        scene.get_mut(EntityId(9)).unwrap().rotation = 1.0;
        assert_eq!(scene.get(EntityId(9)).unwrap().rotation, 1.0);
    }

    #[test]
    fn respawn_replaces() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("old"));
        scene.spawn(Entity::new(EntityId(1)).with_tag("new"));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().tag, "new");
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)));
        assert!(scene.despawn(EntityId(1)).is_some());
        assert_eq!(scene.len(), 1);
        assert!(scene.despawn(EntityId(1)).is_none());
        assert!(scene.get(EntityId(2)).is_some());
    }

    #[test]
    fn find_and_count_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("sun"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("star"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("star"));
        assert_eq!(scene.find_by_tag("sun").unwrap().id, EntityId(1));
        assert_eq!(scene.count_tagged("star"), 2);
        assert!(scene.find_by_tag("comet").is_none());
    }
}
