use std::collections::HashMap;
use crate::assets::manifest::ModelManifest;

/// Numeric model handle written into body instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(pub u32);

/// Registry of named models, built from a ModelManifest.
/// Name lookups are case-insensitive so "earth" and "Earth" share a model.
pub struct ModelRegistry {
    ids: HashMap<String, ModelId>,
    paths: Vec<String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            paths: Vec::new(),
        }
    }

    /// Build a registry from a parsed ModelManifest.
    /// Later duplicates of a name are ignored.
    pub fn from_manifest(manifest: &ModelManifest) -> Self {
        let mut reg = Self::new();
        for desc in &manifest.models {
            let key = desc.name.to_lowercase();
            if reg.ids.contains_key(&key) {
                log::warn!("model manifest: duplicate entry for {}", desc.name);
                continue;
            }
            reg.ids.insert(key, ModelId(reg.paths.len() as u32));
            reg.paths.push(desc.resolved_path());
        }
        reg
    }

    /// Look up a model by body name. Returns None if not registered.
    pub fn id_of(&self, name: &str) -> Option<ModelId> {
        self.ids.get(&name.to_lowercase()).copied()
    }

    /// File path for a model id.
    pub fn path_of(&self, id: ModelId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{ "models": [ { "name": "Mars" }, { "name": "asteroid" } ] }"#;
        let manifest = ModelManifest::from_json(json).unwrap();
        let reg = ModelRegistry::from_manifest(&manifest);

        assert_eq!(reg.len(), 2);
        let mars = reg.id_of("mars").expect("lookup ignores case");
        assert_eq!(mars, ModelId(0));
        assert_eq!(reg.path_of(mars), Some("/Mars.glb"));
        assert_eq!(reg.id_of("asteroid"), Some(ModelId(1)));
    }

    #[test]
    fn duplicates_keep_first_entry() {
        let json = r#"{ "models": [ { "name": "Earth" }, { "name": "earth", "path": "/b.glb" } ] }"#;
        let reg = ModelRegistry::from_manifest(&ModelManifest::from_json(json).unwrap());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.path_of(ModelId(0)), Some("/Earth.glb"));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = ModelRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.id_of("Vulcan").is_none());
        assert!(reg.path_of(ModelId(3)).is_none());
    }
}
