use serde::{Deserialize, Serialize};

/// Model manifest describing the static 3D assets the host can load.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Named models, in registry-id order.
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// Describes one named model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Body name the model belongs to (e.g., "Earth", "asteroid").
    pub name: String,
    /// Path of the model file. Defaults to `/{name}.glb`.
    #[serde(default)]
    pub path: Option<String>,
    /// Uniform scale applied by the host when drawing the model.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl ModelDescriptor {
    /// The file to load: the explicit path, or the `/{name}.glb` convention.
    pub fn resolved_path(&self) -> String {
        self.path
            .clone()
            .unwrap_or_else(|| format!("/{}.glb", self.name))
    }
}

impl ModelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
