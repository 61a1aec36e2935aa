/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::new(
            channel(0)? as f32 / 255.0,
            channel(2)? as f32 / 255.0,
            channel(4)? as f32 / 255.0,
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// A body is drawn as a sphere, or as a named model when the host has one.
/// The colour stays the fallback while the model is missing or loading.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub radius: f32,
    pub color: Color,
    /// HDR glow multiplier (default: 0.0).
    pub emissive: f32,
    /// Name looked up in the model registry (e.g. "Earth", "asteroid").
    pub model: Option<String>,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: Color::default(),
            emissive: 0.0,
            model: None,
        }
    }
}

impl MeshComponent {
    pub fn sphere(radius: f32, color: Color) -> Self {
        Self {
            radius,
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_model(mut self, name: impl Into<String>) -> Self {
        self.model = Some(name.into());
        self
    }
}
