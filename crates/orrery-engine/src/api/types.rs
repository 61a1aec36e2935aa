use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// Identifier of an outstanding text request.
/// Completions carry it back so the game can drop superseded responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u32);

/// A text request issued by the game and performed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub id: RequestId,
    pub url: String,
}

/// A game event communicated from Rust to the JS host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
