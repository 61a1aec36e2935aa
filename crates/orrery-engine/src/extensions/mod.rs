// extensions/mod.rs
//
// Optional helpers decoupled from core Entity/Scene.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease};
