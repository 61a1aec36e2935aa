pub mod body_render;
pub mod lighting;
pub mod paths;
pub mod picking;
