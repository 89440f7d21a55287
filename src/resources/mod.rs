//! Loading and generating resources: decoded images and primitive meshes.

pub mod mesh;
pub mod texture;
