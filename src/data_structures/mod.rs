//! Engine data structures: textures, material, meshes and instances.
//!
//! - `texture` holds managed textures and the fixed texture pool
//! - `material` is the surface description shared by all lit objects
//! - `model` contains the vertex layout and GPU meshes
//! - `instance` holds per-instance transformation and tint data

pub mod instance;
pub mod material;
pub mod model;
pub mod texture;
