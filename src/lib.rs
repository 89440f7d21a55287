//! lit-ngin
//!
//! A small real-time lighting demo on wgpu: managed textures, point,
//! directional and spot lights placed on rings, and a Phong / Blinn-Phong
//! shader whose parameters are tuned in egui debug windows.
//!
//! High-level modules
//! - `backend`: texture backend seam and its wgpu implementation
//! - `camera`: fly camera, projection and input controller
//! - `config`: command line configuration
//! - `context`: window, device and the GPU resources of the demo
//! - `data_structures`: textures and the texture pool, material, meshes, instances
//! - `error`: typed errors
//! - `flow`: winit event loop and the per-frame update
//! - `lighting`: light records, ring placement and the uniform upload
//! - `pipelines`: the lit and the unlit gizmo pipelines
//! - `resources`: image decoding and primitive mesh generation
//! - `scene`: all tunable state of the demo
//! - `ui`: the inspectable capability and the egui debug overlay
//!

pub mod backend;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod lighting;
pub mod pipelines;
pub mod resources;
pub mod scene;
pub mod ui;

pub use config::DemoConfig;
pub use error::{Error, Result};
pub use flow::run;
