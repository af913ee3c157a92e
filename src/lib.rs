//! # threeds
//!
//! Importer for Autodesk 3D Studio `.3ds` scenes.
//!
//! The crate reads a `.3ds` document and produces a renderer-friendly
//! [`Scene`](scene::Scene): one node per placed mesh with smoothed vertex
//! normals, geometry batched per material, vertices deduplicated into a
//! shared pool, plus the document's cameras. [`import::import_file`] is
//! the one-call entry point; [`plugin::ThreeDsImporter`] wraps it behind
//! the [`plugin::SceneImporter`] trait for viewers that register
//! importers by file type.
//!
//! ```no_run
//! use threeds::import::import_file;
//! use threeds::scene::Scene;
//!
//! let mut scene = Scene::new();
//! import_file("model.3ds", &mut scene, &mut |_| {})?;
//! for node in &scene.nodes {
//!     println!("{:?}: {} parts", node.name, node.shape.parts.len());
//! }
//! # Ok::<(), threeds::import::ImportError>(())
//! ```

pub mod import;
pub mod material;
pub mod math;
pub mod plugin;
pub mod scene;
pub mod tds;
pub mod texture;
pub mod vertex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
