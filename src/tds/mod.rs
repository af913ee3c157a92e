//! Reader for Autodesk 3D Studio `.3ds` documents.
//!
//! The format is a tree of length-prefixed binary chunks. This module
//! parses the mesh data section (triangle meshes, materials, cameras)
//! and the keyframer section (the object hierarchy with its frame-zero
//! placement), and exposes the result as a [`TdsFile`]. Anything else
//! in the file, lights and animation beyond the first key included, is
//! skipped by chunk length.
//!
//! ```no_run
//! use threeds::tds::TdsFile;
//!
//! let file = TdsFile::open("scene.3ds")?;
//! for mesh in &file.meshes {
//!     println!("{}: {} faces", mesh.name, mesh.faces.len());
//! }
//! # Ok::<(), threeds::tds::TdsError>(())
//! ```

mod chunk;
mod error;
mod reader;
mod types;

#[cfg(test)]
mod tests;

pub use chunk::NO_PARENT;
pub use error::TdsError;
pub use types::{NodeKind, TdsCamera, TdsFace, TdsFile, TdsMaterial, TdsMesh, TdsNode};
