//! The 3DS import pipeline.
//!
//! [`import_file`] parses a `.3ds` document and emits its contents into a
//! [`Scene`]: one node per mesh instance of the object hierarchy, each
//! carrying smoothed normals, per-material geometry batches and a world
//! transform, followed by the document's cameras. Vertices land in the
//! scene's shared pool, deduplicated across faces, meshes and repeated
//! imports.
//!
//! ```no_run
//! use threeds::import::import_file;
//! use threeds::scene::Scene;
//!
//! let mut scene = Scene::new();
//! import_file("model.3ds", &mut scene, &mut |done| {
//!     println!("{:3.0}%", done * 100.0);
//! })?;
//! # Ok::<(), threeds::import::ImportError>(())
//! ```

mod error;
mod loader;
mod normals;
mod progress;

#[cfg(test)]
mod tests;

pub use error::ImportError;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::scene::Scene;
use crate::tds::TdsFile;

use loader::ImportContext;

/// Imports a 3DS file into `scene`.
///
/// Mesh instances append nodes and pooled vertices, cameras append camera
/// descriptions; whatever the scene already holds is kept. `progress`
/// receives the completed fraction once per processed face, ending at
/// exactly 1.0; it is never called for documents without faces.
pub fn import_file(
    path: impl AsRef<Path>,
    scene: &mut Scene,
    progress: &mut dyn FnMut(f32),
) -> Result<(), ImportError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    import_slice(&data, directory, scene, progress)
}

/// Imports a 3DS document already in memory. Texture names resolve
/// against `directory`.
///
/// Documents without a keyframer section get one root node per mesh.
pub fn import_slice(
    data: &[u8],
    directory: impl Into<PathBuf>,
    scene: &mut Scene,
    progress: &mut dyn FnMut(f32),
) -> Result<(), ImportError> {
    let mut file = TdsFile::from_slice(data)?;
    if file.nodes.is_empty() {
        file.create_nodes_for_meshes();
    }
    file.evaluate();

    let nodes_before = scene.nodes.len();
    let mut context = ImportContext::new(&file, directory.into(), progress);
    context.populate(scene);
    debug!(
        "imported {} nodes and {} cameras, vertex pool at {}",
        scene.nodes.len() - nodes_before,
        file.cameras.len(),
        scene.vertices.len()
    );
    Ok(())
}
