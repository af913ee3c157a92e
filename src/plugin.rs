//! Scene importer plugin interface.
//!
//! A [`SceneImporter`] announces the file type it handles and fills a
//! [`Scene`] from a file on disk; viewers register importers and pick one
//! by file name pattern. [`ThreeDsImporter`] is this crate's
//! implementation for 3D Studio documents.

use std::path::Path;

use crate::import::{import_file, ImportError};
use crate::scene::Scene;

/// A file type an importer handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    /// Human-readable description shown in file pickers.
    pub description: &'static str,
    /// File name pattern, e.g. `*.3ds`.
    pub pattern: &'static str,
}

/// Interface of a scene importer.
pub trait SceneImporter {
    /// Short importer name.
    fn name(&self) -> &str;

    /// The file type this importer reads.
    fn file_type(&self) -> FileType;

    /// Whether reading is supported.
    fn can_read(&self) -> bool {
        true
    }

    /// Whether writing is supported.
    fn can_write(&self) -> bool {
        false
    }

    /// Reads `path` into `scene`, reporting completion fractions through
    /// `progress`.
    fn read(
        &self,
        path: &Path,
        scene: &mut Scene,
        progress: &mut dyn FnMut(f32),
    ) -> Result<(), ImportError>;
}

/// Importer for 3D Studio `.3ds` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreeDsImporter;

impl SceneImporter for ThreeDsImporter {
    fn name(&self) -> &str {
        "3ds"
    }

    fn file_type(&self) -> FileType {
        FileType {
            description: "3D Studio Max Models",
            pattern: "*.3ds",
        }
    }

    fn read(
        &self,
        path: &Path,
        scene: &mut Scene,
        progress: &mut dyn FnMut(f32),
    ) -> Result<(), ImportError> {
        import_file(path, scene, progress)
    }
}
