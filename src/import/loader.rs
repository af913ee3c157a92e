//! Conversion from a parsed 3DS document to scene content.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{trace, warn};

use crate::material::{Color, Material};
use crate::math::{mat4_from_translation, Mat4, Vec3};
use crate::scene::{Geometry, Scene, SceneCamera, SceneNode, ShapeNode};
use crate::tds::{NodeKind, TdsCamera, TdsFile, TdsMaterial, TdsMesh, TdsNode};
use crate::texture::Texture;
use crate::vertex::Vertex;

use super::normals::smooth_normals;
use super::progress::Progress;

/// Drives one import: walks the node hierarchy of a document and emits
/// scene nodes and cameras into the target scene.
pub struct ImportContext<'a> {
    file: &'a TdsFile,
    /// Directory texture names resolve against.
    directory: PathBuf,
    progress: Progress<'a>,
}

impl<'a> ImportContext<'a> {
    /// Prepares an import of `file`. The progress total is one unit per
    /// face of every mesh instance the walk will emit.
    pub fn new(file: &'a TdsFile, directory: PathBuf, callback: &'a mut dyn FnMut(f32)) -> Self {
        let total = count_faces(file);
        Self {
            file,
            directory,
            progress: Progress::new(total, callback),
        }
    }

    /// Emits the whole document into `scene`: mesh instances in
    /// depth-first file order, then cameras.
    pub fn populate(&mut self, scene: &mut Scene) {
        let file = self.file;
        for &root in &file.roots {
            self.emit_node(root, scene);
        }
        for camera in &file.cameras {
            scene.add_camera(convert_camera(camera));
        }
    }

    /// Emits one hierarchy node. Only mesh instances are entered; any
    /// other kind prunes its whole subtree.
    fn emit_node(&mut self, index: usize, scene: &mut Scene) {
        let file = self.file;
        let node = &file.nodes[index];
        if node.kind != NodeKind::MeshInstance {
            return;
        }
        if let Some(scene_node) = self.build_node(node, scene) {
            scene.insert_node(scene_node);
        }
        for &child in &node.children {
            self.emit_node(child, scene);
        }
    }

    /// Builds the scene node for one mesh instance. Instances that place
    /// no mesh (dummy objects) or whose mesh has no vertices or faces
    /// produce nothing; their children are still visited by the caller.
    fn build_node(&mut self, node: &TdsNode, scene: &mut Scene) -> Option<SceneNode> {
        let file = self.file;
        let mesh = match file.mesh_for_node(node) {
            Some(mesh) => mesh,
            None => {
                trace!("node '{}' places no mesh, skipping", node.name);
                return None;
            }
        };
        if mesh.vertices.is_empty() || mesh.faces.is_empty() {
            trace!("mesh '{}' has no geometry, skipping", mesh.name);
            return None;
        }

        let normals = smooth_normals(mesh, &mut self.progress);

        // Faces bucketed by material id; unassigned faces sort first.
        let mut buckets: BTreeMap<Option<usize>, Vec<u32>> = BTreeMap::new();
        let last = mesh.vertices.len() - 1;
        for face in &mesh.faces {
            let indices = buckets.entry(face.material).or_default();
            for corner in face.indices {
                let corner = (corner as usize).min(last);
                let texcoord = mesh.texcoords.get(corner).copied().unwrap_or_default();
                let vertex = Vertex::new(mesh.vertices[corner], normals[corner], texcoord);
                indices.push(scene.vertices.push(vertex));
            }
        }

        let mut shape = ShapeNode::new();
        for (material, indices) in buckets {
            let material = match material.and_then(|index| file.materials.get(index)) {
                Some(source) => Arc::new(self.convert_material(source)),
                None => Arc::new(Material::white()),
            };
            shape.add_geometry(material, Geometry::triangles(indices));
        }

        let mut scene_node = SceneNode::new(shape, placement(node, mesh));
        if !node.name.is_empty() {
            scene_node = scene_node.with_name(node.name.as_str());
        }
        Some(scene_node)
    }

    /// Maps a document material to the renderer-facing description.
    /// Opacity moves into the diffuse alpha channel.
    fn convert_material(&self, source: &TdsMaterial) -> Material {
        let [dr, dg, db] = source.diffuse;
        let [ar, ag, ab] = source.ambient;
        let [sr, sg, sb] = source.specular;
        let mut material = Material {
            name: (!source.name.is_empty()).then(|| source.name.clone()),
            diffuse: Color::new(dr, dg, db, 1.0 - source.transparency),
            ambient: Color::new(ar, ag, ab, 0.0),
            specular: Color::new(sr, sg, sb, 0.0),
            emission: Color::new(0.0, 0.0, 0.0, 0.0),
            specular_factor: 0.0,
            texture: None,
        };
        if !source.texture1.is_empty() {
            // A black diffuse would modulate the texture away entirely.
            if material.diffuse.is_black() {
                material.diffuse = Color::WHITE;
            }
            material.texture = Some(Texture::new(
                source.texture1.as_str(),
                self.directory.join(&source.texture1),
            ));
        }
        material
    }
}

/// World transform of an emitted node. Stored vertices already carry the
/// local mesh matrix, so it is inverted back out before the keyframer
/// placement (offset by the pivot) is applied.
fn placement(node: &TdsNode, mesh: &TdsMesh) -> Mat4 {
    let inverse_mesh = match mesh.matrix.try_inverse() {
        Some(inverse) => inverse,
        None => {
            warn!("mesh '{}' has a singular matrix", mesh.name);
            Mat4::identity()
        }
    };
    node.matrix * mat4_from_translation(-node.pivot) * inverse_mesh
}

/// Maps a document camera to the scene description: the view plane extent
/// at the near distance, square, derived from the field of view.
fn convert_camera(camera: &TdsCamera) -> SceneCamera {
    let extent = 2.0 * (camera.fov.to_radians() * 0.5).tan() * camera.near_range;
    SceneCamera {
        name: camera.name.clone(),
        extent_x: extent,
        extent_y: extent,
        znear: camera.near_range,
        zfar: camera.far_range,
        position: camera.position,
        target: camera.target,
        up: Vec3::new(0.0, 0.0, 1.0),
    }
}

/// Total face count across every mesh instance the walk will emit, used
/// to scale progress reporting.
fn count_faces(file: &TdsFile) -> u64 {
    fn count(file: &TdsFile, index: usize) -> u64 {
        let node = &file.nodes[index];
        if node.kind != NodeKind::MeshInstance {
            return 0;
        }
        let own = match file.mesh_for_node(node) {
            Some(mesh) if !mesh.vertices.is_empty() => mesh.faces.len() as u64,
            _ => 0,
        };
        own + node
            .children
            .iter()
            .map(|&child| count(file, child))
            .sum::<u64>()
    }
    file.roots.iter().map(|&root| count(file, root)).sum()
}
