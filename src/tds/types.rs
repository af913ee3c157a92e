//! In-memory model of a parsed 3DS document.
//!
//! The types here mirror the file structure: a flat list of meshes,
//! materials and cameras from the mesh data section, plus the keyframer
//! node arena. All fields are public; the parser fills them in and the
//! importer consumes them.

use log::warn;

use crate::math::{mat4_from_scale_rotation_translation, Mat4, Quat, Vec2, Vec3};

use super::chunk::NO_PARENT;

/// One triangle of a mesh. Indices point into the owning mesh's vertex
/// array and are clamped into range by the parser.
#[derive(Debug, Clone, Copy)]
pub struct TdsFace {
    pub indices: [u16; 3],
    /// Edge visibility flags as stored in the file.
    pub flags: u16,
    /// Index into [`TdsFile::materials`], `None` for faces no material
    /// group claims.
    pub material: Option<usize>,
}

/// A triangle mesh from a `NAMED_OBJECT` chunk.
#[derive(Debug, Clone, Default)]
pub struct TdsMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    /// One texture coordinate per vertex when present, empty otherwise.
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<TdsFace>,
    /// Local mesh matrix; vertices are stored already transformed by it.
    pub matrix: Mat4,
}

impl TdsMesh {
    pub fn new(name: String) -> Self {
        Self { name, matrix: Mat4::identity(), ..Default::default() }
    }
}

/// A material entry. Colors are linear RGB triples.
#[derive(Debug, Clone)]
pub struct TdsMaterial {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Shininess percentage, 0.0 to 1.0.
    pub shininess: f32,
    /// Transparency percentage, 0.0 opaque to 1.0 fully transparent.
    pub transparency: f32,
    /// File name of the first texture map, empty when untextured.
    pub texture1: String,
}

impl Default for TdsMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            shininess: 0.0,
            transparency: 0.0,
            texture1: String::new(),
        }
    }
}

/// A camera from an `N_CAMERA` chunk.
#[derive(Debug, Clone)]
pub struct TdsCamera {
    pub name: String,
    pub position: Vec3,
    pub target: Vec3,
    /// Roll around the view axis, degrees.
    pub roll: f32,
    /// Vertical field of view, degrees, derived from the stored lens.
    pub fov: f32,
    pub near_range: f32,
    pub far_range: f32,
}

impl TdsCamera {
    pub fn new(name: String) -> Self {
        Self {
            name,
            position: Vec3::zeros(),
            target: Vec3::zeros(),
            roll: 0.0,
            fov: 45.0,
            near_range: 0.0,
            far_range: 0.0,
        }
    }
}

/// What a keyframer node stands for, taken from its chunk tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Ambient,
    /// Places a mesh in the scene; the only kind the importer walks into.
    MeshInstance,
    Camera,
    CameraTarget,
    Light,
    LightTarget,
    Spotlight,
}

/// A node of the keyframer hierarchy.
///
/// Only the first key of each animation track is kept, so `position`,
/// `rotation` and `scaling` describe the frame-zero placement.
#[derive(Debug, Clone)]
pub struct TdsNode {
    pub kind: NodeKind,
    /// Id used by children to reference this node as their parent.
    pub node_id: u16,
    /// Id of the parent node, [`NO_PARENT`] for roots.
    pub parent_id: u16,
    /// Name from the node header; mesh instances use it to find their mesh.
    pub name: String,
    /// Optional instance name, empty when absent.
    pub instance_name: String,
    pub pivot: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
    pub scaling: Vec3,
    /// World matrix, valid after [`TdsFile::evaluate`].
    pub matrix: Mat4,
    /// Indices into [`TdsFile::nodes`], in file order.
    pub children: Vec<usize>,
}

impl TdsNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            node_id: NO_PARENT,
            parent_id: NO_PARENT,
            name: String::new(),
            instance_name: String::new(),
            pivot: Vec3::zeros(),
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scaling: Vec3::new(1.0, 1.0, 1.0),
            matrix: Mat4::identity(),
            children: Vec::new(),
        }
    }
}

/// A parsed 3DS document.
#[derive(Debug, Clone, Default)]
pub struct TdsFile {
    /// Value of the `M3D_VERSION` chunk, 0 when missing.
    pub version: u32,
    /// Value of the `MESH_VERSION` chunk, 0 when missing.
    pub mesh_version: u32,
    pub meshes: Vec<TdsMesh>,
    pub materials: Vec<TdsMaterial>,
    pub cameras: Vec<TdsCamera>,
    /// Keyframer node arena; the tree structure lives in
    /// [`TdsNode::children`] and [`TdsFile::roots`].
    pub nodes: Vec<TdsNode>,
    /// Indices of nodes without a parent, in file order.
    pub roots: Vec<usize>,
}

impl TdsFile {
    /// Finds the mesh a node places by name. Dummy instances reference
    /// no mesh and come back as `None`.
    pub fn mesh_for_node(&self, node: &TdsNode) -> Option<&TdsMesh> {
        self.meshes.iter().find(|mesh| mesh.name == node.name)
    }

    /// Synthesizes one root mesh-instance node per mesh. Files exported
    /// without a keyframer section get their hierarchy from this.
    pub fn create_nodes_for_meshes(&mut self) {
        for (index, mesh) in self.meshes.iter().enumerate() {
            let mut node = TdsNode::new(NodeKind::MeshInstance);
            node.node_id = index as u16;
            node.name = mesh.name.clone();
            self.roots.push(self.nodes.len());
            self.nodes.push(node);
        }
    }

    /// Rebuilds `children` and `roots` from the stored parent ids.
    /// Nodes whose parent id matches no node become roots.
    pub fn link_nodes(&mut self) {
        for node in &mut self.nodes {
            node.children.clear();
        }
        self.roots.clear();

        for index in 0..self.nodes.len() {
            let parent_id = self.nodes[index].parent_id;
            if parent_id == NO_PARENT {
                self.roots.push(index);
                continue;
            }
            let parent = self
                .nodes
                .iter()
                .position(|candidate| candidate.node_id == parent_id);
            match parent {
                Some(parent_index) if parent_index != index => {
                    self.nodes[parent_index].children.push(index);
                }
                _ => {
                    warn!(
                        "node '{}' references unknown parent id {}, treating as root",
                        self.nodes[index].name, parent_id
                    );
                    self.roots.push(index);
                }
            }
        }
    }

    /// Computes the frame-zero world matrix of every node reachable from
    /// the roots. Each node's local transform is translation, rotation,
    /// scale applied in that order; the pivot is not baked in here.
    pub fn evaluate(&mut self) {
        for root_index in 0..self.roots.len() {
            self.evaluate_node(self.roots[root_index], &Mat4::identity());
        }
    }

    fn evaluate_node(&mut self, index: usize, parent: &Mat4) {
        let node = &mut self.nodes[index];
        let local =
            mat4_from_scale_rotation_translation(node.scaling, node.rotation, node.position);
        node.matrix = parent * local;

        let matrix = node.matrix;
        let children = node.children.clone();
        for child in children {
            self.evaluate_node(child, &matrix);
        }
    }
}
