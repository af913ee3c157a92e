//! Scene graph data types.

use std::sync::Arc;

use crate::material::Material;
use crate::math::{Mat4, Vec3};
use crate::vertex::VertexPool;

/// How a geometry's indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Primitive {
    /// Every two indices form a line segment.
    Lines,
    /// Every three indices form a triangle.
    #[default]
    Triangles,
}

/// An indexed geometry batch referencing the owning scene's vertex pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Primitive assembly mode.
    pub primitive: Primitive,
    /// Indices into [`Scene::vertices`].
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Create a triangle-list geometry.
    pub fn triangles(indices: Vec<u32>) -> Self {
        Self {
            primitive: Primitive::Triangles,
            indices,
        }
    }

    /// Create a line-list geometry.
    pub fn lines(indices: Vec<u32>) -> Self {
        Self {
            primitive: Primitive::Lines,
            indices,
        }
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// One material/geometry pairing inside a shape.
#[derive(Debug, Clone)]
pub struct ShapePart {
    /// Material applied to this part (shared via `Arc`).
    pub material: Arc<Material>,
    /// Geometry drawn with that material.
    pub geometry: Geometry,
}

/// A drawable shape: one or more (material, geometry) parts.
#[derive(Debug, Clone, Default)]
pub struct ShapeNode {
    /// The shape's parts, in emission order.
    pub parts: Vec<ShapePart>,
}

impl ShapeNode {
    /// Create an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a (material, geometry) pair.
    pub fn add_geometry(&mut self, material: Arc<Material>, geometry: Geometry) {
        self.parts.push(ShapePart { material, geometry });
    }

    /// Whether the shape has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A scene node: a world transform wrapping one shape.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name, if any.
    pub name: Option<String>,
    /// World transform applied to the shape.
    pub transform: Mat4,
    /// The wrapped shape.
    pub shape: ShapeNode,
}

impl SceneNode {
    /// Create a node from a shape and its world transform.
    pub fn new(shape: ShapeNode, transform: Mat4) -> Self {
        Self {
            name: None,
            transform,
            shape,
        }
    }

    /// Set the node name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A camera definition.
///
/// The view volume is described by the horizontal/vertical extents of the
/// view plane at the near clip distance, rather than by a field-of-view
/// angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    /// Camera name.
    pub name: String,
    /// Horizontal view-plane extent at the near distance.
    pub extent_x: f32,
    /// Vertical view-plane extent at the near distance.
    pub extent_y: f32,
    /// Near clip distance.
    pub znear: f32,
    /// Far clip distance.
    pub zfar: f32,
    /// Eye position.
    pub position: Vec3,
    /// Look-at target.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
}

/// A scene: the container an importer fills.
///
/// Owns the inserted nodes, the camera list, and the vertex pool every
/// geometry indexes into. Importing several files into one scene keeps
/// appending to the same pool.
#[derive(Debug, Default)]
pub struct Scene {
    /// Nodes in insertion (traversal) order.
    pub nodes: Vec<SceneNode>,
    /// Cameras in file order.
    pub cameras: Vec<SceneCamera>,
    /// Shared vertex pool backing all node geometry.
    pub vertices: VertexPool,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; the scene takes ownership.
    pub fn insert_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Append a camera; the scene takes ownership.
    pub fn add_camera(&mut self, camera: SceneCamera) {
        self.cameras.push(camera);
    }
}
