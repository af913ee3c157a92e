//! Scene graph types filled in by the importer.
//!
//! These types are format-agnostic: any loader can produce them, and a
//! viewer consumes them directly.
//!
//! - [`Scene`]: the sink holding nodes, cameras, and the shared vertex pool
//! - [`SceneNode`]: a transform wrapping one shape
//! - [`ShapeNode`] / [`ShapePart`]: (material, geometry) pairs
//! - [`Geometry`] / [`Primitive`]: index lists into the scene's pool
//! - [`SceneCamera`]: view parameters

mod types;

pub use types::{Geometry, Primitive, Scene, SceneCamera, SceneNode, ShapeNode, ShapePart};
