//! Output vertex type and the shared deduplicating vertex pool.
//!
//! Importers submit one [`Vertex`] per face corner; the [`VertexPool`]
//! collapses bit-identical submissions and hands back stable `u32` indices.
//! Geometry emitted into a [`Scene`](crate::scene::Scene) indexes into the
//! scene's pool, so one pool can back every mesh of a file (or of several
//! files imported into the same scene).

use std::collections::HashMap;

use crate::math::{Vec2, Vec3};

/// A single renderer-ready vertex: position, normal, texture coordinate.
///
/// Interleaved `#[repr(C)]` layout, 32 bytes (8 floats), suitable for direct
/// GPU upload via [`VertexPool::as_bytes`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Smoothed normal.
    pub normal: [f32; 3],
    /// Texture coordinate (zero when the source mesh has none).
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// Assemble a vertex from math-typed components.
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            texcoord: [texcoord.x, texcoord.y],
        }
    }

    /// The vertex's bit pattern, used as its identity in the pool.
    fn key(&self) -> [u32; 8] {
        bytemuck::cast(*self)
    }
}

/// Append-only vertex pool with value-based deduplication.
///
/// [`push`](Self::push) returns the index of an existing bit-identical
/// vertex when one is present, so two faces sharing a corner (same position,
/// same smoothed normal, same texcoord) reference one pooled vertex.
/// Identity is the exact bit pattern: vertices differing only in the sign of
/// a zero, or carrying NaN from degenerate geometry, dedupe only against
/// identical bits.
#[derive(Debug, Default)]
pub struct VertexPool {
    vertices: Vec<Vertex>,
    lookup: HashMap<[u32; 8], u32>,
}

impl VertexPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its pool index.
    ///
    /// Re-submitting a bit-identical vertex returns the original index.
    pub fn push(&mut self, vertex: Vertex) -> u32 {
        match self.lookup.entry(vertex.key()) {
            std::collections::hash_map::Entry::Occupied(e) => *e.get(),
            std::collections::hash_map::Entry::Vacant(e) => {
                let index = self.vertices.len() as u32;
                self.vertices.push(vertex);
                e.insert(index);
                index
            }
        }
    }

    /// Number of pooled vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the pool holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All pooled vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw interleaved vertex bytes (32 bytes per vertex) for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
