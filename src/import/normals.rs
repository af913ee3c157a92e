//! Vertex normal smoothing.

use crate::math::{face_normal, Vec3};
use crate::tds::TdsMesh;

use super::progress::Progress;

/// Computes one smoothed normal per mesh vertex.
///
/// Every face folds its geometric normal into its three corners, and the
/// corner is renormalized after each contribution. A vertex's normal is
/// therefore a running blend of the faces that share it, in face order.
/// Degenerate faces have a NaN normal, which propagates into their
/// corners. Advances `progress` once per face.
pub fn smooth_normals(mesh: &TdsMesh, progress: &mut Progress<'_>) -> Vec<Vec3> {
    let mut normals = vec![Vec3::zeros(); mesh.vertices.len()];
    if mesh.vertices.is_empty() {
        return normals;
    }

    let last = mesh.vertices.len() - 1;
    for face in &mesh.faces {
        let corners = face.indices.map(|index| (index as usize).min(last));
        let normal = face_normal(
            mesh.vertices[corners[0]],
            mesh.vertices[corners[1]],
            mesh.vertices[corners[2]],
        );
        for corner in corners {
            normals[corner] = (normals[corner] + normal).normalize();
        }
        progress.advance();
    }
    normals
}
