//! Fixtures for pipeline tests. Documents are built directly as
//! [`TdsFile`] values so each test controls hierarchy and geometry; the
//! end-to-end tests additionally serialize a small document to bytes.

use std::path::PathBuf;

use crate::math::Vec3;
use crate::scene::Scene;
use crate::tds::{NodeKind, TdsFace, TdsFile, TdsMaterial, TdsMesh, TdsNode};

use super::loader::ImportContext;


fn face(indices: [u16; 3], material: Option<usize>) -> TdsFace {
    TdsFace { indices, flags: 0, material }
}

/// A single-triangle mesh in the XY plane.
fn triangle(name: &str) -> TdsMesh {
    let mut mesh = TdsMesh::new(name.into());
    mesh.vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    mesh.faces = vec![face([0, 1, 2], None)];
    mesh
}

/// A mesh-instance node placing the mesh of the same name.
fn instance(mesh_name: &str, node_id: u16) -> TdsNode {
    let mut node = TdsNode::new(NodeKind::MeshInstance);
    node.node_id = node_id;
    node.name = mesh_name.into();
    node
}

fn named_material(name: &str) -> TdsMaterial {
    TdsMaterial { name: name.into(), ..Default::default() }
}

/// Evaluates and imports an already-linked document into a fresh scene,
/// collecting every reported progress fraction.
fn run(file: &mut TdsFile) -> (Scene, Vec<f32>) {
    run_in_dir(file, PathBuf::new())
}

fn run_in_dir(file: &mut TdsFile, directory: PathBuf) -> (Scene, Vec<f32>) {
    if file.nodes.is_empty() {
        file.create_nodes_for_meshes();
    }
    file.evaluate();

    let mut scene = Scene::new();
    let mut reported = Vec::new();
    let mut callback = |fraction| reported.push(fraction);
    let mut context = ImportContext::new(file, directory, &mut callback);
    context.populate(&mut scene);
    (scene, reported)
}

/// Serializes one chunk: id, length including the six byte header, payload.
fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&((payload.len() + 6) as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// A complete serialized document: a quad mesh named "Quad" whose second
/// face uses the material "Red", plus a camera named "Cam". No keyframer
/// section, so the import synthesizes the node hierarchy.
fn quad_document() -> Vec<u8> {
    let mut points = 4u16.to_le_bytes().to_vec();
    for p in [
        [0.0f32, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ] {
        for v in p {
            points.extend_from_slice(&v.to_le_bytes());
        }
    }

    let mut faces = 2u16.to_le_bytes().to_vec();
    for f in [[0u16, 1, 2], [0, 2, 3]] {
        for i in f {
            faces.extend_from_slice(&i.to_le_bytes());
        }
        faces.extend_from_slice(&0u16.to_le_bytes());
    }
    let mut group = b"Red\0".to_vec();
    group.extend_from_slice(&1u16.to_le_bytes());
    group.extend_from_slice(&1u16.to_le_bytes());
    faces.extend_from_slice(&chunk(0x4130, &group));

    let mut object = b"Quad\0".to_vec();
    let mut mesh = chunk(0x4110, &points);
    mesh.extend_from_slice(&chunk(0x4120, &faces));
    object.extend_from_slice(&chunk(0x4100, &mesh));

    let mut color = Vec::new();
    for v in [1.0f32, 0.0, 0.0] {
        color.extend_from_slice(&v.to_le_bytes());
    }
    let mut material = chunk(0xa000, b"Red\0");
    material.extend_from_slice(&chunk(0xa020, &chunk(0x0010, &color)));

    let mut camera = Vec::new();
    for v in [0.0f32, -10.0, 2.0, 0.0, 0.0, 0.0, 0.0, 50.0] {
        camera.extend_from_slice(&v.to_le_bytes());
    }
    camera.extend_from_slice(&chunk(0x4720, &{
        let mut ranges = Vec::new();
        for v in [1.0f32, 100.0] {
            ranges.extend_from_slice(&v.to_le_bytes());
        }
        ranges
    }));
    let mut camera_object = b"Cam\0".to_vec();
    camera_object.extend_from_slice(&chunk(0x4700, &camera));

    let mut mdata = chunk(0xafff, &material);
    mdata.extend_from_slice(&chunk(0x4000, &object));
    mdata.extend_from_slice(&chunk(0x4000, &camera_object));

    chunk(0x4d4d, &chunk(0x3d3d, &mdata))
}
