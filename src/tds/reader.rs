//! Chunk-tree parser producing a [`TdsFile`].
//!
//! Parsing is a single pass over the chunk tree. Material groups name
//! their material as a string, so they are collected first and resolved
//! to indices once the whole mesh data section is in.

use std::fs;
use std::path::Path;

use log::{trace, warn};

use crate::math::{quat_from_axis_angle, Mat4, Vec2, Vec3};

use super::chunk::{self, Reader};
use super::error::TdsError;
use super::types::{NodeKind, TdsCamera, TdsFace, TdsFile, TdsMaterial, TdsMesh, TdsNode};

impl TdsFile {
    /// Reads and parses a 3DS document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TdsError> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }

    /// Parses a 3DS document from bytes already in memory.
    pub fn from_slice(data: &[u8]) -> Result<Self, TdsError> {
        parse(data)
    }
}

/// Faces claimed by a material group, pending name resolution.
struct MaterialGroup {
    mesh: usize,
    material: String,
    faces: Vec<u16>,
}

fn parse(data: &[u8]) -> Result<TdsFile, TdsError> {
    let mut top = Reader::new(data);
    let (id, mut body) = top.next_chunk()?.ok_or(TdsError::Truncated {
        offset: 0,
        needed: 6,
        available: data.len(),
    })?;
    if id != chunk::M3DMAGIC {
        return Err(TdsError::BadMagic { found: id });
    }

    let mut file = TdsFile::default();
    let mut groups = Vec::new();
    while let Some((id, mut payload)) = body.next_chunk()? {
        match id {
            chunk::M3D_VERSION => file.version = payload.u32()?,
            chunk::MDATA => parse_mesh_data(&mut payload, &mut file, &mut groups)?,
            chunk::KFDATA => parse_keyframer(&mut payload, &mut file)?,
            _ => trace!("skipping chunk {id:#06x}"),
        }
    }

    resolve_material_groups(&mut file, groups);
    clamp_face_indices(&mut file);
    file.link_nodes();
    Ok(file)
}

fn parse_mesh_data(
    reader: &mut Reader,
    file: &mut TdsFile,
    groups: &mut Vec<MaterialGroup>,
) -> Result<(), TdsError> {
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::MESH_VERSION => file.mesh_version = payload.u32()?,
            chunk::MAT_ENTRY => {
                let material = parse_material(&mut payload)?;
                file.materials.push(material);
            }
            chunk::NAMED_OBJECT => parse_named_object(&mut payload, file, groups)?,
            _ => trace!("skipping mesh data chunk {id:#06x}"),
        }
    }
    Ok(())
}

fn parse_named_object(
    reader: &mut Reader,
    file: &mut TdsFile,
    groups: &mut Vec<MaterialGroup>,
) -> Result<(), TdsError> {
    let name = reader.cstring()?;
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::N_TRI_OBJECT => {
                let mesh = parse_mesh(&mut payload, name.clone(), file.meshes.len(), groups)?;
                file.meshes.push(mesh);
            }
            chunk::N_CAMERA => {
                let camera = parse_camera(&mut payload, name.clone())?;
                file.cameras.push(camera);
            }
            _ => trace!("skipping object chunk {id:#06x} in '{name}'"),
        }
    }
    Ok(())
}

fn parse_material(reader: &mut Reader) -> Result<TdsMaterial, TdsError> {
    let mut material = TdsMaterial::default();
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::MAT_NAME => material.name = payload.cstring()?,
            chunk::MAT_AMBIENT => material.ambient = read_color(&mut payload)?,
            chunk::MAT_DIFFUSE => material.diffuse = read_color(&mut payload)?,
            chunk::MAT_SPECULAR => material.specular = read_color(&mut payload)?,
            chunk::MAT_SHININESS => material.shininess = read_percentage(&mut payload)?,
            chunk::MAT_TRANSPARENCY => material.transparency = read_percentage(&mut payload)?,
            chunk::MAT_TEXMAP => {
                while let Some((id, mut sub)) = payload.next_chunk()? {
                    match id {
                        chunk::MAT_MAPNAME => material.texture1 = sub.cstring()?,
                        _ => trace!("skipping texture map chunk {id:#06x}"),
                    }
                }
            }
            _ => trace!("skipping material chunk {id:#06x}"),
        }
    }
    Ok(material)
}

/// Colors are containers holding one of the float or byte color chunks;
/// when several are present the last one wins.
fn read_color(reader: &mut Reader) -> Result<[f32; 3], TdsError> {
    let mut color = [0.0; 3];
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::COLOR_F | chunk::LIN_COLOR_F => {
                color = [payload.f32()?, payload.f32()?, payload.f32()?];
            }
            chunk::COLOR_24 | chunk::LIN_COLOR_24 => {
                color = [
                    payload.u8()? as f32 / 255.0,
                    payload.u8()? as f32 / 255.0,
                    payload.u8()? as f32 / 255.0,
                ];
            }
            _ => trace!("skipping color chunk {id:#06x}"),
        }
    }
    Ok(color)
}

/// Percentages come as a signed `i16` in percent or as a raw float
/// fraction; both normalize to 0.0..=1.0.
fn read_percentage(reader: &mut Reader) -> Result<f32, TdsError> {
    let mut value = 0.0;
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::INT_PERCENTAGE => value = payload.u16()? as i16 as f32 / 100.0,
            chunk::FLOAT_PERCENTAGE => value = payload.f32()?,
            _ => trace!("skipping percentage chunk {id:#06x}"),
        }
    }
    Ok(value)
}

fn parse_mesh(
    reader: &mut Reader,
    name: String,
    mesh_index: usize,
    groups: &mut Vec<MaterialGroup>,
) -> Result<TdsMesh, TdsError> {
    let mut mesh = TdsMesh::new(name);
    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::POINT_ARRAY => {
                let count = payload.u16()? as usize;
                mesh.vertices = Vec::with_capacity(count);
                for _ in 0..count {
                    mesh.vertices.push(read_vec3(&mut payload)?);
                }
            }
            chunk::TEX_VERTS => {
                let count = payload.u16()? as usize;
                mesh.texcoords = Vec::with_capacity(count);
                for _ in 0..count {
                    mesh.texcoords.push(Vec2::new(payload.f32()?, payload.f32()?));
                }
            }
            chunk::FACE_ARRAY => parse_faces(&mut payload, &mut mesh, mesh_index, groups)?,
            chunk::MESH_MATRIX => {
                // Four columns of three floats: the rotation part and the
                // translation of the local mesh matrix.
                let mut cols = [[0.0f32; 3]; 4];
                for col in cols.iter_mut() {
                    for value in col.iter_mut() {
                        *value = payload.f32()?;
                    }
                }
                #[rustfmt::skip]
                let matrix = Mat4::new(
                    cols[0][0], cols[1][0], cols[2][0], cols[3][0],
                    cols[0][1], cols[1][1], cols[2][1], cols[3][1],
                    cols[0][2], cols[1][2], cols[2][2], cols[3][2],
                    0.0, 0.0, 0.0, 1.0,
                );
                mesh.matrix = matrix;
            }
            _ => trace!("skipping mesh chunk {id:#06x}"),
        }
    }
    Ok(mesh)
}

fn parse_faces(
    reader: &mut Reader,
    mesh: &mut TdsMesh,
    mesh_index: usize,
    groups: &mut Vec<MaterialGroup>,
) -> Result<(), TdsError> {
    let count = reader.u16()? as usize;
    mesh.faces = Vec::with_capacity(count);
    for _ in 0..count {
        let indices = [reader.u16()?, reader.u16()?, reader.u16()?];
        let flags = reader.u16()?;
        mesh.faces.push(TdsFace { indices, flags, material: None });
    }

    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::MSH_MAT_GROUP => {
                let material = payload.cstring()?;
                let count = payload.u16()? as usize;
                let mut faces = Vec::with_capacity(count);
                for _ in 0..count {
                    faces.push(payload.u16()?);
                }
                groups.push(MaterialGroup { mesh: mesh_index, material, faces });
            }
            chunk::SMOOTH_GROUP => trace!("skipping smoothing groups"),
            _ => trace!("skipping face list chunk {id:#06x}"),
        }
    }
    Ok(())
}

fn parse_camera(reader: &mut Reader, name: String) -> Result<TdsCamera, TdsError> {
    let mut camera = TdsCamera::new(name);
    camera.position = read_vec3(reader)?;
    camera.target = read_vec3(reader)?;
    camera.roll = reader.f32()?;
    let lens = reader.f32()?;
    if lens.abs() >= 1e-5 {
        camera.fov = 2400.0 / lens;
    }

    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::CAM_RANGES => {
                camera.near_range = payload.f32()?;
                camera.far_range = payload.f32()?;
            }
            _ => trace!("skipping camera chunk {id:#06x}"),
        }
    }
    Ok(camera)
}

fn parse_keyframer(reader: &mut Reader, file: &mut TdsFile) -> Result<(), TdsError> {
    while let Some((id, mut payload)) = reader.next_chunk()? {
        let kind = match id {
            chunk::AMBIENT_NODE_TAG => NodeKind::Ambient,
            chunk::OBJECT_NODE_TAG => NodeKind::MeshInstance,
            chunk::CAMERA_NODE_TAG => NodeKind::Camera,
            chunk::TARGET_NODE_TAG => NodeKind::CameraTarget,
            chunk::LIGHT_NODE_TAG => NodeKind::Light,
            chunk::SPOTLIGHT_NODE_TAG => NodeKind::Spotlight,
            chunk::L_TARGET_NODE_TAG => NodeKind::LightTarget,
            _ => {
                trace!("skipping keyframer chunk {id:#06x}");
                continue;
            }
        };
        let node = parse_node(&mut payload, kind, file.nodes.len())?;
        file.nodes.push(node);
    }
    Ok(())
}

fn parse_node(reader: &mut Reader, kind: NodeKind, index: usize) -> Result<TdsNode, TdsError> {
    let mut node = TdsNode::new(kind);
    // Writers that omit NODE_ID number their nodes by order of appearance.
    node.node_id = index as u16;

    while let Some((id, mut payload)) = reader.next_chunk()? {
        match id {
            chunk::NODE_ID => node.node_id = payload.u16()?,
            chunk::NODE_HDR => {
                node.name = payload.cstring()?;
                let _flags1 = payload.u16()?;
                let _flags2 = payload.u16()?;
                node.parent_id = payload.u16()?;
            }
            chunk::INSTANCE_NAME => node.instance_name = payload.cstring()?,
            chunk::PIVOT => node.pivot = read_vec3(&mut payload)?,
            chunk::POS_TRACK_TAG => {
                if let Some(value) = read_track(&mut payload, 3)? {
                    node.position = Vec3::new(value[0], value[1], value[2]);
                }
            }
            chunk::ROT_TRACK_TAG => {
                if let Some(value) = read_track(&mut payload, 4)? {
                    let axis = Vec3::new(value[1], value[2], value[3]);
                    // The stored angle is clockwise around the axis.
                    node.rotation = quat_from_axis_angle(axis, -value[0]);
                }
            }
            chunk::SCL_TRACK_TAG => {
                if let Some(value) = read_track(&mut payload, 3)? {
                    node.scaling = Vec3::new(value[0], value[1], value[2]);
                }
            }
            _ => trace!("skipping node chunk {id:#06x}"),
        }
    }
    Ok(node)
}

/// Reads a whole animation track and returns the first key's value.
/// Keys may carry up to five spline parameters, flagged in the low bits
/// of the key header.
fn read_track(reader: &mut Reader, components: usize) -> Result<Option<[f32; 4]>, TdsError> {
    let _flags = reader.u16()?;
    reader.u32()?;
    reader.u32()?;
    let key_count = reader.u32()?;

    let mut first = None;
    for _ in 0..key_count {
        let _frame = reader.u32()?;
        let key_flags = reader.u16()?;
        for bit in 0..5 {
            if key_flags & (1 << bit) != 0 {
                reader.f32()?;
            }
        }
        let mut value = [0.0f32; 4];
        for component in value.iter_mut().take(components) {
            *component = reader.f32()?;
        }
        if first.is_none() {
            first = Some(value);
        }
    }
    Ok(first)
}

fn read_vec3(reader: &mut Reader) -> Result<Vec3, TdsError> {
    Ok(Vec3::new(reader.f32()?, reader.f32()?, reader.f32()?))
}

fn resolve_material_groups(file: &mut TdsFile, groups: Vec<MaterialGroup>) {
    for group in groups {
        let material = file
            .materials
            .iter()
            .position(|candidate| candidate.name == group.material);
        let mesh = &mut file.meshes[group.mesh];
        if material.is_none() {
            warn!(
                "mesh '{}' references unknown material '{}'",
                mesh.name, group.material
            );
            continue;
        }
        for face_index in group.faces {
            match mesh.faces.get_mut(face_index as usize) {
                Some(face) => face.material = material,
                None => warn!(
                    "material group '{}' lists face {} beyond mesh '{}'",
                    group.material, face_index, mesh.name
                ),
            }
        }
    }
}

/// Vertex indices past the end of the vertex array are pulled back to
/// the last vertex so downstream lookups stay in bounds.
fn clamp_face_indices(file: &mut TdsFile) {
    for mesh in &mut file.meshes {
        if mesh.vertices.is_empty() {
            continue;
        }
        let max = (mesh.vertices.len() - 1) as u16;
        let mut clamped = 0usize;
        for face in &mut mesh.faces {
            for index in &mut face.indices {
                if *index > max {
                    *index = max;
                    clamped += 1;
                }
            }
        }
        if clamped > 0 {
            warn!("mesh '{}': clamped {clamped} out-of-range vertex indices", mesh.name);
        }
    }
}
