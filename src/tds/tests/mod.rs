//! Byte-level fixtures for parser tests. Documents are assembled chunk
//! by chunk so each test controls exactly what the reader sees.

use super::chunk::{
    CAM_RANGES, COLOR_F, FACE_ARRAY, INT_PERCENTAGE, M3DMAGIC, M3D_VERSION, MAT_DIFFUSE,
    MAT_ENTRY, MAT_NAME, MDATA, MESH_MATRIX, MSH_MAT_GROUP, NAMED_OBJECT, N_CAMERA, N_TRI_OBJECT,
    POINT_ARRAY, TEX_VERTS,
};


/// Wraps `payload` in a chunk header with the given id.
fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&((payload.len() + 6) as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn cstr(text: &str) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.push(0);
    out
}

fn floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A complete document: `mdata` children under MDATA, `kfdata` children
/// under KFDATA when given, both under the magic chunk.
fn document(mdata: &[u8], kfdata: Option<&[u8]>) -> Vec<u8> {
    let mut body = chunk(M3D_VERSION, &3u32.to_le_bytes());
    body.extend_from_slice(&chunk(MDATA, mdata));
    if let Some(kf) = kfdata {
        body.extend_from_slice(&chunk(super::chunk::KFDATA, kf));
    }
    chunk(M3DMAGIC, &body)
}

/// A material entry with a diffuse color and no texture.
fn material(name: &str, diffuse: [f32; 3]) -> Vec<u8> {
    let mut body = chunk(MAT_NAME, &cstr(name));
    body.extend_from_slice(&chunk(MAT_DIFFUSE, &chunk(COLOR_F, &floats(&diffuse))));
    chunk(MAT_ENTRY, &body)
}

fn int_percentage(container: u16, percent: i16) -> Vec<u8> {
    chunk(container, &chunk(INT_PERCENTAGE, &percent.to_le_bytes()))
}

fn point_array(points: &[[f32; 3]]) -> Vec<u8> {
    let mut payload = (points.len() as u16).to_le_bytes().to_vec();
    for p in points {
        payload.extend_from_slice(&floats(p));
    }
    chunk(POINT_ARRAY, &payload)
}

fn tex_verts(coords: &[[f32; 2]]) -> Vec<u8> {
    let mut payload = (coords.len() as u16).to_le_bytes().to_vec();
    for c in coords {
        payload.extend_from_slice(&floats(c));
    }
    chunk(TEX_VERTS, &payload)
}

/// A face array chunk; `groups` are appended after the face list as
/// material group sub-chunks.
fn face_array(faces: &[[u16; 3]], groups: &[(&str, &[u16])]) -> Vec<u8> {
    let mut payload = (faces.len() as u16).to_le_bytes().to_vec();
    for face in faces {
        for index in face {
            payload.extend_from_slice(&index.to_le_bytes());
        }
        payload.extend_from_slice(&0u16.to_le_bytes());
    }
    for (name, indices) in groups {
        let mut group = cstr(name);
        group.extend_from_slice(&(indices.len() as u16).to_le_bytes());
        for index in *indices {
            group.extend_from_slice(&index.to_le_bytes());
        }
        payload.extend_from_slice(&chunk(MSH_MAT_GROUP, &group));
    }
    chunk(FACE_ARRAY, &payload)
}

fn mesh_matrix(columns: [[f32; 3]; 4]) -> Vec<u8> {
    let mut payload = Vec::new();
    for col in &columns {
        payload.extend_from_slice(&floats(col));
    }
    chunk(MESH_MATRIX, &payload)
}

/// A named object wrapping a triangle mesh built from the given parts.
fn tri_object(name: &str, parts: &[Vec<u8>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(part);
    }
    let mut object = cstr(name);
    object.extend_from_slice(&chunk(N_TRI_OBJECT, &body));
    chunk(NAMED_OBJECT, &object)
}

/// A named camera object. `ranges` adds a CAM_RANGES sub-chunk.
fn camera_object(
    name: &str,
    position: [f32; 3],
    target: [f32; 3],
    roll: f32,
    lens: f32,
    ranges: Option<(f32, f32)>,
) -> Vec<u8> {
    let mut body = floats(&position);
    body.extend_from_slice(&floats(&target));
    body.extend_from_slice(&roll.to_le_bytes());
    body.extend_from_slice(&lens.to_le_bytes());
    if let Some((near, far)) = ranges {
        body.extend_from_slice(&chunk(CAM_RANGES, &floats(&[near, far])));
    }
    let mut object = cstr(name);
    object.extend_from_slice(&chunk(N_CAMERA, &body));
    chunk(NAMED_OBJECT, &object)
}

/// An animation track with plain keys, one value tuple per frame.
fn track(keys: &[(u32, &[f32])]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&0u16.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload.extend_from_slice(&(keys.len() as u32).to_le_bytes());
    for (frame, values) in keys {
        payload.extend_from_slice(&frame.to_le_bytes());
        payload.extend_from_slice(&0u16.to_le_bytes());
        payload.extend_from_slice(&floats(values));
    }
    payload
}

/// A keyframer object node chunk with header, id and optional tracks.
fn object_node(
    node_id: u16,
    name: &str,
    parent_id: u16,
    pivot: Option<[f32; 3]>,
    position: Option<&[(u32, &[f32])]>,
    rotation: Option<&[(u32, &[f32])]>,
    scaling: Option<&[(u32, &[f32])]>,
) -> Vec<u8> {
    use super::chunk::{
        NODE_HDR, NODE_ID, OBJECT_NODE_TAG, PIVOT, POS_TRACK_TAG, ROT_TRACK_TAG, SCL_TRACK_TAG,
    };

    let mut header = cstr(name);
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(&parent_id.to_le_bytes());

    let mut body = chunk(NODE_ID, &node_id.to_le_bytes());
    body.extend_from_slice(&chunk(NODE_HDR, &header));
    if let Some(p) = pivot {
        body.extend_from_slice(&chunk(PIVOT, &floats(&p)));
    }
    if let Some(keys) = position {
        body.extend_from_slice(&chunk(POS_TRACK_TAG, &track(keys)));
    }
    if let Some(keys) = rotation {
        body.extend_from_slice(&chunk(ROT_TRACK_TAG, &track(keys)));
    }
    if let Some(keys) = scaling {
        body.extend_from_slice(&chunk(SCL_TRACK_TAG, &track(keys)));
    }
    chunk(OBJECT_NODE_TAG, &body)
}
