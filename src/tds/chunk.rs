//! Chunk ids and the little-endian cursor the parser reads through.
//!
//! A 3DS file is a tree of chunks. Every chunk starts with a six byte
//! header: a `u16` id and a `u32` length that counts the header itself.
//! Whatever follows the fixed fields of a chunk is a sequence of
//! sub-chunks, which makes it possible to skip anything unknown by
//! length alone.

use super::error::TdsError;

// Top level.
pub const M3DMAGIC: u16 = 0x4d4d;
pub const M3D_VERSION: u16 = 0x0002;
pub const MDATA: u16 = 0x3d3d;
pub const KFDATA: u16 = 0xb000;

// Shared value chunks.
pub const COLOR_F: u16 = 0x0010;
pub const COLOR_24: u16 = 0x0011;
pub const LIN_COLOR_24: u16 = 0x0012;
pub const LIN_COLOR_F: u16 = 0x0013;
pub const INT_PERCENTAGE: u16 = 0x0030;
pub const FLOAT_PERCENTAGE: u16 = 0x0031;

// Mesh data section.
pub const MESH_VERSION: u16 = 0x3d3e;
pub const MAT_ENTRY: u16 = 0xafff;
pub const NAMED_OBJECT: u16 = 0x4000;

// Material sub-chunks.
pub const MAT_NAME: u16 = 0xa000;
pub const MAT_AMBIENT: u16 = 0xa010;
pub const MAT_DIFFUSE: u16 = 0xa020;
pub const MAT_SPECULAR: u16 = 0xa030;
pub const MAT_SHININESS: u16 = 0xa040;
pub const MAT_TRANSPARENCY: u16 = 0xa050;
pub const MAT_TEXMAP: u16 = 0xa200;
pub const MAT_MAPNAME: u16 = 0xa300;

// Named object sub-chunks.
pub const N_TRI_OBJECT: u16 = 0x4100;
pub const N_CAMERA: u16 = 0x4700;

// Triangle object sub-chunks.
pub const POINT_ARRAY: u16 = 0x4110;
pub const FACE_ARRAY: u16 = 0x4120;
pub const MSH_MAT_GROUP: u16 = 0x4130;
pub const TEX_VERTS: u16 = 0x4140;
pub const SMOOTH_GROUP: u16 = 0x4150;
pub const MESH_MATRIX: u16 = 0x4160;

// Camera sub-chunks.
pub const CAM_RANGES: u16 = 0x4720;

// Keyframer section.
pub const AMBIENT_NODE_TAG: u16 = 0xb001;
pub const OBJECT_NODE_TAG: u16 = 0xb002;
pub const CAMERA_NODE_TAG: u16 = 0xb003;
pub const TARGET_NODE_TAG: u16 = 0xb004;
pub const LIGHT_NODE_TAG: u16 = 0xb005;
pub const SPOTLIGHT_NODE_TAG: u16 = 0xb006;
pub const L_TARGET_NODE_TAG: u16 = 0xb007;

// Keyframer node sub-chunks.
pub const NODE_HDR: u16 = 0xb010;
pub const INSTANCE_NAME: u16 = 0xb011;
pub const PIVOT: u16 = 0xb013;
pub const POS_TRACK_TAG: u16 = 0xb020;
pub const ROT_TRACK_TAG: u16 = 0xb021;
pub const SCL_TRACK_TAG: u16 = 0xb022;
pub const NODE_ID: u16 = 0xb030;

/// Parent id marking a keyframer node as a tree root.
pub const NO_PARENT: u16 = 0xffff;

/// Little-endian cursor over a chunk payload.
///
/// `base` keeps the absolute file offset so errors point at the real
/// location even when the reader was built over a nested slice.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, base: 0 }
    }

    fn sub(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], TdsError> {
        if self.remaining() < count {
            return Err(TdsError::Truncated {
                offset: self.offset(),
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    pub fn u8(&mut self) -> Result<u8, TdsError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, TdsError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, TdsError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn f32(&mut self) -> Result<f32, TdsError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a NUL-terminated string. 3DS writers emit ASCII names; any
    /// stray high bytes are replaced rather than rejected.
    pub fn cstring(&mut self) -> Result<String, TdsError> {
        let start = self.pos;
        let nul = self.data[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(TdsError::UnterminatedString { offset: self.offset() })?;
        let bytes = &self.data[start..start + nul];
        self.pos = start + nul + 1;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads the next chunk header and returns its id together with a
    /// reader scoped to its payload. The payload is consumed from this
    /// reader, so callers skip unhandled chunks by doing nothing.
    pub fn next_chunk(&mut self) -> Result<Option<(u16, Reader<'a>)>, TdsError> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let id = self.u16()?;
        let length = self.u32()?;
        if (length as usize) < 6 || length as usize - 6 > self.remaining() {
            return Err(TdsError::BadChunkLength { id, length });
        }
        let base = self.offset();
        let payload = self.take(length as usize - 6)?;
        Ok(Some((id, Reader::sub(payload, base))))
    }
}
