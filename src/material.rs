//! Fixed-function material descriptors produced by the importer.
//!
//! A [`Material`] carries the classic color terms a viewer needs (diffuse,
//! ambient, specular, emission) plus an optional diffuse [`Texture`]. The
//! importer builds one descriptor per material referenced by each mesh;
//! faces without an assigned material share the fixed [`Material::white`]
//! preset.

use crate::texture::Texture;

/// An RGBA color with f32 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (1 = opaque).
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Whether the RGB part is pure black (alpha is ignored).
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

/// A fixed-function material descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name from the source file, if any.
    pub name: Option<String>,
    /// Diffuse color; alpha carries the material's opacity.
    pub diffuse: Color,
    /// Ambient color (alpha unused, kept 0).
    pub ambient: Color,
    /// Specular color (alpha unused, kept 0).
    pub specular: Color,
    /// Emissive color.
    pub emission: Color,
    /// Specular highlight factor (0 disables highlighting).
    pub specular_factor: f32,
    /// Diffuse texture, if the material binds one.
    pub texture: Option<Texture>,
}

impl Material {
    /// The fixed white, untextured material assigned to faces without a
    /// material id.
    pub fn white() -> Self {
        Self {
            name: None,
            diffuse: Color::WHITE,
            ambient: Color::new(0.0, 0.0, 0.0, 0.0),
            specular: Color::new(0.0, 0.0, 0.0, 0.0),
            emission: Color::new(0.0, 0.0, 0.0, 0.0),
            specular_factor: 0.0,
            texture: None,
        }
    }

    /// Whether the material binds a diffuse texture.
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::white()
    }
}
