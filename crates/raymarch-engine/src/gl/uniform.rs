//! Typed uniform values.
//!
//! A [`UniformValue`] is checked against the GL type reported by program
//! reflection before anything is uploaded, so a `vec3` written to a `vec2`
//! uniform fails with [`GlError::UniformType`](super::GlError::UniformType)
//! instead of silently uploading garbage.

use glam::{IVec2, IVec3, IVec4, Mat3, Mat4, Vec2, Vec3, Vec4};

/// A value to write into a program uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Int(i32),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    Mat3(Mat3),
    Mat4(Mat4),
    /// Texture unit for a `sampler2D` / `samplerCube` uniform.
    Sampler(u32),
}

impl UniformValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Int(_) => "int",
            Self::IVec2(_) => "ivec2",
            Self::IVec3(_) => "ivec3",
            Self::IVec4(_) => "ivec4",
            Self::Mat3(_) => "mat3",
            Self::Mat4(_) => "mat4",
            Self::Sampler(_) => "sampler",
        }
    }

    /// Whether this value may be written to a uniform of GL type `utype`.
    ///
    /// `Int` is also accepted for `bool` and sampler uniforms, matching what
    /// `glUniform1i` allows.
    pub fn matches(&self, utype: u32) -> bool {
        match self {
            Self::Float(_) => utype == glow::FLOAT,
            Self::Vec2(_) => utype == glow::FLOAT_VEC2,
            Self::Vec3(_) => utype == glow::FLOAT_VEC3,
            Self::Vec4(_) => utype == glow::FLOAT_VEC4,
            Self::Int(_) => utype == glow::INT || utype == glow::BOOL || is_sampler(utype),
            Self::IVec2(_) => utype == glow::INT_VEC2,
            Self::IVec3(_) => utype == glow::INT_VEC3,
            Self::IVec4(_) => utype == glow::INT_VEC4,
            Self::Mat3(_) => utype == glow::FLOAT_MAT3,
            Self::Mat4(_) => utype == glow::FLOAT_MAT4,
            Self::Sampler(_) => is_sampler(utype),
        }
    }
}

pub(crate) fn is_sampler(utype: u32) -> bool {
    matches!(
        utype,
        glow::SAMPLER_2D | glow::SAMPLER_CUBE | glow::SAMPLER_3D | glow::SAMPLER_2D_SHADOW | glow::SAMPLER_2D_ARRAY
    )
}

/// GLSL spelling of a reflected uniform type, for error messages.
pub fn gl_type_name(utype: u32) -> &'static str {
    match utype {
        glow::FLOAT => "float",
        glow::FLOAT_VEC2 => "vec2",
        glow::FLOAT_VEC3 => "vec3",
        glow::FLOAT_VEC4 => "vec4",
        glow::INT => "int",
        glow::INT_VEC2 => "ivec2",
        glow::INT_VEC3 => "ivec3",
        glow::INT_VEC4 => "ivec4",
        glow::BOOL => "bool",
        glow::FLOAT_MAT3 => "mat3",
        glow::FLOAT_MAT4 => "mat4",
        glow::SAMPLER_2D => "sampler2D",
        glow::SAMPLER_CUBE => "samplerCube",
        glow::SAMPLER_3D => "sampler3D",
        glow::SAMPLER_2D_SHADOW => "sampler2DShadow",
        glow::SAMPLER_2D_ARRAY => "sampler2DArray",
        _ => "unsupported",
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(v: Mat3) -> Self {
        Self::Mat3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v.into())
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v.into())
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        Self::Vec4(v.into())
    }
}
