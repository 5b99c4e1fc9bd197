//! Object wrappers over an OpenGL (ES 3 / GL 3.3) context.
//!
//! Every wrapper owns exactly one native object, holds an `Rc` to the
//! backend that created it and deletes the object when dropped. All calls
//! go through [`GlBackend`] so the wrappers can be exercised without a
//! driver.

mod backend;
mod buffer;
mod cube_map;
mod error;
mod framebuffer;
mod glow_backend;
mod shader;
mod texture;
mod ubo;
mod uniform;
mod vertex_array;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{ActiveUniform, GlBackend};
pub use buffer::{IndexBuffer, IndexBufferConfig, VertexBuffer, VertexBufferConfig};
pub use cube_map::TextureCubeMap;
pub use error::{GlError, GlResult};
pub use framebuffer::{Attachment, AttachmentKind, FrameBuffer};
pub use shader::Shader;
pub use texture::{Texture, TextureConfig};
pub use ubo::{std140_layout, Ubo, UboConfig, UboField, UboFieldKind};
pub use uniform::{gl_type_name, UniformValue};
pub use vertex_array::{VertexArray, VertexArrayConfig};
