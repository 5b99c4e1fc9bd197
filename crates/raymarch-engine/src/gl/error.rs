use thiserror::Error;

/// Errors raised by the GL resource wrappers and image loading.
///
/// None of these are recoverable at the wrapper level; callers are expected
/// to propagate them up to `main`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlError {
    #[error("could not create {resource}: {reason}")]
    ResourceAllocation {
        resource: &'static str,
        reason: String,
    },

    #[error("framebuffer incomplete (status 0x{status:04x})")]
    IncompleteFramebuffer { status: u32 },

    #[error("failed to load image `{path}`: {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("{width}x{height} RGBA8 image needs {expected:?} bytes, has {found}")]
    ImageData {
        width: u32,
        height: u32,
        expected: Option<usize>,
        found: usize,
    },

    #[error("a cube map needs exactly 6 faces, got {count}")]
    CubeMapFaces { count: usize },

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("no active uniform named `{name}`")]
    UnknownUniform { name: String },

    #[error("uniform `{name}` is declared as {expected}, got a {found} value")]
    UniformType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("uniform buffer field `{name}`: {reason}")]
    UboField { name: String, reason: String },

    #[error("program has no uniform block named `{name}`")]
    UniformBlock { name: String },
}

impl GlError {
    pub(crate) fn alloc(resource: &'static str, reason: String) -> Self {
        log::error!("{resource} allocation failed: {reason}");
        Self::ResourceAllocation { resource, reason }
    }
}

pub type GlResult<T> = Result<T, GlError>;
