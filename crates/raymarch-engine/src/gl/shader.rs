use std::collections::HashMap;
use std::rc::Rc;

use super::backend::GlBackend;
use super::error::{GlError, GlResult};
use super::uniform::{gl_type_name, UniformValue};

/// A reflected uniform: its GL type and location.
#[derive(Debug, Clone)]
struct UniformSlot<L> {
    utype: u32,
    location: L,
}

/// A linked vertex + fragment program.
pub struct Shader<B: GlBackend> {
    gl: Rc<B>,
    program: B::Program,
    uniforms: HashMap<String, UniformSlot<B::UniformLocation>>,
}

impl<B: GlBackend> Shader<B> {
    /// Compiles both stages and links them.
    ///
    /// Stage objects are detached and deleted once the program is linked.
    pub fn new(gl: Rc<B>, vertex: &str, fragment: &str) -> GlResult<Self> {
        let program = gl
            .create_program()
            .map_err(|e| GlError::alloc("program", e))?;

        let stages = [
            (glow::VERTEX_SHADER, "vertex", vertex),
            (glow::FRAGMENT_SHADER, "fragment", fragment),
        ];

        let mut compiled = Vec::with_capacity(stages.len());
        let mut result = Ok(());
        for (stage, label, source) in stages {
            match compile_stage(&*gl, stage, label, source) {
                Ok(shader) => {
                    gl.attach_shader(program, shader);
                    compiled.push(shader);
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        if result.is_ok() {
            gl.link_program(program);
            if !gl.program_link_status(program) {
                result = Err(GlError::ProgramLink { log: gl.program_info_log(program) });
            }
        }

        for shader in compiled {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        if let Err(e) = result {
            gl.delete_program(program);
            return Err(e);
        }

        let uniforms = reflect_uniforms(&*gl, program);
        log::debug!("program {program:?} linked with {} active uniforms", uniforms.len());

        Ok(Self { gl, program, uniforms })
    }

    pub fn handle(&self) -> B::Program {
        self.program
    }

    pub fn bind(&self) {
        self.gl.use_program(Some(self.program));
    }

    pub fn unbind(&self) {
        self.gl.use_program(None);
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    /// Writes `value` into the uniform `name`.
    ///
    /// The program must be bound. Nothing is uploaded if the uniform does
    /// not exist or its declared type does not match the value.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) -> GlResult<()> {
        let value = value.into();
        let slot = self
            .uniforms
            .get(name)
            .ok_or_else(|| GlError::UnknownUniform { name: name.to_string() })?;

        if !value.matches(slot.utype) {
            return Err(GlError::UniformType {
                name: name.to_string(),
                expected: gl_type_name(slot.utype),
                found: value.type_name(),
            });
        }

        let gl = &self.gl;
        let loc = &slot.location;
        match value {
            UniformValue::Float(v) => gl.uniform_f32(loc, &[v]),
            UniformValue::Vec2(v) => gl.uniform_f32(loc, &v.to_array()),
            UniformValue::Vec3(v) => gl.uniform_f32(loc, &v.to_array()),
            UniformValue::Vec4(v) => gl.uniform_f32(loc, &v.to_array()),
            UniformValue::Int(v) => gl.uniform_i32(loc, &[v]),
            UniformValue::IVec2(v) => gl.uniform_i32(loc, &v.to_array()),
            UniformValue::IVec3(v) => gl.uniform_i32(loc, &v.to_array()),
            UniformValue::IVec4(v) => gl.uniform_i32(loc, &v.to_array()),
            UniformValue::Mat3(m) => gl.uniform_matrix_f32(loc, 3, &m.to_cols_array()),
            UniformValue::Mat4(m) => gl.uniform_matrix_f32(loc, 4, &m.to_cols_array()),
            UniformValue::Sampler(unit) => gl.uniform_i32(loc, &[unit as i32]),
        }
        Ok(())
    }
}

impl<B: GlBackend> Drop for Shader<B> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
    }
}

fn compile_stage<B: GlBackend>(
    gl: &B,
    stage: u32,
    label: &'static str,
    source: &str,
) -> GlResult<B::Shader> {
    let shader = gl
        .create_shader(stage)
        .map_err(|e| GlError::alloc("shader", e))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(GlError::ShaderCompile { stage: label, log });
    }

    Ok(shader)
}

/// Collects every active uniform with a location.
///
/// Array uniforms are reported as `name[0]`; they are also registered under
/// the bare `name`.
fn reflect_uniforms<B: GlBackend>(
    gl: &B,
    program: B::Program,
) -> HashMap<String, UniformSlot<B::UniformLocation>> {
    let mut out = HashMap::new();
    for active in gl.active_uniforms(program) {
        // Block members have no location.
        let Some(location) = gl.uniform_location(program, &active.name) else {
            continue;
        };

        let slot = UniformSlot { utype: active.utype, location };
        if let Some(base) = active.name.strip_suffix("[0]") {
            out.insert(base.to_string(), slot.clone());
        }
        out.insert(active.name, slot);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingBackend};
    use glam::{Mat4, Vec2};

    fn backend() -> Rc<RecordingBackend> {
        Rc::new(
            RecordingBackend::default()
                .with_uniform("u_time", glow::FLOAT)
                .with_uniform("u_resolution", glow::FLOAT_VEC2)
                .with_uniform("u_view", glow::FLOAT_MAT4)
                .with_uniform("u_sky", glow::SAMPLER_CUBE)
                .with_uniform("u_lights[0]", glow::FLOAT_VEC3),
        )
    }

    #[test]
    fn link_detaches_and_deletes_stages() {
        let gl = backend();
        let shader = Shader::new(gl.clone(), "vs", "fs").unwrap();

        let calls = gl.calls();
        assert!(calls.contains(&Call::LinkProgram(shader.handle())));
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::DetachShader(..))).count(), 2);
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::DeleteShader(_))).count(), 2);
    }

    #[test]
    fn compile_failure_reports_stage_and_cleans_up() {
        let gl = backend();
        gl.compile_ok.set(false);

        let err = Shader::new(gl.clone(), "vs", "fs").err().unwrap();
        assert!(matches!(err, GlError::ShaderCompile { stage: "vertex", .. }));
        assert!(gl.calls().iter().any(|c| matches!(c, Call::DeleteProgram(_))));
        assert!(!gl.calls().iter().any(|c| matches!(c, Call::LinkProgram(_))));
    }

    #[test]
    fn link_failure_is_reported() {
        let gl = backend();
        gl.link_ok.set(false);

        let err = Shader::new(gl, "vs", "fs").err().unwrap();
        assert_eq!(err, GlError::ProgramLink { log: "link failed".to_string() });
    }

    #[test]
    fn typed_uniforms_are_uploaded() {
        let gl = backend();
        let shader = Shader::new(gl.clone(), "vs", "fs").unwrap();
        gl.clear_calls();

        shader.set_uniform("u_time", 1.5f32).unwrap();
        shader.set_uniform("u_resolution", Vec2::new(800.0, 600.0)).unwrap();
        shader.set_uniform("u_view", Mat4::IDENTITY).unwrap();
        shader.set_uniform("u_sky", UniformValue::Sampler(3)).unwrap();

        assert_eq!(
            gl.calls(),
            vec![
                Call::UniformF32("u_time".into(), vec![1.5]),
                Call::UniformF32("u_resolution".into(), vec![800.0, 600.0]),
                Call::UniformMatrix("u_view".into(), 4, Mat4::IDENTITY.to_cols_array().to_vec()),
                Call::UniformI32("u_sky".into(), vec![3]),
            ]
        );
    }

    #[test]
    fn mismatched_type_is_rejected_without_upload() {
        let gl = backend();
        let shader = Shader::new(gl.clone(), "vs", "fs").unwrap();
        gl.clear_calls();

        let err = shader.set_uniform("u_resolution", 1.0f32).unwrap_err();
        assert_eq!(
            err,
            GlError::UniformType {
                name: "u_resolution".to_string(),
                expected: "vec2",
                found: "float",
            }
        );
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn unknown_uniform_is_an_error() {
        let gl = backend();
        let shader = Shader::new(gl, "vs", "fs").unwrap();
        assert!(!shader.has_uniform("u_mouse"));
        assert!(matches!(
            shader.set_uniform("u_mouse", 0.0f32),
            Err(GlError::UnknownUniform { .. })
        ));
    }

    #[test]
    fn array_uniforms_resolve_by_base_name() {
        let gl = backend();
        let shader = Shader::new(gl, "vs", "fs").unwrap();
        assert!(shader.has_uniform("u_lights"));
        assert!(shader.has_uniform("u_lights[0]"));
        shader.set_uniform("u_lights", [1.0f32, 0.0, 0.0]).unwrap();
    }
}
