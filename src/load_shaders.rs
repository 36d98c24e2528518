use std::fmt;
use std::path::Path;

use log::error;

use crate::driver::GraphicsDriver;
use crate::error::{parse_diagnostic_location, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex and fragment shader text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        ShaderSource {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn from_paths(
        vertex_shader_path: impl AsRef<Path>,
        fragment_shader_path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let vertex = std::fs::read_to_string(vertex_shader_path)?;
        let fragment = std::fs::read_to_string(fragment_shader_path)?;
        Ok(Self::new(vertex, fragment))
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn stages(&self) -> [(Stage, &str); 2] {
        [
            (Stage::Vertex, self.vertex.as_str()),
            (Stage::Fragment, self.fragment.as_str()),
        ]
    }
}

/// Compiles every stage of `source`. On failure the stages compiled so far are
/// deleted again and the diagnostic names the failing stage.
pub(crate) fn compile_stages<D: GraphicsDriver>(
    driver: &D,
    source: &ShaderSource,
) -> Result<Vec<D::Shader>, SessionError> {
    let mut shaders = Vec::with_capacity(2);
    for (stage, text) in source.stages() {
        match driver.compile_shader(stage, text) {
            Ok(shader) => shaders.push(shader),
            Err(log) => {
                for shader in shaders {
                    driver.delete_shader(shader);
                }
                let log = if log.trim().is_empty() {
                    format!("{stage} shader failed to compile without a diagnostic")
                } else {
                    log
                };
                error!("{stage} shader: {log}");
                return Err(SessionError::Compile {
                    stage,
                    location: parse_diagnostic_location(&log),
                    log,
                });
            }
        }
    }
    Ok(shaders)
}

/// Links compiled stages into a program. The stage objects are always deleted.
pub(crate) fn link_stages<D: GraphicsDriver>(
    driver: &D,
    shaders: Vec<D::Shader>,
) -> Result<D::Program, SessionError> {
    let linked = driver.link_program(&shaders);
    for shader in shaders {
        driver.delete_shader(shader);
    }
    linked.map_err(|log| {
        let log = if log.trim().is_empty() {
            "program failed to link without a diagnostic".to_string()
        } else {
            log
        };
        error!("link: {log}");
        SessionError::Link { log }
    })
}
