use std::fmt;

/// One half of a shader pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failure while building a shader program.
///
/// Every variant is fatal to task construction: no partially built program is
/// ever handed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// A stage failed front-end compilation.
    ///
    /// `log` is the backend-reported diagnostic text; `annotated_source` is
    /// the offending source with 1-based line numbers prefixed so the
    /// diagnostic can be read directly against it.
    Compile {
        stage: ShaderStage,
        log: String,
        annotated_source: String,
    },

    /// The validated stages could not be linked into a pipeline.
    Link(String),

    /// Shader source could not be retrieved from its location.
    SourceFetch { path: String, reason: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile {
                stage,
                log,
                annotated_source,
            } => {
                writeln!(f, "{stage} shader compilation error:")?;
                writeln!(f)?;
                for line in log.lines() {
                    writeln!(f, "    {line}")?;
                }
                writeln!(f)?;
                writeln!(f, "The shader source code was:")?;
                writeln!(f)?;
                write!(f, "{annotated_source}")
            }
            ShaderError::Link(msg) => write!(f, "shader program link error: {msg}"),
            ShaderError::SourceFetch { path, reason } => {
                write!(f, "shader source unavailable at '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// The requested drawing surface or GPU context could not be acquired.
///
/// Raised during session setup; the render loop never starts and no frames
/// are produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceUnavailable {
    pub reason: String,
}

impl SurfaceUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SurfaceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drawing surface unavailable: {}", self.reason)
    }
}

impl std::error::Error for SurfaceUnavailable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "unknown identifier".to_string(),
            annotated_source: "   1 | let x = nope;".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("fragment shader compilation error:"));
        assert!(text.contains("unknown identifier"));
        assert!(text.contains("   1 | let x = nope;"));
    }

    #[test]
    fn source_fetch_error_names_the_path() {
        let err = ShaderError::SourceFetch {
            path: "shaders/quad.vert.wgsl".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("shaders/quad.vert.wgsl"));
    }

    #[test]
    fn surface_unavailable_display() {
        let err = SurfaceUnavailable::new("no suitable adapter");
        assert_eq!(
            err.to_string(),
            "drawing surface unavailable: no suitable adapter"
        );
    }
}
