//! Shader pipeline building.
//!
//! Two WGSL stages go through a GPU-free front end (naga parse + validate)
//! so compile failures come back as structured [`ShaderError::Compile`]
//! values with line-annotated source, then get linked into a render pipeline
//! under a wgpu validation error scope. Any failure aborts task construction;
//! no partial program is ever handed out.
//!
//! [`ShaderError::Compile`]: crate::error::ShaderError::Compile

mod annotate;
mod pipeline;
mod source;

pub use annotate::annotate_source;
pub use pipeline::{PipelineDesc, ShaderPipelineBuilder, ShaderProgram, validate_program_sources};
pub use source::load_shader_source;
