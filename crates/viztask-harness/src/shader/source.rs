use std::path::Path;

use crate::error::ShaderError;

/// Reads plain-text shader source from `path`.
///
/// Retrieval is synchronous; it happens once, at task construction. Any
/// failure is reported as [`ShaderError::SourceFetch`] and aborts
/// construction.
pub fn load_shader_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| ShaderError::SourceFetch {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
