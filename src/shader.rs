//! Shader registry: a static id -> file path table, resolved on each load.
//!
//! Sources are plain WGSL files under `shaders/` with `vertex_main` and
//! `fragment_main` entry points. No caching, no invalidation.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

const REGISTRY: &[(&str, &str)] = &[("triangle", "triangle.wgsl")];

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("unknown shader id '{0}'")]
    UnknownId(String),

    #[error("failed to read shader source '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves a shader id to its path on disk without reading it.
pub fn resolve(id: &str) -> Result<PathBuf, ShaderError> {
    REGISTRY
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, file)| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("shaders")
                .join(file)
        })
        .ok_or_else(|| ShaderError::UnknownId(id.to_string()))
}

/// Loads the WGSL source text for a registered shader id.
pub fn load_source(id: &str) -> Result<String, ShaderError> {
    let path = resolve(id)?;
    fs::read_to_string(&path).map_err(|source| ShaderError::Read {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_id_loads_exact_file_contents() {
        let source = load_source("triangle").unwrap();
        assert_eq!(source, include_str!("../shaders/triangle.wgsl"));
    }

    #[test]
    fn loaded_source_has_expected_entry_points() {
        let source = load_source("triangle").unwrap();
        assert!(source.contains("fn vertex_main"));
        assert!(source.contains("fn fragment_main"));
    }

    #[test]
    fn unknown_id_is_a_typed_error() {
        match load_source("does-not-exist") {
            Err(ShaderError::UnknownId(id)) => assert_eq!(id, "does-not-exist"),
            other => panic!("expected UnknownId, got {:?}", other.map(|_| ())),
        }
    }
}
