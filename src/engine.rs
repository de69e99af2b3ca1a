// keyval/src/engine.rs

use futures::future::join_all;
use jsonschema::Validator;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{
    config_map::GroupDescriptor,
    error::{Error, Result, ShapeError},
};

/// Compiles a schema document, checking it against its meta-schema first.
pub fn compile_schema(schema: &Value) -> std::result::Result<Validator, String> {
    jsonschema::validator_for(schema).map_err(|e| e.to_string())
}

pub fn parse_json(bytes: &[u8]) -> std::result::Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Validates every file of one group against the group's schema.
///
/// Returns `Ok(false)` when at least one document does not satisfy the
/// schema. Unreadable files, malformed JSON and invalid schemas are errors
/// and discard the whole group.
pub async fn validate_group(key: &str, group: &GroupDescriptor, base_dir: &Path) -> Result<bool> {
    let Some(schema) = group.schema.as_deref() else {
        return Err(ShapeError::MissingSchema { key: key.to_string() }.into());
    };
    if group.files.is_empty() {
        return Err(ShapeError::NoFiles { key: key.to_string() }.into());
    }

    // files first, schema last
    let paths: Vec<PathBuf> = group.files.iter()
        .map(|f| base_dir.join(f))
        .chain(std::iter::once(base_dir.join(schema)))
        .collect();
    for (i, p) in paths[..paths.len() - 1].iter().enumerate() {
        info!("Attempting to read JSON file [{i}] for '{key}': {}", p.display());
    }
    info!("Attempting to read schema file for '{key}': {}", paths[paths.len() - 1].display());

    let reads = join_all(paths.iter().map(tokio::fs::read)).await;

    let mut docs = Vec::with_capacity(paths.len());
    for (path, read) in paths.iter().zip(reads) {
        let bytes = read.map_err(|source| Error::Read { key: key.to_string(), path: path.clone(), source })?;
        docs.push(bytes);
    }
    let mut values = Vec::with_capacity(docs.len());
    for (path, bytes) in paths.iter().zip(&docs) {
        let value = parse_json(bytes).map_err(|source| Error::Parse { key: key.to_string(), path: path.clone(), source })?;
        values.push(value);
    }

    let (schema_path, schema_doc) = (&paths[paths.len() - 1], &values[values.len() - 1]);
    let validator = compile_schema(schema_doc).map_err(|reason| Error::SchemaCompile {
        key: key.to_string(),
        path: schema_path.clone(),
        reason,
    })?;

    // no short-circuit: every file is checked so each failure gets logged
    let mut all_valid = true;
    for (path, doc) in paths.iter().zip(&values).take(group.files.len()) {
        let violations: Vec<String> = validator.iter_errors(doc).map(|e| e.to_string()).collect();
        if violations.is_empty() {
            info!("'{}' is valid against '{}'", path.display(), schema_path.display());
            continue;
        }
        all_valid = false;
        for v in &violations {
            warn!(key, file = %path.display(), "{v}");
        }
    }
    Ok(all_valid)
}
