// keyval/src/config_map.rs

use std::{collections::HashMap, fmt, path::PathBuf};
use tracing::{debug, info};

use crate::{
    error::{Result, ShapeError},
    token::Token,
};

/// Files and the single schema sharing one key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupDescriptor {
    pub files: Vec<PathBuf>,
    pub schema: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A later schema token reused a key that already had a schema; the first one is kept.
    DuplicateSchema { key: String, kept: PathBuf, ignored: PathBuf },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSchema { key, kept, ignored } => write!(
                f,
                "You have two schemas with the same key '{key}'; keeping '{}' and ignoring '{}'",
                kept.display(),
                ignored.display()
            ),
        }
    }
}

/// key -> group, iterated in the order keys first appeared in the input.
#[derive(Clone, Debug, Default)]
pub struct ConfigMap {
    groups: Vec<(String, GroupDescriptor)>,
    index: HashMap<String, usize>,
    warnings: Vec<ConfigWarning>,
}

impl ConfigMap {
    pub fn get(&self, key: &str) -> Option<&GroupDescriptor> {
        self.index.get(key).map(|&i| &self.groups[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupDescriptor)> {
        self.groups.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize { self.groups.len() }
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
    pub fn warnings(&self) -> &[ConfigWarning] { &self.warnings }

    fn entry(&mut self, key: &str) -> &mut GroupDescriptor {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.groups.push((key.to_string(), GroupDescriptor::default()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[i].1
    }

    fn add_file(&mut self, token: &Token<'_>) {
        let group = self.entry(token.key);
        if group.files.is_empty() {
            info!("Starting new file list for key: '{}' -> '{}'", token.key, token.path);
        } else {
            info!("Adding file to list: '{}' -> '{}'", token.key, token.path);
        }
        group.files.push(PathBuf::from(token.path));
    }

    fn set_schema(&mut self, token: &Token<'_>) {
        let existed = self.index.contains_key(token.key);
        let group = self.entry(token.key);
        if let Some(kept) = &group.schema {
            let warning = ConfigWarning::DuplicateSchema {
                key: token.key.to_string(),
                kept: kept.clone(),
                ignored: PathBuf::from(token.path),
            };
            debug!("{warning}");
            self.warnings.push(warning);
            return;
        }
        if existed {
            info!("Setting the schema for existing key: '{}' -> '{}'", token.key, token.path);
        } else {
            info!("Setting the schema for new key: '{}' -> '{}'", token.key, token.path);
        }
        group.schema = Some(PathBuf::from(token.path));
    }
}

/// Reconciles the file list and the schema list into one group per key.
///
/// The file list drives the walk: index `i` adds `file_tokens[i]`, then
/// `schema_tokens[i]` when the schema list reaches that far. The schema list
/// may be shorter than the file list but never longer. A malformed token
/// anywhere aborts the whole build.
pub fn build_config_map<S: AsRef<str>>(file_tokens: &[S], schema_tokens: &[S]) -> Result<ConfigMap> {
    if file_tokens.is_empty() {
        return Err(ShapeError::EmptyList { list: "file" }.into());
    }
    if schema_tokens.is_empty() {
        return Err(ShapeError::EmptyList { list: "schema" }.into());
    }
    if schema_tokens.len() > file_tokens.len() {
        return Err(ShapeError::LengthMismatch { files: file_tokens.len(), schemas: schema_tokens.len() }.into());
    }

    let mut map = ConfigMap::default();
    for (i, raw) in file_tokens.iter().enumerate() {
        map.add_file(&Token::parse(raw.as_ref())?);
        if let Some(raw) = schema_tokens.get(i) {
            map.set_schema(&Token::parse(raw.as_ref())?);
        }
    }

    for (key, group) in map.iter() {
        debug!(key, files = group.files.len(), schema = ?group.schema, "config map entry");
    }
    Ok(map)
}
