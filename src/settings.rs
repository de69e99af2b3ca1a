// keyval/src/settings.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::{driver::Inputs, error::ShapeError, report::ReportFormat};

pub const DEFAULT_FILE: &str = "keyval.toml";

/// Settings are merged: config file -> environment -> command line
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Space-separated `key:path` tokens for the documents to validate.
    pub key_and_file: Option<String>,
    /// Space-separated `key:path` tokens for the schemas.
    pub key_and_schema: Option<String>,
    /// Paths in tokens are resolved against this directory (default: cwd).
    pub base_dir: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub log_filter: Option<String>,      // RUST_LOG syntax, e.g. "keyval=debug"
}

impl Settings {
    /// Reads a TOML settings file. A missing default file is not an error;
    /// a missing explicit one is.
    pub fn from_file(path: &Path, required: bool) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("read settings {}", path.display())),
        };
        toml::from_str(&text).with_context(|| format!("parse settings {}", path.display()))
    }

    /// Picks up GitHub Actions inputs (`INPUT_<NAME>`), with either dashes or underscores.
    pub fn from_env<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut s = Self::default();
        let mut in_actions = false;
        for (k, v) in vars {
            let v: String = v.into();
            match k.as_ref().to_ascii_uppercase().replace('_', "-").as_str() {
                "INPUT-KEY-AND-FILE" => s.key_and_file = Some(v),
                "INPUT-KEY-AND-SCHEMA" => s.key_and_schema = Some(v),
                "INPUT-BASE-DIR" if !v.is_empty() => s.base_dir = Some(PathBuf::from(v)),
                "GITHUB-ACTIONS" => in_actions = v == "true",
                _ => {}
            }
        }
        if in_actions { s.format = Some(ReportFormat::Actions); }
        s
    }

    /// Overlays every field `other` sets on top of `self`.
    pub fn merge(&mut self, other: &Settings) {
        macro_rules! ov { ($f:ident) => { if other.$f.is_some() { self.$f = other.$f.clone(); } } }
        ov!(key_and_file);
        ov!(key_and_schema);
        ov!(base_dir);
        ov!(format);
        ov!(log_filter);
    }

    pub fn inputs(&self) -> Result<Inputs, ShapeError> {
        let key_and_file = self.key_and_file.clone().ok_or(ShapeError::EmptyList { list: "file" })?;
        let key_and_schema = self.key_and_schema.clone().ok_or(ShapeError::EmptyList { list: "schema" })?;
        Ok(Inputs { key_and_file, key_and_schema })
    }

    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(p) => Ok(p.clone()),
            None => std::env::current_dir().context("current dir"),
        }
    }

    pub fn format(&self) -> ReportFormat { self.format.unwrap_or_default() }
}

/// Merges the settings file, the environment and the command-line overlay.
pub fn load(config: Option<&Path>, cli: &Settings) -> Result<Settings> {
    let mut merged = match config {
        Some(p) => Settings::from_file(p, true)?,
        None => Settings::from_file(Path::new(DEFAULT_FILE), false)?,
    };
    merged.merge(&Settings::from_env(std::env::vars()));
    merged.merge(cli);
    Ok(merged)
}
