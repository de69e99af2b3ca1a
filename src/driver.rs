// keyval/src/driver.rs

use futures::future::join_all;
use std::path::Path;
use tracing::debug;

use crate::{
    config_map::{build_config_map, ConfigMap, ConfigWarning},
    engine::validate_group,
    error::{Error, Result},
    report::Reporter,
    token::split_tokens,
};

pub const SOME_INVALID: &str = "Some of your JSON files are not valid against the schema used";
pub const ALL_VALID: &str = "All JSON files were valid against schemas";

/// The two raw space-separated lists as handed over by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    pub key_and_file: String,
    pub key_and_schema: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupOutcome {
    pub key: String,
    pub valid: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus { Success, SuccessWithWarnings }

#[derive(Clone, Debug, Default)]
pub struct RunOutcome {
    /// In the order keys first appeared in the input.
    pub groups: Vec<GroupOutcome>,
    pub warnings: Vec<ConfigWarning>,
}

impl RunOutcome {
    pub fn all_valid(&self) -> bool { self.groups.iter().all(|g| g.valid) }

    pub fn status(&self) -> RunStatus {
        if self.all_valid() && self.warnings.is_empty() { RunStatus::Success } else { RunStatus::SuccessWithWarnings }
    }
}

/// Builds the config map and validates every group concurrently.
///
/// All group tasks are awaited before anything is decided. When one or more
/// groups failed, the error of the first such group (in input order) is
/// returned; schema mismatches only produce a warning.
pub async fn run(inputs: &Inputs, base_dir: &Path, reporter: &dyn Reporter) -> Result<RunOutcome> {
    reporter.info(&format!("Files and schemas will be relative to this directory: \"{}\"", base_dir.display()));
    reporter.info(&format!("File list specified: \"{}\"", inputs.key_and_file));
    reporter.info(&format!("Schema list specified: \"{}\"", inputs.key_and_schema));

    let files = split_tokens(&inputs.key_and_file);
    let schemas = split_tokens(&inputs.key_and_schema);
    let map = build_config_map(&files, &schemas)?;
    for w in map.warnings() {
        reporter.warning(&w.to_string());
    }

    let mut groups = Vec::with_capacity(map.len());
    let mut first_err: Option<Error> = None;
    for (key, res) in validate_all(&map, base_dir).await {
        match res {
            Ok(valid) => groups.push(GroupOutcome { key, valid }),
            Err(e) => { first_err.get_or_insert(e); }
        }
    }
    if let Some(e) = first_err {
        return Err(e);
    }

    let outcome = RunOutcome { groups, warnings: map.warnings().to_vec() };
    if outcome.all_valid() {
        reporter.info(ALL_VALID);
    } else {
        reporter.warning(SOME_INVALID);
    }
    Ok(outcome)
}

/// Spawns one task per group and waits for every one of them.
///
/// Results come back in ConfigMap order, one per group, whether or not a
/// sibling failed.
pub async fn validate_all(map: &ConfigMap, base_dir: &Path) -> Vec<(String, Result<bool>)> {
    let tasks: Vec<_> = map.iter().map(|(key, group)| {
        let (key, group, base) = (key.to_string(), group.clone(), base_dir.to_path_buf());
        tokio::spawn(async move { validate_group(&key, &group, &base).await })
    }).collect();
    let joined = join_all(tasks).await;

    map.keys().zip(joined).map(|(key, res)| {
        let res = res.map_err(|source| Error::Task { key: key.to_string(), source }).and_then(|r| r);
        match &res {
            Ok(valid) => debug!(key, valid, "group finished"),
            Err(e) => debug!(key, error = %e, "group failed"),
        }
        (key.to_string(), res)
    }).collect()
}
