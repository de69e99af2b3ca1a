use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::{Path, PathBuf}};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "xtask", about = "keyval workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compile every *.json schema under a directory and report the invalid ones
    CheckSchemas { dir: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::CheckSchemas { dir } => check_schemas(&dir),
    }
}

/// Every `*.json` file under `dir`, sorted. Symlinks are not followed.
fn collect_json(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", dir.display()))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "json") {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn check_schemas(dir: &Path) -> Result<()> {
    let files = collect_json(dir)?;

    let mut bad = 0usize;
    for path in &files {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let verdict = serde_json::from_str(&text)
            .map_err(|e| e.to_string())
            .and_then(|schema| keyval::compile_schema(&schema));
        match verdict {
            Ok(_) => println!("OK: {}", path.display()),
            Err(e) => {
                bad += 1;
                eprintln!("Invalid: {}\n- {e}", path.display());
            }
        }
    }
    if bad > 0 {
        anyhow::bail!("{bad} of {} schemas are invalid", files.len());
    }
    Ok(())
}
