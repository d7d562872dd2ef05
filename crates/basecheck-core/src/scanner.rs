use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Recursively discover files literally named `Dockerfile` under `root`.
///
/// Variant names such as `Dockerfile.dev` or `dockerfile` are not picked up.
/// Hidden directories and common build-artifact directories are skipped.
/// Results are sorted so report order is deterministic across platforms.
pub fn find_dockerfiles(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("Path '{}' does not exist", root.display());
    }
    if !root.is_dir() {
        anyhow::bail!("'{}' is not a directory", root.display());
    }

    let mut results = Vec::new();
    walk_dirs(root, &mut results)?;
    results.sort();
    Ok(results)
}

fn walk_dirs(current: &Path, results: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(current)
        .with_context(|| format!("Failed to read directory '{}'", current.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if path.is_dir() {
            // Skip hidden dirs and build artifacts
            if name_str.starts_with('.')
                || name_str == "target"
                || name_str == "node_modules"
                || name_str == "vendor"
                || name_str == "dist"
                || name_str == "build"
                || name_str == "__pycache__"
            {
                continue;
            }
            walk_dirs(&path, results)?;
        } else if name_str == "Dockerfile" {
            results.push(path);
        }
    }

    Ok(())
}
