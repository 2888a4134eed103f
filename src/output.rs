use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::PROFILE_JSON_FILE;
use crate::profile::Profile;
use crate::render;

/// Write `profile_data.json` and one `<category>.svg` per category into
/// `out_dir`, creating it if needed. Existing files are overwritten.
pub fn write_all(out_dir: &Path, profile: &Profile) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(5);

    let json_path = out_dir.join(PROFILE_JSON_FILE);
    write_file(&json_path, &render::render_json(profile)?)?;
    written.push(json_path);

    for (category, record) in profile.records() {
        let path = out_dir.join(format!("{}.svg", category.key()));
        write_file(&path, &render::render_badge(category, record))?;
        info!("Generated: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Save fetched page lines so `parse` can replay them offline.
pub fn dump_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    write_file(path, &lines.join("\n"))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
