pub mod deals;

use anyhow::Context;
use std::path::Path;

/// Overwrites `path` with `body`, creating parent directories. Not atomic.
pub fn write_text(path: &Path, body: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    write_text(path, &body)
}
