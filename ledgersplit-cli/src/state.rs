use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$LEDGERSPLIT_HOME`, or `~/.ledgersplit`
pub fn ledgersplit_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("LEDGERSPLIT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledgersplit"))
}

pub fn ensure_ledgersplit_home() -> Result<PathBuf> {
    let dir = ledgersplit_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
