use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, trace};
use serde::Serialize;

/// Header and separator written once, when the log file is first created.
pub const HEADER: &str =
    "| file | function | test values | result | elapsed time |\n|---|---|---|---|---|\n";

/// One observed call. Labels are written into the table verbatim.
#[derive(Debug)]
pub struct Row<'a, V: ?Sized> {
    pub file: &'a str,
    pub func: &'a str,
    pub values: &'a V,
    pub result: &'a str,
    /// Seconds, as reported by [`crate::timer`].
    pub elapsed: f64,
}

/// `1.23456` → `1.2346s`
pub fn format_elapsed(secs: f64) -> String {
    format!("{secs:.4}s")
}

/// Render a row as a single table line, including the trailing newline.
pub fn format_row<V: Serialize + ?Sized>(row: &Row<'_, V>) -> Result<String> {
    let values = serde_json::to_string(row.values).context("failed to serialize test values")?;
    Ok(format!(
        "| {} | {} | {} | {} | {} |\n",
        row.file,
        row.func,
        values,
        row.result,
        format_elapsed(row.elapsed)
    ))
}

fn ensure_parent_dir(out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("creating directory {}", parent.display());
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Only a writer that creates the file writes the header, so an existing
/// table is never truncated.
fn ensure_header(out_path: &Path) -> Result<()> {
    let mut f = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(out_path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to create {}", out_path.display()))
        }
    };
    debug!("writing table header to {}", out_path.display());
    f.write_all(HEADER.as_bytes())
        .with_context(|| format!("failed to write header to {}", out_path.display()))?;
    Ok(())
}

/// Append `row` to the Markdown table at `out_path`.
///
/// Missing parent directories are created, and a new file starts with
/// [`HEADER`]. Values are serialized before anything on disk is touched, so
/// an unserializable value leaves the filesystem as it was. There is no
/// locking: concurrent writers to one path may duplicate the header or
/// interleave rows.
pub fn log_row<V: Serialize + ?Sized>(out_path: impl AsRef<Path>, row: &Row<'_, V>) -> Result<()> {
    let out_path = out_path.as_ref();
    let line = format_row(row)?;

    ensure_parent_dir(out_path)?;
    ensure_header(out_path)?;

    let mut f = OpenOptions::new()
        .append(true)
        .open(out_path)
        .with_context(|| format!("failed to open {}", out_path.display()))?;
    f.write_all(line.as_bytes())
        .with_context(|| format!("failed to append to {}", out_path.display()))?;
    trace!("appended {} {} to {}", row.file, row.func, out_path.display());
    Ok(())
}
