// ChatScribe - core/output.rs
//
// Output destination handling for file flushes: folder resolution,
// filename sanitisation, numbered-suffix collision avoidance, and the
// actual write.
//
// By design, a bad destination hint is never an error — it is silently
// substituted with the user's documents directory, bad filename
// characters become `_`, and an occupied path gets a numeric suffix.
// Only real I/O failures surface as errors.

use crate::util::constants::{
    FILE_TIMESTAMP_FORMAT, LINE_ENDING, LOG_FILE_EXTENSION, MAX_COLLISION_SUFFIXES,
};
use crate::util::error::FlushError;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Whether a folder hint is usable as-is: non-empty, absolute, and an
/// existing directory.
pub fn is_valid_folder(hint: &str) -> bool {
    if hint.is_empty() {
        return false;
    }
    let path = Path::new(hint);
    path.is_absolute() && path.is_dir()
}

/// Resolve the output folder from a hint, falling back to the user's
/// documents directory (then home, then the current directory) when the
/// hint is unusable.
pub fn resolve_folder(hint: &str) -> PathBuf {
    if is_valid_folder(hint) {
        return PathBuf::from(hint);
    }
    if !hint.is_empty() {
        tracing::debug!(hint, "Destination hint unusable; using documents directory");
    }
    default_documents_dir()
}

/// The user's documents directory, via platform conventions.
///
/// Falls back to the home directory, then the current directory, if the
/// platform does not define one.
pub fn default_documents_dir() -> PathBuf {
    if let Some(dirs) = directories::UserDirs::new() {
        match dirs.document_dir() {
            Some(docs) if docs.is_dir() => return docs.to_path_buf(),
            _ => return dirs.home_dir().to_path_buf(),
        }
    }
    tracing::warn!("Could not determine user directories; using current directory");
    PathBuf::from(".")
}

/// Replace every character that is illegal in a filename with `_`.
///
/// Uses the Windows-illegal set (a superset of the Unix one) plus ASCII
/// control characters, so hints stay portable across platforms.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect()
}

/// Timestamp-based fallback file name, e.g. `01-06-2025_10.05.42`.
pub fn timestamp_name(now: DateTime<Local>) -> String {
    now.format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// Resolve the base file name (without extension) from a hint: a
/// non-blank hint is sanitised, a blank one becomes a timestamp name.
pub fn resolve_base_name(hint: &str, now: DateTime<Local>) -> String {
    if hint.trim().is_empty() {
        timestamp_name(now)
    } else {
        sanitize_file_name(hint)
    }
}

/// Find a path under `folder` for `base` that does not exist yet:
/// `base.txt`, then `base1.txt`, `base2.txt`, ...
///
/// Never picks an occupied path; gives up (rather than probing forever)
/// after `MAX_COLLISION_SUFFIXES` attempts.
pub fn collision_free_path(folder: &Path, base: &str) -> Result<PathBuf, FlushError> {
    let mut path = folder.join(format!("{base}.{LOG_FILE_EXTENSION}"));
    let mut count: u32 = 0;
    while path.exists() {
        count += 1;
        if count > MAX_COLLISION_SUFFIXES {
            return Err(FlushError::CollisionLimit {
                dir: folder.to_path_buf(),
                base: base.to_string(),
                max: MAX_COLLISION_SUFFIXES,
            });
        }
        path = folder.join(format!("{base}{count}.{LOG_FILE_EXTENSION}"));
    }
    Ok(path)
}

/// Write the flushed view to `path`: a header line equal to `header`, a
/// blank line, then one formatted line per line, platform line endings
/// throughout.
///
/// The file is created fresh (`create_new`), which enforces the
/// never-overwrite invariant at the filesystem level even if the path
/// was taken between the collision probe and this call.
pub fn write_log_file(path: &Path, header: &str, lines: &[String]) -> Result<(), FlushError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FlushError::Io {
            path: path.to_path_buf(),
            operation: "create",
            source: e,
        })?;

    let mut writer = BufWriter::new(file);
    let io_err = |e| FlushError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    };

    writer.write_all(header.as_bytes()).map_err(io_err)?;
    writer.write_all(LINE_ENDING.as_bytes()).map_err(io_err)?;
    writer.write_all(LINE_ENDING.as_bytes()).map_err(io_err)?;
    for line in lines {
        writer.write_all(line.as_bytes()).map_err(io_err)?;
        writer.write_all(LINE_ENDING.as_bytes()).map_err(io_err)?;
    }

    writer.flush().map_err(|e| FlushError::Io {
        path: path.to_path_buf(),
        operation: "flush",
        source: e,
    })?;

    Ok(())
}
