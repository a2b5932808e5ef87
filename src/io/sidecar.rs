use std::fs;
use std::path::{Path, PathBuf};

use crate::io::event_log::{self, Category, Level, atomic_write};
use crate::model::{AnnotationRecord, Annotations, SIDECAR_FILE, SidecarFile};
use crate::ops::annotate::{self, normalize_name};

/// Error type for sidecar I/O
#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{0}' does not name a directory entry")]
    InvalidName(String),
    #[error("could not serialize annotations: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Path of the sidecar file inside `dir`
pub fn sidecar_path(dir: &Path) -> PathBuf {
    dir.join(SIDECAR_FILE)
}

/// Load the annotations for `dir`.
///
/// A missing sidecar is created as `{}`. Content that does not parse is
/// treated as empty so a damaged file never blocks the tool.
pub fn load(dir: &Path) -> Result<Annotations, SidecarError> {
    let path = sidecar_path(dir);
    if !path.exists() {
        fs::write(&path, "{}").map_err(|e| SidecarError::Write {
            path: path.clone(),
            source: e,
        })?;
        event_log::log_event(
            Level::Info,
            Category::Sidecar,
            format!("created {}", path.display()),
        );
        return Ok(Annotations::new());
    }

    let content = fs::read_to_string(&path).map_err(|e| SidecarError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(parse_sidecar(&content).unwrap_or_else(|e| {
        event_log::warn(
            Category::Sidecar,
            format!("{} is not valid, treating as empty: {}", path.display(), e),
        );
        Annotations::new()
    }))
}

/// Parse sidecar JSON into annotations keyed by normalized name.
/// Later duplicates replace earlier ones.
pub fn parse_sidecar(content: &str) -> Result<Annotations, serde_json::Error> {
    let file: SidecarFile = serde_json::from_str(content)?;
    let mut annotations = Annotations::new();
    for mut record in file.file_info {
        if let Some(stripped) = record.name.strip_prefix("./") {
            record.name = stripped.to_string();
        }
        annotations.insert(record.name.clone(), record);
    }
    Ok(annotations)
}

/// Serialize annotations as indented sidecar JSON.
pub fn serialize_sidecar(annotations: &Annotations) -> Result<String, serde_json::Error> {
    let file = SidecarFile {
        file_info: annotations.values().cloned().collect(),
    };
    let mut out = serde_json::to_string_pretty(&file)?;
    out.push('\n');
    Ok(out)
}

/// Rewrite the full sidecar for `dir`.
pub fn save(dir: &Path, annotations: &Annotations) -> Result<(), SidecarError> {
    let path = sidecar_path(dir);
    let content = serialize_sidecar(annotations)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| SidecarError::Write { path, source: e })
}

/// Apply command `tokens` to `target` in the sidecar of `dir`.
///
/// Creates the record if needed, rewrites the sidecar, and returns the
/// updated record.
pub fn apply_command<S: AsRef<str>>(
    dir: &Path,
    target: &str,
    tokens: &[S],
) -> Result<AnnotationRecord, SidecarError> {
    let name = normalize_name(target);
    if !annotate::is_entry_name(&name) {
        return Err(SidecarError::InvalidName(target.to_string()));
    }
    let mut annotations = load(dir)?;
    let command = annotate::parse_command(tokens);

    let record = annotations
        .entry(name.clone())
        .or_insert_with(|| AnnotationRecord::new(name));
    annotate::apply(record, &command);
    let updated = record.clone();

    save(dir, &annotations)?;
    Ok(updated)
}
