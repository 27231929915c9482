// Append-only store of weekly snapshots, one JSON file per week. A file, once written, is never
// touched again.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::audit::{audit_snapshot, AuditError};
use crate::ranking::Snapshot;
use crate::teams::TeamRegistry;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("snapshot failed audit: {0}")]
    Audit(#[from] AuditError),

    #[error("snapshot {path} already exists with different rankings")]
    AlreadyWritten { path: PathBuf },

    #[error("snapshot {path} does not read back as written")]
    Verify { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, PartialEq)]
pub enum WriteOutcome {
    Written(PathBuf),
    // An identical snapshot for the week was already on disk.
    Unchanged(PathBuf),
}

pub fn snapshot_path(dir: &Path, week: u32) -> PathBuf {
    dir.join(format!("week_{week}.json"))
}

pub fn write_snapshot(dir: &Path, snapshot: &Snapshot, registry: &TeamRegistry) -> Result<WriteOutcome, ArchiveError> {
    audit_snapshot(snapshot, registry)?;

    let path = snapshot_path(dir, snapshot.week);

    if let Some(existing) = load_snapshot(dir, snapshot.week)? {
        return compare_existing(path, &existing, snapshot);
    }

    let json = snapshot.to_json().map_err(|source| ArchiveError::Json {
        path: path.clone(),
        source,
    })?;

    fs::create_dir_all(dir).map_err(|source| io_err(dir, source))?;

    // Each writer gets its own temp file beside the target. Publishing never replaces an
    // existing file, so a concurrent run for the same week cannot clobber this one or be
    // clobbered by it, and readers never see half a file.
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| io_err(dir, source))?;
    let write_tmp = |tmp: &mut NamedTempFile| -> std::io::Result<()> {
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()
    };
    write_tmp(&mut tmp).map_err(|source| io_err(tmp.path(), source))?;

    match tmp.persist_noclobber(&path) {
        Ok(_) => {}
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            // Another run published this week first. The temp file is removed on drop.
            let existing = load_snapshot(dir, snapshot.week)?.ok_or_else(|| ArchiveError::Verify { path: path.clone() })?;
            return compare_existing(path, &existing, snapshot);
        }
        Err(e) => return Err(io_err(&path, e.error)),
    }

    verify_written(&path, snapshot)?;

    let size = fs::metadata(&path).map(|m| m.len()).unwrap_or_default();
    info!("Wrote {} bytes to {}", size, path.display());

    Ok(WriteOutcome::Written(path))
}

// generated_at differs on every run, so everything else is compared.
fn same_rankings(a: &Snapshot, b: &Snapshot) -> bool {
    a.week == b.week && a.season == b.season && a.rankings == b.rankings
}

fn compare_existing(path: PathBuf, existing: &Snapshot, snapshot: &Snapshot) -> Result<WriteOutcome, ArchiveError> {
    if same_rankings(existing, snapshot) {
        info!("Week {} snapshot unchanged, leaving {}", snapshot.week, path.display());
        return Ok(WriteOutcome::Unchanged(path));
    }

    warn!("Refusing to overwrite {}", path.display());
    Err(ArchiveError::AlreadyWritten { path })
}

// Re-reads a freshly published snapshot and checks it parses back to what was written.
fn verify_written(path: &Path, snapshot: &Snapshot) -> Result<(), ArchiveError> {
    let data = fs::read_to_string(path).map_err(|source| io_err(path, source))?;
    let written: Snapshot = serde_json::from_str(&data).map_err(|source| ArchiveError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if !same_rankings(&written, snapshot) || written.generated_at != snapshot.generated_at {
        return Err(ArchiveError::Verify { path: path.to_path_buf() });
    }
    Ok(())
}

// Ok(None) when nothing has been written for that week yet.
pub fn load_snapshot(dir: &Path, week: u32) -> Result<Option<Snapshot>, ArchiveError> {
    let path = snapshot_path(dir, week);

    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(io_err(&path, source)),
    };

    serde_json::from_str(&data)
        .map(Some)
        .map_err(|source| ArchiveError::Json { path, source })
}

fn io_err(path: &Path, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}
