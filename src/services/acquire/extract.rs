//! Archive extraction for `.vsix` packages.
//!
//! Primary strategy is an in-process zip walk; if that finishes without
//! error but leaves the destination empty, the system `unzip` binary is
//! tried as a fallback before giving up. The scratch directory is owned by
//! an [`ExtractDir`] guard and removed when the guard drops, on success and
//! failure alike.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::services::events::ProgressSink;
use crate::types::{AcquireError, AcquireResult};
use crate::SCRATCH_DIR_PREFIX;

/// Owned scratch directory holding extracted package contents.
///
/// Dropping the guard removes the directory tree. A removal failure is
/// logged and never escalated, so it cannot mask the error that unwound
/// the acquisition.
#[derive(Debug)]
pub struct ExtractDir {
    path: PathBuf,
}

impl ExtractDir {
    /// Create a fresh, collision-resistant scratch directory under `root`.
    /// The name carries a reserved prefix and a nanosecond timestamp so
    /// repeated extractions in one process lifetime never collide. The held
    /// path is canonicalized, so the fallback command and the Drop cleanup
    /// stay correct even if the working directory changes mid-acquisition.
    fn create_in(root: &Path) -> AcquireResult<Self> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = root.join(format!("{SCRATCH_DIR_PREFIX}{nanos}"));
        fs::create_dir_all(&path)?;
        let path = path.canonicalize()?;
        Ok(ExtractDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ExtractDir {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => log::debug!("Cleaned up scratch directory {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "Failed to clean up scratch directory {}: {e}",
                self.path.display()
            ),
        }
    }
}

/// Extract `archive` into a fresh scratch directory under `scratch_root`.
///
/// Fails with [`AcquireError::Extraction`] if the archive is missing,
/// unreadable, zero bytes, or if no files could be extracted by either
/// strategy. The returned guard owns the directory; the caller keeps it
/// alive for as long as the contents are needed.
pub fn extract_package(
    archive: &Path,
    scratch_root: &Path,
    unzip_timeout: Duration,
    sink: &dyn ProgressSink,
) -> AcquireResult<ExtractDir> {
    let metadata = fs::metadata(archive).map_err(|e| {
        AcquireError::Extraction(format!("cannot read package {}: {e}", archive.display()))
    })?;
    if metadata.len() == 0 {
        return Err(AcquireError::Extraction(format!(
            "package is empty (0 bytes): {}",
            archive.display()
        )));
    }

    let archive = archive.canonicalize().map_err(|e| {
        AcquireError::Extraction(format!("cannot resolve package path: {e}"))
    })?;

    sink.step("Extracting package...");
    let dest = ExtractDir::create_in(scratch_root)?;
    log::debug!(
        "Extracting {} to {}",
        archive.display(),
        dest.path().display()
    );

    unpack_zip(&archive, dest.path())?;

    if dir_is_empty(dest.path())? {
        log::warn!("Primary extraction produced no files, trying system unzip");
        sink.detail("Primary extraction produced no files; trying system unzip");
        let fallback = run_system_unzip(&archive, dest.path(), unzip_timeout);
        if let Err(reason) = &fallback {
            log::warn!("System unzip fallback failed: {reason}");
        }
        if dir_is_empty(dest.path())? {
            let detail = match fallback {
                Ok(()) => "system unzip extracted no files".to_string(),
                Err(reason) => reason,
            };
            return Err(AcquireError::Extraction(format!(
                "all extraction methods failed: {detail}"
            )));
        }
        sink.detail("System unzip fallback succeeded");
    }

    Ok(dest)
}

fn unpack_zip(archive_path: &Path, dest: &Path) -> AcquireResult<()> {
    let file = fs::File::open(archive_path)
        .map_err(|e| AcquireError::Extraction(format!("failed to open package: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AcquireError::Extraction(format!("invalid or corrupt archive: {e}")))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| AcquireError::Extraction(format!("failed to read entry {i}: {e}")))?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p,
            None => {
                log::warn!("Skipping entry with unsafe path: {}", entry.name());
                continue;
            }
        };
        let output_path = dest.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)
                .map_err(|e| AcquireError::Extraction(format!("failed to create dir: {e}")))?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    AcquireError::Extraction(format!("failed to create parent dir: {e}"))
                })?;
            }
            let mut outfile = fs::File::create(&output_path)
                .map_err(|e| AcquireError::Extraction(format!("failed to create file: {e}")))?;
            io::copy(&mut entry, &mut outfile)
                .map_err(|e| AcquireError::Extraction(format!("failed to write file: {e}")))?;
        }
    }
    Ok(())
}

/// Run `unzip -q <archive> -d <dest>`, bounded by `timeout`. The child is
/// killed if the deadline passes; a hung unzip must not hang the pipeline.
fn run_system_unzip(archive: &Path, dest: &Path, timeout: Duration) -> Result<(), String> {
    let unzip = which::which("unzip").map_err(|e| format!("system unzip not available: {e}"))?;

    let mut child = Command::new(unzip)
        .arg("-q")
        .arg(archive)
        .arg("-d")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to spawn unzip: {e}"))?;

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(()),
            Ok(Some(status)) => return Err(format!("unzip exited with {status}")),
            Ok(None) => {
                if started.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("unzip timed out after {}s", timeout.as_secs()));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(format!("failed to wait for unzip: {e}")),
        }
    }
}

fn dir_is_empty(dir: &Path) -> AcquireResult<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}
