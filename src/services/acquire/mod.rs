//! Theme acquisition pipeline: classify the input path, extract or locate
//! the theme document, normalize its metadata, and assemble one
//! [`AcquisitionResult`](crate::types::AcquisitionResult) ready for
//! rendering.

mod extract;
mod inspect;
mod reader;

pub use extract::{extract_package, ExtractDir};
pub use inspect::{list_contents, locate_theme_path, read_manifest};
pub use reader::{read_packaged_theme, read_standalone_theme};

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::events::ProgressSink;
use crate::types::{AcquireError, AcquireResult, AcquisitionResult, PackageInfo};

const DEFAULT_UNZIP_TIMEOUT: Duration = Duration::from_secs(30);

/// Input classification, decided once on the lowercase file extension and
/// then matched exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A standalone `.json` theme document.
    Theme,
    /// A packaged `.vsix` extension archive.
    Package,
    /// Anything else; carries the rejected extension for the error message.
    Unsupported(String),
}

pub fn classify_input(path: &Path) -> InputKind {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "json" => InputKind::Theme,
        "vsix" => InputKind::Package,
        "" => InputKind::Unsupported("(no extension)".to_string()),
        other => InputKind::Unsupported(format!(".{other}")),
    }
}

/// Orchestrates one acquisition. Holds the scratch-directory root and the
/// fallback-unzip timeout; each call to [`acquire`](Acquirer::acquire) is
/// independent and safe to repeat within the same process.
pub struct Acquirer {
    scratch_root: PathBuf,
    unzip_timeout: Duration,
}

impl Acquirer {
    /// Acquirer with scratch directories under the process working
    /// directory.
    pub fn new() -> Self {
        Acquirer {
            scratch_root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            unzip_timeout: DEFAULT_UNZIP_TIMEOUT,
        }
    }

    /// Acquirer with scratch directories under an explicit root.
    pub fn with_scratch_root(root: impl Into<PathBuf>) -> Self {
        Acquirer {
            scratch_root: root.into(),
            unzip_timeout: DEFAULT_UNZIP_TIMEOUT,
        }
    }

    /// Process `input` into a normalized result. All component failures
    /// propagate unchanged; acquisition is all-or-nothing, and any scratch
    /// directory is removed before this returns.
    pub fn acquire(
        &self,
        input: &Path,
        sink: &dyn ProgressSink,
    ) -> AcquireResult<AcquisitionResult> {
        if !input.exists() {
            return Err(AcquireError::InputNotFound(input.to_path_buf()));
        }

        match classify_input(input) {
            InputKind::Theme => self.acquire_standalone(input, sink),
            InputKind::Package => self.acquire_package(input, sink),
            InputKind::Unsupported(ext) => Err(AcquireError::UnsupportedInput(ext)),
        }
    }

    fn acquire_standalone(
        &self,
        input: &Path,
        sink: &dyn ProgressSink,
    ) -> AcquireResult<AcquisitionResult> {
        sink.step("Reading theme file...");
        let theme = reader::read_standalone_theme(input)?;

        let file_stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let package_info = PackageInfo::standalone(&theme, &file_stem);

        let base_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        log::info!("Processed standalone theme {}", input.display());
        Ok(AcquisitionResult::assemble(
            theme,
            package_info,
            vec![base_name],
        ))
    }

    fn acquire_package(
        &self,
        input: &Path,
        sink: &dyn ProgressSink,
    ) -> AcquireResult<AcquisitionResult> {
        // The guard lives until the end of this function, so the scratch
        // directory is removed on every exit path, errors included.
        let extracted =
            extract::extract_package(input, &self.scratch_root, self.unzip_timeout, sink)?;

        let package_contents = inspect::list_contents(extracted.path())?;
        log::debug!("Found {} files in the package", package_contents.len());

        sink.step("Reading extension manifest...");
        let package_info = inspect::read_manifest(extracted.path())?;

        let theme_path = inspect::locate_theme_path(&package_info)
            .ok_or(AcquireError::NoThemeFound)?
            .to_string();
        log::debug!("Theme file declared at {theme_path}");

        sink.step("Reading theme file...");
        let theme = reader::read_packaged_theme(extracted.path(), &theme_path)?;

        Ok(AcquisitionResult::assemble(
            theme,
            package_info,
            package_contents,
        ))
    }
}

impl Default for Acquirer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod extract_tests;

#[cfg(test)]
#[path = "tests/inspect_tests.rs"]
mod inspect_tests;

#[cfg(test)]
#[path = "tests/acquire_tests.rs"]
mod acquire_tests;
