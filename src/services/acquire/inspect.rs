//! Inspection of an extracted package: content listing, manifest parsing,
//! and locating the declared theme document.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::types::{AcquireError, AcquireResult, Manifest, PackageInfo};

/// List every regular file under `root` as a relative slash path, sorted
/// lexicographically. Directories are skipped and symbolic links are not
/// followed.
pub fn list_contents(root: &Path) -> AcquireResult<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }
    files.sort();
    Ok(files)
}

/// Parse the extension manifest at `root/extension/package.json` and
/// normalize it. An absent or unparsable manifest is
/// [`AcquireError::ManifestNotFound`].
pub fn read_manifest(root: &Path) -> AcquireResult<PackageInfo> {
    let manifest_path = root.join("extension").join("package.json");
    let file = fs::File::open(&manifest_path).map_err(|e| {
        AcquireError::ManifestNotFound(format!("{}: {e}", manifest_path.display()))
    })?;
    let manifest: Manifest = serde_json::from_reader(io::BufReader::new(file)).map_err(|e| {
        AcquireError::ManifestNotFound(format!("{}: {e}", manifest_path.display()))
    })?;
    Ok(PackageInfo::from_manifest(manifest))
}

/// Relative path of the theme document the manifest declares, if any.
/// When several themes are contributed the first one wins, by declaration
/// order; no attempt is made to disambiguate.
pub fn locate_theme_path(info: &PackageInfo) -> Option<&str> {
    info.contributes
        .as_ref()
        .and_then(|c| c.themes.as_ref())
        .and_then(|themes| themes.first())
        .map(|theme| theme.path.as_str())
}
