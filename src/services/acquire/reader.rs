//! Parsing of theme documents, standalone or inside an extracted package.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::types::{AcquireError, AcquireResult, ThemeDocument};

/// Parse the file at `path` as a theme document. Anything that is not a
/// JSON object is [`AcquireError::ThemeParse`]; unknown and missing fields
/// are accepted.
pub fn read_standalone_theme(path: &Path) -> AcquireResult<ThemeDocument> {
    parse_theme_json(path)
}

/// Parse the theme at `root/extension/<relative>`. The relative path comes
/// from the manifest and is rejected if it would escape the extracted root.
pub fn read_packaged_theme(root: &Path, relative: &str) -> AcquireResult<ThemeDocument> {
    let base = root.join("extension");
    let full = resolve_within(&base, relative).ok_or_else(|| {
        AcquireError::ThemeParse(format!("theme path escapes the package: {relative}"))
    })?;
    parse_theme_json(&full)
}

fn parse_theme_json(path: &Path) -> AcquireResult<ThemeDocument> {
    let file = fs::File::open(path)
        .map_err(|e| AcquireError::ThemeParse(format!("{}: {e}", path.display())))?;
    serde_json::from_reader(io::BufReader::new(file))
        .map_err(|e| AcquireError::ThemeParse(format!("{}: {e}", path.display())))
}

/// Join `relative` onto `base`, refusing absolute paths and any `..`
/// traversal that would climb above `base`.
fn resolve_within(base: &Path, relative: &str) -> Option<PathBuf> {
    let target = Path::new(relative);
    if target.is_absolute() {
        return None;
    }

    let mut depth: i32 = 0;
    for component in target.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(base.join(target))
}
