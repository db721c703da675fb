//! Extension manifest model and the normalized acquisition result.
//!
//! `Manifest` mirrors the raw `extension/package.json` with every field
//! optional; `PackageInfo` is the normalized form handed to the report,
//! with the derived identifier and package type filled in.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::theme::ThemeDocument;

/// Raw extension manifest as declared in `extension/package.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub engines: Engines,
    pub categories: Option<Vec<String>>,
    pub contributes: Option<Contributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engines {
    #[serde(default)]
    pub vscode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<ThemeContribution>>,
}

/// One theme declared by the manifest's `contributes.themes` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeContribution {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub ui_theme: String,
    pub path: String,
}

/// How the input was supplied. Serializes as the human-readable label the
/// report displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    #[serde(rename = "Standalone Theme File")]
    Standalone,
    #[serde(rename = "VS Code Extension")]
    Extension,
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageType::Standalone => f.write_str("Standalone Theme File"),
            PackageType::Extension => f.write_str("VS Code Extension"),
        }
    }
}

/// Normalized package metadata. Manifest-declared fields pass through
/// verbatim (absent strings become empty); only the standalone path applies
/// the documented fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub publisher: String,
    pub engines: Engines,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributes: Option<Contributes>,
    pub identifier: String,
    #[serde(rename = "type")]
    pub kind: PackageType,
}

impl PackageInfo {
    /// Normalize a parsed extension manifest.
    pub fn from_manifest(manifest: Manifest) -> Self {
        let name = manifest.name.unwrap_or_default();
        let publisher = manifest.publisher.unwrap_or_default();
        PackageInfo {
            identifier: derive_identifier(&publisher, &name),
            display_name: manifest.display_name.unwrap_or_default(),
            description: manifest.description.unwrap_or_default(),
            version: manifest.version.unwrap_or_default(),
            engines: manifest.engines,
            categories: manifest.categories,
            contributes: manifest.contributes,
            kind: PackageType::Extension,
            name,
            publisher,
        }
    }

    /// Synthesize package metadata for a standalone theme file, which has no
    /// enclosing manifest. `file_stem` is the input file name sans extension.
    pub fn standalone(theme: &ThemeDocument, file_stem: &str) -> Self {
        let name = theme.name.clone().unwrap_or_else(|| file_stem.to_string());
        let display_name = theme
            .display_name
            .clone()
            .or_else(|| theme.name.clone())
            .unwrap_or_else(|| "Unknown Theme".to_string());
        PackageInfo {
            name,
            display_name,
            description: theme
                .description
                .clone()
                .unwrap_or_else(|| "No description provided".to_string()),
            version: theme.version.clone().unwrap_or_else(|| "1.0.0".to_string()),
            publisher: theme
                .publisher
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            engines: Engines {
                vscode: "*".to_string(),
            },
            categories: None,
            contributes: None,
            identifier: "standalone.theme".to_string(),
            kind: PackageType::Standalone,
        }
    }

}

/// `publisher.name` when a publisher is known, else just `name`.
fn derive_identifier(publisher: &str, name: &str) -> String {
    if publisher.is_empty() {
        name.to_string()
    } else {
        format!("{publisher}.{name}")
    }
}

/// The fully assembled outcome of one acquisition, immutable once produced.
/// Serializes camelCase for the report template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionResult {
    pub theme: ThemeDocument,
    pub package_info: PackageInfo,
    pub has_colors: bool,
    pub has_token_colors: bool,
    /// Relative file paths of the package, sorted lexicographically. For a
    /// standalone theme this is the single input base name.
    pub package_contents: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl AcquisitionResult {
    /// Compute the presence flags and stamp the generation time.
    pub fn assemble(
        theme: ThemeDocument,
        package_info: PackageInfo,
        package_contents: Vec<String>,
    ) -> Self {
        let has_colors = theme.has_colors();
        let has_token_colors = theme.has_token_colors();
        AcquisitionResult {
            theme,
            package_info,
            has_colors,
            has_token_colors,
            package_contents,
            generated_at: Local::now(),
        }
    }
}
