use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{classify_input, Acquirer, InputKind};
use crate::services::events::NoopProgressSink;
use crate::types::{AcquireError, PackageType};
use crate::SCRATCH_DIR_PREFIX;

const OCEAN_THEME: &str = r##"{
    "name": "Ocean",
    "type": "dark",
    "colors": {
        "editor.background": "#0f111a",
        "editor.foreground": "#8f93a2"
    }
}"##;

fn write_zip(path: &Path, files: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn scratch_dirs(root: &Path) -> Vec<PathBuf> {
    fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(SCRATCH_DIR_PREFIX))
        })
        .collect()
}

#[test]
fn classify_input_uses_the_lowercase_extension() {
    assert_eq!(classify_input(Path::new("theme.json")), InputKind::Theme);
    assert_eq!(classify_input(Path::new("THEME.JSON")), InputKind::Theme);
    assert_eq!(classify_input(Path::new("pack.vsix")), InputKind::Package);
    assert_eq!(classify_input(Path::new("pack.VSIX")), InputKind::Package);
    assert_eq!(
        classify_input(Path::new("archive.zip")),
        InputKind::Unsupported(".zip".to_string())
    );
    assert_eq!(
        classify_input(Path::new("README")),
        InputKind::Unsupported("(no extension)".to_string())
    );
}

#[test]
fn standalone_theme_produces_normalized_result() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ocean.json");
    fs::write(&input, OCEAN_THEME).unwrap();

    let result = Acquirer::with_scratch_root(dir.path())
        .acquire(&input, &NoopProgressSink)
        .unwrap();

    assert_eq!(result.theme.name.as_deref(), Some("Ocean"));
    assert_eq!(result.package_info.display_name, "Ocean");
    assert_eq!(result.package_info.version, "1.0.0");
    assert_eq!(result.package_info.kind, PackageType::Standalone);
    assert!(result.has_colors);
    assert!(!result.has_token_colors);
    assert_eq!(result.package_contents, vec!["ocean.json"]);
}

#[test]
fn standalone_theme_without_name_falls_back_to_file_stem() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("midnight.json");
    fs::write(&input, "{}").unwrap();

    let result = Acquirer::with_scratch_root(dir.path())
        .acquire(&input, &NoopProgressSink)
        .unwrap();

    assert_eq!(result.package_info.name, "midnight");
    assert_eq!(result.package_info.display_name, "Unknown Theme");
    assert_eq!(result.package_info.identifier, "standalone.theme");
}

#[test]
fn standalone_invalid_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{not valid").unwrap();

    let result = Acquirer::with_scratch_root(dir.path()).acquire(&input, &NoopProgressSink);
    assert!(matches!(result, Err(AcquireError::ThemeParse(_))));
}

#[test]
fn missing_input_is_reported_before_classification() {
    let dir = TempDir::new().unwrap();
    // The extension would be unsupported too; existence is checked first.
    let input = dir.path().join("ghost.zip");

    let result = Acquirer::with_scratch_root(dir.path()).acquire(&input, &NoopProgressSink);
    match result {
        Err(AcquireError::InputNotFound(path)) => assert_eq!(path, input),
        other => panic!("expected input-not-found, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_is_rejected_with_the_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("theme.yaml");
    fs::write(&input, "name: nope").unwrap();

    let result = Acquirer::with_scratch_root(dir.path()).acquire(&input, &NoopProgressSink);
    match result {
        Err(AcquireError::UnsupportedInput(ext)) => assert_eq!(ext, ".yaml"),
        other => panic!("expected unsupported-input, got {other:?}"),
    }
}

#[test]
fn vsix_package_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dark-mode.vsix");
    write_zip(
        &input,
        &[
            ("[Content_Types].xml", "<xml/>"),
            (
                "extension/package.json",
                r#"{
                    "name": "dark-mode",
                    "displayName": "Dark Mode",
                    "publisher": "acme",
                    "version": "0.3.1",
                    "engines": {"vscode": "^1.70.0"},
                    "contributes": {"themes": [
                        {"label": "Dark Mode", "uiTheme": "vs-dark", "path": "./themes/dark.json"}
                    ]}
                }"#,
            ),
            ("extension/themes/dark.json", OCEAN_THEME),
        ],
    );

    let result = Acquirer::with_scratch_root(dir.path())
        .acquire(&input, &NoopProgressSink)
        .unwrap();

    assert_eq!(result.package_info.kind, PackageType::Extension);
    assert_eq!(result.package_info.identifier, "acme.dark-mode");
    assert_eq!(result.package_info.version, "0.3.1");
    assert_eq!(result.theme.name.as_deref(), Some("Ocean"));
    assert!(result.has_colors);
    assert_eq!(
        result.package_contents,
        vec![
            "[Content_Types].xml",
            "extension/package.json",
            "extension/themes/dark.json"
        ]
    );

    // The scratch directory must be gone by the time acquire returns.
    assert!(scratch_dirs(dir.path()).is_empty());
}

#[test]
fn vsix_without_theme_contribution_fails_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("no-theme.vsix");
    write_zip(
        &input,
        &[(
            "extension/package.json",
            r#"{"name": "no-theme", "publisher": "acme", "contributes": {}}"#,
        )],
    );

    let result = Acquirer::with_scratch_root(dir.path()).acquire(&input, &NoopProgressSink);
    assert!(matches!(result, Err(AcquireError::NoThemeFound)));
    assert!(scratch_dirs(dir.path()).is_empty());
}

#[test]
fn vsix_with_escaping_theme_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("evil.vsix");
    write_zip(
        &input,
        &[(
            "extension/package.json",
            r#"{
                "name": "evil",
                "contributes": {"themes": [
                    {"label": "Evil", "uiTheme": "vs-dark", "path": "../../../../etc/passwd"}
                ]}
            }"#,
        )],
    );

    let result = Acquirer::with_scratch_root(dir.path()).acquire(&input, &NoopProgressSink);
    assert!(matches!(result, Err(AcquireError::ThemeParse(_))));
    assert!(scratch_dirs(dir.path()).is_empty());
}

#[test]
fn acquire_is_repeatable_within_one_process() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pack.vsix");
    write_zip(
        &input,
        &[
            (
                "extension/package.json",
                r#"{
                    "name": "pack",
                    "contributes": {"themes": [
                        {"label": "P", "uiTheme": "vs-dark", "path": "./theme.json"}
                    ]}
                }"#,
            ),
            ("extension/theme.json", OCEAN_THEME),
        ],
    );

    let acquirer = Acquirer::with_scratch_root(dir.path());
    let first = acquirer.acquire(&input, &NoopProgressSink).unwrap();
    let second = acquirer.acquire(&input, &NoopProgressSink).unwrap();

    assert_eq!(first.theme, second.theme);
    assert_eq!(first.package_info, second.package_info);
    assert_eq!(first.package_contents, second.package_contents);
    assert!(scratch_dirs(dir.path()).is_empty());
}
