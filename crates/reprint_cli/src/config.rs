//! The `reprint.json` project file.
//!
//! ```json
//! {
//!   "files": ["src/index.ts"],
//!   "include": ["src", "test"],
//!   "extensions": [".ts", ".tsx"],
//!   "check": true,
//!   "outDir": "out"
//! }
//! ```
//!
//! Paths are relative to the directory holding the project file.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions picked up when walking `include` directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts", ".js", ".mjs", ".cjs"];

/// Directory names never descended into.
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", "target"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    pub files: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub check: Option<bool>,
    pub out_dir: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read project file '{path}'")]
    #[diagnostic(code(reprint::config::read))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid project file '{path}'")]
    #[diagnostic(
        code(reprint::config::parse),
        help("expected an object with any of: files, include, extensions, check, outDir")
    )]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to walk '{path}'")]
    #[diagnostic(code(reprint::config::walk))]
    Walk {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A project file together with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { root, config })
    }

    pub fn extensions(&self) -> Vec<String> {
        match &self.config.extensions {
            Some(extensions) => extensions.clone(),
            None => DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    pub fn out_dir(&self) -> Option<PathBuf> {
        self.config.out_dir.as_ref().map(|dir| self.root.join(dir))
    }

    /// Listed files first, then everything found under `include`.
    pub fn input_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut result: Vec<PathBuf> = self
            .config
            .files
            .iter()
            .flatten()
            .map(|file| self.root.join(file))
            .collect();

        let extensions = self.extensions();
        for include in self.config.include.iter().flatten() {
            let path = self.root.join(include);
            if path.is_file() {
                result.push(path);
                continue;
            }
            discover_files(&path, &extensions, &mut result).map_err(|source| ConfigError::Walk {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(result)
    }
}

pub fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    let name = path.to_string_lossy();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Collect source files under `dir` in sorted order, skipping hidden and
/// dependency directories. Symlinked directories are not followed.
pub fn discover_files(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&&*name) {
                continue;
            }
            discover_files(&path, extensions, out)?;
        } else if file_type.is_symlink() && path.is_dir() {
            continue;
        } else if has_source_extension(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_fields() {
        let config: ProjectConfig = serde_json::from_str(
            r#"{ "files": ["a.ts"], "include": ["src"], "check": true, "outDir": "out" }"#,
        )
        .unwrap();
        assert_eq!(config.files, Some(vec!["a.ts".to_string()]));
        assert_eq!(config.include, Some(vec!["src".to_string()]));
        assert_eq!(config.check, Some(true));
        assert_eq!(config.out_dir.as_deref(), Some("out"));
        assert_eq!(config.extensions, None);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<ProjectConfig, _> = serde_json::from_str(r#"{ "out_dir": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: ProjectConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_default_extensions() {
        let project = Project {
            root: PathBuf::from("."),
            config: ProjectConfig::default(),
        };
        let extensions = project.extensions();
        assert!(has_source_extension(Path::new("src/a.ts"), &extensions));
        assert!(has_source_extension(Path::new("src/b.d.ts"), &extensions));
        assert!(has_source_extension(Path::new("lib/c.mjs"), &extensions));
        assert!(!has_source_extension(Path::new("README.md"), &extensions));
    }

    #[test]
    fn test_paths_are_relative_to_project_root() {
        let project = Project {
            root: PathBuf::from("proj"),
            config: ProjectConfig {
                files: Some(vec!["main.ts".to_string()]),
                out_dir: Some("dist".to_string()),
                ..ProjectConfig::default()
            },
        };
        assert_eq!(project.input_files().unwrap(), vec![PathBuf::from("proj/main.ts")]);
        assert_eq!(project.out_dir(), Some(PathBuf::from("proj/dist")));
    }

    #[test]
    fn test_discover_files_walks_sorted_and_skips_dependencies() {
        let root = std::env::temp_dir().join(format!("reprint_config_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("src/nested")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        std::fs::write(root.join("src/b.ts"), "").unwrap();
        std::fs::write(root.join("src/a.ts"), "").unwrap();
        std::fs::write(root.join("src/notes.md"), "").unwrap();
        std::fs::write(root.join("src/nested/c.tsx"), "").unwrap();
        std::fs::write(root.join("node_modules/dep/index.ts"), "").unwrap();

        let mut found = Vec::new();
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        discover_files(&root, &extensions, &mut found).unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|path| path.strip_prefix(&root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("src/a.ts"),
                PathBuf::from("src/b.ts"),
                PathBuf::from("src/nested/c.tsx"),
            ]
        );
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_files_does_not_follow_directory_links() {
        let root = std::env::temp_dir().join(format!("reprint_link_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/a.ts"), "").unwrap();
        // A cycle back to the root.
        std::os::unix::fs::symlink(&root, root.join("src/loop")).unwrap();

        let mut found = Vec::new();
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        discover_files(&root, &extensions, &mut found).unwrap();
        assert_eq!(found, vec![root.join("src/a.ts")]);
        std::fs::remove_dir_all(&root).unwrap();
    }
}
