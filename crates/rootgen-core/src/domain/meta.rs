//! The `Meta` value describing the application a root file is generated for.
//!
//! A `Meta` is created once per generation run by whoever drives the core
//! (the CLI resolves it from flags, the project manifest, and configuration)
//! and is read-only from then on.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::{error::DomainError, value_objects::DirRole};

/// File name of the generated root command file inside the command directory.
pub const ROOT_FILENAME: &str = "root.go";

/// Package clause used when the command directory name is not a usable Go
/// identifier.
pub const DEFAULT_PACKAGE: &str = "cmd";

/// Immutable description of the target application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    app_name: String,
    module: Option<String>,
    root: PathBuf,
    dirs: BTreeMap<DirRole, String>,
}

impl Meta {
    /// Start building a `Meta` for the named application.
    pub fn builder(app_name: impl Into<String>) -> MetaBuilder {
        MetaBuilder::new(app_name)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Go module path of the target project, if known.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Project root on disk. Directory paths are relative to it.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn dirs(&self) -> &BTreeMap<DirRole, String> {
        &self.dirs
    }

    /// Path configured for a directory role.
    pub fn dir(&self, role: DirRole) -> Result<&str, DomainError> {
        self.dirs
            .get(&role)
            .map(String::as_str)
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| DomainError::MissingDirectory {
                role: role.to_string(),
            })
    }

    /// Physical location of the command directory.
    pub fn cmd_dir_path(&self) -> Result<PathBuf, DomainError> {
        Ok(self.root.join(self.dir(DirRole::Cmd)?))
    }

    /// Full path of the root file to generate or augment.
    pub fn target_path(&self) -> Result<PathBuf, DomainError> {
        Ok(self.cmd_dir_path()?.join(ROOT_FILENAME))
    }

    /// Import path of the shared/global package.
    ///
    /// `<module>/<global dir>` when the module is known, otherwise the global
    /// directory as configured (it is then expected to be an import path).
    pub fn global_import_path(&self) -> Result<String, DomainError> {
        let dir = normalize_import_path(self.dir(DirRole::Global)?);
        Ok(match self.module() {
            Some(module) => {
                let module = normalize_import_path(module);
                if dir.is_empty() || dir == "." {
                    module
                } else {
                    format!("{module}/{dir}")
                }
            }
            None => dir,
        })
    }

    /// Package clause for a freshly created root file.
    pub fn package_name(&self) -> String {
        let Ok(dir) = self.dir(DirRole::Cmd) else {
            return DEFAULT_PACKAGE.to_string();
        };
        let last = normalize_import_path(dir)
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let ident: String = last
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        match ident.chars().next() {
            Some(c) if !c.is_ascii_digit() => ident,
            _ => DEFAULT_PACKAGE.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.app_name.trim().is_empty() {
            return Err(DomainError::InvalidMeta(
                "application name cannot be empty".into(),
            ));
        }
        if self.app_name.chars().any(char::is_control) {
            return Err(DomainError::InvalidMeta(format!(
                "application name {:?} contains control characters",
                self.app_name
            )));
        }
        self.dir(DirRole::Cmd)?;
        self.dir(DirRole::Global)?;
        if let Some(module) = &self.module {
            if module.trim().is_empty() || module.contains(char::is_whitespace) {
                return Err(DomainError::InvalidMeta(format!(
                    "invalid module path {module:?}"
                )));
            }
        }
        Ok(())
    }
}

fn normalize_import_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path);
    path.trim_end_matches('/').to_string()
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Meta`]; validation runs in [`MetaBuilder::build`].
#[derive(Debug, Clone)]
pub struct MetaBuilder {
    app_name: String,
    module: Option<String>,
    root: PathBuf,
    dirs: BTreeMap<DirRole, String>,
}

impl MetaBuilder {
    fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            module: None,
            root: PathBuf::from("."),
            dirs: BTreeMap::new(),
        }
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn dir(mut self, role: DirRole, path: impl Into<String>) -> Self {
        self.dirs.insert(role, path.into());
        self
    }

    pub fn build(self) -> Result<Meta, DomainError> {
        let meta = Meta {
            app_name: self.app_name,
            module: self.module,
            root: self.root,
            dirs: self.dirs,
        };
        meta.validate()?;
        Ok(meta)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
