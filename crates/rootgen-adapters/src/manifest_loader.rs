//! Project manifest (`rootgen.toml`) loader.
//!
//! The manifest lives in the root of the Go project and pins the values a
//! team wants every `rootgen generate` run to use.
//!
//! # `rootgen.toml` format
//!
//! ```toml
//! [app]
//! name   = "shop"                   # defaults to the project directory name
//! module = "example.com/shop"       # defaults to the module in go.mod
//!
//! [dirs]
//! cmd    = "cmd"
//! global = "internal/g"
//!
//! # Overrides for the import registry (logical key = import path).
//! [imports]
//! hdsdk = "github.com/acme/hdsdk/v2"
//! ```

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};

use rootgen_core::{
    application::ApplicationError,
    domain::ImportRegistry,
    error::{RootgenError, RootgenResult},
};

/// File name looked up in the project root.
pub const MANIFEST_FILENAME: &str = "rootgen.toml";

/// File name of the Go module definition.
pub const GO_MOD_FILENAME: &str = "go.mod";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `rootgen.toml` file.
///
/// Every section is optional; unknown keys are rejected so typos surface.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub dirs: DirsSection,
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
}

/// `[app]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    pub name: Option<String>,
    pub module: Option<String>,
}

/// `[dirs]` section, relative to the project root.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DirsSection {
    pub cmd: Option<String>,
    pub global: Option<String>,
}

impl ProjectManifest {
    /// Registry overrides declared under `[imports]`.
    pub fn registry(&self) -> ImportRegistry {
        self.imports
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

pub struct ManifestLoader;

impl ManifestLoader {
    /// Load and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::FileNotFound`] when the file is missing,
    /// [`ApplicationError::ManifestInvalid`] when it is not valid TOML or has
    /// unknown keys.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> RootgenResult<ProjectManifest> {
        let raw = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        let manifest: ProjectManifest =
            toml::from_str(&raw).map_err(|e| ApplicationError::ManifestInvalid {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            })?;
        debug!(
            app = ?manifest.app.name,
            imports = manifest.imports.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }

    /// Load `<root>/rootgen.toml` if present.
    pub fn discover(root: &Path) -> RootgenResult<Option<ProjectManifest>> {
        let path = Self::manifest_path(root);
        if !path.is_file() {
            debug!(root = %root.display(), "No project manifest");
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    pub fn manifest_path(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILENAME)
    }

    /// Module path declared in `<root>/go.mod`, if the file exists.
    pub fn detect_module(root: &Path) -> RootgenResult<Option<String>> {
        let path = root.join(GO_MOD_FILENAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(&path, e)),
        };
        let module = parse_module_directive(&raw);
        debug!(module = ?module, "Read go.mod");
        Ok(module)
    }
}

fn parse_module_directive(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

fn read_error(path: &Path, e: io::Error) -> RootgenError {
    if e.kind() == io::ErrorKind::NotFound {
        ApplicationError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into()
    } else {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to read file: {e}"),
        }
        .into()
    }
}
