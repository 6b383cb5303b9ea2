//! Implementation of the `rootgen generate` command.
//!
//! Responsibility: resolve a `Meta` and an import registry from flags, the
//! project manifest, go.mod and configuration, call the core generate
//! service, and display results. No generation logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use rootgen_adapters::{LocalFilesystem, ManifestLoader, ProjectManifest, builtin_registry};
use rootgen_core::{
    application::{GenerateService, GenerationReport},
    domain::{DirRole, ImportRegistry, Meta},
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `rootgen generate` command.
///
/// Dispatch sequence:
/// 1. Resolve the project root
/// 2. Load the manifest and read the module from go.mod
/// 3. Build `Meta` and the import registry (flags > manifest > config)
/// 4. Plan (`--dry-run`) or generate via `GenerateService`
/// 5. Report what was added and kept
#[instrument(skip_all, fields(root = %args.root.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Resolve project root
    let root = resolve_root(&args.root)?;

    // 2. Project-level inputs
    let manifest = match &args.manifest {
        Some(path) => ManifestLoader::load(path)?,
        None => ManifestLoader::discover(&root)?.unwrap_or_default(),
    };
    let go_mod_module = ManifestLoader::detect_module(&root)?;

    // 3. Meta + registry
    let meta = resolve_meta(&args, &config, &manifest, go_mod_module, &root)?;
    let registry = resolve_registry(&config, &manifest);
    debug!(
        app = %meta.app_name(),
        module = meta.module().unwrap_or("<none>"),
        imports = registry.len(),
        "Generation inputs resolved"
    );

    if meta.module().is_none() {
        let global = meta
            .global_import_path()
            .map_err(|e| CliError::Core(e.into()))?;
        output.warning(&format!(
            "No Go module found (no --module, manifest entry or go.mod); \
             importing the global package as \"{global}\""
        ))?;
    }

    let service = GenerateService::new(Box::new(LocalFilesystem::new()), registry);

    // 4a. Dry run: compute but do not write.
    if args.dry_run {
        let plan = service.plan(&meta)?;
        if output.is_json() {
            output.json(&DryRun {
                report: &plan.report,
                content: &plan.content,
            })?;
        } else {
            output.data(&plan.content)?;
        }
        return Ok(());
    }

    // 4b. Generate
    let report = service.generate(&meta)?;
    info!(
        path = %report.target.display(),
        written = report.written,
        "Generate completed"
    );

    // 5. Report
    if output.is_json() {
        output.json(&report)?;
    } else {
        show_report(&report, &output)?;
    }

    Ok(())
}

/// JSON document printed by `generate --dry-run`.
#[derive(Serialize)]
struct DryRun<'a> {
    report: &'a GenerationReport,
    content: &'a str,
}

// ── Input resolution ──────────────────────────────────────────────────────────

/// Make the project root absolute and check that it is a directory.
pub fn resolve_root(root: &Path) -> CliResult<PathBuf> {
    let absolute = root.canonicalize().map_err(|e| CliError::InvalidInput {
        message: format!("project root '{}' cannot be opened", root.display()),
        source: Some(Box::new(e)),
    })?;
    if !absolute.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("project root '{}' is not a directory", root.display()),
            source: None,
        });
    }
    Ok(absolute)
}

/// Combine every source of generation metadata into a validated `Meta`.
pub fn resolve_meta(
    args: &GenerateArgs,
    config: &AppConfig,
    manifest: &ProjectManifest,
    go_mod_module: Option<String>,
    root: &Path,
) -> CliResult<Meta> {
    let name = args
        .name
        .clone()
        .or_else(|| manifest.app.name.clone())
        .or_else(|| {
            root.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "cannot derive an application name from '{}'",
                root.display()
            ),
            source: None,
        })?;

    let module = args
        .module
        .clone()
        .or_else(|| manifest.app.module.clone())
        .or(go_mod_module)
        .or_else(|| config.project.module.clone());

    let cmd_dir = args
        .cmd_dir
        .clone()
        .or_else(|| manifest.dirs.cmd.clone())
        .unwrap_or_else(|| config.project.cmd_dir.clone());
    let global_dir = args
        .global_dir
        .clone()
        .or_else(|| manifest.dirs.global.clone())
        .unwrap_or_else(|| config.project.global_dir.clone());

    let mut builder = Meta::builder(name)
        .root(root)
        .dir(DirRole::Cmd, cmd_dir)
        .dir(DirRole::Global, global_dir);
    if let Some(module) = module {
        builder = builder.module(module);
    }
    builder.build().map_err(|e| CliError::Core(e.into()))
}

/// Built-in entries, then config overrides, then manifest overrides.
pub fn resolve_registry(config: &AppConfig, manifest: &ProjectManifest) -> ImportRegistry {
    let overrides: ImportRegistry = config
        .imports
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let mut registry = builtin_registry();
    registry.extend(&overrides);
    registry.extend(&manifest.registry());
    registry
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    let path = report.target.display();
    if report.written {
        let verb = if report.existed { "Updated" } else { "Created" };
        output.success(&format!("{verb} {path}"))?;
    } else {
        output.success(&format!("{path} is up to date"))?;
    }

    let added: Vec<_> = report.added().collect();
    if !added.is_empty() {
        output.header("Added:")?;
        for decl in added {
            output.detail(&format!("+ {} {}", decl.kind, decl.name))?;
        }
    }
    let kept: Vec<_> = report.kept().collect();
    if !kept.is_empty() {
        output.header("Kept:")?;
        for decl in kept {
            output.detail(&format!("= {} {}", decl.kind, decl.name))?;
        }
    }
    if !report.imports_added.is_empty() {
        output.header("Imports added:")?;
        for path in &report.imports_added {
            output.detail(path)?;
        }
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
