//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Load the target file (if any) and index it
//! 2. Run the generation steps against a fresh builder
//! 3. Emit the final content and write it when it changed
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        AstBuilder, DeclOutcome, DeclarationIndex, DomainValidator as validator, FileEmitter,
        ImportRegistry, Meta, StepContext, root_file_pipeline,
    },
    error::RootgenResult,
};

/// Summary of one generation run, suitable for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub target: PathBuf,
    /// The target file was present before the run.
    pub existed: bool,
    /// The emitted content differs from what was on disk.
    pub changed: bool,
    /// The content was written back.
    pub written: bool,
    pub declarations: Vec<DeclOutcome>,
    pub imports_added: Vec<String>,
}

impl GenerationReport {
    pub fn added(&self) -> impl Iterator<Item = &DeclOutcome> {
        self.declarations.iter().filter(|d| d.is_added())
    }

    pub fn kept(&self) -> impl Iterator<Item = &DeclOutcome> {
        self.declarations.iter().filter(|d| !d.is_added())
    }
}

/// A computed but not yet written generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub report: GenerationReport,
    pub content: String,
}

/// Root file generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    registry: ImportRegistry,
    emitter: FileEmitter,
}

impl GenerateService {
    /// Create a new service with the given filesystem adapter and import
    /// registry.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rootgen_core::application::GenerateService;
    ///
    /// let service = GenerateService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     registry,             // ImportRegistry
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, registry: ImportRegistry) -> Self {
        Self {
            filesystem,
            registry,
            emitter: FileEmitter::new(),
        }
    }

    pub fn registry(&self) -> &ImportRegistry {
        &self.registry
    }

    /// Compute the content of the root file without writing anything.
    #[instrument(skip_all, fields(app = %meta.app_name()))]
    pub fn plan(&self, meta: &Meta) -> RootgenResult<GenerationPlan> {
        validator::validate_meta(meta)?;
        let target = meta.target_path()?;

        let raw = self.filesystem.read_to_string(&target)?;
        let existed = raw.is_some();
        // A blank file carries no declarations and no package clause.
        let original = raw.filter(|src| !src.trim_start_matches('\u{feff}').trim().is_empty());

        let index = match &original {
            Some(src) => validator::validate_source(&target, src)?,
            None => DeclarationIndex::empty(),
        };
        debug!(
            existed,
            declarations = index.decls().len(),
            imports = index.imports().len(),
            "Indexed target file"
        );

        let ctx = StepContext::new(meta, &index)?;
        let mut builder = AstBuilder::new(&self.registry);
        for (path, local) in index.import_bindings() {
            builder.bind_import(path, local);
        }
        for name in index.file_scope_names() {
            builder.reserve(name);
        }

        let mut declarations = Vec::new();
        for step in root_file_pipeline() {
            let outcomes = step.apply(&ctx, &mut builder)?;
            debug!(
                step = step.name(),
                added = outcomes.iter().filter(|o| o.is_added()).count(),
                "Step applied"
            );
            declarations.extend(outcomes);
        }

        let pending = builder.finish();
        let imports_added = pending.imports.iter().map(|i| i.path.clone()).collect();
        let package = index
            .package_name()
            .map(str::to_string)
            .unwrap_or_else(|| meta.package_name());
        let emitted = self
            .emitter
            .emit(original.as_deref(), &index, &package, &pending);

        if emitted.changed {
            validator::validate_source(&target, &emitted.content).map_err(|e| {
                ApplicationError::EmitFailed {
                    path: target.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(GenerationPlan {
            report: GenerationReport {
                target,
                existed,
                changed: emitted.changed,
                written: false,
                declarations,
                imports_added,
            },
            content: emitted.content,
        })
    }

    /// Generate or augment the root file, writing only when content changed.
    #[instrument(skip_all, fields(app = %meta.app_name()))]
    pub fn generate(&self, meta: &Meta) -> RootgenResult<GenerationReport> {
        let GenerationPlan {
            mut report,
            content,
        } = self.plan(meta)?;

        if !report.changed {
            info!(path = %report.target.display(), "Root file already complete");
            return Ok(report);
        }

        if let Some(parent) = report.target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&report.target, &content)?;
        report.written = true;

        info!(
            path = %report.target.display(),
            added = report.added().count(),
            kept = report.kept().count(),
            "Root file written"
        );
        Ok(report)
    }

    /// Index an existing Go file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn inspect(&self, path: &Path) -> RootgenResult<DeclarationIndex> {
        let source = self
            .filesystem
            .read_to_string(path)?
            .ok_or_else(|| ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            })?;
        let index = validator::validate_source(path, &source)?;
        debug!(declarations = index.decls().len(), "File indexed");
        Ok(index)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Action, DirRole, DomainError, keys},
        error::RootgenError,
    };
    use mockall::mock;

    mock! {
        pub Fs {}

        impl Filesystem for Fs {
            fn create_dir_all(&self, path: &Path) -> RootgenResult<()>;
            fn read_to_string(&self, path: &Path) -> RootgenResult<Option<String>>;
            fn write_file(&self, path: &Path, content: &str) -> RootgenResult<()>;
        }
    }

    fn registry() -> ImportRegistry {
        ImportRegistry::new()
            .with(keys::CLI_FRAMEWORK, "github.com/spf13/cobra")
            .with(keys::APP_SDK, "github.com/hdget/hdsdk")
            .with(keys::UTILS, "github.com/hdget/hdutils")
    }

    fn meta() -> Meta {
        Meta::builder("demo")
            .root("/work/demo")
            .module("example.com/demo")
            .dir(DirRole::Cmd, "cmd")
            .dir(DirRole::Global, "g")
            .build()
            .unwrap()
    }

    #[test]
    fn fresh_generation_writes_once() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/work/demo/cmd/root.go"))
            .returning(|_| Ok(None));
        fs.expect_create_dir_all()
            .withf(|path| path == Path::new("/work/demo/cmd"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/work/demo/cmd/root.go") && content.starts_with("package cmd\n")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = GenerateService::new(Box::new(fs), registry())
            .generate(&meta())
            .unwrap();
        assert!(!report.existed);
        assert!(report.written);
        assert_eq!(report.added().count(), 7);
        assert_eq!(report.kept().count(), 0);
        assert_eq!(report.imports_added.len(), 5);
    }

    #[test]
    fn complete_file_is_not_rewritten() {
        let first = GenerateService::new(Box::new(read_only(None)), registry())
            .plan(&meta())
            .unwrap()
            .content;

        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .returning(move |_| Ok(Some(first.clone())));
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let report = GenerateService::new(Box::new(fs), registry())
            .generate(&meta())
            .unwrap();
        assert!(report.existed);
        assert!(!report.changed);
        assert!(!report.written);
        assert!(report.declarations.iter().all(|d| d.action == Action::Kept));
    }

    #[test]
    fn global_import_steers_clear_of_file_declarations() {
        let plan = GenerateService::new(
            Box::new(read_only(Some("package cmd\n\nvar g = 1\n"))),
            registry(),
        )
        .plan(&meta())
        .unwrap();
        assert!(plan.content.contains("\tg2 \"example.com/demo/g\"\n"));
        assert!(plan.content.contains("v.Unmarshal(&g2.Config)"));
    }

    #[test]
    fn byte_order_mark_only_file_counts_as_blank() {
        let plan = GenerateService::new(Box::new(read_only(Some("\u{feff}\n"))), registry())
            .plan(&meta())
            .unwrap();
        assert!(plan.report.existed);
        assert!(plan.content.starts_with("package cmd\n"));
    }

    #[test]
    fn malformed_file_aborts_without_writing() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .returning(|_| Ok(Some("package cmd\n\nfunc init() {\n".to_string())));
        fs.expect_write_file().never();

        let err = GenerateService::new(Box::new(fs), registry())
            .generate(&meta())
            .unwrap_err();
        assert!(matches!(
            err,
            RootgenError::Domain(DomainError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn write_failure_is_propagated() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string().returning(|_| Ok(None));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let err = GenerateService::new(Box::new(fs), registry())
            .generate(&meta())
            .unwrap_err();
        assert!(matches!(
            err,
            RootgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn unresolved_import_fails_before_io_writes() {
        let mut fs = MockFs::new();
        fs.expect_read_to_string().returning(|_| Ok(None));
        fs.expect_write_file().never();

        let err = GenerateService::new(Box::new(fs), ImportRegistry::new())
            .generate(&meta())
            .unwrap_err();
        assert!(matches!(
            err,
            RootgenError::Domain(DomainError::UnresolvedImport { .. })
        ));
    }

    #[test]
    fn blank_file_is_treated_as_fresh() {
        let report = GenerateService::new(Box::new(read_only(Some(" \n\n"))), registry())
            .plan(&meta())
            .unwrap()
            .report;
        assert!(report.existed);
        assert!(report.changed);
        assert_eq!(report.added().count(), 7);
    }

    #[test]
    fn inspect_missing_file() {
        let err = GenerateService::new(Box::new(read_only(None)), registry())
            .inspect(Path::new("/nope/root.go"))
            .unwrap_err();
        assert!(matches!(
            err,
            RootgenError::Application(ApplicationError::FileNotFound { .. })
        ));
    }

    fn read_only(content: Option<&'static str>) -> MockFs {
        let mut fs = MockFs::new();
        fs.expect_read_to_string()
            .returning(move |_| Ok(content.map(str::to_string)));
        fs.expect_write_file().never();
        fs
    }
}
