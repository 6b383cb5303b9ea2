//! `rootgen inspect` — show the top-level declarations rootgen finds in a
//! Go file, i.e. exactly what the generation steps will consider present.

use serde::Serialize;
use tracing::instrument;

use rootgen_adapters::{LocalFilesystem, builtin_registry};
use rootgen_core::{
    application::GenerateService,
    domain::{DeclKind, DeclarationIndex, IndexedDecl, IndexedImport},
};

use crate::{
    cli::{InspectArgs, KindFilter},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    package: Option<&'a str>,
    imports: &'a [IndexedImport],
    declarations: Vec<&'a IndexedDecl>,
}

#[instrument(skip_all, fields(path = %args.file.display()))]
pub fn execute(args: InspectArgs, output: OutputManager) -> CliResult<()> {
    let service = GenerateService::new(Box::new(LocalFilesystem::new()), builtin_registry());
    let index = service.inspect(&args.file)?;
    let kind = args.kind.map(to_decl_kind);
    let report = build_report(&index, kind);

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.header(&format!(
        "{} (package {})",
        args.file.display(),
        report.package.unwrap_or("?")
    ))?;
    if kind.is_none() {
        for import in report.imports {
            let line = match &import.alias {
                Some(alias) => format!("import {alias} \"{}\"", import.path),
                None => format!("import \"{}\"", import.path),
            };
            output.detail(&line)?;
        }
    }
    for decl in &report.declarations {
        output.print(&format!("{:<9} {}", decl.kind.as_str(), decl.name))?;
    }
    if report.declarations.is_empty() {
        output.info("No matching declarations")?;
    }
    Ok(())
}

fn build_report(index: &DeclarationIndex, kind: Option<DeclKind>) -> InspectReport<'_> {
    InspectReport {
        package: index.package_name(),
        imports: index.imports(),
        declarations: index
            .decls()
            .iter()
            .filter(|d| kind.is_none_or(|k| d.kind == k))
            .collect(),
    }
}

fn to_decl_kind(filter: KindFilter) -> DeclKind {
    match filter {
        KindFilter::Constant => DeclKind::Constant,
        KindFilter::Variable => DeclKind::Variable,
        KindFilter::Function => DeclKind::Function,
        KindFilter::Method => DeclKind::Method,
        KindFilter::Type => DeclKind::Type,
    }
}
