//! End-to-end generation against real and in-memory filesystems.

use std::fs;
use std::path::Path;

use rootgen_adapters::{LocalFilesystem, ManifestLoader, MemoryFilesystem, builtin_registry};
use rootgen_core::{
    application::GenerateService,
    domain::{DeclKind, DeclarationIndex, DirRole, DomainError, Meta},
    error::RootgenError,
};

fn meta_for(root: &Path) -> Meta {
    Meta::builder("shop")
        .root(root)
        .module("example.com/shop")
        .dir(DirRole::Cmd, "cmd")
        .dir(DirRole::Global, "g")
        .build()
        .unwrap()
}

#[test]
fn creates_command_directory_and_root_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = GenerateService::new(Box::new(LocalFilesystem::new()), builtin_registry());

    let report = service.generate(&meta_for(dir.path())).unwrap();
    assert!(report.written);

    let path = dir.path().join("cmd/root.go");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("package cmd\n"));
    assert!(content.contains("\"github.com/spf13/cobra\""));
    assert!(content.contains("\"example.com/shop/g\""));
}

#[test]
fn second_run_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let service = GenerateService::new(Box::new(LocalFilesystem::new()), builtin_registry());
    service.generate(&meta_for(dir.path())).unwrap();

    let path = dir.path().join("cmd/root.go");
    let before = fs::read(&path).unwrap();
    let report = service.generate(&meta_for(dir.path())).unwrap();

    assert!(!report.changed);
    assert!(!report.written);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn user_edits_survive_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let cmd = dir.path().join("cmd");
    fs::create_dir_all(&cmd).unwrap();
    let original = "package cmd\n\n// Version is set at build time.\nvar Version = \"dev\"\n\nfunc loadConfig() {\n\t// custom loading\n}\n";
    fs::write(cmd.join("root.go"), original).unwrap();

    let service = GenerateService::new(Box::new(LocalFilesystem::new()), builtin_registry());
    let report = service.generate(&meta_for(dir.path())).unwrap();

    let content = fs::read_to_string(cmd.join("root.go")).unwrap();
    assert!(content.contains("// Version is set at build time.\nvar Version = \"dev\"\n"));
    assert!(content.contains("func loadConfig() {\n\t// custom loading\n}"));
    assert_eq!(content.matches("func loadConfig()").count(), 1);
    // g and hdsdk are only referenced from loadConfig.
    assert!(!content.contains("hdsdk"));
    assert!(!content.contains("example.com/shop/g"));
    assert!(report.kept().any(|d| d.name == "loadConfig"));

    let index = DeclarationIndex::parse(&content).unwrap();
    assert!(index.exists(DeclKind::Variable, "Version"));
    assert!(index.exists(DeclKind::Function, "Execute"));
}

#[test]
fn malformed_file_on_disk_is_not_modified() {
    let dir = tempfile::tempdir().unwrap();
    let cmd = dir.path().join("cmd");
    fs::create_dir_all(&cmd).unwrap();
    let original = "package cmd\n\nfunc init() {\n";
    fs::write(cmd.join("root.go"), original).unwrap();

    let service = GenerateService::new(Box::new(LocalFilesystem::new()), builtin_registry());
    let err = service.generate(&meta_for(dir.path())).unwrap_err();

    assert!(matches!(err, RootgenError::Domain(DomainError::Parse { .. })));
    assert_eq!(fs::read_to_string(cmd.join("root.go")).unwrap(), original);
}

#[test]
fn manifest_overrides_registry() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("rootgen.toml"),
        "[app]\nname = \"shop\"\n\n[imports]\ncobra = \"github.com/acme/cobra\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/shop\n\ngo 1.22\n").unwrap();

    let manifest = ManifestLoader::discover(dir.path()).unwrap().unwrap();
    let mut registry = builtin_registry();
    registry.extend(&manifest.registry());
    assert_eq!(
        ManifestLoader::detect_module(dir.path()).unwrap().as_deref(),
        Some("example.com/shop")
    );

    let fs_adapter = MemoryFilesystem::new();
    let service = GenerateService::new(Box::new(fs_adapter.clone()), registry);
    service.generate(&meta_for(dir.path())).unwrap();

    let content = fs_adapter
        .read_file(&dir.path().join("cmd/root.go"))
        .unwrap();
    assert!(content.contains("\"github.com/acme/cobra\""));
    assert!(!content.contains("spf13"));
}

#[test]
fn missing_manifest_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ManifestLoader::discover(dir.path()).unwrap().is_none());
    assert!(ManifestLoader::detect_module(dir.path()).unwrap().is_none());
}

#[test]
fn broken_manifest_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rootgen.toml"), "[app\nname = 1\n").unwrap();
    let err = ManifestLoader::discover(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        RootgenError::Application(rootgen_core::application::ApplicationError::ManifestInvalid { .. })
    ));
}
