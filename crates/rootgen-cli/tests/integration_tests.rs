//! Integration tests for rootgen-cli.

mod common;

use std::fs;

use predicates::prelude::*;

use common::{Project, rootgen};

#[test]
fn test_help_flag() {
    rootgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rootgen"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_version_flag() {
    rootgen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_command_help() {
    rootgen()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cmd-dir"))
        .stdout(predicate::str::contains("--global-dir"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_generate_fresh_project() {
    let project = Project::new();

    project
        .cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stdout(predicate::str::contains("+ function loadConfig"));

    let content = fs::read_to_string(project.root_file()).unwrap();
    assert!(content.starts_with("package cmd\n"));
    assert!(content.contains("APP = \"shop\""));
    assert!(content.contains("\"example.com/shop/g\""));
    assert!(content.contains("\"github.com/spf13/cobra\""));
    assert!(content.contains("func Execute() {"));
}

#[test]
fn test_generate_twice_is_idempotent() {
    let project = Project::new();
    project.cmd().arg("generate").assert().success();
    let first = fs::read(project.root_file()).unwrap();

    project
        .cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"))
        .stdout(predicate::str::contains("= function init"));

    assert_eq!(fs::read(project.root_file()).unwrap(), first);
}

#[test]
fn test_generate_keeps_hand_written_execute() {
    let project = Project::new();
    let original = "package cmd\n\nimport \"fmt\"\n\nfunc Execute() {\n\tfmt.Println(\"custom\")\n}\n";
    project.write("cmd/root.go", original);

    project
        .cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"))
        .stdout(predicate::str::contains("= function Execute"));

    let content = project.read("cmd/root.go");
    assert!(content.starts_with("package cmd\n\nimport \"fmt\"\n"));
    assert!(content.contains("func Execute() {\n\tfmt.Println(\"custom\")\n}\n"));
    assert_eq!(content.matches("func Execute()").count(), 1);
    assert!(content.contains("func loadConfig() {"));
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let project = Project::new();

    project
        .cmd()
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("package cmd\n"))
        .stdout(predicate::str::contains("func loadConfig() {"));

    assert!(!project.root_file().exists());
}

#[test]
fn test_generate_json_report() {
    let project = Project::new();

    let output = project
        .cmd()
        .args(["generate", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["written"], true);
    assert_eq!(report["existed"], false);
    assert_eq!(report["declarations"][0]["name"], "APP");
    assert_eq!(report["declarations"][0]["action"], "added");
}

#[test]
fn test_generate_with_flags_and_explicit_root() {
    let project = Project::bare();

    project
        .cmd()
        .current_dir(project.dir.path())
        .args([
            "gen",
            "shop",
            "--name",
            "store",
            "--module",
            "example.com/store",
            "--cmd-dir",
            "cli",
            "--global-dir",
            "internal/shared",
        ])
        .assert()
        .success();

    let content = project.read("cli/root.go");
    assert!(content.starts_with("package cli\n"));
    assert!(content.contains("APP = \"store\""));
    assert!(content.contains("g \"example.com/store/internal/shared\""));
}

#[test]
fn test_generate_reads_manifest() {
    let project = Project::new();
    project.write(
        "rootgen.toml",
        "[app]\nname = \"catalog\"\n\n[dirs]\nglobal = \"pkg/global\"\n\n[imports]\nhdsdk = \"github.com/acme/hdsdk\"\n",
    );

    project.cmd().arg("generate").assert().success();

    let content = fs::read_to_string(project.root_file()).unwrap();
    assert!(content.contains("APP = \"catalog\""));
    assert!(content.contains("g \"example.com/shop/pkg/global\""));
    assert!(content.contains("\"github.com/acme/hdsdk\""));
}

#[test]
fn test_generate_without_module_warns() {
    let project = Project::bare();

    project
        .cmd()
        .arg("generate")
        .assert()
        .success()
        .stderr(predicate::str::contains("No Go module found"));
    assert!(project.root_file().exists());
}

#[test]
fn test_quiet_flag() {
    let project = Project::new();

    project
        .cmd()
        .args(["-q", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(project.root_file().exists());
}

#[test]
fn test_verbose_flag() {
    let project = Project::new();

    project
        .cmd()
        .args(["-v", "generate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

#[test]
fn test_inspect_lists_declarations() {
    let project = Project::new();
    project.cmd().arg("generate").assert().success();

    project
        .cmd()
        .args(["inspect", "cmd/root.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package cmd"))
        .stdout(predicate::str::contains("variable  rootCmd"))
        .stdout(predicate::str::contains("function  loadConfig"));
}

#[test]
fn test_inspect_json_with_kind_filter() {
    let project = Project::new();
    project.cmd().arg("generate").assert().success();

    let output = project
        .cmd()
        .args(["inspect", "cmd/root.go", "--kind", "const", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let decls = value["declarations"].as_array().unwrap();
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0]["name"], "APP");
}

#[test]
fn test_init_local_and_config_get() {
    let project = Project::new();

    project
        .cmd()
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(project.root().join(".rootgen.toml").exists());

    project
        .cmd()
        .args(["config", "get", "project.cmd_dir"])
        .assert()
        .success()
        .stdout("cmd\n");

    project
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".rootgen.toml"));
}

#[test]
fn test_init_does_not_overwrite_without_force() {
    let project = Project::new();
    project.write(".rootgen.toml", "[project]\ncmd_dir = \"cli\"\n");

    project
        .cmd()
        .args(["init", "--local"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(
        project.read(".rootgen.toml"),
        "[project]\ncmd_dir = \"cli\"\n"
    );
}

#[test]
fn test_config_layers_file_and_environment() {
    let project = Project::new();
    project.write(".rootgen.toml", "[project]\ncmd_dir = \"cli\"\n");

    project
        .cmd()
        .args(["config", "get", "project.cmd_dir"])
        .assert()
        .success()
        .stdout("cli\n");

    project
        .cmd()
        .env("ROOTGEN__PROJECT__CMD_DIR", "commands")
        .args(["config", "get", "project.cmd_dir"])
        .assert()
        .success()
        .stdout("commands\n");
}

#[test]
fn test_config_drives_generation() {
    let project = Project::new();
    project.write(
        ".rootgen.toml",
        "[project]\ncmd_dir = \"internal/cli\"\n",
    );

    project.cmd().arg("generate").assert().success();
    let content = project.read("internal/cli/root.go");
    assert!(content.starts_with("package cli\n"));
}

#[test]
fn test_shell_completions() {
    rootgen()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rootgen"));
}
