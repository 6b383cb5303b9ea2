//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rootgen",
    bin_name = "rootgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Idempotent root-command scaffolding for cobra applications",
    long_about = "rootgen writes the cobra root command file (cmd/root.go) of a Go \
                  application.  Re-running it only adds what is missing; hand-written \
                  declarations are never touched.",
    after_help = "EXAMPLES:\n\
        \x20 rootgen generate\n\
        \x20 rootgen generate ./shop --name shop --module example.com/shop\n\
        \x20 rootgen generate --dry-run\n\
        \x20 rootgen inspect cmd/root.go\n\
        \x20 rootgen completions bash > /usr/share/bash-completion/completions/rootgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate or complete the root command file.
    #[command(
        visible_alias = "gen",
        about = "Generate or complete cmd/root.go",
        after_help = "EXAMPLES:\n\
            \x20 rootgen generate                      # current directory\n\
            \x20 rootgen generate ../shop --dry-run    # print without writing\n\
            \x20 rootgen gen --cmd-dir cli --global-dir internal/g"
    )]
    Generate(GenerateArgs),

    /// List the top-level declarations of a Go file.
    #[command(
        about = "Show what rootgen sees in a Go file",
        after_help = "EXAMPLES:\n\
            \x20 rootgen inspect cmd/root.go\n\
            \x20 rootgen inspect cmd/root.go --output-format json"
    )]
    Inspect(InspectArgs),

    /// Initialise a rootgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rootgen init           # default location\n\
            \x20 rootgen init --local   # .rootgen.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rootgen completions bash > ~/.local/share/bash-completion/completions/rootgen\n\
            \x20 rootgen completions zsh  > ~/.zfunc/_rootgen\n\
            \x20 rootgen completions fish > ~/.config/fish/completions/rootgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the rootgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rootgen config get project.cmd_dir\n\
            \x20 rootgen config list\n\
            \x20 rootgen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `rootgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Root directory of the Go project.
    #[arg(
        value_name = "ROOT",
        default_value = ".",
        help = "Project root directory"
    )]
    pub root: PathBuf,

    /// Application name; defaults to the project directory name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Application name")]
    pub name: Option<String>,

    /// Go module path; defaults to the `module` line of go.mod.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Go module path (e.g. example.com/shop)"
    )]
    pub module: Option<String>,

    /// Command directory, relative to ROOT.
    #[arg(long = "cmd-dir", value_name = "DIR", help = "Command directory")]
    pub cmd_dir: Option<String>,

    /// Shared/global package directory, relative to ROOT.
    #[arg(
        long = "global-dir",
        value_name = "DIR",
        help = "Global package directory"
    )]
    pub global_dir: Option<String>,

    /// Explicit project manifest instead of `<ROOT>/rootgen.toml`.
    #[arg(long = "manifest", value_name = "FILE", help = "Project manifest path")]
    pub manifest: Option<PathBuf>,

    /// Print the resulting file instead of writing it.
    #[arg(long = "dry-run", help = "Show the result without writing")]
    pub dry_run: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `rootgen inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Go source file to index.
    #[arg(value_name = "FILE", help = "Go source file")]
    pub file: PathBuf,

    /// Only list declarations of this kind.
    #[arg(
        short = 'k',
        long = "kind",
        value_enum,
        help = "Filter by declaration kind"
    )]
    pub kind: Option<KindFilter>,
}

/// Declaration kinds accepted by `inspect --kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum KindFilter {
    #[value(alias = "const")]
    Constant,
    #[value(alias = "var")]
    Variable,
    #[value(alias = "func")]
    Function,
    Method,
    Type,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rootgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.rootgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rootgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rootgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.cmd_dir` or `imports.cobra`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults_to_current_directory() {
        let cli = Cli::parse_from(["rootgen", "generate"]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.root, PathBuf::from("."));
                assert!(args.name.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn gen_alias_and_flags() {
        let cli = Cli::parse_from([
            "rootgen",
            "gen",
            "../shop",
            "--name",
            "shop",
            "-m",
            "example.com/shop",
            "--cmd-dir",
            "cli",
            "--global-dir",
            "internal/g",
            "--dry-run",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.root, PathBuf::from("../shop"));
        assert_eq!(args.name.as_deref(), Some("shop"));
        assert_eq!(args.module.as_deref(), Some("example.com/shop"));
        assert_eq!(args.cmd_dir.as_deref(), Some("cli"));
        assert_eq!(args.global_dir.as_deref(), Some("internal/g"));
        assert!(args.dry_run);
    }

    #[test]
    fn inspect_kind_aliases() {
        let cli = Cli::parse_from(["rootgen", "inspect", "root.go", "-k", "func"]);
        let Commands::Inspect(args) = cli.command else {
            panic!("expected Inspect command");
        };
        assert_eq!(args.kind, Some(KindFilter::Function));
    }

    #[test]
    fn inspect_requires_file() {
        assert!(Cli::try_parse_from(["rootgen", "inspect"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["rootgen", "--quiet", "--verbose", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["rootgen", "generate", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }
}
