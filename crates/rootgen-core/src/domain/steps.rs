//! Generation steps for the root command file.
//!
//! Each step owns one part of the file. A step first asks the declaration
//! index whether its declaration already exists; only missing declarations
//! are handed to the builder. Steps run in the fixed order returned by
//! [`root_file_pipeline`].

use serde::Serialize;

use crate::domain::{
    ast::{Expr, FuncDecl, Stmt, ValueSpec},
    builder::{AstBuilder, PackageRef},
    error::DomainError,
    index::DeclarationIndex,
    meta::Meta,
    registry::keys,
    value_objects::DeclKind,
};

// ── Generated identifiers ─────────────────────────────────────────────────────

pub const APP_CONST: &str = "APP";
pub const ENV_VAR: &str = "env";
pub const CONFIG_FILE_VAR: &str = "configFile";
pub const ROOT_CMD_VAR: &str = "rootCmd";
/// Subcommand registered on the root command; defined elsewhere in the package.
pub const RUN_CMD_VAR: &str = "runCmd";
pub const INIT_FUNC: &str = "init";
pub const EXECUTE_FUNC: &str = "Execute";
pub const LOAD_CONFIG_FUNC: &str = "loadConfig";
/// Local name of the shared/global package.
pub const GLOBAL_PACKAGE_NAME: &str = "g";

const ENV_FLAG_USAGE: &str = "running environment, e,g: [prod, sim, pre, test, dev, local]";
const CONFIG_FLAG_USAGE: &str = "config file, default: config.toml";

/// Read-only inputs shared by every step of one run.
pub struct StepContext<'a> {
    pub meta: &'a Meta,
    pub index: &'a DeclarationIndex,
    pub global_import: String,
}

impl<'a> StepContext<'a> {
    pub fn new(meta: &'a Meta, index: &'a DeclarationIndex) -> Result<Self, DomainError> {
        Ok(Self {
            meta,
            index,
            global_import: meta.global_import_path()?,
        })
    }

    fn outcome(&self, kind: DeclKind, name: &str) -> DeclOutcome {
        let action = if self.index.exists(kind, name) {
            Action::Kept
        } else {
            Action::Added
        };
        DeclOutcome {
            kind,
            name: name.to_string(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Kept,
}

/// What a step did about one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclOutcome {
    pub kind: DeclKind,
    pub name: String,
    pub action: Action,
}

impl DeclOutcome {
    pub fn is_added(&self) -> bool {
        self.action == Action::Added
    }
}

pub trait GenerationStep: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError>;
}

/// The steps producing a root command file, in execution order.
pub fn root_file_pipeline() -> Vec<Box<dyn GenerationStep>> {
    vec![
        Box::new(ImportsStep),
        Box::new(ConstantsStep),
        Box::new(VariablesStep),
        Box::new(InitFuncStep),
        Box::new(ExecuteFuncStep),
        Box::new(LoadConfigFuncStep),
    ]
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Registers `g` as the local name of the global package.
pub struct ImportsStep;

impl GenerationStep for ImportsStep {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        builder.import_name(ctx.global_import.clone(), GLOBAL_PACKAGE_NAME);
        Ok(Vec::new())
    }
}

/// `const ( APP = "<app>" )`
pub struct ConstantsStep;

impl GenerationStep for ConstantsStep {
    fn name(&self) -> &'static str {
        "constants"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        let outcome = ctx.outcome(DeclKind::Constant, APP_CONST);
        if outcome.is_added() {
            builder.add_const_block(vec![ValueSpec::valued(
                APP_CONST,
                Expr::str(ctx.meta.app_name()),
            )]);
        }
        Ok(vec![outcome])
    }
}

/// `env`, `configFile` and `rootCmd`, each guarded on its own.
pub struct VariablesStep;

impl GenerationStep for VariablesStep {
    fn name(&self) -> &'static str {
        "variables"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        let app = ctx.meta.app_name();
        let mut specs = Vec::new();
        let mut outcomes = Vec::new();

        for name in [ENV_VAR, CONFIG_FILE_VAR] {
            let outcome = ctx.outcome(DeclKind::Variable, name);
            if outcome.is_added() {
                specs.push(ValueSpec::typed(name, Expr::ident("string")));
            }
            outcomes.push(outcome);
        }

        let outcome = ctx.outcome(DeclKind::Variable, ROOT_CMD_VAR);
        if outcome.is_added() {
            let command = builder
                .qual(PackageRef::Key(keys::CLI_FRAMEWORK), "Command")?
                .composite([
                    ("Use".to_string(), Expr::str(app)),
                    ("Short".to_string(), Expr::str(format!("{app} short description"))),
                    ("Long".to_string(), Expr::str(format!("{app} long description"))),
                ])
                .addr_of();
            specs.push(ValueSpec::valued(ROOT_CMD_VAR, command));
        }
        outcomes.push(outcome);

        builder.add_var_block(specs);
        Ok(outcomes)
    }
}

/// `init()`: config loading hook, persistent flags, subcommand registration.
pub struct InitFuncStep;

impl GenerationStep for InitFuncStep {
    fn name(&self) -> &'static str {
        "init"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        let outcome = ctx.outcome(DeclKind::Function, INIT_FUNC);
        if !outcome.is_added() {
            return Ok(vec![outcome]);
        }

        let flags = || Expr::ident(ROOT_CMD_VAR).dot("PersistentFlags").call([]);
        let string_flag = |var: &str, long: &str, short: &str, usage: &str| {
            Stmt::Expr(flags().dot("StringVarP").call([
                Expr::ident(var).addr_of(),
                Expr::str(long),
                Expr::str(short),
                Expr::str(""),
                Expr::str(usage),
            ]))
        };

        let body = vec![
            Stmt::Expr(
                builder
                    .qual(PackageRef::Key(keys::CLI_FRAMEWORK), "OnInitialize")?
                    .call([Expr::ident(LOAD_CONFIG_FUNC)]),
            ),
            Stmt::Blank,
            string_flag(ENV_VAR, "env", "e", ENV_FLAG_USAGE),
            string_flag(CONFIG_FILE_VAR, "config", "c", CONFIG_FLAG_USAGE),
            Stmt::Expr(
                Expr::ident(ROOT_CMD_VAR)
                    .dot("AddCommand")
                    .call([Expr::ident(RUN_CMD_VAR)]),
            ),
        ];
        builder.add_function(FuncDecl::plain(INIT_FUNC, body));
        Ok(vec![outcome])
    }
}

/// `Execute()`: panic recovery plus running the root command.
pub struct ExecuteFuncStep;

impl GenerationStep for ExecuteFuncStep {
    fn name(&self) -> &'static str {
        "execute"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        let outcome = ctx.outcome(DeclKind::Function, EXECUTE_FUNC);
        if !outcome.is_added() {
            return Ok(vec![outcome]);
        }

        let record_stack = builder
            .qual(PackageRef::Key(keys::UTILS), "RecordErrorStack")?
            .call([Expr::str(ctx.meta.app_name())]);
        let exit = builder
            .qual(PackageRef::Path("os"), "Exit")?
            .call([Expr::int(1)]);

        let recover = Stmt::if_init(
            Stmt::define("r", Expr::ident("recover").call([])),
            Expr::ident("r").ne(Expr::Nil),
            [Stmt::Expr(record_stack)],
        );
        let body = vec![
            Stmt::Defer(Expr::func_lit([recover]).call([])),
            Stmt::Blank,
            Stmt::if_init(
                Stmt::define("err", Expr::ident(ROOT_CMD_VAR).dot("Execute").call([])),
                Expr::ident("err").ne(Expr::Nil),
                [Stmt::Expr(exit)],
            ),
        ];
        builder.add_function(FuncDecl::plain(EXECUTE_FUNC, body));
        Ok(vec![outcome])
    }
}

/// `loadConfig()`: load configuration and unmarshal it into `g.Config`.
pub struct LoadConfigFuncStep;

impl GenerationStep for LoadConfigFuncStep {
    fn name(&self) -> &'static str {
        "load-config"
    }

    fn apply(
        &self,
        ctx: &StepContext<'_>,
        builder: &mut AstBuilder<'_>,
    ) -> Result<Vec<DeclOutcome>, DomainError> {
        let outcome = ctx.outcome(DeclKind::Function, LOAD_CONFIG_FUNC);
        if !outcome.is_added() {
            return Ok(vec![outcome]);
        }

        let load = builder
            .qual(PackageRef::Key(keys::APP_SDK), "LoadConfig")?
            .call([
                Expr::ident(APP_CONST),
                Expr::ident(ENV_VAR),
                Expr::ident(CONFIG_FILE_VAR),
            ]);
        let config = builder
            .qual(PackageRef::Path(&ctx.global_import), "Config")?
            .addr_of();
        let fatal = builder.qual(PackageRef::Key(keys::UTILS), "Fatal")?.call([
            Expr::str("msg"),
            Expr::str("unmarshal config"),
            Expr::str("err"),
            Expr::ident("err"),
        ]);

        let body = vec![
            Stmt::define("v", load),
            Stmt::Blank,
            Stmt::define("err", Expr::ident("v").dot("Unmarshal").call([config])),
            Stmt::if_(Expr::ident("err").ne(Expr::Nil), [Stmt::Expr(fatal)]),
        ];
        builder.add_function(FuncDecl::plain(LOAD_CONFIG_FUNC, body));
        Ok(vec![outcome])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ast::Decl, registry::ImportRegistry, value_objects::DirRole};

    fn meta() -> Meta {
        Meta::builder("demo")
            .module("example.com/demo")
            .dir(DirRole::Cmd, "cmd")
            .dir(DirRole::Global, "g")
            .build()
            .unwrap()
    }

    fn registry() -> ImportRegistry {
        ImportRegistry::new()
            .with(keys::CLI_FRAMEWORK, "github.com/spf13/cobra")
            .with(keys::APP_SDK, "github.com/hdget/hdsdk")
            .with(keys::UTILS, "github.com/hdget/hdutils")
    }

    fn run(step: &dyn GenerationStep, index: &DeclarationIndex) -> (Vec<DeclOutcome>, Vec<Decl>) {
        let meta = meta();
        let registry = registry();
        let ctx = StepContext::new(&meta, index).unwrap();
        let mut builder = AstBuilder::new(&registry);
        let outcomes = step.apply(&ctx, &mut builder).unwrap();
        (outcomes, builder.finish().decls)
    }

    #[test]
    fn pipeline_order() {
        let names: Vec<_> = root_file_pipeline().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["imports", "constants", "variables", "init", "execute", "load-config"]
        );
    }

    #[test]
    fn imports_step_adds_nothing_on_its_own() {
        let (outcomes, decls) = run(&ImportsStep, &DeclarationIndex::empty());
        assert!(outcomes.is_empty());
        assert!(decls.is_empty());
    }

    #[test]
    fn variables_are_guarded_individually() {
        let index = DeclarationIndex::parse("package cmd\n\nvar env string\n").unwrap();
        let (outcomes, decls) = run(&VariablesStep, &index);
        let added: Vec<_> = outcomes
            .iter()
            .filter(|o| o.is_added())
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(added, vec![CONFIG_FILE_VAR, ROOT_CMD_VAR]);
        match &decls[..] {
            [Decl::Var(specs)] => {
                let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec![CONFIG_FILE_VAR, ROOT_CMD_VAR]);
            }
            other => panic!("unexpected decls: {other:?}"),
        }
    }

    #[test]
    fn all_variables_present_adds_no_block() {
        let index = DeclarationIndex::parse(
            "package cmd\n\nvar (\n\tenv, configFile string\n\trootCmd = 1\n)\n",
        )
        .unwrap();
        let (outcomes, decls) = run(&VariablesStep, &index);
        assert!(outcomes.iter().all(|o| o.action == Action::Kept));
        assert!(decls.is_empty());
    }

    #[test]
    fn existing_function_is_kept() {
        let index = DeclarationIndex::parse("package cmd\n\nfunc Execute() {}\n").unwrap();
        let (outcomes, decls) = run(&ExecuteFuncStep, &index);
        assert_eq!(outcomes[0].action, Action::Kept);
        assert!(decls.is_empty());
    }

    #[test]
    fn method_with_same_name_does_not_count() {
        let index =
            DeclarationIndex::parse("package cmd\n\ntype T struct{}\n\nfunc (T) Execute() {}\n")
                .unwrap();
        let (outcomes, decls) = run(&ExecuteFuncStep, &index);
        assert_eq!(outcomes[0].action, Action::Added);
        assert_eq!(decls.len(), 1);
    }

    #[test]
    fn constant_uses_app_name() {
        let (_, decls) = run(&ConstantsStep, &DeclarationIndex::empty());
        assert_eq!(
            decls,
            vec![Decl::Const(vec![ValueSpec::valued(APP_CONST, Expr::str("demo"))])]
        );
    }

    #[test]
    fn load_config_references_global_package() {
        let meta = meta();
        let registry = registry();
        let index = DeclarationIndex::empty();
        let ctx = StepContext::new(&meta, &index).unwrap();
        let mut builder = AstBuilder::new(&registry);
        ImportsStep.apply(&ctx, &mut builder).unwrap();
        LoadConfigFuncStep.apply(&ctx, &mut builder).unwrap();
        let imports: Vec<_> = builder
            .finish()
            .imports
            .into_iter()
            .map(|i| i.path)
            .collect();
        assert_eq!(
            imports,
            vec!["github.com/hdget/hdsdk", "example.com/demo/g", "github.com/hdget/hdutils"]
        );
    }

    #[test]
    fn missing_registry_entry_fails_the_step() {
        let meta = meta();
        let registry = ImportRegistry::new();
        let index = DeclarationIndex::empty();
        let ctx = StepContext::new(&meta, &index).unwrap();
        let mut builder = AstBuilder::new(&registry);
        assert_eq!(
            VariablesStep.apply(&ctx, &mut builder),
            Err(DomainError::UnresolvedImport {
                key: keys::CLI_FRAMEWORK.into()
            })
        );
    }
}
