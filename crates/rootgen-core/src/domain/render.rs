//! Go source printer following gofmt layout conventions.

use std::fmt::Write as _;

use crate::domain::ast::{Decl, Expr, FuncDecl, ImportSpec, Lit, Stmt, ValueSpec};

/// Print a complete file: package clause, import block, declarations.
pub fn print_file(package: &str, imports: &[ImportSpec], decls: &[Decl]) -> String {
    let mut out = format!("package {package}\n");
    if !imports.is_empty() {
        out.push('\n');
        out.push_str(&print_import_block(imports));
        out.push('\n');
    }
    for decl in decls {
        out.push('\n');
        out.push_str(&print_decl(decl));
        out.push('\n');
    }
    out
}

/// `import ( ... )` with standard-library paths first, each group sorted.
pub fn print_import_block(imports: &[ImportSpec]) -> String {
    let (mut std, mut third): (Vec<&ImportSpec>, Vec<&ImportSpec>) =
        imports.iter().partition(|i| is_std_path(&i.path));
    std.sort();
    third.sort();

    let mut out = String::from("import (\n");
    for spec in &std {
        let _ = writeln!(out, "\t{}", print_import_spec(spec));
    }
    if !std.is_empty() && !third.is_empty() {
        out.push('\n');
    }
    for spec in &third {
        let _ = writeln!(out, "\t{}", print_import_spec(spec));
    }
    out.push(')');
    out
}

/// One import spec without indentation, e.g. `g "example.com/app/g"`.
pub fn print_import_spec(spec: &ImportSpec) -> String {
    match &spec.alias {
        Some(alias) => format!("{alias} {}", quote(&spec.path)),
        None => quote(&spec.path),
    }
}

/// Standard-library import paths have no dot in their first element.
pub fn is_std_path(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

pub fn print_decl(decl: &Decl) -> String {
    match decl {
        Decl::Const(specs) => value_block("const", specs),
        Decl::Var(specs) => value_block("var", specs),
        Decl::Func(func) => func_decl(func),
    }
}

// ── Declarations ──────────────────────────────────────────────────────────────

fn value_block(keyword: &str, specs: &[ValueSpec]) -> String {
    let width = specs.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = format!("{keyword} (\n");
    for spec in specs {
        out.push('\t');
        out.push_str(&spec.name);
        if spec.ty.is_some() || spec.value.is_some() {
            out.push_str(&" ".repeat(width - spec.name.len() + 1));
        }
        if let Some(ty) = &spec.ty {
            out.push_str(&expr(ty, 1));
            if spec.value.is_some() {
                out.push(' ');
            }
        }
        if let Some(value) = &spec.value {
            out.push_str("= ");
            out.push_str(&expr(value, 1));
        }
        out.push('\n');
    }
    out.push(')');
    out
}

fn func_decl(func: &FuncDecl) -> String {
    let mut out = format!("func {}() {{\n", func.name);
    out.push_str(&block(&func.body, 1));
    out.push('}');
    out
}

// ── Statements ────────────────────────────────────────────────────────────────

fn block(stmts: &[Stmt], indent: usize) -> String {
    let mut out = String::new();
    for s in stmts {
        match s {
            Stmt::Blank => out.push('\n'),
            _ => {
                out.push_str(&tabs(indent));
                out.push_str(&stmt(s, indent));
                out.push('\n');
            }
        }
    }
    out
}

fn stmt(s: &Stmt, indent: usize) -> String {
    match s {
        Stmt::Expr(e) => expr(e, indent),
        Stmt::Define(names, value) => format!("{} := {}", names.join(", "), expr(value, indent)),
        Stmt::If { init, cond, body } => {
            let mut out = String::from("if ");
            if let Some(init) = init {
                out.push_str(&stmt(init, indent));
                out.push_str("; ");
            }
            out.push_str(&expr(cond, indent));
            out.push_str(" {\n");
            out.push_str(&block(body, indent + 1));
            out.push_str(&tabs(indent));
            out.push('}');
            out
        }
        Stmt::Defer(e) => format!("defer {}", expr(e, indent)),
        Stmt::Blank => String::new(),
    }
}

// ── Expressions ───────────────────────────────────────────────────────────────

/// Render an expression starting at the current column; continuation lines
/// of composites and function literals are indented relative to `indent`.
fn expr(e: &Expr, indent: usize) -> String {
    match e {
        Expr::Ident(name) => name.clone(),
        Expr::Qual { package, name } => format!("{package}.{name}"),
        Expr::Lit(Lit::Str(s)) => quote(s),
        Expr::Lit(Lit::Int(i)) => i.to_string(),
        Expr::Nil => "nil".to_string(),
        Expr::Selector(x, field) => format!("{}.{field}", expr(x, indent)),
        Expr::Call(func, args) => format!(
            "{}({})",
            expr(func, indent),
            args.iter()
                .map(|a| expr(a, indent))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Expr::Unary(op, x) => format!("{op}{}", expr(x, indent)),
        Expr::Binary(l, op, r) => format!("{} {op} {}", expr(l, indent), expr(r, indent)),
        Expr::Composite { ty, fields } if fields.is_empty() => format!("{}{{}}", expr(ty, indent)),
        Expr::Composite { ty, fields } => {
            let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            let mut out = format!("{}{{\n", expr(ty, indent));
            for (key, value) in fields {
                let _ = writeln!(
                    out,
                    "{}{key}:{}{},",
                    tabs(indent + 1),
                    " ".repeat(width - key.len() + 1),
                    expr(value, indent + 1)
                );
            }
            out.push_str(&tabs(indent));
            out.push('}');
            out
        }
        Expr::FuncLit(body) if body.is_empty() => "func() {}".to_string(),
        Expr::FuncLit(body) => format!("func() {{\n{}{}}}", block(body, indent + 1), tabs(indent)),
    }
}

fn tabs(n: usize) -> String {
    "\t".repeat(n)
}

/// Go interpreted string literal for `s`, escaped like `strconv.Quote`.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if c.is_control() && (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() || c == '\u{feff}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
