//! AST builder: accumulates generated declarations and the imports they need.
//!
//! Steps never write import statements themselves. Asking the builder for a
//! qualified reference ([`AstBuilder::qual`]) records the import exactly once
//! and hands back an expression using the local package name visible in the
//! output file.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    ast::{Decl, Expr, FuncDecl, ImportSpec, ValueSpec},
    error::DomainError,
    registry::ImportRegistry,
};

/// How a step names the package it wants to reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageRef<'a> {
    /// Logical key resolved through the [`ImportRegistry`].
    Key(&'a str),
    /// Literal import path (standard library, the project's own packages).
    Path(&'a str),
}

/// Output of a builder run: new imports and declarations, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pending {
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl Pending {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.decls.is_empty()
    }
}

pub struct AstBuilder<'r> {
    registry: &'r ImportRegistry,
    preferred: BTreeMap<String, String>,
    bound: BTreeMap<String, String>,
    reserved: BTreeSet<String>,
    imports: Vec<ImportSpec>,
    decls: Vec<Decl>,
}

impl<'r> AstBuilder<'r> {
    pub fn new(registry: &'r ImportRegistry) -> Self {
        Self {
            registry,
            preferred: BTreeMap::new(),
            bound: BTreeMap::new(),
            reserved: BTreeSet::new(),
            imports: Vec::new(),
            decls: Vec::new(),
        }
    }

    /// Declare that `path` is already imported under `local` in the target
    /// file. References to it reuse that name and add no import.
    pub fn bind_import(&mut self, path: impl Into<String>, local: impl Into<String>) {
        self.bound.entry(path.into()).or_insert_with(|| local.into());
    }

    /// Keep `name` out of the import namespace; it is already declared at
    /// package scope in the target file.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Register the local name to use for `path` should it get imported.
    /// Registering alone adds nothing to the output.
    pub fn import_name(&mut self, path: impl Into<String>, name: impl Into<String>) {
        self.preferred.insert(path.into(), name.into());
    }

    /// Qualified reference `pkg.symbol`, recording the import on first use.
    pub fn qual(&mut self, package: PackageRef<'_>, symbol: &str) -> Result<Expr, DomainError> {
        let path = match package {
            PackageRef::Key(key) => self.registry.resolve(key)?.to_string(),
            PackageRef::Path(path) => path.to_string(),
        };
        let local = match self.bound.get(&path) {
            Some(local) => local.clone(),
            None => self.bind_new(path),
        };
        Ok(Expr::Qual {
            package: local,
            name: symbol.to_string(),
        })
    }

    fn bind_new(&mut self, path: String) -> String {
        let default = default_package_name(&path);
        let wanted = self
            .preferred
            .get(&path)
            .cloned()
            .unwrap_or_else(|| default.clone());

        let mut local = wanted.clone();
        let mut n = 2;
        while self.reserved.contains(&local) || self.bound.values().any(|taken| *taken == local) {
            local = format!("{wanted}{n}");
            n += 1;
        }

        self.imports.push(ImportSpec {
            alias: (local != default).then(|| local.clone()),
            path: path.clone(),
        });
        self.bound.insert(path, local.clone());
        local
    }

    pub fn add_const_block(&mut self, specs: Vec<ValueSpec>) {
        if !specs.is_empty() {
            self.decls.push(Decl::Const(specs));
        }
    }

    pub fn add_var_block(&mut self, specs: Vec<ValueSpec>) {
        if !specs.is_empty() {
            self.decls.push(Decl::Var(specs));
        }
    }

    pub fn add_function(&mut self, func: FuncDecl) {
        self.decls.push(Decl::Func(func));
    }

    pub fn finish(self) -> Pending {
        Pending {
            imports: self.imports,
            decls: self.decls,
        }
    }
}

/// Package name Go tooling assumes for an import path without an alias.
///
/// Takes the last path segment, skipping a trailing `vN` major-version
/// segment, strips a `go-` prefix or `-go` suffix and drops characters that
/// are not valid in identifiers.
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let mut last = segments.next().unwrap_or_default();
    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }
    let last = last.strip_prefix("go-").unwrap_or(last);
    let last = last.strip_suffix("-go").unwrap_or(last);
    let name: String = last
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    match name.chars().next() {
        Some(c) if !c.is_numeric() => name,
        _ => "pkg".to_string(),
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}
