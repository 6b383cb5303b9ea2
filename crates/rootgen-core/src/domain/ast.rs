//! Typed Go syntax values produced by the builder and consumed by the printer.
//!
//! Only the subset of Go needed for generated root files is modelled.
//! Qualified references are already resolved to the local package name that
//! will be visible in the output file.

/// Go expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// `package.Name` with `package` already resolved to a local name.
    Qual {
        package: String,
        name: String,
    },
    Lit(Lit),
    Nil,
    /// `x.field`
    Selector(Box<Expr>, String),
    Call(Box<Expr>, Vec<Expr>),
    /// Prefix operator such as `&` or `*`.
    Unary(&'static str, Box<Expr>),
    Binary(Box<Expr>, &'static str, Box<Expr>),
    /// `&T{Key: value, ...}` is `Unary("&", Composite { .. })`.
    Composite {
        ty: Box<Expr>,
        fields: Vec<(String, Expr)>,
    },
    /// Parameterless `func() { ... }`.
    FuncLit(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lit {
    Str(String),
    Int(i64),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Lit(Lit::Str(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::Lit(Lit::Int(value))
    }

    pub fn dot(self, field: impl Into<String>) -> Self {
        Self::Selector(Box::new(self), field.into())
    }

    pub fn call(self, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Call(Box::new(self), args.into_iter().collect())
    }

    pub fn addr_of(self) -> Self {
        Self::Unary("&", Box::new(self))
    }

    pub fn ne(self, rhs: Expr) -> Self {
        Self::Binary(Box::new(self), "!=", Box::new(rhs))
    }

    pub fn composite(self, fields: impl IntoIterator<Item = (String, Expr)>) -> Self {
        Self::Composite {
            ty: Box::new(self),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn func_lit(body: impl IntoIterator<Item = Stmt>) -> Self {
        Self::FuncLit(body.into_iter().collect())
    }
}

/// Go statement inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    /// `lhs := rhs`
    Define(Vec<String>, Expr),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Vec<Stmt>,
    },
    Defer(Expr),
    /// Empty line, for readability of generated bodies.
    Blank,
}

impl Stmt {
    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Self::Define(vec![name.into()], value)
    }

    pub fn if_init(init: Stmt, cond: Expr, body: impl IntoIterator<Item = Stmt>) -> Self {
        Self::If {
            init: Some(Box::new(init)),
            cond,
            body: body.into_iter().collect(),
        }
    }

    pub fn if_(cond: Expr, body: impl IntoIterator<Item = Stmt>) -> Self {
        Self::If {
            init: None,
            cond,
            body: body.into_iter().collect(),
        }
    }
}

/// `name type = value` inside a const or var block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub name: String,
    pub ty: Option<Expr>,
    pub value: Option<Expr>,
}

impl ValueSpec {
    pub fn typed(name: impl Into<String>, ty: Expr) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            value: None,
        }
    }

    pub fn valued(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            ty: None,
            value: Some(value),
        }
    }
}

/// Parameterless top-level function without results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub body: Vec<Stmt>,
}

impl FuncDecl {
    /// `func name() { body }`
    pub fn plain(name: impl Into<String>, body: impl IntoIterator<Item = Stmt>) -> Self {
        Self {
            name: name.into(),
            body: body.into_iter().collect(),
        }
    }
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Const(Vec<ValueSpec>),
    Var(Vec<ValueSpec>),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportSpec {
    pub path: String,
    /// Set only when the local name differs from the path's default name.
    pub alias: Option<String>,
}
