use std::fmt::Write as _;
use std::sync::Arc;

use crate::model::type_name::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No explicit keyword (package-private). Also the result of any
    /// unrecognized visibility string from a dialog row.
    #[default]
    Package,
}

impl Visibility {
    pub fn parse(s: &str) -> Self {
        match s {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            _ => Self::Package,
        }
    }

    fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Private => Some("private"),
            Self::Package => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
}

impl Modifiers {
    /// Getter-invocation locals carry no modifiers at all.
    pub fn none() -> Self {
        Self::default()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if let Some(kw) = self.visibility.keyword() {
            out.push_str(kw);
        }
        for (set, kw) in [
            (self.is_static, "static"),
            (self.is_final, "final"),
            (self.is_transient, "transient"),
            (self.is_volatile, "volatile"),
        ] {
            if set {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(kw);
            }
        }
        out
    }
}

/// Initializer expressions the synthesizer can produce. Identifiers refer to
/// in-scope values, literals cover the canonical per-kind defaults, and
/// getter calls are the `owner.method(args…)` member-select invocations.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Arc<str>),
    Literal(&'static str),
    /// Free-form initializer text supplied by a dialog row.
    Verbatim(String),
    GetterCall {
        owner: Arc<str>,
        method: Arc<str>,
        args: Vec<Expression>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<Arc<str>>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn render(&self) -> String {
        match self {
            Self::Identifier(name) => name.to_string(),
            Self::Literal(text) => (*text).to_string(),
            Self::Verbatim(text) => text.clone(),
            Self::GetterCall {
                owner,
                method,
                args,
            } => {
                let rendered: Vec<String> = args.iter().map(Expression::render).collect();
                format!("{}.{}({})", owner, method, rendered.join(", "))
            }
        }
    }
}

/// One synthesized declaration: a local with a getter-invocation initializer,
/// or a field with modifiers. Rendering produces a single source line without
/// indentation; the rewriter owns layout.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub modifiers: Modifiers,
    pub ty: TypeName,
    pub name: String,
    pub init: Option<Expression>,
}

impl Declaration {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let modifiers = self.modifiers.render();
        if !modifiers.is_empty() {
            out.push_str(&modifiers);
            out.push(' ');
        }
        let _ = write!(out, "{} {}", self.ty, self.name);
        if let Some(init) = &self.init {
            let _ = write!(out, " = {}", init.render());
        }
        out.push(';');
        out
    }
}
