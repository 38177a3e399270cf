use std::sync::Arc;

/// A Java type as written in source:
/// - Primitives: "int", "boolean"
/// - Objects: "String", "java.lang.String"
/// - Arrays: "String[]", "int[][]"
/// - With generics: "List<String>"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(pub(crate) Arc<str>);

/// The eight primitive kinds. Drives default-literal selection and the
/// widening/boxing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "char" => Some(Self::Char),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// The fully qualified wrapper class.
    pub fn boxed_name(&self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Char => "java.lang.Character",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    /// Widening primitive conversions (JLS 5.1.2). `char` widens to the
    /// integral kinds from `int` upward; `boolean` widens to nothing.
    pub fn widens_to(&self, target: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        if *self == target {
            return true;
        }
        match self {
            Boolean => false,
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short => matches!(target, Int | Long | Float | Double),
            Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Double => false,
        }
    }
}

impl TypeName {
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        TypeName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    pub fn is_void(&self) -> bool {
        self.0.as_ref() == "void"
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_str(&self.0)
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive_kind().is_some()
    }

    /// Remove generic parameters: "List<String>" → "List".
    pub fn base(&self) -> &str {
        self.0.split('<').next().unwrap_or(&self.0)
    }

    /// "java.lang.String" → "String"; already-simple names pass through.
    pub fn simple_name(&self) -> &str {
        let base = self.base();
        base.rsplit('.').next().unwrap_or(base)
    }

    pub fn is_qualified(&self) -> bool {
        self.base().contains('.')
    }

    /// The wrapper type for a primitive, or None for reference types.
    pub fn boxed(&self) -> Option<TypeName> {
        self.primitive_kind().map(|k| TypeName::new(k.boxed_name()))
    }

    /// Erased source-level equality: qualified names must match exactly,
    /// but a simple name matches a qualified one with the same last segment.
    pub fn names_match(&self, other: &TypeName) -> bool {
        if self.base() == other.base() {
            return true;
        }
        match (self.is_qualified(), other.is_qualified()) {
            (true, false) | (false, true) => self.simple_name() == other.simple_name(),
            _ => false,
        }
    }

    pub fn to_arc(&self) -> Arc<str> {
        self.0.clone()
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        TypeName(Arc::from(s))
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        TypeName(Arc::from(s.as_str()))
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
