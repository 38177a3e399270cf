use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::model::type_name::TypeName;

/// Where a class summary came from. Summaries are replaced wholesale per
/// origin when a document changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassOrigin {
    SourceFile(Arc<str>),
    Builtin,
}

#[derive(Debug, Clone)]
pub struct ClassSummary {
    /// Simple name, "Foo".
    pub name: Arc<str>,
    /// Dotted qualified name, "com.example.Foo"; equals `name` when the file
    /// has no package declaration.
    pub qualified: Arc<str>,
    pub package: Option<Arc<str>>,
    /// Supertype as written in source ("Bar" or "com.example.Bar").
    pub super_name: Option<Arc<str>>,
    pub interfaces: Vec<Arc<str>>,
    pub methods: Vec<MethodSig>,
    pub fields: Vec<FieldSig>,
    pub origin: ClassOrigin,
}

#[derive(Debug, Clone)]
pub struct MethodSig {
    pub name: Arc<str>,
    pub return_type: TypeName,
    pub params: Vec<ParamSig>,
    pub is_public: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct ParamSig {
    pub name: Arc<str>,
    pub ty: TypeName,
}

#[derive(Debug, Clone)]
pub struct FieldSig {
    pub name: Arc<str>,
    pub ty: TypeName,
    pub is_static: bool,
}

/// Workspace-level class table answering the read-path queries the
/// synthesizer needs: method lookup on an owner's type, same-type and
/// assignability checks.
pub struct TypeIndex {
    by_qualified: HashMap<Arc<str>, Arc<ClassSummary>>,
    by_simple: HashMap<Arc<str>, Vec<Arc<str>>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self {
            by_qualified: HashMap::new(),
            by_simple: HashMap::new(),
        }
    }

    pub fn add_classes(&mut self, classes: Vec<ClassSummary>) {
        for class in classes {
            let class = Arc::new(class);
            self.by_simple
                .entry(Arc::clone(&class.name))
                .or_default()
                .push(Arc::clone(&class.qualified));
            self.by_qualified
                .insert(Arc::clone(&class.qualified), class);
        }
    }

    /// Replace every summary that came from `origin` with `classes`.
    pub fn update_source(&mut self, origin: ClassOrigin, classes: Vec<ClassSummary>) {
        let stale: Vec<Arc<str>> = self
            .by_qualified
            .values()
            .filter(|c| c.origin == origin)
            .map(|c| Arc::clone(&c.qualified))
            .collect();
        for qualified in stale {
            if let Some(removed) = self.by_qualified.remove(&qualified) {
                if let Some(entries) = self.by_simple.get_mut(&removed.name) {
                    entries.retain(|q| *q != qualified);
                }
            }
        }
        self.add_classes(classes);
    }

    /// Exact qualified lookup, falling back to the first simple-name match.
    pub fn resolve(&self, name: &str) -> Option<Arc<ClassSummary>> {
        if let Some(c) = self.by_qualified.get(name) {
            return Some(Arc::clone(c));
        }
        let simple = name.rsplit('.').next().unwrap_or(name);
        self.by_simple
            .get(simple)
            .and_then(|qs| qs.first())
            .and_then(|q| self.by_qualified.get(q))
            .cloned()
    }

    /// The class itself, then supertypes and interfaces in BFS order.
    /// Names not in the index are silently skipped.
    pub fn mro(&self, name: &str) -> Vec<Arc<ClassSummary>> {
        let mut result = Vec::new();
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut queue: VecDeque<Arc<str>> = VecDeque::new();

        queue.push_back(Arc::from(name));
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue; // cycle guard
            }
            let class = match self.resolve(&current) {
                Some(c) => c,
                None => continue,
            };
            if let Some(super_name) = &class.super_name {
                if !super_name.is_empty() {
                    queue.push_back(Arc::clone(super_name));
                }
            }
            for iface in &class.interfaces {
                if !iface.is_empty() {
                    queue.push_back(Arc::clone(iface));
                }
            }
            result.push(class);
        }
        result
    }

    /// Methods declared on the type of the selected owner, walking the
    /// supertype chain the way member lookup does.
    pub fn methods_of(&self, ty: &TypeName) -> Vec<MethodSig> {
        let mut result: Vec<MethodSig> = Vec::new();
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        for class in self.mro(ty.base()) {
            for method in &class.methods {
                if seen.insert(Arc::clone(&method.name)) {
                    result.push(method.clone());
                }
            }
        }
        result
    }

    /// Same type up to primitive/boxed equivalence, checked in both
    /// directions.
    pub fn is_same_type(&self, a: &TypeName, b: &TypeName) -> bool {
        if a.names_match(b) {
            return true;
        }
        if let Some(boxed) = a.boxed() {
            if boxed.names_match(b) {
                return true;
            }
        }
        if let Some(boxed) = b.boxed() {
            if boxed.names_match(a) {
                return true;
            }
        }
        false
    }

    /// Can a value of type `from` be used where `to` is expected?
    /// Covers identity, boxing both directions, primitive widening, and a
    /// supertype walk over indexed classes. `java.lang.Object` accepts any
    /// reference type.
    pub fn is_assignable(&self, from: &TypeName, to: &TypeName) -> bool {
        if self.is_same_type(from, to) {
            return true;
        }
        match (from.primitive_kind(), to.primitive_kind()) {
            (Some(f), Some(t)) => return f.widens_to(t),
            (Some(_), None) | (None, Some(_)) => return false, // boxing already handled
            (None, None) => {}
        }
        if from.is_array() || to.is_array() {
            // Array covariance is out of reach without full JLS types; only
            // Object absorbs arrays here.
            return to.simple_name() == "Object";
        }
        if to.simple_name() == "Object" {
            return true;
        }
        self.mro(from.base())
            .iter()
            .skip(1)
            .any(|super_class| TypeName::new(Arc::clone(&super_class.qualified)).names_match(to))
    }
}

impl Default for TypeIndex {
    fn default() -> Self {
        Self::new()
    }
}
