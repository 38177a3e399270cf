use std::sync::Arc;

use tracing::debug;
use tree_sitter::{Node, Parser, Query, Tree};

use crate::generate::insert_point::{Container, Span};
use crate::language::ts_utils::{capture_text, find_deepest_by_kind, is_comment_kind, run_query};
use crate::model::candidate::{CandidateKind, CandidateValue};
use crate::model::index::{ClassOrigin, ClassSummary, FieldSig, MethodSig, ParamSig};
use crate::model::type_name::TypeName;

/// Constructor bodies are their own node kind but behave as statement blocks
/// for insertion purposes.
const BLOCK_KINDS: &[&str] = &["block", "constructor_body"];
const METHOD_KINDS: &[&str] = &["method_declaration", "constructor_declaration"];

pub fn make_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .expect("tree-sitter-java grammar must load");
    parser
}

/// A parsed Java document. Read-path queries for one invocation run against
/// a single parse; the tree is never mutated.
pub struct JavaSource {
    source: Arc<str>,
    tree: Tree,
}

impl JavaSource {
    pub fn parse(source: impl Into<Arc<str>>) -> Option<Self> {
        let source = source.into();
        let tree = make_parser().parse(source.as_ref(), None)?;
        Some(Self { source, tree })
    }

    pub fn text(&self) -> &str {
        &self.source
    }

    fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.bytes()).unwrap_or("")
    }

    /// The innermost statement block containing the caret, with sibling
    /// statement spans. None when the caret is outside every block; the
    /// caller treats that as a quiet no-op.
    pub fn enclosing_block(&self, caret: usize) -> Option<Container> {
        let node = find_deepest_by_kind(self.root(), caret, BLOCK_KINDS)?;
        Some(Container::Block {
            span: Span::new(node.start_byte(), node.end_byte()),
            siblings: self.sibling_spans(node),
        })
    }

    /// The innermost class body containing the caret, with member spans.
    pub fn enclosing_class_body(&self, caret: usize) -> Option<Container> {
        let node = find_deepest_by_kind(self.root(), caret, &["class_body"])?;
        Some(Container::ClassBody {
            span: Span::new(node.start_byte(), node.end_byte()),
            siblings: self.sibling_spans(node),
        })
    }

    fn sibling_spans(&self, container: Node) -> Vec<Span> {
        let mut cursor = container.walk();
        container
            .named_children(&mut cursor)
            .filter(|n| !is_comment_kind(n.kind()))
            .map(|n| Span::new(n.start_byte(), n.end_byte()))
            .collect()
    }

    /// Fields, parameters, and locals visible at the caret. Locals count
    /// only when declared before the caret. The result is unsorted; the
    /// session sorts it exactly once.
    pub fn collect_candidates(&self, caret: usize) -> Vec<CandidateValue> {
        let mut pool = Vec::new();

        if let Some(class_body) = find_deepest_by_kind(self.root(), caret, &["class_body"]) {
            self.collect_fields(class_body, &mut pool);
        }
        if let Some(method) = find_deepest_by_kind(self.root(), caret, METHOD_KINDS) {
            self.collect_params(method, &mut pool);
            self.collect_locals(method, caret, &mut pool);
        }
        pool
    }

    fn collect_fields(&self, class_body: Node, pool: &mut Vec<CandidateValue>) {
        let mut cursor = class_body.walk();
        for child in class_body.children(&mut cursor) {
            if child.kind() != "field_declaration" {
                continue;
            }
            let Some(ty) = child.child_by_field_name("type") else {
                continue;
            };
            let ty = TypeName::from(self.node_text(ty));
            let mut fc = child.walk();
            for declarator in child.children(&mut fc) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    pool.push(CandidateValue::new(
                        self.node_text(name),
                        ty.clone(),
                        CandidateKind::Field,
                    ));
                }
            }
        }
    }

    fn collect_params(&self, method: Node, pool: &mut Vec<CandidateValue>) {
        let query_src = r#"(formal_parameter type: (_) @type name: (identifier) @name)"#;
        let q = match Query::new(&tree_sitter_java::LANGUAGE.into(), query_src) {
            Ok(q) => q,
            Err(e) => {
                debug!("parameter query error: {}", e);
                return;
            }
        };
        let type_idx = q.capture_index_for_name("type").unwrap();
        let name_idx = q.capture_index_for_name("name").unwrap();
        for captures in run_query(&q, method, self.bytes(), None) {
            let Some(ty) = capture_text(&captures, type_idx, self.bytes()) else {
                continue;
            };
            let Some(name) = capture_text(&captures, name_idx, self.bytes()) else {
                continue;
            };
            pool.push(CandidateValue::new(name, ty, CandidateKind::Parameter));
        }
    }

    fn collect_locals(&self, method: Node, caret: usize, pool: &mut Vec<CandidateValue>) {
        let query_src = r#"
            (local_variable_declaration
                type: (_) @type
                declarator: (variable_declarator
                    name: (identifier) @name))
        "#;
        let q = match Query::new(&tree_sitter_java::LANGUAGE.into(), query_src) {
            Ok(q) => q,
            Err(e) => {
                debug!("local var query error: {}", e);
                return;
            }
        };
        let type_idx = q.capture_index_for_name("type").unwrap();
        let name_idx = q.capture_index_for_name("name").unwrap();
        for captures in run_query(&q, method, self.bytes(), None) {
            let Some(&(_, ty_node)) = captures.iter().find(|(idx, _)| *idx == type_idx) else {
                continue;
            };
            if ty_node.start_byte() >= caret {
                continue;
            }
            let Some(name) = capture_text(&captures, name_idx, self.bytes()) else {
                continue;
            };
            let ty = self.node_text(ty_node);
            pool.push(CandidateValue::new(name, ty, CandidateKind::Local));
        }
    }

    /// Summaries of every class declared in this document, for the type
    /// index. `uri` becomes the origin so a later edit replaces them.
    pub fn class_summaries(&self, uri: &str) -> Vec<ClassSummary> {
        let package = self.package_name();
        let origin = ClassOrigin::SourceFile(Arc::from(uri));
        let mut classes = Vec::new();
        self.collect_classes(self.root(), &package, &origin, &mut classes);
        classes
    }

    fn package_name(&self) -> Option<Arc<str>> {
        let mut cursor = self.root().walk();
        self.root()
            .children(&mut cursor)
            .find(|n| n.kind() == "package_declaration")
            .and_then(|n| {
                let mut pc = n.walk();
                n.named_children(&mut pc)
                    .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
                    .map(|c| Arc::from(self.node_text(c)))
            })
    }

    fn collect_classes(
        &self,
        node: Node,
        package: &Option<Arc<str>>,
        origin: &ClassOrigin,
        classes: &mut Vec<ClassSummary>,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "class_declaration" {
                if let Some(summary) = self.summarize_class(child, package, origin) {
                    classes.push(summary);
                }
            }
            self.collect_classes(child, package, origin, classes);
        }
    }

    fn summarize_class(
        &self,
        class_node: Node,
        package: &Option<Arc<str>>,
        origin: &ClassOrigin,
    ) -> Option<ClassSummary> {
        let name: Arc<str> = Arc::from(self.node_text(class_node.child_by_field_name("name")?));
        let qualified: Arc<str> = match package {
            Some(pkg) => Arc::from(format!("{}.{}", pkg, name).as_str()),
            None => Arc::clone(&name),
        };
        let super_name = class_node.child_by_field_name("superclass").and_then(|n| {
            let mut sc = n.walk();
            n.named_children(&mut sc)
                .next()
                .map(|t| Arc::from(self.node_text(t)))
        });
        let interfaces = class_node
            .child_by_field_name("interfaces")
            .map(|n| self.interface_names(n))
            .unwrap_or_default();

        let mut methods = Vec::new();
        let mut fields = Vec::new();
        if let Some(body) = class_node.child_by_field_name("body") {
            let mut bc = body.walk();
            for member in body.children(&mut bc) {
                match member.kind() {
                    "method_declaration" => {
                        if let Some(m) = self.summarize_method(member) {
                            methods.push(m);
                        }
                    }
                    "field_declaration" => {
                        fields.extend(self.summarize_fields(member));
                    }
                    _ => {}
                }
            }
        }

        Some(ClassSummary {
            name,
            qualified,
            package: package.clone(),
            super_name,
            interfaces,
            methods,
            fields,
            origin: origin.clone(),
        })
    }

    fn interface_names(&self, super_interfaces: Node) -> Vec<Arc<str>> {
        let mut cursor = super_interfaces.walk();
        let Some(type_list) = super_interfaces
            .named_children(&mut cursor)
            .find(|n| n.kind() == "type_list")
        else {
            return vec![];
        };
        let mut tc = type_list.walk();
        type_list
            .named_children(&mut tc)
            .map(|t| Arc::from(self.node_text(t)))
            .collect()
    }

    fn summarize_method(&self, node: Node) -> Option<MethodSig> {
        let name: Arc<str> = Arc::from(self.node_text(node.child_by_field_name("name")?));
        let return_type = TypeName::from(self.node_text(node.child_by_field_name("type")?));
        let (is_public, is_static) = self.modifier_flags(node);
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.param_sigs(p))
            .unwrap_or_default();
        Some(MethodSig {
            name,
            return_type,
            params,
            is_public,
            is_static,
        })
    }

    fn param_sigs(&self, formal_parameters: Node) -> Vec<ParamSig> {
        let mut cursor = formal_parameters.walk();
        formal_parameters
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "formal_parameter")
            .filter_map(|p| {
                let ty = p.child_by_field_name("type")?;
                let name = p.child_by_field_name("name")?;
                Some(ParamSig {
                    name: Arc::from(self.node_text(name)),
                    ty: TypeName::from(self.node_text(ty)),
                })
            })
            .collect()
    }

    fn summarize_fields(&self, node: Node) -> Vec<FieldSig> {
        let Some(ty) = node.child_by_field_name("type") else {
            return vec![];
        };
        let ty = TypeName::from(self.node_text(ty));
        let (_, is_static) = self.modifier_flags(node);
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|n| n.kind() == "variable_declarator")
            .filter_map(|d| {
                d.child_by_field_name("name").map(|n| FieldSig {
                    name: Arc::from(self.node_text(n)),
                    ty: ty.clone(),
                    is_static,
                })
            })
            .collect()
    }

    fn modifier_flags(&self, node: Node) -> (bool, bool) {
        let mut cursor = node.walk();
        let text = node
            .children(&mut cursor)
            .find(|n| n.kind() == "modifiers")
            .map(|n| self.node_text(n))
            .unwrap_or("");
        (text.contains("public"), text.contains("static"))
    }
}

/// Parse ad hoc type text the way a user would write it in a declaration:
/// first as the type of a one-line local variable declaration, then as a
/// field type. Anything that still fails to parse cleanly yields None.
pub fn parse_type_text(text: &str) -> Option<TypeName> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for wrapper in [
        format!("class __T {{ void __m() {{ {} __v; }} }}", text),
        format!("class __T {{ {} __v; }}", text),
    ] {
        if let Some(ty) = declared_type_of(&wrapper) {
            if ty == text {
                return Some(TypeName::from(ty.as_str()));
            }
        }
    }
    debug!(text, "ad hoc type text did not parse");
    None
}

/// The text of the type node in the first variable/field declaration found,
/// provided the surrounding parse is error-free.
fn declared_type_of(wrapper: &str) -> Option<String> {
    let tree = make_parser().parse(wrapper, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    let query_src = r#"
        [
            (local_variable_declaration type: (_) @type)
            (field_declaration type: (_) @type)
        ]
    "#;
    let q = Query::new(&tree_sitter_java::LANGUAGE.into(), query_src).ok()?;
    let type_idx = q.capture_index_for_name("type")?;
    let matches = run_query(&q, tree.root_node(), wrapper.as_bytes(), None);
    let captures = matches.first()?;
    capture_text(captures, type_idx, wrapper.as_bytes()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const FIXTURE: &str = indoc! {r#"
        package com.example;

        public class Person {
            private int count;
            private boolean active;

            public String getName(String key) {
                int local = 1;
                String after = "z";
                return null;
            }
        }
    "#};

    #[test]
    fn test_enclosing_block_inside_method() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("String after").unwrap();
        let container = src.enclosing_block(caret).unwrap();
        assert!(!container.is_class_body());
        // three statements: int local, String after, return
        assert_eq!(container.siblings().len(), 3);
    }

    #[test]
    fn test_enclosing_block_outside_any_block_is_none() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("private int count").unwrap();
        assert!(src.enclosing_block(caret).is_none());
    }

    #[test]
    fn test_enclosing_class_body_members() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("private boolean").unwrap();
        let container = src.enclosing_class_body(caret).unwrap();
        assert!(container.is_class_body());
        // two fields + one method
        assert_eq!(container.siblings().len(), 3);
    }

    #[test]
    fn test_sibling_spans_are_ordered() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("int local").unwrap();
        let container = src.enclosing_block(caret).unwrap();
        let spans = container.siblings();
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_collect_candidates_fields_params_locals() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("String after").unwrap();
        let pool = src.collect_candidates(caret);
        let names: Vec<&str> = pool.iter().map(|c| c.name.as_ref()).collect();
        assert!(names.contains(&"count"), "{:?}", names);
        assert!(names.contains(&"active"), "{:?}", names);
        assert!(names.contains(&"key"), "{:?}", names);
        assert!(names.contains(&"local"), "{:?}", names);
    }

    #[test]
    fn test_locals_after_caret_excluded() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let caret = FIXTURE.find("int local").unwrap();
        let pool = src.collect_candidates(caret);
        let names: Vec<&str> = pool.iter().map(|c| c.name.as_ref()).collect();
        assert!(!names.contains(&"after"), "{:?}", names);
        assert!(!names.contains(&"local"), "{:?}", names);
    }

    #[test]
    fn test_class_summaries_extracts_signature_details() {
        let src = JavaSource::parse(FIXTURE).unwrap();
        let classes = src.class_summaries("file:///Person.java");
        assert_eq!(classes.len(), 1);
        let person = &classes[0];
        assert_eq!(person.qualified.as_ref(), "com.example.Person");
        assert_eq!(person.fields.len(), 2);
        assert_eq!(person.methods.len(), 1);
        let getter = &person.methods[0];
        assert!(getter.is_public);
        assert!(!getter.is_static);
        assert_eq!(getter.return_type.as_str(), "String");
        assert_eq!(getter.params.len(), 1);
        assert_eq!(getter.params[0].name.as_ref(), "key");
    }

    #[test]
    fn test_class_summaries_super_and_interfaces() {
        let src = JavaSource::parse(
            "class Child extends Parent implements Runnable, Closeable { }",
        )
        .unwrap();
        let classes = src.class_summaries("file:///Child.java");
        assert_eq!(classes[0].super_name.as_deref(), Some("Parent"));
        let ifaces: Vec<&str> = classes[0].interfaces.iter().map(|i| i.as_ref()).collect();
        assert_eq!(ifaces, vec!["Runnable", "Closeable"]);
    }

    #[test]
    fn test_nested_class_is_summarized() {
        let src = JavaSource::parse("class Outer { class Inner { } }").unwrap();
        let classes = src.class_summaries("file:///Outer.java");
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_ref()).collect();
        assert!(names.contains(&"Outer") && names.contains(&"Inner"), "{:?}", names);
    }

    #[test]
    fn test_constructor_body_counts_as_block() {
        let src = JavaSource::parse(
            "class A { A() { int x = 1; } }",
        )
        .unwrap();
        let source = "class A { A() { int x = 1; } }";
        let caret = source.find("int x").unwrap();
        assert!(src.enclosing_block(caret).is_some());
    }

    #[test]
    fn test_parse_type_text_accepts_types() {
        assert_eq!(parse_type_text("int").unwrap().as_str(), "int");
        assert_eq!(parse_type_text(" String ").unwrap().as_str(), "String");
        assert_eq!(
            parse_type_text("java.util.List<String>").unwrap().as_str(),
            "java.util.List<String>"
        );
        assert_eq!(parse_type_text("int[]").unwrap().as_str(), "int[]");
    }

    #[test]
    fn test_parse_type_text_rejects_non_types() {
        assert!(parse_type_text("").is_none());
        assert!(parse_type_text("not a type!!").is_none());
        assert!(parse_type_text("int x").is_none());
        assert!(parse_type_text("class").is_none());
    }
}
