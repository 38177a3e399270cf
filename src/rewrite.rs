use tracing::debug;

use crate::generate::declaration::Declaration;
use crate::generate::insert_point::Container;

/// A single text insertion: the whole batch lands at one byte offset, so
/// applying it is atomic and everything outside the container is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub at: usize,
    pub text: String,
}

/// Lay out `declarations` as a contiguous run at `index` among the
/// container's siblings, preserving batch order. Returns None for an empty
/// batch. Indentation is taken from the anchor sibling's line; an empty
/// container indents one `indent_unit` past its opening brace.
pub fn splice_declarations(
    source: &str,
    container: &Container,
    index: usize,
    declarations: &[Declaration],
    indent_unit: &str,
) -> Option<Splice> {
    if declarations.is_empty() {
        return None;
    }
    let siblings = container.siblings();
    debug!(
        index,
        siblings = siblings.len(),
        count = declarations.len(),
        "splicing declarations"
    );

    let splice = if siblings.is_empty() {
        // Right after the opening brace, one level deeper than the brace's
        // line; the existing newline before `}` closes the block back out.
        let open = container.span().start;
        let base = line_indent_at(source, open);
        let inner = format!("{}{}", base, indent_unit);
        let mut text = String::new();
        for decl in declarations {
            text.push('\n');
            text.push_str(&inner);
            text.push_str(&decl.render());
        }
        Splice { at: open + 1, text }
    } else if index == 0 {
        // Before the first sibling, which already sits after its own
        // indentation; each declaration re-indents the following line.
        let anchor = siblings[0].start;
        let indent = line_indent_at(source, anchor);
        let mut text = String::new();
        for decl in declarations {
            text.push_str(&decl.render());
            text.push('\n');
            text.push_str(indent);
        }
        Splice { at: anchor, text }
    } else {
        // Directly after the previous sibling's end, before whatever follows
        // on that line, so the batch stays between indices even when two
        // statements share a line.
        let previous = siblings[index.min(siblings.len()) - 1];
        let indent = line_indent_at(source, previous.start);
        let mut text = String::new();
        for decl in declarations {
            text.push('\n');
            text.push_str(indent);
            text.push_str(&decl.render());
        }
        Splice {
            at: previous.end,
            text,
        }
    };
    Some(splice)
}

/// Leading whitespace of the line containing `offset`.
fn line_indent_at(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0);
    let line = &source[line_start..];
    let indent_len = line
        .char_indices()
        .find(|(_, c)| !matches!(c, ' ' | '\t'))
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..indent_len]
}

/// Apply a splice to the source text. The LSP path hands the edit to the
/// client instead; this is the local equivalent used by tests.
pub fn apply_splice(source: &str, splice: &Splice) -> String {
    let mut out = String::with_capacity(source.len() + splice.text.len());
    out.push_str(&source[..splice.at]);
    out.push_str(&splice.text);
    out.push_str(&source[splice.at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::declaration::{Expression, Modifiers, Visibility};
    use crate::generate::insert_point::resolve_insert_index;
    use crate::language::java::JavaSource;
    use crate::model::type_name::TypeName;
    use indoc::indoc;
    use std::sync::Arc;

    fn local(name: &str, owner: &str, method: &str, ty: &str) -> Declaration {
        Declaration {
            modifiers: Modifiers::none(),
            ty: TypeName::from(ty),
            name: name.to_string(),
            init: Some(Expression::GetterCall {
                owner: Arc::from(owner),
                method: Arc::from(method),
                args: vec![],
            }),
        }
    }

    #[test]
    fn test_splice_between_statements() {
        let src = indoc! {r#"
            class A {
                void m(Person p) {
                    int a = 1;
                    int b = 2;
                }
            }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let caret = src.find("int b").unwrap() - 1;
        let container = java.enclosing_block(caret).unwrap();
        let index = resolve_insert_index(container.siblings(), caret);
        assert_eq!(index, 1);
        let splice = splice_declarations(
            src,
            &container,
            index,
            &[local("name", "p", "getName", "String")],
            "    ",
        )
        .unwrap();
        let result = apply_splice(src, &splice);
        let expected = indoc! {r#"
            class A {
                void m(Person p) {
                    int a = 1;
                    String name = p.getName();
                    int b = 2;
                }
            }
        "#};
        assert_eq!(result, expected);
    }

    #[test]
    fn test_splice_before_first_statement() {
        let src = indoc! {r#"
            class A {
                void m(Person p) {
                    int a = 1;
                }
            }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let block_open = src.find("void m").unwrap();
        let container = java.enclosing_block(src.find("int a").unwrap()).unwrap();
        // Caret before the statement start
        let caret = src[block_open..].find('{').unwrap() + block_open + 1;
        let index = resolve_insert_index(container.siblings(), caret);
        assert_eq!(index, 0);
        let splice = splice_declarations(
            src,
            &container,
            index,
            &[local("name", "p", "getName", "String")],
            "    ",
        )
        .unwrap();
        let result = apply_splice(src, &splice);
        assert!(
            result.contains("        String name = p.getName();\n        int a = 1;"),
            "{}",
            result
        );
    }

    #[test]
    fn test_splice_into_empty_block() {
        let src = indoc! {r#"
            class A {
                void m(Person p) {
                }
            }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let caret = src.find("{\n    }").unwrap() + 1;
        let container = java.enclosing_block(caret).unwrap();
        assert!(container.siblings().is_empty());
        let splice =
            splice_declarations(
                src,
                &container,
                0,
                &[local("name", "p", "getName", "String")],
                "    ",
            )
            .unwrap();
        let result = apply_splice(src, &splice);
        let expected = indoc! {r#"
            class A {
                void m(Person p) {
                    String name = p.getName();
                }
            }
        "#};
        assert_eq!(result, expected);
    }

    #[test]
    fn test_splice_field_between_members() {
        let src = indoc! {r#"
            class A {
                int count;
                boolean active;
            }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let caret = src.find("boolean").unwrap() - 1;
        let container = java.enclosing_class_body(caret).unwrap();
        let index = resolve_insert_index(container.siblings(), caret);
        assert_eq!(index, 1);
        let field = Declaration {
            modifiers: Modifiers {
                visibility: Visibility::Private,
                is_final: true,
                ..Modifiers::default()
            },
            ty: TypeName::from("String"),
            name: "label".to_string(),
            init: Some(Expression::Verbatim("\"\"".to_string())),
        };
        let splice = splice_declarations(src, &container, index, &[field], "    ").unwrap();
        let result = apply_splice(src, &splice);
        let expected = indoc! {r#"
            class A {
                int count;
                private final String label = "";
                boolean active;
            }
        "#};
        assert_eq!(result, expected);
    }

    #[test]
    fn test_batch_preserves_order() {
        let src = indoc! {r#"
            class A {
                void m(Person p) {
                    int a = 1;
                }
            }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let caret = src.find("1;").unwrap() + 2;
        let container = java.enclosing_block(caret).unwrap();
        let index = resolve_insert_index(container.siblings(), caret);
        let splice = splice_declarations(
            src,
            &container,
            index,
            &[
                local("name", "p", "getName", "String"),
                local("age", "p", "getAge", "int"),
            ],
            "    ",
        )
        .unwrap();
        let result = apply_splice(src, &splice);
        let name_at = result.find("String name").unwrap();
        let age_at = result.find("int age").unwrap();
        assert!(name_at < age_at);
    }

    #[test]
    fn test_empty_batch_is_no_edit() {
        let src = "class A { void m() { } }";
        let java = JavaSource::parse(src).unwrap();
        let container = java.enclosing_block(src.find("{ }").unwrap() + 1).unwrap();
        assert!(splice_declarations(src, &container, 0, &[], "    ").is_none());
    }

    #[test]
    fn test_rest_of_file_untouched() {
        let src = indoc! {r#"
            package com.example;

            class A {
                void m(Person p) {
                    int a = 1;
                    int b = 2;
                }
            }

            class B { }
        "#};
        let java = JavaSource::parse(src).unwrap();
        let caret = src.find("int b").unwrap() - 1;
        let container = java.enclosing_block(caret).unwrap();
        let index = resolve_insert_index(container.siblings(), caret);
        let splice = splice_declarations(
            src,
            &container,
            index,
            &[local("name", "p", "getName", "String")],
            "    ",
        )
        .unwrap();
        let result = apply_splice(src, &splice);
        // Everything before and after the insertion point is byte-identical.
        assert!(result.starts_with(&src[..splice.at]));
        assert!(result.ends_with(&src[splice.at..]));
    }
}
