use tree_sitter::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

/// Execute the query and return all matching capture groups.
/// Each element is `Vec<(capture_index, Node)>`.
pub fn run_query<'tree>(
    query: &Query,
    node: Node<'tree>,
    source: &[u8],
    byte_range: Option<std::ops::Range<usize>>,
) -> Vec<Vec<(u32, Node<'tree>)>> {
    let mut cursor = QueryCursor::new();
    if let Some(range) = byte_range {
        cursor.set_byte_range(range);
    }

    let mut results = Vec::new();
    let mut matches = cursor.matches(query, node, source);

    while let Some(m) = matches.next() {
        let captures: Vec<(u32, Node<'tree>)> =
            m.captures.iter().map(|c| (c.index, c.node)).collect();
        results.push(captures);
    }

    results
}

/// Find node text in a set of captures by capture index.
pub fn capture_text<'s>(
    captures: &[(u32, Node<'_>)],
    index: u32,
    source: &'s [u8],
) -> Option<&'s str> {
    captures
        .iter()
        .find(|(idx, _)| *idx == index)
        .and_then(|(_, node)| node.utf8_text(source).ok())
}

/// Find the innermost node containing `offset` whose kind is in `kinds`.
/// Uses inclusive start / exclusive end semantics matching tree-sitter.
pub fn find_deepest_by_kind<'a>(root: Node<'a>, offset: usize, kinds: &[&str]) -> Option<Node<'a>> {
    let mut result: Option<Node<'a>> = None;
    fn dfs<'a>(node: Node<'a>, offset: usize, kinds: &[&str], result: &mut Option<Node<'a>>) {
        let start = node.start_byte();
        let end = node.end_byte(); // exclusive
        if offset < start || offset >= end {
            return;
        }
        if kinds.contains(&node.kind()) {
            // Deepest (last) match wins
            *result = Some(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            dfs(child, offset, kinds, result);
        }
    }
    dfs(root, offset, kinds, &mut result);
    result
}

pub fn is_comment_kind(kind: &str) -> bool {
    kind == "line_comment" || kind == "block_comment"
}
