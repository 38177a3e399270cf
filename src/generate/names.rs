use tracing::warn;

/// Derive a local-variable name from a getter method name:
/// `"getName"` → `"name"`, `"isActive"` → `"active"`.
///
/// Returns None when the method should be skipped: no recognized prefix, an
/// empty residual (`"get"`, `"is"`), or the residual `class` (so
/// `getClass()` never becomes `Object class = ...`).
pub fn getter_local_name(method_name: &str) -> Option<String> {
    let derived = if method_name.starts_with("get") && method_name.len() > 3 {
        decapitalize(&method_name[3..])
    } else if method_name.starts_with("is") && method_name.len() > 2 {
        decapitalize(&method_name[2..])
    } else {
        String::new()
    };
    if derived.is_empty() || derived == "class" {
        None
    } else {
        Some(derived)
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// The ordered list of identifiers emitted during one edit session. Lives
/// for a single invocation and is dropped with the session.
#[derive(Debug, Default)]
pub struct NameRegistry {
    emitted: Vec<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.emitted
    }

    /// Return `candidate`, suffixed if needed so it collides with nothing
    /// emitted so far, and record the result.
    pub fn fresh_name(&mut self, candidate: &str) -> String {
        let name = self.dedup(candidate);
        self.emitted.push(name.clone());
        name
    }

    fn dedup(&self, candidate: &str) -> String {
        if !self.emitted.iter().any(|n| n == candidate) {
            return candidate.to_string();
        }
        // Every prior occurrence of the shape `candidate\d*`, sorted as
        // strings. The lexicographic sort can misorder suffixes at 10+
        // occurrences ("x10" < "x2"); that ordering is part of the observed
        // behavior and is kept as-is.
        let mut occurrences: Vec<&String> = self
            .emitted
            .iter()
            .filter(|n| has_numeric_suffix(n, candidate))
            .collect();
        if occurrences.is_empty() {
            return candidate.to_string();
        }
        occurrences.sort();
        let last = occurrences[occurrences.len() - 1];
        let suffix = &last[candidate.len()..];
        if suffix.is_empty() {
            return format!("{}1", candidate);
        }
        match suffix.parse::<u64>() {
            Ok(serial) => format!("{}{}", candidate, serial + 1),
            Err(e) => {
                warn!(candidate, suffix, error = %e, "numeric suffix did not parse");
                candidate.to_string()
            }
        }
    }
}

fn has_numeric_suffix(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}
