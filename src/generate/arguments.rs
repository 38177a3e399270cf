use crate::generate::declaration::Expression;
use crate::model::candidate::CandidateValue;
use crate::model::index::TypeIndex;
use crate::model::type_name::{PrimitiveKind, TypeName};

/// Exact-type matches beat merely-assignable ones regardless of how well
/// their names fit the hint.
const SAME_TYPE_BONUS: i32 = 1000;

/// Finds the best locally-available value for a call argument, falling back
/// to a canonical default literal when nothing in scope fits.
pub struct ArgumentResolver<'a> {
    pool: &'a [CandidateValue],
    index: &'a TypeIndex,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(pool: &'a [CandidateValue], index: &'a TypeIndex) -> Self {
        Self { pool, index }
    }

    pub fn resolve(&self, param_ty: &TypeName, name_hint: Option<&str>) -> Expression {
        match self.best_candidate(param_ty, name_hint) {
            Some(candidate) => Expression::identifier(candidate.name.clone()),
            None => default_literal(param_ty),
        }
    }

    /// The assignable candidate closest to the name hint. Without a hint,
    /// the first assignable entry in pool order wins immediately; the pool
    /// is pre-sorted by name, so the result is deterministic per source file.
    pub fn best_candidate(
        &self,
        param_ty: &TypeName,
        name_hint: Option<&str>,
    ) -> Option<&'a CandidateValue> {
        let mut closest: Option<&CandidateValue> = None;
        let mut distance = i32::MAX;
        for candidate in self.pool {
            if !self.index.is_assignable(&candidate.ty, param_ty) {
                continue;
            }
            let hint = match name_hint {
                None => return Some(candidate),
                Some(h) => h,
            };
            let mut d = levenshtein(
                &candidate.name.to_lowercase(),
                &hint.to_lowercase(),
            ) as i32;
            if self.index.is_same_type(&candidate.ty, param_ty) {
                d -= SAME_TYPE_BONUS;
            }
            // Strict `<`: the first candidate at the minimum distance keeps
            // the win, in pool iteration order.
            if d < distance {
                distance = d;
                closest = Some(candidate);
            }
        }
        closest
    }
}

/// Canonical per-kind default when no candidate is assignable. Reference
/// types (and `char`, which has no canonical literal here) yield `null`.
pub fn default_literal(ty: &TypeName) -> Expression {
    let literal = match ty.primitive_kind() {
        Some(PrimitiveKind::Boolean) => "false",
        Some(PrimitiveKind::Byte) | Some(PrimitiveKind::Short) | Some(PrimitiveKind::Int) => "0",
        Some(PrimitiveKind::Long) => "0L",
        Some(PrimitiveKind::Float) => "0.0F",
        Some(PrimitiveKind::Double) => "0.0",
        _ => "null",
    };
    Expression::Literal(literal)
}

/// Edit distance between two strings, on chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::candidate::CandidateKind;

    fn pool(entries: &[(&str, &str)]) -> Vec<CandidateValue> {
        entries
            .iter()
            .map(|(name, ty)| CandidateValue::new(*name, *ty, CandidateKind::Local))
            .collect()
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", "ab"), 1);
        assert_eq!(levenshtein("abc", "abd"), 1);
        assert_eq!(levenshtein("name", "nme"), 1);
    }

    #[test]
    fn test_no_candidate_int_falls_back_to_zero() {
        let idx = TypeIndex::new();
        let p = pool(&[("flag", "boolean")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        assert_eq!(
            resolver.resolve(&TypeName::from("int"), Some("count")),
            Expression::Literal("0")
        );
    }

    #[test]
    fn test_boolean_falls_back_to_false() {
        let idx = TypeIndex::new();
        let p = pool(&[]);
        let resolver = ArgumentResolver::new(&p, &idx);
        assert_eq!(
            resolver.resolve(&TypeName::from("boolean"), None),
            Expression::Literal("false")
        );
    }

    #[test]
    fn test_default_literals_per_kind() {
        assert_eq!(default_literal(&TypeName::from("long")), Expression::Literal("0L"));
        assert_eq!(default_literal(&TypeName::from("float")), Expression::Literal("0.0F"));
        assert_eq!(default_literal(&TypeName::from("double")), Expression::Literal("0.0"));
        assert_eq!(default_literal(&TypeName::from("byte")), Expression::Literal("0"));
        assert_eq!(default_literal(&TypeName::from("short")), Expression::Literal("0"));
        assert_eq!(default_literal(&TypeName::from("String")), Expression::Literal("null"));
        assert_eq!(default_literal(&TypeName::from("char")), Expression::Literal("null"));
    }

    #[test]
    fn test_hint_prefers_similar_name() {
        let idx = TypeIndex::new();
        let p = pool(&[("alpha", "String"), ("title", "String")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        let best = resolver
            .best_candidate(&TypeName::from("String"), Some("titel"))
            .unwrap();
        assert_eq!(best.name.as_ref(), "title");
    }

    fn class(name: &str, super_name: Option<&str>) -> crate::model::index::ClassSummary {
        use std::sync::Arc;
        crate::model::index::ClassSummary {
            name: Arc::from(name),
            qualified: Arc::from(name),
            package: None,
            super_name: super_name.map(Arc::from),
            interfaces: vec![],
            methods: vec![],
            fields: vec![],
            origin: crate::model::index::ClassOrigin::SourceFile(Arc::from("t.java")),
        }
    }

    #[test]
    fn test_exact_type_beats_name_similarity() {
        let mut idx = TypeIndex::new();
        idx.add_classes(vec![class("Sub", Some("Base")), class("Base", None)]);
        // "value" (type Sub, assignable to Base) matches the hint exactly,
        // but "zz" is of exact type Base: the 1000-point bonus outweighs any
        // name distance.
        let p = pool(&[("value", "Sub"), ("zz", "Base")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        let best = resolver
            .best_candidate(&TypeName::from("Base"), Some("value"))
            .unwrap();
        assert_eq!(best.name.as_ref(), "zz");
    }

    #[test]
    fn test_no_hint_returns_first_assignable_in_pool_order() {
        let idx = TypeIndex::new();
        let p = pool(&[("a", "int"), ("b", "String"), ("c", "String")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        let best = resolver
            .best_candidate(&TypeName::from("String"), None)
            .unwrap();
        assert_eq!(best.name.as_ref(), "b");
    }

    #[test]
    fn test_first_at_minimum_distance_wins_ties() {
        let idx = TypeIndex::new();
        let p = pool(&[("ab", "String"), ("ba", "String")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        // Both are distance 2 from "xy"; the earlier pool entry keeps the win.
        let best = resolver
            .best_candidate(&TypeName::from("String"), Some("xy"))
            .unwrap();
        assert_eq!(best.name.as_ref(), "ab");
    }

    #[test]
    fn test_boxed_candidate_assignable_to_primitive_param() {
        let idx = TypeIndex::new();
        let p = pool(&[("boxed", "Integer")]);
        let resolver = ArgumentResolver::new(&p, &idx);
        let best = resolver.best_candidate(&TypeName::from("int"), Some("n"));
        assert!(best.is_some(), "Integer should satisfy an int parameter");
    }
}
