use serde::Serialize;
use std::sync::Arc;

use crate::model::type_name::TypeName;

/// Where a candidate value was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Field,
    Parameter,
    Local,
}

/// A field, parameter, or local variable visible at the caret, usable as the
/// owner of a getter batch or as a call argument. The pool is built once per
/// invocation, sorted by name, and read-only thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateValue {
    pub name: Arc<str>,
    #[serde(serialize_with = "serialize_type")]
    pub ty: TypeName,
    pub kind: CandidateKind,
}

fn serialize_type<S: serde::Serializer>(ty: &TypeName, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(ty.as_str())
}

impl CandidateValue {
    pub fn new(name: impl Into<Arc<str>>, ty: impl Into<TypeName>, kind: CandidateKind) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            kind,
        }
    }
}

/// Sort a freshly collected pool by simple name. Candidate order is part of
/// the resolution contract: the no-hint path takes the first assignable
/// entry, so the upstream sort must happen exactly once.
pub fn sort_pool(pool: &mut [CandidateValue]) {
    pool.sort_by(|a, b| a.name.cmp(&b.name));
}
