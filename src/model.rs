pub mod candidate;
pub mod index;
pub mod type_name;

pub use candidate::{CandidateKind, CandidateValue};
pub use index::{ClassOrigin, ClassSummary, FieldSig, MethodSig, ParamSig, TypeIndex};
pub use type_name::{PrimitiveKind, TypeName};
