pub mod arguments;
pub mod declaration;
pub mod fields;
pub mod getter_locals;
pub mod insert_point;
pub mod names;
pub mod session;

pub use arguments::ArgumentResolver;
pub use declaration::{Declaration, Expression, Modifiers, Visibility};
pub use fields::{FieldRow, synthesize_fields};
pub use getter_locals::synthesize_getter_locals;
pub use insert_point::{Container, Span, resolve_insert_index};
pub use names::{NameRegistry, getter_local_name};
pub use session::GenerateSession;
