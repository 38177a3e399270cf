use serde::Deserialize;

use crate::generate::declaration::{Declaration, Expression, Modifiers, Visibility};
use crate::model::type_name::TypeName;

/// One row of the client's field table. Arrives as `executeCommand`
/// argument JSON; the shape mirrors the dialog columns.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRow {
    #[serde(default)]
    pub visibility: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default, rename = "transient")]
    pub is_transient: bool,
    #[serde(default, rename = "volatile")]
    pub is_volatile: bool,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    /// Initializer expression text; empty means no initializer.
    #[serde(default)]
    pub value: String,
}

/// Each row maps 1:1 to one declaration, in row order. The user supplies
/// names directly, so no deduplication or skipping happens here.
pub fn synthesize_fields(rows: &[FieldRow]) -> Vec<Declaration> {
    rows.iter()
        .map(|row| Declaration {
            modifiers: Modifiers {
                visibility: Visibility::parse(&row.visibility),
                is_static: row.is_static,
                is_final: row.is_final,
                is_transient: row.is_transient,
                is_volatile: row.is_volatile,
            },
            ty: TypeName::from(row.type_name.as_str()),
            name: row.name.clone(),
            init: if row.value.is_empty() {
                None
            } else {
                Some(Expression::Verbatim(row.value.clone()))
            },
        })
        .collect()
}
