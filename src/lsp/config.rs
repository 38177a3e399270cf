use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaCodegenConfig {
    /// Spaces per indentation level for generated lines.
    pub indent_width: usize,
}

impl Default for JavaCodegenConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl JavaCodegenConfig {
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
