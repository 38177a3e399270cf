use std::collections::HashMap;

use serde::Deserialize;
use tower_lsp::lsp_types::{Position, Url, WorkspaceEdit};
use tracing::debug;

use super::config::JavaCodegenConfig;
use super::converters::{position_to_offset, splice_to_text_edit};
use crate::error::{GenerateError, Result};
use crate::generate::fields::{FieldRow, synthesize_fields};
use crate::generate::getter_locals::synthesize_getter_locals;
use crate::generate::session::GenerateSession;
use crate::language::java::{JavaSource, parse_type_text};
use crate::model::candidate::{CandidateValue, sort_pool};
use crate::rewrite::splice_declarations;
use crate::workspace::Workspace;

pub const CMD_LIST_OWNERS: &str = "java-codegen.listOwners";
pub const CMD_GENERATE_GETTERS: &str = "java-codegen.generateGetterInvocations";
pub const CMD_GENERATE_FIELDS: &str = "java-codegen.generateFields";

#[derive(Debug, Deserialize)]
pub struct ListOwnersParams {
    pub uri: Url,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
pub struct GenerateGettersParams {
    pub uri: Url,
    pub position: Position,
    /// Name of the field/local/parameter the user picked as owner.
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFieldsParams {
    pub uri: Url,
    pub position: Position,
    pub rows: Vec<FieldRow>,
}

struct DocContext {
    java: JavaSource,
    caret: usize,
}

/// The precondition gate: an untracked document or an out-of-range position
/// is a command error; everything past this point degrades to no-ops.
async fn doc_context(workspace: &Workspace, uri: &Url, position: Position) -> Result<DocContext> {
    let doc = workspace
        .documents
        .get(uri)
        .ok_or_else(|| GenerateError::DocumentNotOpen(uri.to_string()))?;
    let java = JavaSource::parse(doc.content.clone()).ok_or(GenerateError::Unparseable)?;
    let caret = position_to_offset(&doc.content, position).ok_or(
        GenerateError::PositionOutOfBounds {
            line: position.line,
            character: position.character,
        },
    )?;
    Ok(DocContext { java, caret })
}

/// Candidate owners for the client's picker: every field, parameter, and
/// local visible at the caret, sorted by name. None when the caret is not
/// inside a statement block, where getter generation would be a no-op.
pub async fn handle_list_owners(
    workspace: &Workspace,
    params: ListOwnersParams,
) -> Result<Option<Vec<CandidateValue>>> {
    let ctx = doc_context(workspace, &params.uri, params.position).await?;
    if ctx.java.enclosing_block(ctx.caret).is_none() {
        debug!(uri = %params.uri, "caret not inside a block, no owners");
        return Ok(None);
    }
    let mut pool = ctx.java.collect_candidates(ctx.caret);
    sort_pool(&mut pool);
    Ok(Some(pool))
}

/// Synthesize one local per accessor of the chosen owner and splice the
/// batch into the enclosing block as a single insertion.
pub async fn handle_generate_getters(
    workspace: &Workspace,
    config: &JavaCodegenConfig,
    params: GenerateGettersParams,
) -> Result<Option<WorkspaceEdit>> {
    let ctx = doc_context(workspace, &params.uri, params.position).await?;
    let container = match ctx.java.enclosing_block(ctx.caret) {
        Some(c) => c,
        None => {
            debug!(uri = %params.uri, "caret not inside a block, skipping");
            return Ok(None);
        }
    };

    let pool = ctx.java.collect_candidates(ctx.caret);
    let mut session = GenerateSession::new(ctx.caret, container, pool);
    let owner = match session
        .pool
        .iter()
        .find(|c| c.name.as_ref() == params.owner)
        .cloned()
    {
        Some(o) => o,
        None => {
            debug!(owner = %params.owner, "selected owner not in scope, skipping");
            return Ok(None);
        }
    };

    let index = workspace.index.read().await;
    let declarations = synthesize_getter_locals(&mut session, &owner, &index);
    drop(index);

    let splice = match splice_declarations(
        ctx.java.text(),
        &session.container,
        session.insert_index(),
        &declarations,
        &config.indent_unit(),
    ) {
        Some(s) => s,
        None => return Ok(None),
    };
    Ok(Some(single_edit(&params.uri, ctx.java.text(), &splice)))
}

/// Turn dialog rows into field declarations and splice them into the
/// enclosing class body, row order preserved.
pub async fn handle_generate_fields(
    workspace: &Workspace,
    config: &JavaCodegenConfig,
    params: GenerateFieldsParams,
) -> Result<Option<WorkspaceEdit>> {
    if params.rows.is_empty() {
        // Dialog cancelled, nothing to do
        return Ok(None);
    }
    let ctx = doc_context(workspace, &params.uri, params.position).await?;
    let container = match ctx.java.enclosing_class_body(ctx.caret) {
        Some(c) => c,
        None => {
            debug!(uri = %params.uri, "caret not inside a class body, skipping");
            return Ok(None);
        }
    };

    let rows: Vec<FieldRow> = params.rows.into_iter().map(normalize_row_type).collect();
    let declarations = synthesize_fields(&rows);

    let session = GenerateSession::new(ctx.caret, container, vec![]);
    let splice = match splice_declarations(
        ctx.java.text(),
        &session.container,
        session.insert_index(),
        &declarations,
        &config.indent_unit(),
    ) {
        Some(s) => s,
        None => return Ok(None),
    };
    Ok(Some(single_edit(&params.uri, ctx.java.text(), &splice)))
}

/// Run the row's type text through the type parser; text that does not parse
/// as a type is kept verbatim, matching the original's unvalidated dialog.
fn normalize_row_type(mut row: FieldRow) -> FieldRow {
    match parse_type_text(&row.type_name) {
        Some(ty) => row.type_name = ty.as_str().to_string(),
        None => debug!(text = %row.type_name, "field type text kept verbatim"),
    }
    row
}

fn single_edit(uri: &Url, source: &str, splice: &crate::rewrite::Splice) -> WorkspaceEdit {
    let edit = splice_to_text_edit(source, splice);
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), vec![edit]);
    WorkspaceEdit {
        changes: Some(changes),
        document_changes: None,
        change_annotations: None,
    }
}
