use tower_lsp::lsp_types::*;

use super::commands::{CMD_GENERATE_FIELDS, CMD_GENERATE_GETTERS, CMD_LIST_OWNERS};

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![
                CMD_LIST_OWNERS.to_string(),
                CMD_GENERATE_GETTERS.to_string(),
                CMD_GENERATE_FIELDS.to_string(),
            ],
            work_done_progress_options: WorkDoneProgressOptions {
                work_done_progress: None,
            },
        }),
        code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
        ..Default::default()
    }
}
