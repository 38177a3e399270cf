use std::sync::Arc;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info};

use super::capabilities::server_capabilities;
use super::commands::{
    CMD_GENERATE_FIELDS, CMD_GENERATE_GETTERS, CMD_LIST_OWNERS, GenerateFieldsParams,
    GenerateGettersParams, ListOwnersParams, handle_generate_fields, handle_generate_getters,
    handle_list_owners,
};
use super::config::JavaCodegenConfig;
use super::converters::position_to_offset;
use crate::error::GenerateError;
use crate::language::java::JavaSource;
use crate::workspace::{Workspace, document::Document};

pub struct Backend {
    client: Client,
    pub workspace: Arc<Workspace>,
    pub config: tokio::sync::RwLock<JavaCodegenConfig>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            workspace: Arc::new(Workspace::new()),
            config: tokio::sync::RwLock::new(JavaCodegenConfig::default()),
        }
    }

    fn is_supported(lang_id: &str) -> bool {
        lang_id == "java"
    }

    pub async fn update_config(&self, params: serde_json::Value) {
        let mut config_guard = self.config.write().await;
        match serde_json::from_value::<JavaCodegenConfig>(params) {
            Ok(new_config) => {
                info!(config = ?new_config, "config updated");
                *config_guard = new_config;
            }
            Err(e) => error!(error = %e, "failed to parse incoming config"),
        }
    }

    /// Decode the conventional single-object argument list of an
    /// `executeCommand` request.
    fn decode_args<T: serde::de::DeserializeOwned>(
        mut arguments: Vec<serde_json::Value>,
    ) -> Result<T, GenerateError> {
        if arguments.is_empty() {
            return Err(GenerateError::InvalidArguments("missing argument".into()));
        }
        serde_json::from_value(arguments.remove(0))
            .map_err(|e| GenerateError::InvalidArguments(e.to_string()))
    }

    async fn apply(&self, edit: Option<WorkspaceEdit>) {
        let Some(edit) = edit else {
            debug!("nothing to apply");
            return;
        };
        match self.client.apply_edit(edit).await {
            Ok(response) if !response.applied => {
                error!(reason = ?response.failure_reason, "client rejected the edit")
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "applyEdit request failed"),
        }
    }
}

fn to_lsp_error(e: GenerateError) -> tower_lsp::jsonrpc::Error {
    tower_lsp::jsonrpc::Error {
        code: tower_lsp::jsonrpc::ErrorCode::InvalidParams,
        message: e.to_string().into(),
        data: None,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        info!("LSP initialize");
        if let Some(options) = params.initialization_options {
            self.update_config(options).await;
        }
        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "java-codegen".into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
            capabilities: server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("LSP initialized");
        self.client
            .log_message(MessageType::INFO, "java-codegen ready")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        info!("LSP shutdown");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let td = params.text_document;
        if !Self::is_supported(&td.language_id) {
            return;
        }
        info!(uri = %td.uri, "did_open");
        self.workspace
            .documents
            .open(Document::new(td.uri.clone(), td.version, td.text.clone()));
        self.workspace
            .reindex_document(td.uri.as_str(), &td.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = &params.text_document.uri;
        // Full sync: the last change carries the whole document
        let content = match params.content_changes.into_iter().last() {
            Some(c) => c.text,
            None => return,
        };
        self.workspace
            .documents
            .update(uri, params.text_document.version, content.clone());
        self.workspace.reindex_document(uri.as_str(), &content).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = &params.text_document.uri;
        info!(uri = %uri, "did_close");
        self.workspace.documents.close(uri);
        // Index entries stay: the user may only have closed the tab
    }

    /// Advertise the two generators when the caret context admits them:
    /// getter invocations need a statement block, fields need a class body.
    async fn code_action(&self, params: CodeActionParams) -> LspResult<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;
        let Some(doc) = self.workspace.documents.get(&uri) else {
            return Ok(None);
        };
        let Some(java) = JavaSource::parse(doc.content.clone()) else {
            return Ok(None);
        };
        let Some(caret) = position_to_offset(&doc.content, params.range.start) else {
            return Ok(None);
        };

        let position_arg = serde_json::json!({ "uri": uri, "position": params.range.start });
        let mut actions: CodeActionResponse = Vec::new();
        if java.enclosing_block(caret).is_some() {
            actions.push(CodeActionOrCommand::Command(Command {
                title: "Generate getter invocations…".to_string(),
                command: CMD_GENERATE_GETTERS.to_string(),
                arguments: Some(vec![position_arg.clone()]),
            }));
        }
        if java.enclosing_class_body(caret).is_some() {
            actions.push(CodeActionOrCommand::Command(Command {
                title: "Generate fields…".to_string(),
                command: CMD_GENERATE_FIELDS.to_string(),
                arguments: Some(vec![position_arg]),
            }));
        }
        Ok(if actions.is_empty() {
            None
        } else {
            Some(actions)
        })
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<serde_json::Value>> {
        debug!(command = %params.command, "execute_command");
        match params.command.as_str() {
            CMD_LIST_OWNERS => {
                let args: ListOwnersParams =
                    Self::decode_args(params.arguments).map_err(to_lsp_error)?;
                let owners = handle_list_owners(&self.workspace, args)
                    .await
                    .map_err(to_lsp_error)?;
                Ok(owners.map(|o| serde_json::to_value(o).unwrap_or_default()))
            }
            CMD_GENERATE_GETTERS => {
                let args: GenerateGettersParams =
                    Self::decode_args(params.arguments).map_err(to_lsp_error)?;
                let config = self.config.read().await.clone();
                let edit = handle_generate_getters(&self.workspace, &config, args)
                    .await
                    .map_err(to_lsp_error)?;
                self.apply(edit).await;
                Ok(None)
            }
            CMD_GENERATE_FIELDS => {
                let args: GenerateFieldsParams =
                    Self::decode_args(params.arguments).map_err(to_lsp_error)?;
                let config = self.config.read().await.clone();
                let edit = handle_generate_fields(&self.workspace, &config, args)
                    .await
                    .map_err(to_lsp_error)?;
                self.apply(edit).await;
                Ok(None)
            }
            other => {
                debug!(command = other, "unknown command");
                Ok(None)
            }
        }
    }
}
