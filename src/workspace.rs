use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::language::java::JavaSource;
use crate::model::index::{ClassOrigin, TypeIndex};
use document::DocumentStore;

pub mod document;

/// Shared server state: open documents plus the class table built from
/// them. The index is re-fed per document on open/change, replacing that
/// document's previous summaries.
pub struct Workspace {
    pub documents: DocumentStore,
    pub index: Arc<RwLock<TypeIndex>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            documents: DocumentStore::new(),
            index: Arc::new(RwLock::new(TypeIndex::new())),
        }
    }

    /// Parse `content` and replace the index entries that came from `uri`.
    pub async fn reindex_document(&self, uri: &str, content: &str) {
        let classes = match JavaSource::parse(content) {
            Some(java) => java.class_summaries(uri),
            None => vec![],
        };
        debug!(uri, count = classes.len(), "reindexed document");
        self.index
            .write()
            .await
            .update_source(ClassOrigin::SourceFile(Arc::from(uri)), classes);
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
