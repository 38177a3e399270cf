use crate::generate::insert_point::{Container, resolve_insert_index};
use crate::generate::names::NameRegistry;
use crate::model::candidate::{CandidateValue, sort_pool};

/// Everything one invocation needs, captured at entry and dropped after the
/// edit is produced. The pipeline can be driven from tests with nothing but
/// a parsed snippet and one of these.
#[derive(Debug)]
pub struct GenerateSession {
    pub caret: usize,
    pub container: Container,
    pub pool: Vec<CandidateValue>,
    pub registry: NameRegistry,
}

impl GenerateSession {
    pub fn new(caret: usize, container: Container, mut pool: Vec<CandidateValue>) -> Self {
        sort_pool(&mut pool);
        Self {
            caret,
            container,
            pool,
            registry: NameRegistry::new(),
        }
    }

    /// The splice index for this session. Pure in the captured inputs, so
    /// repeated calls agree.
    pub fn insert_index(&self) -> usize {
        resolve_insert_index(self.container.siblings(), self.caret)
    }
}
