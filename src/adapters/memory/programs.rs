//! In-memory program lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId};
use crate::ports::{ProgramDefaults, ProgramLookup};

/// In-memory implementation of `ProgramLookup`.
#[derive(Default)]
pub struct InMemoryProgramLookup {
    programs: RwLock<HashMap<ProgramId, ProgramDefaults>>,
}

impl InMemoryProgramLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a program with its provisioning defaults.
    pub async fn insert(&self, program_id: ProgramId, defaults: ProgramDefaults) {
        self.programs.write().await.insert(program_id, defaults);
    }
}

#[async_trait]
impl ProgramLookup for InMemoryProgramLookup {
    async fn get_defaults(&self, program_id: &ProgramId) -> Result<ProgramDefaults, DomainError> {
        self.programs
            .read()
            .await
            .get(program_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProgramNotFound, "Program does not exist")
                    .with_detail("program_id", program_id.to_string())
            })
    }
}
