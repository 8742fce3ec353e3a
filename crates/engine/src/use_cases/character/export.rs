//! Flush the current character, with every stored monster, to disk.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::persistence::{write_to_file, PersistenceError};
use crate::infrastructure::ports::ClockPort;
use crate::stores::{CharacterStore, MonsterStore};

/// Errors that can occur while exporting a character.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Export task failed: {0}")]
    Task(String),
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub path: PathBuf,
    pub monster_count: usize,
    pub bytes: usize,
    pub date_last_modified_hash: String,
}

/// Serializes the resolved character document to the configured file.
pub struct ExportCharacter {
    monsters: Arc<MonsterStore>,
    characters: Arc<CharacterStore>,
    clock: Arc<dyn ClockPort>,
    path: PathBuf,
}

impl ExportCharacter {
    pub fn new(
        monsters: Arc<MonsterStore>,
        characters: Arc<CharacterStore>,
        clock: Arc<dyn ClockPort>,
        path: PathBuf,
    ) -> Self {
        Self {
            monsters,
            characters,
            clock,
            path,
        }
    }

    pub async fn execute(&self) -> Result<ExportSummary, ExportError> {
        let label = self.path.display().to_string();
        // Snapshot under the store lock so an in-flight append is either fully in or out.
        let monsters = self.monsters.snapshot().await;
        let character = self
            .characters
            .update_current(&label, self.clock.as_ref(), monsters)
            .await;

        let data = serde_json::to_vec_pretty(&character)?;
        let summary = ExportSummary {
            path: self.path.clone(),
            monster_count: character.monsters.len(),
            bytes: data.len(),
            date_last_modified_hash: character.meta.date_last_modified_hash,
        };

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_to_file(path, &data))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;

        tracing::info!(
            path = %label,
            monsters = summary.monster_count,
            bytes = summary.bytes,
            "Exported character"
        );
        Ok(summary)
    }
}
