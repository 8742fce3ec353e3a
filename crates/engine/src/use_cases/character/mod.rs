//! Character use cases.
//!
//! Resolves the homebrew document that monsters get exported into and
//! flushes it to disk.

mod export;

pub use export::{ExportCharacter, ExportError, ExportSummary};

use std::path::PathBuf;
use std::sync::Arc;

use bestiary_domain::{Character, Source};

use crate::infrastructure::ports::ClockPort;
use crate::stores::{CharacterStore, MonsterStore};

const SOURCE_JSON: &str = "Malgorgon";
const SOURCE_ABBREVIATION: &str = "MG";
const SOURCE_VERSION: &str = "unknown";
const SOURCE_AUTHOR: &str = "Krzysztof";

/// The source entry stamped on every new document.
pub fn default_source() -> Source {
    Source {
        json: SOURCE_JSON.to_string(),
        abbreviation: SOURCE_ABBREVIATION.to_string(),
        version: SOURCE_VERSION.to_string(),
        authors: vec![SOURCE_AUTHOR.to_string()],
        converted_by: vec![SOURCE_AUTHOR.to_string()],
    }
}

/// Return the first draft character, or a newly stamped one.
///
/// `characters` is only read: a newly built character is *not* added to it.
/// [`crate::stores::CharacterStore`] keeps the document it builds. `label`
/// only appears in logs.
pub fn get_or_create_character(
    label: &str,
    characters: &[Character],
    clock: &dyn ClockPort,
) -> Character {
    if let Some(draft) = characters.iter().find(|c| c.is_draft()) {
        tracing::info!(label = %label, "Returning existing character object");
        return draft.clone();
    }

    let now = clock.now().timestamp();
    let character = Character::stamped(now, vec![default_source()]);
    tracing::info!(
        label = %label,
        hash = %character.meta.date_last_modified_hash,
        "Returning newly created character object"
    );
    character
}

/// Container for character use cases.
pub struct CharacterUseCases {
    pub export: ExportCharacter,
}

impl CharacterUseCases {
    pub fn new(
        monsters: Arc<MonsterStore>,
        characters: Arc<CharacterStore>,
        clock: Arc<dyn ClockPort>,
        character_file: PathBuf,
    ) -> Self {
        Self {
            export: ExportCharacter::new(monsters, characters, clock, character_file),
        }
    }
}
