//! Character document storage.

use bestiary_domain::{Character, Monster};
use tokio::sync::Mutex;

use crate::infrastructure::ports::ClockPort;
use crate::use_cases::character::get_or_create_character;

/// Holds the one document that exports write into.
///
/// The document is built on first use and then reused, so repeated exports
/// keep the same metadata and the store never grows.
pub struct CharacterStore {
    current: Mutex<Option<Character>>,
}

impl CharacterStore {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    pub fn with_current(character: Character) -> Self {
        Self {
            current: Mutex::new(Some(character)),
        }
    }

    /// Replace the monsters of the current document and return a copy of it.
    ///
    /// When no document exists yet one is stamped from `clock`.
    pub async fn update_current(
        &self,
        label: &str,
        clock: &dyn ClockPort,
        monsters: Vec<Monster>,
    ) -> Character {
        let mut guard = self.current.lock().await;
        let mut character = match guard.take() {
            Some(character) => {
                tracing::debug!(label = %label, "Reusing current character");
                character
            }
            None => get_or_create_character(label, &[], clock),
        };
        character.monsters = monsters;
        *guard = Some(character.clone());
        character
    }

    /// The current document, if one has been built.
    pub async fn current(&self) -> Option<Character> {
        self.current.lock().await.clone()
    }
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}
