//! Monster use cases.
//!
//! Turns a submitted authoring form into a stored monster.

mod form;

pub use form::{decode_urlencoded, parse_int, parse_monster, FormDecodeError, FormFields};

use std::sync::Arc;

use bestiary_domain::Monster;

use crate::stores::MonsterStore;

/// Result of adding a monster.
#[derive(Debug, Clone)]
pub struct AddMonsterResult {
    pub monster: Monster,
    /// Number of stored monsters after the append.
    pub count: usize,
}

/// Parses a form submission and appends the monster to the store.
pub struct AddMonster {
    monsters: Arc<MonsterStore>,
}

impl AddMonster {
    pub fn new(monsters: Arc<MonsterStore>) -> Self {
        Self { monsters }
    }

    pub async fn execute(&self, form: &FormFields) -> AddMonsterResult {
        // Parse before taking the lock; only the push is serialized.
        let monster = parse_monster(form);
        let count = self.monsters.append(monster.clone()).await;
        tracing::info!(
            name = %monster.name,
            count,
            "Monster added"
        );
        AddMonsterResult { monster, count }
    }
}

/// Container for monster use cases.
pub struct MonsterUseCases {
    pub add: AddMonster,
}

impl MonsterUseCases {
    pub fn new(monsters: Arc<MonsterStore>) -> Self {
        Self {
            add: AddMonster::new(monsters),
        }
    }
}
