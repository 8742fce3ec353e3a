//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{clock::SystemClock, config::EngineConfig, ports::ClockPort};
use crate::stores::{CharacterStore, MonsterStore};
use crate::use_cases;

/// Main application state.
///
/// Holds the stores and use cases. Passed to HTTP handlers via Axum state,
/// so nothing lives in process-wide globals.
pub struct App {
    pub config: EngineConfig,
    pub stores: Stores,
    pub use_cases: UseCases,
}

/// Container for shared in-memory stores.
pub struct Stores {
    pub monsters: Arc<MonsterStore>,
    pub characters: Arc<CharacterStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub monster: use_cases::MonsterUseCases,
    pub character: use_cases::CharacterUseCases,
}

impl App {
    /// Create a new App using the system clock.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a new App with an explicit clock.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn ClockPort>) -> Self {
        let monsters = Arc::new(MonsterStore::new());
        let characters = Arc::new(CharacterStore::new());

        let use_cases = UseCases {
            monster: use_cases::MonsterUseCases::new(monsters.clone()),
            character: use_cases::CharacterUseCases::new(
                monsters.clone(),
                characters.clone(),
                clock,
                config.character_file.clone(),
            ),
        };

        Self {
            config,
            stores: Stores {
                monsters,
                characters,
            },
            use_cases,
        }
    }
}
