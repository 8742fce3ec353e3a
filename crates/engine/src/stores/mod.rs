//! In-memory state storage modules.
//!
//! Stores own runtime collections shared between request handlers:
//! - `MonsterStore` - Submitted monsters, append-only
//! - `CharacterStore` - Homebrew documents monsters are exported into

pub mod character;
pub mod monster;

pub use character::CharacterStore;
pub use monster::MonsterStore;
