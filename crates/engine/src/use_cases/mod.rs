//! Use cases - User story orchestration.
//!
//! - `monster` - Form submission to stored stat block
//! - `character` - Homebrew document lookup and export

pub mod character;
pub mod monster;

pub use character::CharacterUseCases;
pub use monster::MonsterUseCases;
