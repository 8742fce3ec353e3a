//! Bestiary domain - the monster stat block and the homebrew document that carries it.
//!
//! Pure data: serde derives and small helpers, no I/O.

pub mod aggregates;
pub mod entities;

pub use aggregates::{Character, CharacterState, Meta, Source};
pub use entities::{Action, ArmorClass, HitPoints, Monster, Save, Skill, Speed, Trait};
