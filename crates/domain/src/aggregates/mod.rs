//! Aggregate roots - domain objects that own their related data
//!
//! A `Character` owns its monster list; monsters are cloned in when the
//! document is assembled for export.

pub mod character;

pub use character::{Character, CharacterState, Meta, Source};
