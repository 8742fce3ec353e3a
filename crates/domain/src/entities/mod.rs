//! Domain entities - records authored through the form

mod monster;

pub use monster::{Action, ArmorClass, HitPoints, Monster, Save, Skill, Speed, Trait};
